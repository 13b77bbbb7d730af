use super::Room;
use crate::error::RoomError;
use crate::protocol::ServerMessage;
use crate::types::*;

impl Room {
    /// Register a player. Only possible while the room is in the lobby.
    pub fn join(&mut self, player_id: PlayerId, name: String) -> Result<(), RoomError> {
        if self.phase != GamePhase::Lobby {
            return Err(RoomError::GameInProgress);
        }
        if self.player(&player_id).is_some() {
            return Err(RoomError::DuplicatePlayer);
        }
        if self.players.len() >= self.config.max_players {
            return Err(RoomError::RoomFull);
        }

        let name: String = name.trim().chars().take(self.config.max_name_chars).collect();
        if name.is_empty() {
            return Err(RoomError::InvalidName);
        }

        tracing::info!("Player {} joined as {:?}", player_id, name);
        self.players.push(Player::new(player_id.clone(), name.clone()));

        let player_count = self.players.len();
        self.broadcast(ServerMessage::PlayerJoined {
            player_id,
            name,
            player_count,
        });
        Ok(())
    }

    /// Remove a disconnected player. Mid-game this can end the game when too
    /// few live players remain or the impostor is gone; otherwise the current
    /// step is re-checked since the leaver no longer holds it up.
    pub fn leave(&mut self, player_id: &str) {
        let Some(pos) = self.players.iter().position(|p| p.id == player_id) else {
            return;
        };
        let player = self.players.remove(pos);
        tracing::info!("Player {} left in {:?}", player_id, self.phase);

        let player_count = self.players.len();
        self.broadcast(ServerMessage::PlayerLeft {
            player_id: player.id.clone(),
            player_count,
        });

        if self.phase == GamePhase::Lobby {
            return;
        }
        if self.phase == GamePhase::GameOver {
            self.departed.push(player);
            return;
        }

        self.round.forget_player(player_id);
        let was_live_impostor = player.is_live() && player.is_impostor;
        let was_live = player.is_live();
        self.departed.push(player);

        // A running game always has exactly one live impostor
        if was_live_impostor {
            tracing::info!("Impostor disconnected, team wins by default");
            self.end_game(Winner::Team);
            return;
        }
        if was_live && self.live_count() < super::final_round::FINAL_ROUND_SIZE {
            tracing::info!("Too few players left ({}), team wins", self.live_count());
            self.end_game(Winner::Team);
            return;
        }

        match self.phase {
            GamePhase::Questionnaire => self.check_questionnaire_complete(),
            GamePhase::Trivia => self.check_trivia_complete(),
            GamePhase::Voting => self.check_voting_complete(),
            GamePhase::FinalRound => self.check_final_round(),
            _ => {}
        }
    }

    /// True when no connected players remain
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
