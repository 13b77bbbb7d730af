use super::{deadline_after, Room, TimerKind};
use crate::error::RoomError;
use crate::protocol::ServerMessage;
use crate::types::*;
use std::time::Duration;

impl Room {
    /// Check if a phase transition is valid
    fn is_valid_phase_transition(from: GamePhase, to: GamePhase) -> bool {
        use GamePhase::*;

        match (from, to) {
            // Normal forward flow
            (Lobby, Questionnaire) => true,
            (Questionnaire, Trivia) => true,
            (Trivia, Discussion) => true,
            (Discussion, Voting) => true,
            (Voting, Elimination) => true,

            // After an elimination: next round or showdown
            (Elimination, Questionnaire) => true,
            (Elimination, FinalRound) => true,

            // Any running game can end (impostor caught, disconnects, handshake)
            (from, GameOver) => from.is_in_progress(),

            _ => false,
        }
    }

    /// Move to `to`, cancelling every outstanding timer first. A timed phase
    /// schedules its own timer and publishes the deadline.
    pub(super) fn transition(
        &mut self,
        to: GamePhase,
        timer: Option<(TimerKind, Duration)>,
    ) -> bool {
        if !Self::is_valid_phase_transition(self.phase, to) {
            tracing::error!("Invalid phase transition from {:?} to {:?}", self.phase, to);
            return false;
        }

        self.cancel_timers();
        tracing::info!(round = self.round.number, "Phase {:?} -> {:?}", self.phase, to);
        self.phase = to;
        self.phase_deadline = timer.and_then(|(_, after)| deadline_after(after));

        self.broadcast(ServerMessage::Phase {
            phase: to,
            round_no: self.round.number,
            server_now: chrono::Utc::now().to_rfc3339(),
            deadline: self.phase_deadline.clone(),
        });

        if let Some((kind, after)) = timer {
            self.schedule(kind, after);
        }
        true
    }

    /// Start the game from the lobby. The only action with a user-facing
    /// rejection: the player count must be within the configured bounds.
    pub fn start_game(&mut self, player_id: &str) -> Result<(), RoomError> {
        if self.phase != GamePhase::Lobby || self.player(player_id).is_none() {
            tracing::debug!("Ignoring start_game from {} in {:?}", player_id, self.phase);
            return Ok(());
        }

        let count = self.players.len();
        let (min, max) = (self.config.min_players, self.config.max_players);
        if count < min || count > max {
            return Err(RoomError::InvalidPlayerCount { count, min, max });
        }

        tracing::info!("Game started by {} with {} players", player_id, count);
        self.start_round();
        Ok(())
    }

    /// Called by the runtime when a scheduled timer elapses. Timers the room
    /// no longer expects (cancelled by a transition) are ignored.
    pub fn fire_timer(&mut self, kind: TimerKind) {
        if !self.pending_timers.remove(&kind) {
            tracing::debug!("Ignoring stale timer {:?} in {:?}", kind, self.phase);
            return;
        }

        match kind {
            TimerKind::QuestionnaireSettle => self.enter_trivia(),
            TimerKind::TriviaAdvance => self.advance_trivia(),
            TimerKind::TriviaSettle => self.enter_discussion(),
            TimerKind::DiscussionEnd => self.enter_voting(),
            TimerKind::VotingEnd => self.finish_voting(),
            TimerKind::EliminationSettle => self.after_elimination(),
        }
    }

    pub(super) fn enter_discussion(&mut self) {
        let after = self.config.discussion_duration();
        self.transition(
            GamePhase::Discussion,
            Some((TimerKind::DiscussionEnd, after)),
        );
    }

    /// End the game, settle final scores and announce the scoreboard
    pub(super) fn end_game(&mut self, winner: Winner) {
        if !self.transition(GamePhase::GameOver, None) {
            return;
        }

        self.winner = Some(winner);
        super::settle_scores(&mut self.players, winner);

        tracing::info!(round = self.round.number, "Game over, winner: {:?}", winner);
        let scores = self.scoreboard();
        self.broadcast(ServerMessage::GameOver { winner, scores });
    }
}
