//! The three-player showdown, resolved by handshakes instead of votes

use super::Room;
use crate::types::*;

/// Live players the showdown is played with
pub const FINAL_ROUND_SIZE: usize = 3;

/// Decide the showdown from the current handshakes, or None while it is open.
///
/// The impostor wins as soon as their handshake targets any live player.
/// The team wins once every live non-impostor has offered a handshake to
/// another one and the offers are mutual. With too few live players or no
/// impostor left the team wins by default.
pub fn resolve_final_round(players: &[Player]) -> Option<Winner> {
    let live: Vec<&Player> = players.iter().filter(|p| p.is_live()).collect();
    let Some(impostor) = live.iter().find(|p| p.is_impostor) else {
        return Some(Winner::Team);
    };
    if live.len() < FINAL_ROUND_SIZE {
        return Some(Winner::Team);
    }

    let is_live = |id: &PlayerId| live.iter().any(|p| &p.id == id);
    if impostor.handshake_target.as_ref().is_some_and(is_live) {
        return Some(Winner::Impostor);
    }

    let team: Vec<&&Player> = live.iter().filter(|p| !p.is_impostor).collect();
    let mutual = team.iter().all(|p| {
        let Some(target) = p.handshake_target.as_ref() else {
            return false;
        };
        team.iter()
            .find(|other| &other.id == target)
            .is_some_and(|other| other.handshake_target.as_ref() == Some(&p.id))
    });
    mutual.then_some(Winner::Team)
}

impl Room {
    pub(super) fn enter_final_round(&mut self) {
        for player in &mut self.players {
            player.reset_handshake();
        }
        if self.transition(GamePhase::FinalRound, None) {
            // A disconnect during the settle may already have decided it
            self.check_final_round();
        }
    }

    /// Offer this final round's single handshake. The impostor may target
    /// anyone remaining; the others only live non-impostors.
    pub fn offer_handshake(&mut self, player_id: &str, target_id: &str) {
        if self.phase != GamePhase::FinalRound || player_id == target_id {
            return;
        }
        let offerer_is_impostor = match self.player(player_id) {
            Some(p) if p.is_live() && !p.has_offered_handshake => p.is_impostor,
            _ => {
                tracing::debug!("Ignoring handshake from {}", player_id);
                return;
            }
        };
        let target_ok = match self.player(target_id) {
            Some(t) => t.is_live() && (offerer_is_impostor || !t.is_impostor),
            None => false,
        };
        if !target_ok {
            tracing::debug!("Ignoring handshake from {} to {}", player_id, target_id);
            return;
        }

        if let Some(player) = self.player_mut(player_id) {
            player.has_offered_handshake = true;
            player.handshake_target = Some(target_id.to_string());
        }
        tracing::info!("Player {} offered a handshake", player_id);
        self.check_final_round();
    }

    pub(super) fn check_final_round(&mut self) {
        if self.phase != GamePhase::FinalRound {
            return;
        }
        if let Some(winner) = resolve_final_round(&self.players) {
            self.end_game(winner);
        }
    }
}
