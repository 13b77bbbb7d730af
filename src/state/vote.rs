use super::{Room, TimerKind};
use crate::protocol::ServerMessage;
use crate::types::*;
use std::collections::BTreeMap;

/// Pick the player to eliminate from a vote tally: the strictly highest
/// count wins, ties go to the smallest player id, no votes means nobody.
pub fn resolve_elimination(tally: &BTreeMap<PlayerId, u32>) -> Option<PlayerId> {
    let mut best: Option<(&PlayerId, u32)> = None;
    // BTreeMap iterates ids in ascending order, so keeping the first maximum
    // breaks ties towards the smallest id
    for (id, &count) in tally {
        if count == 0 {
            continue;
        }
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((id, count)),
        }
    }
    best.map(|(id, _)| id.clone())
}

impl Room {
    /// Cast this round's single vote
    pub fn vote(&mut self, voter_id: &str, target_id: &str) {
        if self.phase != GamePhase::Voting {
            return;
        }
        match self.player(voter_id) {
            Some(p) if p.is_live() && !p.has_voted => {}
            _ => {
                tracing::debug!("Ignoring vote from {}", voter_id);
                return;
            }
        }
        if !self.player(target_id).is_some_and(|p| p.is_live()) {
            tracing::debug!("Ignoring vote for {}", target_id);
            return;
        }

        if let Some(voter) = self.player_mut(voter_id) {
            voter.has_voted = true;
            voter.voted_for = Some(target_id.to_string());
        }
        *self
            .round
            .vote_tally
            .entry(target_id.to_string())
            .or_insert(0) += 1;

        self.check_voting_complete();
    }

    pub(super) fn enter_voting(&mut self) {
        for player in &mut self.players {
            player.has_voted = false;
            player.voted_for = None;
        }
        self.round.vote_tally.clear();
        self.round.eliminated_player_id = None;

        let after = self.config.voting_duration();
        self.transition(GamePhase::Voting, Some((TimerKind::VotingEnd, after)));
    }

    pub(super) fn check_voting_complete(&mut self) {
        if self.phase != GamePhase::Voting {
            return;
        }
        if self.live_players().all(|p| p.has_voted) {
            self.finish_voting();
        }
    }

    /// Tally the votes and announce the elimination
    pub(super) fn finish_voting(&mut self) {
        let eliminated = resolve_elimination(&self.round.vote_tally);
        self.round.eliminated_player_id = eliminated.clone();

        let mut impostor_caught = false;
        if let Some(id) = &eliminated {
            if let Some(player) = self.player_mut(id) {
                player.is_eliminated = true;
                impostor_caught = player.is_impostor;
            }
            tracing::info!(round = self.round.number, "Player {} eliminated", id);
        } else {
            tracing::info!(round = self.round.number, "No votes cast, nobody eliminated");
        }

        if !self.transition(GamePhase::Elimination, None) {
            return;
        }
        self.broadcast(ServerMessage::Eliminated {
            player_id: eliminated,
        });

        if impostor_caught {
            self.end_game(Winner::Team);
            return;
        }
        let after = self.config.elimination_settle();
        self.schedule(TimerKind::EliminationSettle, after);
    }

    /// Settle delay elapsed: either the showdown or another round
    pub(super) fn after_elimination(&mut self) {
        if self.live_count() <= self.config.final_round_threshold {
            self.enter_final_round();
        } else {
            self.start_round();
        }
    }
}
