//! Per-room game orchestrator
//!
//! `Room` owns the whole state of one game: phase, player registry and the
//! current round ledger. It never blocks or sleeps; every operation mutates
//! the state and queues [`Effect`]s (messages to deliver, timers to schedule
//! or cancel) which the runtime drains with [`Room::take_effects`].

mod final_round;
mod game;
mod player;
mod questionnaire;
mod round;
mod score;
mod trivia;
mod view;
mod vote;

pub use final_round::resolve_final_round;
pub use round::RoundLedger;
pub use score::settle_scores;
pub use vote::resolve_elimination;

use crate::config::RoomConfig;
use crate::protocol::ServerMessage;
use crate::types::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use std::time::Duration;

/// Timers a room can have outstanding, at most one of each kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    QuestionnaireSettle,
    TriviaAdvance,
    TriviaSettle,
    DiscussionEnd,
    VotingEnd,
    EliminationSettle,
}

/// Side effect requested by the room, applied by the runtime in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Broadcast(ServerMessage),
    Schedule { timer: TimerKind, after: Duration },
    /// Drop every previously scheduled timer
    CancelTimers,
}

pub struct Room {
    config: RoomConfig,
    rng: StdRng,
    phase: GamePhase,
    /// Connected players in join order
    players: Vec<Player>,
    /// Frozen entries of players who left after the game started
    departed: Vec<Player>,
    round: RoundLedger,
    winner: Option<Winner>,
    phase_deadline: Option<String>,
    pending_timers: BTreeSet<TimerKind>,
    effects: Vec<Effect>,
}

impl Room {
    pub fn new(config: RoomConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a room with an explicit random source
    pub fn with_rng(config: RoomConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            phase: GamePhase::Lobby,
            players: Vec::new(),
            departed: Vec::new(),
            round: RoundLedger::default(),
            winner: None,
            phase_deadline: None,
            pending_timers: BTreeSet::new(),
            effects: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn round(&self) -> &RoundLedger {
        &self.round
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn phase_deadline(&self) -> Option<&str> {
        self.phase_deadline.as_deref()
    }

    pub fn impostor(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_live() && p.is_impostor)
    }

    pub fn live_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_live())
    }

    pub fn live_count(&self) -> usize {
        self.live_players().count()
    }

    pub fn is_timer_pending(&self, kind: TimerKind) -> bool {
        self.pending_timers.contains(&kind)
    }

    /// Drain the effects queued since the last call
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    fn broadcast(&mut self, msg: ServerMessage) {
        self.effects.push(Effect::Broadcast(msg));
    }

    fn schedule(&mut self, timer: TimerKind, after: Duration) {
        self.pending_timers.insert(timer);
        self.effects.push(Effect::Schedule { timer, after });
    }

    fn cancel_timers(&mut self) {
        self.pending_timers.clear();
        self.effects.push(Effect::CancelTimers);
    }
}

/// RFC 3339 timestamp `after` from now
fn deadline_after(after: Duration) -> Option<String> {
    chrono::Duration::from_std(after)
        .ok()
        .map(|delta| (chrono::Utc::now() + delta).to_rfc3339())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub const SEED: u64 = 42;

    /// Lobby with `n` players named p1..pn
    pub fn lobby(n: usize) -> Room {
        let mut room = Room::with_rng(RoomConfig::default(), StdRng::seed_from_u64(SEED));
        for i in 1..=n {
            room.join(format!("p{}", i), format!("Player {}", i))
                .expect("join should succeed");
        }
        room.take_effects();
        room
    }

    /// Room with `n` players that has just entered the first questionnaire
    pub fn started(n: usize) -> Room {
        let mut room = lobby(n);
        room.start_game("p1").expect("start should succeed");
        room.take_effects();
        room
    }

    pub fn impostor_id(room: &Room) -> PlayerId {
        room.impostor().expect("impostor assigned").id.clone()
    }

    /// Live non-impostor ids in join order
    pub fn team_ids(room: &Room) -> Vec<PlayerId> {
        room.live_players()
            .filter(|p| !p.is_impostor)
            .map(|p| p.id.clone())
            .collect()
    }

    /// Drive a freshly started round through questionnaire, trivia and
    /// discussion into VOTING, with nobody answering trivia
    pub fn advance_to_voting(room: &mut Room) {
        complete_questionnaire(room);
        room.fire_timer(TimerKind::QuestionnaireSettle);
        for _ in 0..room.round().trivia.len() {
            room.fire_timer(TimerKind::TriviaAdvance);
        }
        room.fire_timer(TimerKind::TriviaSettle);
        room.fire_timer(TimerKind::DiscussionEnd);
        assert_eq!(room.phase(), GamePhase::Voting);
        room.take_effects();
    }

    pub fn complete_questionnaire(room: &mut Room) {
        let impostor = impostor_id(room);
        let ids: Vec<_> = room.round().questionnaire.iter().map(|q| q.id.clone()).collect();
        let decoys: Vec<_> = ids.iter().map(|id| format!("decoy {}", id)).collect();
        room.submit_impostor_answers(&impostor, &ids, &decoys);
        for id in team_ids(room) {
            room.answer_questionnaire(&id, &ids[0], "Pizza");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_new_room_is_lobby() {
        let room = Room::new(RoomConfig::default());
        assert_eq!(room.phase(), GamePhase::Lobby);
        assert_eq!(room.round().number, 0);
        assert!(room.players().is_empty());
        assert!(room.winner().is_none());
    }

    #[test]
    fn test_seeded_rooms_pick_the_same_impostor() {
        let a = started(7);
        let b = started(7);
        assert_eq!(impostor_id(&a), impostor_id(&b));
        assert_eq!(a.round().questionnaire, b.round().questionnaire);
        assert_eq!(a.round().trivia, b.round().trivia);
    }

    #[test]
    fn test_take_effects_drains() {
        let mut room = lobby(4);
        room.join("late".to_string(), "Late".to_string()).unwrap();
        assert_eq!(room.take_effects().len(), 1);
        assert!(room.take_effects().is_empty());
    }

    #[test]
    fn test_cancel_clears_pending_timers() {
        let mut room = started(5);
        complete_questionnaire(&mut room);
        assert!(room.is_timer_pending(TimerKind::QuestionnaireSettle));

        room.cancel_timers();
        assert!(!room.is_timer_pending(TimerKind::QuestionnaireSettle));
        assert_eq!(room.take_effects().last(), Some(&Effect::CancelTimers));
    }
}
