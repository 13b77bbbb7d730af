use super::{Room, TimerKind};
use crate::protocol::{PlayerInfo, RoomView};
use crate::types::*;

impl Room {
    /// Trivia is over for this round once it settles or the room moved on
    fn trivia_closed(&self) -> bool {
        match self.phase {
            GamePhase::Lobby | GamePhase::Questionnaire => false,
            GamePhase::Trivia => self.is_timer_pending(TimerKind::TriviaSettle),
            _ => true,
        }
    }

    /// Trivia as `viewer` may see it. The impostor knows every answer; the
    /// others see an answer once they answered it or trivia closed.
    fn trivia_for(&self, viewer: &str) -> Vec<TriviaQuestionInfo> {
        let knows_all =
            self.trivia_closed() || self.player(viewer).is_some_and(|p| p.is_impostor);
        let answered = self.round.trivia_answers.get(viewer);
        self.round
            .trivia
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let reveal = knows_all || answered.is_some_and(|a| a.contains_key(&index));
                TriviaQuestionInfo::new(q, reveal)
            })
            .collect()
    }

    /// Snapshot of the room as `viewer` may see it. Other players' roles stay
    /// hidden until the game is over.
    pub fn view(&self, viewer: &str) -> RoomView {
        let game_over = self.phase == GamePhase::GameOver;
        let you_are_impostor = self.player(viewer).is_some_and(|p| p.is_impostor);

        let players = self
            .players
            .iter()
            .map(|p| PlayerInfo {
                id: p.id.clone(),
                name: p.name.clone(),
                score: p.score,
                is_eliminated: p.is_eliminated,
                is_impostor: (game_over || p.id == viewer).then_some(p.is_impostor),
                has_voted: p.has_voted,
                has_answered_questionnaire: p.has_answered_questionnaire,
                has_answered_trivia: p.has_answered_trivia,
                correct_trivia_count: p.correct_trivia_count,
                has_offered_handshake: p.has_offered_handshake,
            })
            .collect();

        RoomView {
            phase: self.phase,
            round_no: self.round.number,
            you: viewer.to_string(),
            you_are_impostor,
            players,
            questionnaire: self.round.questionnaire.clone(),
            trivia: self.trivia_for(viewer),
            current_question_index: self.round.current_question_index,
            vote_counts: self.round.vote_tally.clone(),
            eliminated_player_id: self.round.eliminated_player_id.clone(),
            deadline: self.phase_deadline.clone(),
            winner: self.winner,
        }
    }

    /// Every player who ever joined: connected ones first, then those who
    /// left after the game started
    pub fn scoreboard(&self) -> Vec<ScoreEntry> {
        self.players
            .iter()
            .chain(self.departed.iter())
            .map(ScoreEntry::from)
            .collect()
    }
}
