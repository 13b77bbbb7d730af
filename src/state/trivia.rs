//! Trivia step of a round
//!
//! Questions auto-advance on a per-question timer. Answers may target any
//! question of the round, one answer per question and player.

use super::{deadline_after, Room, TimerKind};
use crate::protocol::ServerMessage;
use crate::types::*;

impl Room {
    pub fn answer_trivia(&mut self, player_id: &str, question_index: usize, answer: &str) {
        if self.phase != GamePhase::Trivia || self.is_timer_pending(TimerKind::TriviaSettle) {
            return;
        }
        if !self.player(player_id).is_some_and(|p| p.is_live()) {
            tracing::debug!("Ignoring trivia answer from {}", player_id);
            return;
        }
        let Some(question) = self.round.trivia.get(question_index) else {
            tracing::debug!("Trivia index {} out of range", question_index);
            return;
        };
        let Some(answer) = self.clean_answer(answer).map(str::to_string) else {
            return;
        };
        let correct = answer == question.correct_answer;
        let total = self.round.trivia.len();

        let answers = self
            .round
            .trivia_answers
            .entry(player_id.to_string())
            .or_default();
        if answers.contains_key(&question_index) {
            return;
        }
        answers.insert(question_index, answer);
        let answered_all = answers.len() == total;

        let points = self.config.trivia_points;
        if let Some(player) = self.player_mut(player_id) {
            if correct {
                player.correct_trivia_count += 1;
                // The impostor knows every answer, only the count is tracked
                if !player.is_impostor {
                    player.score += points;
                }
            }
            if answered_all {
                player.has_answered_trivia = true;
            }
        }
        self.check_trivia_complete();
    }

    /// Per-question timer elapsed
    pub(super) fn advance_trivia(&mut self) {
        let next = self.round.current_question_index + 1;
        if next >= self.round.trivia.len() {
            self.close_trivia();
            return;
        }

        self.round.current_question_index = next;
        let after = self.config.trivia_question_duration();
        self.phase_deadline = deadline_after(after);
        self.broadcast(ServerMessage::QuestionAdvanced {
            index: next,
            server_now: chrono::Utc::now().to_rfc3339(),
            deadline: self.phase_deadline.clone(),
        });
        self.schedule(TimerKind::TriviaAdvance, after);
    }

    pub(super) fn check_trivia_complete(&mut self) {
        if self.phase != GamePhase::Trivia {
            return;
        }
        if self.live_players().all(|p| p.has_answered_trivia) {
            tracing::info!(round = self.round.number, "Everyone answered all trivia");
            self.close_trivia();
        }
    }

    /// Stop the question clock and leave for discussion after a short settle
    fn close_trivia(&mut self) {
        if self.is_timer_pending(TimerKind::TriviaSettle) {
            return;
        }
        self.cancel_timers();
        self.phase_deadline = None;
        let after = self.config.trivia_settle();
        self.schedule(TimerKind::TriviaSettle, after);
    }
}
