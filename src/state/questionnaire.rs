use super::{Room, TimerKind};
use crate::types::*;
use std::collections::HashSet;

impl Room {
    /// Trimmed answer, or None when empty or over the length limit
    pub(super) fn clean_answer<'a>(&self, answer: &'a str) -> Option<&'a str> {
        let answer = answer.trim();
        if answer.is_empty() || answer.chars().count() > self.config.max_answer_chars {
            return None;
        }
        Some(answer)
    }

    /// A non-impostor answers one of this round's questionnaire prompts
    pub fn answer_questionnaire(&mut self, player_id: &str, question_id: &str, answer: &str) {
        if self.phase != GamePhase::Questionnaire {
            return;
        }
        match self.player(player_id) {
            Some(p) if p.is_live() && !p.is_impostor => {}
            _ => {
                tracing::debug!("Ignoring questionnaire answer from {}", player_id);
                return;
            }
        }
        if !self.round.questionnaire.iter().any(|q| q.id == question_id) {
            return;
        }
        let Some(answer) = self.clean_answer(answer).map(str::to_string) else {
            return;
        };

        let answers = self
            .round
            .questionnaire_answers
            .entry(player_id.to_string())
            .or_default();
        if answers.contains_key(question_id) {
            return;
        }
        answers.insert(question_id.to_string(), answer);

        if let Some(player) = self.player_mut(player_id) {
            player.has_answered_questionnaire = true;
        }
        self.check_questionnaire_complete();
    }

    /// The impostor binds one decoy answer to each of this round's prompts.
    /// Partial or inconsistent submissions are ignored as a whole.
    pub fn submit_impostor_answers(
        &mut self,
        player_id: &str,
        question_ids: &[QuestionId],
        answers: &[String],
    ) {
        if self.phase != GamePhase::Questionnaire {
            return;
        }
        match self.player(player_id) {
            Some(p) if p.is_live() && p.is_impostor && !p.has_answered_questionnaire => {}
            _ => {
                tracing::debug!("Ignoring impostor answers from {}", player_id);
                return;
            }
        }

        let expected = self.round.questionnaire.len();
        let distinct: HashSet<&QuestionId> = question_ids.iter().collect();
        if question_ids.len() != expected || answers.len() != expected || distinct.len() != expected
        {
            return;
        }
        if !question_ids
            .iter()
            .all(|id| self.round.questionnaire.iter().any(|q| &q.id == id))
        {
            return;
        }
        let cleaned: Option<Vec<String>> = answers
            .iter()
            .map(|a| self.clean_answer(a).map(str::to_string))
            .collect();
        let Some(cleaned) = cleaned else {
            return;
        };

        for (id, answer) in question_ids.iter().zip(cleaned) {
            if let Some(question) = self.round.questionnaire.iter_mut().find(|q| &q.id == id) {
                question.impostor_answer = Some(answer);
            }
        }
        if let Some(player) = self.player_mut(player_id) {
            player.has_answered_questionnaire = true;
        }
        self.check_questionnaire_complete();
    }

    /// Once every live player has answered, move on after a short settle
    pub(super) fn check_questionnaire_complete(&mut self) {
        if self.phase != GamePhase::Questionnaire
            || self.is_timer_pending(TimerKind::QuestionnaireSettle)
        {
            return;
        }
        if self.live_players().all(|p| p.has_answered_questionnaire) {
            tracing::info!(round = self.round.number, "Questionnaire complete");
            let after = self.config.questionnaire_settle();
            self.schedule(TimerKind::QuestionnaireSettle, after);
        }
    }

    pub(super) fn enter_trivia(&mut self) {
        self.round.current_question_index = 0;
        let after = self.config.trivia_question_duration();
        self.transition(GamePhase::Trivia, Some((TimerKind::TriviaAdvance, after)));
    }
}
