use super::Room;
use crate::config::RoomConfig;
use crate::questions::{QUESTIONNAIRE_PROMPTS, TRIVIA_PROMPTS};
use crate::types::*;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

/// Per-round data, replaced wholesale when a new round starts
#[derive(Debug, Clone, Default)]
pub struct RoundLedger {
    /// 0 in the lobby, 1 for the first round, never reset
    pub number: u32,
    pub impostor_id: Option<PlayerId>,
    pub questionnaire: Vec<QuestionnaireQuestion>,
    pub trivia: Vec<TriviaQuestion>,
    pub current_question_index: usize,
    pub questionnaire_answers: HashMap<PlayerId, HashMap<QuestionId, String>>,
    pub trivia_answers: HashMap<PlayerId, BTreeMap<usize, String>>,
    /// Target -> votes received; ordered so ties resolve deterministically
    pub vote_tally: BTreeMap<PlayerId, u32>,
    pub eliminated_player_id: Option<PlayerId>,
}

impl RoundLedger {
    fn next(number: u32, impostor_id: PlayerId, rng: &mut StdRng, config: &RoomConfig) -> Self {
        Self {
            number,
            impostor_id: Some(impostor_id),
            questionnaire: sample_questionnaire(rng, config.questionnaire_count),
            trivia: sample_trivia(rng, config.trivia_count),
            ..Self::default()
        }
    }

    /// Drop everything keyed by a player who left
    pub(super) fn forget_player(&mut self, player_id: &str) {
        self.vote_tally.remove(player_id);
        self.questionnaire_answers.remove(player_id);
        self.trivia_answers.remove(player_id);
    }
}

fn sample_questionnaire(rng: &mut StdRng, count: usize) -> Vec<QuestionnaireQuestion> {
    let amount = count.min(QUESTIONNAIRE_PROMPTS.len());
    rand::seq::index::sample(rng, QUESTIONNAIRE_PROMPTS.len(), amount)
        .into_iter()
        .enumerate()
        .map(|(i, idx)| QuestionnaireQuestion {
            id: format!("q_{}", i),
            text: QUESTIONNAIRE_PROMPTS[idx].to_string(),
            impostor_answer: None,
        })
        .collect()
}

fn sample_trivia(rng: &mut StdRng, count: usize) -> Vec<TriviaQuestion> {
    let amount = count.min(TRIVIA_PROMPTS.len());
    rand::seq::index::sample(rng, TRIVIA_PROMPTS.len(), amount)
        .into_iter()
        .enumerate()
        .map(|(i, idx)| {
            let prompt = &TRIVIA_PROMPTS[idx];
            TriviaQuestion {
                id: format!("trivia_{}", i),
                text: prompt.text.to_string(),
                options: prompt.options.iter().map(|o| o.to_string()).collect(),
                correct_answer: prompt.correct_answer.to_string(),
            }
        })
        .collect()
}

impl Room {
    /// Start a new round: pick a fresh impostor among live players, reset
    /// round-scoped player fields and sample this round's questions
    pub(super) fn start_round(&mut self) {
        let live_ids: Vec<PlayerId> = self.live_players().map(|p| p.id.clone()).collect();
        if live_ids.is_empty() {
            tracing::error!("Cannot start a round without live players");
            return;
        }

        let impostor_id = live_ids[self.rng.random_range(0..live_ids.len())].clone();
        for player in &mut self.players {
            player.reset_round_fields();
            player.is_impostor = player.id == impostor_id;
        }

        let number = self.round.number + 1;
        self.round = RoundLedger::next(number, impostor_id.clone(), &mut self.rng, &self.config);
        tracing::info!(round = number, "Round started, impostor is {}", impostor_id);

        self.transition(GamePhase::Questionnaire, None);
    }
}
