use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type PlayerId = String;
pub type QuestionId = String;
pub type RoomCode = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Lobby,
    Questionnaire,
    Trivia,
    Discussion,
    Voting,
    Elimination,
    FinalRound,
    GameOver,
}

impl GamePhase {
    /// Phases in which a game is underway (disconnects can end it)
    pub fn is_in_progress(&self) -> bool {
        !matches!(self, GamePhase::Lobby | GamePhase::GameOver)
    }
}

/// Which faction won the game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Impostor,
    Team,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_impostor: bool,
    pub score: u32,
    /// Never reset once set within a game
    pub is_eliminated: bool,

    // Reset at round start
    pub has_voted: bool,
    pub voted_for: Option<PlayerId>,
    pub correct_trivia_count: u32,
    pub has_answered_questionnaire: bool,
    pub has_answered_trivia: bool,

    // Reset when entering the final round
    pub has_offered_handshake: bool,
    pub handshake_target: Option<PlayerId>,
}

impl Player {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            is_impostor: false,
            score: 0,
            is_eliminated: false,
            has_voted: false,
            voted_for: None,
            correct_trivia_count: 0,
            has_answered_questionnaire: false,
            has_answered_trivia: false,
            has_offered_handshake: false,
            handshake_target: None,
        }
    }

    /// Still in the game (not eliminated)
    pub fn is_live(&self) -> bool {
        !self.is_eliminated
    }

    pub(crate) fn reset_round_fields(&mut self) {
        self.has_voted = false;
        self.voted_for = None;
        self.correct_trivia_count = 0;
        self.has_answered_questionnaire = false;
        self.has_answered_trivia = false;
    }

    pub(crate) fn reset_handshake(&mut self) {
        self.has_offered_handshake = false;
        self.handshake_target = None;
    }
}

/// A personal question everyone but the impostor answers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionnaireQuestion {
    pub id: QuestionId,
    pub text: String,
    /// Decoy answer bound by the impostor, shown to everyone else
    pub impostor_answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriviaQuestion {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// Trivia question as sent to one player. The correct answer is only
/// filled in once that player may know it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriviaQuestionInfo {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl TriviaQuestionInfo {
    pub fn new(q: &TriviaQuestion, reveal: bool) -> Self {
        Self {
            id: q.id.clone(),
            text: q.text.clone(),
            options: q.options.clone(),
            correct_answer: reveal.then(|| q.correct_answer.clone()),
        }
    }
}

/// One line of the final scoreboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntry {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub is_impostor: bool,
}

impl From<&Player> for ScoreEntry {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            score: p.score,
            is_impostor: p.is_impostor,
        }
    }
}
