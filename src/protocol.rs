use crate::error::RoomError;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    StartGame,
    AnswerQuestionnaire {
        question_id: QuestionId,
        answer: String,
    },
    /// Impostor only: binds one decoy answer to each selected question
    SubmitImpostorAnswers {
        question_ids: Vec<QuestionId>,
        answers: Vec<String>,
    },
    AnswerTrivia {
        question_index: usize,
        answer: String,
    },
    Vote {
        target_id: PlayerId,
    },
    OfferHandshake {
        target_id: PlayerId,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        room_code: RoomCode,
        player_id: PlayerId,
    },
    Phase {
        phase: GamePhase,
        round_no: u32,
        server_now: String,
        deadline: Option<String>,
    },
    QuestionAdvanced {
        index: usize,
        server_now: String,
        deadline: Option<String>,
    },
    PlayerJoined {
        player_id: PlayerId,
        name: String,
        player_count: usize,
    },
    PlayerLeft {
        player_id: PlayerId,
        player_count: usize,
    },
    /// Outcome of a vote tally (None when nobody received a vote)
    Eliminated {
        player_id: Option<PlayerId>,
    },
    GameOver {
        winner: Winner,
        scores: Vec<ScoreEntry>,
    },
    /// Personalized snapshot of the room, sent after every change
    State {
        view: RoomView,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl From<&RoomError> for ServerMessage {
    fn from(e: &RoomError) -> Self {
        ServerMessage::Error {
            code: e.code().to_string(),
            msg: e.to_string(),
        }
    }
}

/// Player info as seen by one viewer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub is_eliminated: bool,
    /// Only revealed to the impostor themself and after the game ends
    pub is_impostor: Option<bool>,
    pub has_voted: bool,
    pub has_answered_questionnaire: bool,
    pub has_answered_trivia: bool,
    pub correct_trivia_count: u32,
    pub has_offered_handshake: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomView {
    pub phase: GamePhase,
    pub round_no: u32,
    pub you: PlayerId,
    pub you_are_impostor: bool,
    pub players: Vec<PlayerInfo>,
    pub questionnaire: Vec<QuestionnaireQuestion>,
    pub trivia: Vec<TriviaQuestionInfo>,
    pub current_question_index: usize,
    pub vote_counts: BTreeMap<PlayerId, u32>,
    pub eliminated_player_id: Option<PlayerId>,
    pub deadline: Option<String>,
    pub winner: Option<Winner>,
}
