//! WebSocket message dispatch
//!
//! Maps each client message onto the matching room operation. Only a
//! rejected game start produces a reply; every other invalid action is a
//! silent no-op inside the room.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::Room;

/// Apply a client message to the room and return an optional response for
/// the sender
pub fn handle_message(
    msg: ClientMessage,
    player_id: &str,
    room: &mut Room,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::StartGame => match room.start_game(player_id) {
            Ok(()) => None,
            Err(e) => {
                tracing::info!("Start rejected for {}: {}", player_id, e);
                Some(ServerMessage::from(&e))
            }
        },

        ClientMessage::AnswerQuestionnaire {
            question_id,
            answer,
        } => {
            room.answer_questionnaire(player_id, &question_id, &answer);
            None
        }

        ClientMessage::SubmitImpostorAnswers {
            question_ids,
            answers,
        } => {
            room.submit_impostor_answers(player_id, &question_ids, &answers);
            None
        }

        ClientMessage::AnswerTrivia {
            question_index,
            answer,
        } => {
            room.answer_trivia(player_id, question_index, &answer);
            None
        }

        ClientMessage::Vote { target_id } => {
            room.vote(player_id, &target_id);
            None
        }

        ClientMessage::OfferHandshake { target_id } => {
            room.offer_handshake(player_id, &target_id);
            None
        }
    }
}
