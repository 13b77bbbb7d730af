pub mod handlers;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::room::RoomRegistry;

pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// Room code to join; a new room is created when missing or unknown
    pub room: Option<String>,
    pub name: Option<String>,
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsQuery>,
    State(registry): State<RoomRegistry>,
) -> impl IntoResponse {
    tracing::info!(
        "WebSocket connection request: room={:?}, name={:?}",
        params.room,
        params.name
    );

    ws.on_upgrade(move |socket| handle_socket(socket, params, registry))
}

async fn send_json(sender: &mut SplitSink<WebSocket, Message>, msg: &ServerMessage) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to serialize server message: {}", e);
            true
        }
    }
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, params: WsQuery, registry: RoomRegistry) {
    let (mut sender, mut receiver) = socket.split();

    let player_id = ulid::Ulid::new().to_string();
    let (outbox, mut inbox) = mpsc::unbounded_channel();

    let name = params.name.unwrap_or_default();
    let room = match registry
        .join(params.room.as_deref(), player_id.clone(), name, outbox)
        .await
    {
        Ok(room) => room,
        Err(e) => {
            tracing::info!("Join to room {:?} refused: {}", params.room, e);
            let _ = send_json(&mut sender, &ServerMessage::from(&e)).await;
            let _ = sender.send(Message::Close(None)).await;
            return;
        }
    };

    // Room notices queue up in the inbox until the loop below, so the
    // welcome is always the first message on the wire
    let welcome = ServerMessage::Welcome {
        protocol: PROTOCOL_VERSION.to_string(),
        room_code: room.code().to_string(),
        player_id: player_id.clone(),
    };
    if !send_json(&mut sender, &welcome).await {
        tracing::error!("Failed to send welcome message");
        room.leave(&player_id);
        return;
    }

    loop {
        tokio::select! {
            room_msg = inbox.recv() => {
                match room_msg {
                    Some(msg) => {
                        if !send_json(&mut sender, &msg).await {
                            break;
                        }
                    }
                    // Room task is gone
                    None => break,
                }
            }

            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received message from {}: {}", player_id, text);
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => room.send_action(&player_id, client_msg),
                            Err(e) => {
                                tracing::warn!(
                                    "Ignoring malformed message from {}: {}",
                                    player_id,
                                    e
                                );
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("WebSocket closed");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    room.leave(&player_id);
    tracing::info!("WebSocket connection closed for player {}", player_id);
}
