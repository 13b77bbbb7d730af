use super::{Outbox, RoomHandle};
use crate::config::RoomConfig;
use crate::error::RoomError;
use crate::types::{PlayerId, RoomCode};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Safe character set for room codes (excludes 0/O, 1/I/L to avoid confusion)
const CODE_CHARS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const CODE_LENGTH: usize = 5;
const MAX_REQUESTED_CODE_LENGTH: usize = 16;

/// Generate a random room code (5 characters)
fn generate_room_code() -> RoomCode {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARS[rng.random_range(0..CODE_CHARS.len())] as char)
        .collect()
}

/// Uppercased code if it is usable as a room code
fn normalize_code(raw: &str) -> Option<RoomCode> {
    let code = raw.trim().to_ascii_uppercase();
    let valid = !code.is_empty()
        && code.len() <= MAX_REQUESTED_CODE_LENGTH
        && code.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then_some(code)
}

/// All running rooms by code
#[derive(Clone)]
pub struct RoomRegistry {
    rooms: Arc<RwLock<HashMap<RoomCode, RoomHandle>>>,
    config: Arc<RoomConfig>,
}

impl RoomRegistry {
    pub fn new(config: RoomConfig) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(config),
        }
    }

    /// Look up the room for `code`, creating it when missing. Without a
    /// usable code a fresh room with a new code is created.
    pub async fn get_or_create(&self, code: Option<&str>) -> RoomHandle {
        let mut rooms = self.rooms.write().await;

        let code = match code.and_then(normalize_code) {
            Some(code) => {
                if let Some(handle) = rooms.get(&code).filter(|h| !h.is_closed()) {
                    return handle.clone();
                }
                code
            }
            None => loop {
                let code = generate_room_code();
                // Collisions are rare, just try again
                if !rooms.contains_key(&code) {
                    break code;
                }
            },
        };

        let on_dispose = self.dispose_hook(&code);
        let handle = RoomHandle::spawn(code.clone(), (*self.config).clone(), on_dispose);
        rooms.insert(code, handle.clone());
        handle
    }

    /// Join the room for `code`. A room that shuts down while the join is
    /// queued is replaced by a fresh one under the same code.
    pub async fn join(
        &self,
        code: Option<&str>,
        player_id: PlayerId,
        name: String,
        outbox: Outbox,
    ) -> Result<RoomHandle, RoomError> {
        let room = self.get_or_create(code).await;
        match room.join(player_id.clone(), name.clone(), outbox.clone()).await {
            Ok(()) => Ok(room),
            Err(RoomError::RoomClosed) => {
                tracing::debug!("Room {} closed during join, retrying", room.code());
                let room = self.get_or_create(Some(room.code())).await;
                room.join(player_id, name, outbox).await?;
                Ok(room)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Remove the room's entry once its task has shut down. A newer room that
    /// reused the code in the meantime is left alone.
    fn dispose_hook(&self, code: &str) -> impl FnOnce() + Send + 'static {
        let rooms = self.rooms.clone();
        let code = code.to_string();
        move || {
            tokio::spawn(async move {
                let mut rooms = rooms.write().await;
                if rooms.get(&code).is_some_and(|h| h.is_closed()) {
                    rooms.remove(&code);
                    tracing::debug!("Room {} removed from registry", code);
                }
            });
        }
    }
}
