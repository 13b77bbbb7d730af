/// Rejections that are reported back to the acting player
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("Need {min}-{max} players to start (currently {count})")]
    InvalidPlayerCount {
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("Game already in progress")]
    GameInProgress,

    #[error("Room is full")]
    RoomFull,

    #[error("Display name must not be empty")]
    InvalidName,

    #[error("Player already joined")]
    DuplicatePlayer,

    #[error("Room is closed")]
    RoomClosed,
}

impl RoomError {
    /// Stable code for the wire `Error` message
    pub fn code(&self) -> &'static str {
        match self {
            RoomError::InvalidPlayerCount { .. } => "INVALID_PLAYER_COUNT",
            RoomError::GameInProgress => "GAME_IN_PROGRESS",
            RoomError::RoomFull => "ROOM_FULL",
            RoomError::InvalidName => "INVALID_NAME",
            RoomError::DuplicatePlayer => "DUPLICATE_PLAYER",
            RoomError::RoomClosed => "ROOM_CLOSED",
        }
    }
}
