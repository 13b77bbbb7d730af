//! Room and server configuration, loaded from environment variables

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Rules and timings applied to every room
#[derive(Debug, Clone, PartialEq)]
pub struct RoomConfig {
    pub min_players: usize,
    pub max_players: usize,
    pub max_name_chars: usize,
    pub max_answer_chars: usize,
    pub questionnaire_count: usize,
    pub trivia_count: usize,
    pub trivia_points: u32,
    /// Live player count at or below which the final round starts
    pub final_round_threshold: usize,
    pub trivia_question_seconds: u64,
    pub discussion_seconds: u64,
    pub voting_seconds: u64,
    pub questionnaire_settle_ms: u64,
    pub trivia_settle_ms: u64,
    pub elimination_settle_ms: u64,
    /// Fixed seed for the room's random source (None = seeded from the OS)
    pub seed: Option<u64>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            min_players: 5,
            max_players: 10,
            max_name_chars: 20,
            max_answer_chars: 200,
            questionnaire_count: 3,
            trivia_count: 5,
            trivia_points: 10,
            final_round_threshold: 3,
            trivia_question_seconds: 20,
            discussion_seconds: 60,
            voting_seconds: 30,
            questionnaire_settle_ms: 2000,
            trivia_settle_ms: 2000,
            elimination_settle_ms: 3000,
            seed: None,
        }
    }
}

/// Parse an env var, keeping the default when missing or invalid
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid value for {}: {:?}", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

impl RoomConfig {
    /// Load room config from NUCHO_* environment variables
    pub fn from_env() -> Self {
        let d = Self::default();
        let config = Self {
            min_players: env_or("NUCHO_MIN_PLAYERS", d.min_players),
            max_players: env_or("NUCHO_MAX_PLAYERS", d.max_players),
            max_name_chars: env_or("NUCHO_MAX_NAME_CHARS", d.max_name_chars),
            max_answer_chars: env_or("NUCHO_MAX_ANSWER_CHARS", d.max_answer_chars),
            questionnaire_count: env_or("NUCHO_QUESTIONNAIRE_COUNT", d.questionnaire_count),
            trivia_count: env_or("NUCHO_TRIVIA_COUNT", d.trivia_count),
            trivia_points: env_or("NUCHO_TRIVIA_POINTS", d.trivia_points),
            final_round_threshold: env_or("NUCHO_FINAL_ROUND_THRESHOLD", d.final_round_threshold),
            trivia_question_seconds: env_or("NUCHO_TRIVIA_SECONDS", d.trivia_question_seconds),
            discussion_seconds: env_or("NUCHO_DISCUSSION_SECONDS", d.discussion_seconds),
            voting_seconds: env_or("NUCHO_VOTING_SECONDS", d.voting_seconds),
            questionnaire_settle_ms: env_or(
                "NUCHO_QUESTIONNAIRE_SETTLE_MS",
                d.questionnaire_settle_ms,
            ),
            trivia_settle_ms: env_or("NUCHO_TRIVIA_SETTLE_MS", d.trivia_settle_ms),
            elimination_settle_ms: env_or("NUCHO_ELIMINATION_SETTLE_MS", d.elimination_settle_ms),
            seed: std::env::var("NUCHO_SEED")
                .ok()
                .and_then(|v| v.trim().parse().ok()),
        };

        if config.min_players > config.max_players {
            tracing::warn!(
                "NUCHO_MIN_PLAYERS ({}) exceeds NUCHO_MAX_PLAYERS ({}), using defaults",
                config.min_players,
                config.max_players
            );
            return Self {
                min_players: d.min_players,
                max_players: d.max_players,
                ..config
            };
        }

        tracing::info!(
            min_players = config.min_players,
            max_players = config.max_players,
            seeded = config.seed.is_some(),
            "Room config loaded"
        );
        config
    }

    pub fn trivia_question_duration(&self) -> Duration {
        Duration::from_secs(self.trivia_question_seconds)
    }

    pub fn discussion_duration(&self) -> Duration {
        Duration::from_secs(self.discussion_seconds)
    }

    pub fn voting_duration(&self) -> Duration {
        Duration::from_secs(self.voting_seconds)
    }

    pub fn questionnaire_settle(&self) -> Duration {
        Duration::from_millis(self.questionnaire_settle_ms)
    }

    pub fn trivia_settle(&self) -> Duration {
        Duration::from_millis(self.trivia_settle_ms)
    }

    pub fn elimination_settle(&self) -> Duration {
        Duration::from_millis(self.elimination_settle_ms)
    }
}

/// Listener configuration for the binary
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env_or("NUCHO_BIND", SocketAddr::from(([0, 0, 0, 0], 2567))),
        }
    }
}
