use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

/// Business-rule rejections surfaced at the request boundary.
///
/// Every variant maps to a user-visible message and an HTTP status; none
/// should crash the process. `TransientStoreFailure` is the only kind a
/// caller may retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum GameError {
    #[error("daily limit of {limit} games reached, try again tomorrow")]
    DailyLimitExceeded { limit: u32 },

    #[error("an active game already exists")]
    GameAlreadyActive { game_id: Uuid },

    #[error("no words available")]
    NoWordsAvailable,

    #[error("this game is no longer active")]
    GameNotActive,

    #[error("game is completed")]
    GameCompleted,

    #[error("hint already used for this game")]
    HintAlreadyUsed,

    #[error("all letters already revealed by guesses")]
    NoHintAvailable,

    #[error("invalid guess: {reason}")]
    InvalidGuessFormat { reason: String },

    #[error("not found")]
    NotFound,

    #[error("store unavailable: {message}")]
    TransientStoreFailure { message: String },
}

impl GameError {
    /// Whether a caller may retry the request that produced this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::TransientStoreFailure { .. })
    }
}
