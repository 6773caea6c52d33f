use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type GameId = Uuid;
pub type UserId = Uuid;
pub type WordId = Uuid;

/// Words and guesses are always exactly this long.
pub const WORD_LENGTH: usize = 5;

/// Default number of guesses a game allows.
pub const DEFAULT_MAX_GUESSES: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }

    /// Database column representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Active => "ACTIVE",
            GameStatus::Won => "WON",
            GameStatus::Lost => "LOST",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(GameStatus::Active),
            "WON" => Some(GameStatus::Won),
            "LOST" => Some(GameStatus::Lost),
            _ => None,
        }
    }
}

/// Per-position classification of a guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LetterFeedback {
    Correct,
    WrongPosition,
    Incorrect,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Word {
    pub id: WordId,
    pub word: String,
    pub is_active: bool,
    pub created_at: String, // ISO 8601 string
}

/// Full game record, target word included. Never serialized to clients
/// while the game is active; see [`GameView`].
#[derive(Debug, Clone)]
pub struct Game {
    pub id: GameId,
    pub user_id: UserId,
    pub word_id: WordId,
    pub target_word: String,
    pub status: GameStatus,
    pub guesses_count: i32,
    pub max_guesses: i32,
    pub created_at: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Guess {
    pub id: Uuid,
    pub game_id: GameId,
    pub guess_number: i32,
    pub word: String,
    pub feedback: Vec<LetterFeedback>,
    pub created_at: String,
}

/// Client-safe projection of a game. The target word is only revealed
/// once the game has completed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameView {
    pub id: GameId,
    pub status: GameStatus,
    pub guesses_count: i32,
    pub max_guesses: i32,
    pub remaining_guesses: i32,
    pub target_word: Option<String>,
    pub guesses: Vec<Guess>,
    pub created_at: String,
    pub completed_at: Option<String>,
}

impl GameView {
    pub fn from_game(game: &Game, guesses: Vec<Guess>) -> Self {
        GameView {
            id: game.id,
            status: game.status,
            guesses_count: game.guesses_count,
            max_guesses: game.max_guesses,
            remaining_guesses: game.max_guesses - game.guesses_count,
            target_word: game.status.is_terminal().then(|| game.target_word.clone()),
            guesses,
            created_at: game.created_at.clone(),
            completed_at: game.completed_at.clone(),
        }
    }
}

/// One revealed letter, produced by the hint policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Hint {
    pub index: usize,
    pub letter: char,
}
