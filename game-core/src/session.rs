use game_types::{DEFAULT_MAX_GUESSES, GameError, GameStatus, LetterFeedback};

use crate::feedback::compute_feedback;

/// In-memory view of a game's lifecycle: ACTIVE until won or until the
/// guess budget is spent, then terminal forever.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub status: GameStatus,
    pub guesses_count: i32,
    pub max_guesses: i32,
}

/// Result of one accepted guess.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedGuess {
    pub guess_number: i32,
    pub word: String,
    pub feedback: Vec<LetterFeedback>,
    pub status: GameStatus,
    /// True exactly when this guess triggered the ACTIVE -> WON/LOST
    /// transition; the caller sets `completed_at` on it.
    pub just_completed: bool,
}

impl GameSession {
    pub fn new(max_guesses: i32) -> Self {
        GameSession {
            status: GameStatus::Active,
            guesses_count: 0,
            max_guesses,
        }
    }

    /// Rehydrate from persisted columns.
    pub fn from_parts(status: GameStatus, guesses_count: i32, max_guesses: i32) -> Self {
        GameSession {
            status,
            guesses_count,
            max_guesses,
        }
    }

    pub fn can_guess(&self) -> bool {
        self.status == GameStatus::Active && self.guesses_count < self.max_guesses
    }

    /// Accept a normalized guess against `target`, advancing the state
    /// machine. Fails with `GameNotActive` once the game is terminal or
    /// the guess budget is exhausted.
    pub fn submit_guess(&mut self, target: &str, guess: &str) -> Result<SubmittedGuess, GameError> {
        if !self.can_guess() {
            return Err(GameError::GameNotActive);
        }

        self.guesses_count += 1;
        let feedback = compute_feedback(target, guess);

        let previous = self.status;
        if guess == target {
            self.status = GameStatus::Won;
        } else if self.guesses_count >= self.max_guesses {
            self.status = GameStatus::Lost;
        }

        Ok(SubmittedGuess {
            guess_number: self.guesses_count,
            word: guess.to_string(),
            feedback,
            status: self.status,
            just_completed: previous == GameStatus::Active && self.status.is_terminal(),
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_GUESSES)
    }
}
