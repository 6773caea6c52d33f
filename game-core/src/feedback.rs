use std::collections::HashMap;

use game_types::{GameError, LetterFeedback, WORD_LENGTH};

/// Classify each letter of `guess` against `target`.
///
/// Two passes over the guess: the first consumes exact matches from a
/// multiset of the target's letters, the second classifies the rest as
/// `WrongPosition` while any count remains, `Incorrect` otherwise. The
/// ordering matters for repeated letters: a letter placed correctly must
/// claim its target occurrence before a misplaced copy can.
///
/// Both inputs are expected to be normalized by [`validate_guess`]. Pure
/// function, no I/O, no randomness.
pub fn compute_feedback(target: &str, guess: &str) -> Vec<LetterFeedback> {
    let target: Vec<char> = target.chars().collect();
    let guess: Vec<char> = guess.chars().collect();
    debug_assert_eq!(target.len(), guess.len());

    let mut remaining: HashMap<char, u32> = HashMap::new();
    for ch in &target {
        *remaining.entry(*ch).or_insert(0) += 1;
    }

    // First pass: exact matches consume their letter count
    let mut feedback = vec![LetterFeedback::Incorrect; guess.len()];
    let mut pending = vec![true; guess.len()];
    for (i, &ch) in guess.iter().enumerate() {
        if ch == target[i] {
            feedback[i] = LetterFeedback::Correct;
            pending[i] = false;
            *remaining.entry(ch).or_insert(0) -= 1;
        }
    }

    // Second pass: misplaced letters, while counts last
    for (i, &ch) in guess.iter().enumerate() {
        if !pending[i] {
            continue;
        }
        let count = remaining.entry(ch).or_insert(0);
        if *count > 0 {
            *count -= 1;
            feedback[i] = LetterFeedback::WrongPosition;
        }
    }

    feedback
}

/// Normalize a raw guess to the canonical uppercase form, rejecting
/// anything that is not exactly five ASCII letters.
pub fn validate_guess(raw: &str) -> Result<String, GameError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() != WORD_LENGTH {
        return Err(GameError::InvalidGuessFormat {
            reason: format!("expected exactly {WORD_LENGTH} letters"),
        });
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GameError::InvalidGuessFormat {
            reason: "letters A-Z only".to_string(),
        });
    }
    Ok(trimmed.to_ascii_uppercase())
}
