use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use game_types::{GameError, GameStatus, Hint, LetterFeedback};

/// Pick one letter of `target` to reveal, skipping positions the player
/// has already placed correctly in any prior guess.
///
/// The hint-used marker lives in the caller's session store; this function
/// only enforces the policy. The choice among remaining positions is
/// uniform over the supplied randomness source.
pub fn choose_hint<R: Rng + ?Sized>(
    status: GameStatus,
    target: &str,
    prior_feedback: &[Vec<LetterFeedback>],
    hint_used: bool,
    rng: &mut R,
) -> Result<Hint, GameError> {
    // Checked before the terminal status so a consumed hint reports the
    // same error even after the game finishes.
    if hint_used {
        return Err(GameError::HintAlreadyUsed);
    }
    if status.is_terminal() {
        return Err(GameError::GameCompleted);
    }

    let revealed: HashSet<usize> = prior_feedback
        .iter()
        .flat_map(|feedback| {
            feedback
                .iter()
                .enumerate()
                .filter(|(_, f)| **f == LetterFeedback::Correct)
                .map(|(i, _)| i)
        })
        .collect();

    let letters: Vec<char> = target.chars().collect();
    let candidates: Vec<usize> = (0..letters.len()).filter(|i| !revealed.contains(i)).collect();

    let index = *candidates.choose(rng).ok_or(GameError::NoHintAvailable)?;
    Ok(Hint {
        index,
        letter: letters[index],
    })
}
