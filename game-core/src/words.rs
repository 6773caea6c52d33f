use rand::Rng;
use rand::seq::SliceRandom;

use game_types::GameError;

/// Uniform selection from the active word pool.
pub fn pick_word<'a, T, R: Rng + ?Sized>(pool: &'a [T], rng: &mut R) -> Result<&'a T, GameError> {
    pool.choose(rng).ok_or(GameError::NoWordsAvailable)
}
