pub mod games;
pub mod guesses;
pub mod prelude;
pub mod users;
pub mod words;
