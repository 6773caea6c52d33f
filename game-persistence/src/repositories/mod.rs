pub mod game_repository;
pub mod report_repository;
pub mod user_repository;
pub mod word_repository;

pub use game_repository::GameRepository;
pub use report_repository::{ReportRepository, day_bounds};
pub use user_repository::UserRepository;
pub use word_repository::WordRepository;
