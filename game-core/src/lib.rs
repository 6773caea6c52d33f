pub mod feedback;
pub mod hint;
pub mod session;
pub mod words;

// Re-export main components
pub use feedback::*;
pub use hint::*;
pub use session::*;
pub use words::*;
