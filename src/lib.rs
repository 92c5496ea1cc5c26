pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod piece;
pub mod scheduler;

pub use error::EngineError;
pub use game::test_helpers;
