//! Character progression

pub mod level;

pub use level::{Level, LevelUpChoice};
