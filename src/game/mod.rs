//! Turn resolution
//!
//! [`GameState`] owns the actors and the loose items of the current
//! floor; [`Action`] is the shared intent vocabulary both player input
//! and monster AI submit through [`GameState::perform`].

pub mod actions;
pub mod state;

pub use actions::Action;
pub use state::{ActorId, GameState};
