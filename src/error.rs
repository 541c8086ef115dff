//! Error taxonomy for the turn-resolution core
//!
//! Exactly one recoverable error exists: an action that cannot be resolved
//! given the current state. Anything else (missing template data, a
//! non-equippable item reaching a slot) is a programming error and panics.

use thiserror::Error;

/// Errors surfaced by the action layer.
#[derive(Debug, Clone, Error)]
pub enum GameError {
    /// The requested intent cannot be resolved right now. Aborts the single
    /// action with no state mutation; the reason is shown to the player,
    /// while AI actors swallow it and pick another intent.
    #[error("{0}")]
    Impossible(String),
}

impl GameError {
    pub fn impossible(reason: impl Into<String>) -> Self {
        Self::Impossible(reason.into())
    }
}

/// Result type used throughout the action layer.
pub type ActionResult<T = ()> = Result<T, GameError>;

/// Shorthand for failing an action.
pub fn impossible<T>(reason: impl Into<String>) -> ActionResult<T> {
    Err(GameError::impossible(reason))
}
