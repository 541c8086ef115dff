//! Actors and spawnable templates

pub mod actor;
pub mod templates;

pub use actor::{Actor, AiBehavior, RenderOrder};
