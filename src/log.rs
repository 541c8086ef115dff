//! In-game message log
//!
//! The core reports everything log-worthy as `(text, category)` pairs.
//! Rendering decides colors and layout; the category is the only hint the
//! core gives about what kind of event a message describes.

use serde::{Deserialize, Serialize};

/// What kind of event a message describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCategory {
    Info,
    PlayerAttack,
    EnemyAttack,
    PlayerDeath,
    EnemyDeath,
    Item,
    Ability,
    Stairs,
    Progress,
}

/// A single logged message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub category: MessageCategory,
}

/// Sink for log-worthy events. Never fails; pure output.
pub trait MessageSink {
    fn push(&mut self, text: String, category: MessageCategory);
}

/// Vec-backed message log, the default sink for embedders and tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// True if any logged message contains the given fragment.
    pub fn contains(&self, fragment: &str) -> bool {
        self.messages.iter().any(|m| m.text.contains(fragment))
    }
}

impl MessageSink for MessageLog {
    fn push(&mut self, text: String, category: MessageCategory) {
        self.messages.push(Message { text, category });
    }
}
