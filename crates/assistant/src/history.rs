//! Conversation transcript sent to the model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prompt::SYSTEM_PROMPT;

/// Number of most recent messages included in each request.
pub const CONTEXT_WINDOW: usize = 4;

const MESSAGE_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => f.write_str("USER"),
            ChatRole::Assistant => f.write_str("ASSISTANT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Transcript seeded with the system prompt as its first assistant turn.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatHistory {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Assistant,
                content: SYSTEM_PROMPT.to_string(),
            }],
        }
    }

    pub fn push(&mut self, role: ChatRole, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
        });
    }

    /// Drop the last message if it has the given role (a failed turn).
    pub fn pop_if(&mut self, role: ChatRole) -> Option<ChatMessage> {
        if self.messages.last().is_some_and(|m| m.role == role) {
            self.messages.pop()
        } else {
            None
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Reset to the system prompt only.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Render the last [`CONTEXT_WINDOW`] messages as `ROLE: content` blocks.
    pub fn render_recent(&self) -> String {
        let start = self.messages.len().saturating_sub(CONTEXT_WINDOW);
        self.messages[start..]
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join(MESSAGE_SEPARATOR)
    }
}
