//! Chat session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::replies::{reply_to, GREETING};

/// Chat errors.
#[derive(Error, Debug, PartialEq)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Session is closed")]
    Closed,
}

pub type ChatResult<T> = Result<T, ChatError>;

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// One conversation with the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    messages: Vec<Message>,
    open: bool,
}

impl ChatSession {
    /// Start a session with the assistant's greeting.
    pub fn open() -> Self {
        let session = Self {
            id: Uuid::new_v4().to_string(),
            messages: vec![Message::new(GREETING, Sender::Assistant)],
            open: true,
        };
        tracing::debug!(session = %session.id, "chat session opened");
        session
    }

    /// Record a user message and the assistant's reply; returns the reply.
    pub fn send(&mut self, text: &str) -> ChatResult<&Message> {
        if !self.open {
            return Err(ChatError::Closed);
        }
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.messages.push(Message::new(text, Sender::User));
        self.messages
            .push(Message::new(reply_to(text), Sender::Assistant));

        let last = self.messages.len() - 1;
        Ok(&self.messages[last])
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// End the session and drop its history.
    pub fn close(&mut self) {
        self.messages.clear();
        self.open = false;
        tracing::debug!(session = %self.id, "chat session closed");
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replies::FALLBACK_REPLY;

    #[test]
    fn test_open_greets() {
        let session = ChatSession::open();
        assert!(session.is_open());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].text, GREETING);
        assert!(!session.messages()[0].is_user());
    }

    #[test]
    fn test_send_appends_both_messages() {
        let mut session = ChatSession::open();
        let reply = session.send("Can I take this with a dose of ibuprofen?").unwrap().text.clone();

        assert!(reply.starts_with("Always follow the dosage instructions"));
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert!(messages[1].is_user());
        assert_eq!(messages[2].sender, Sender::Assistant);
        assert_ne!(messages[1].id, messages[2].id);
    }

    #[test]
    fn test_blank_message_rejected() {
        let mut session = ChatSession::open();
        assert_eq!(session.send("   ").unwrap_err(), ChatError::EmptyMessage);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_closed_session() {
        let mut session = ChatSession::open();
        session.send("hello").unwrap();
        session.close();

        assert!(session.messages().is_empty());
        assert_eq!(session.send("hello").unwrap_err(), ChatError::Closed);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = ChatSession::open();
        let second = ChatSession::open();

        first.send("qwerty").unwrap();

        assert_eq!(first.messages().last().unwrap().text, FALLBACK_REPLY);
        assert_eq!(second.messages().len(), 1);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_session_json() {
        let mut session = ChatSession::open();
        session.send("thanks").unwrap();

        let value: serde_json::Value = serde_json::from_str(&session.to_json().unwrap()).unwrap();
        assert_eq!(value["messages"][1]["sender"], "user");
        assert_eq!(value["open"], true);
    }
}
