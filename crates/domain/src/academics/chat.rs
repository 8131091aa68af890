//! AI chat conversations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The student or staff member
    User,
    /// The AI tutor
    Assistant,
    /// Instructions injected by the server
    System,
}

/// A chat thread with the AI tutor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Server identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Server identifier
    pub id: Uuid,
    /// Conversation the message belongs to
    pub conversation_id: Uuid,
    /// Author
    pub role: ChatRole,
    /// Message text
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Payload for starting a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConversation {
    /// Display title
    pub title: String,
}

/// Payload for sending a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChatMessage {
    /// Message text
    pub content: String,
}
