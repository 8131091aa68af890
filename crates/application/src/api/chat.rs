//! AI tutor chat API

use serde::de::IgnoredAny;
use uuid::Uuid;

use scholar_domain::academics::{ChatMessage, Conversation, NewChatMessage, NewConversation};

use super::{or_fallback, required};
use crate::crud::{CrudClient, NO_PAYLOAD};
use crate::error::ApiResult;

/// Chat conversations with the AI tutor.
#[derive(Debug, Clone)]
pub struct ChatApi {
    crud: CrudClient,
}

impl ChatApi {
    /// Creates the API over the given façade.
    #[must_use]
    pub const fn new(crud: CrudClient) -> Self {
        Self { crud }
    }

    /// The user's conversations. Empty on failure.
    pub async fn conversations(&self) -> Vec<Conversation> {
        let outcome = self.crud.read("/chat/conversations", NO_PAYLOAD).await;
        or_fallback(outcome, Vec::new(), "conversations")
    }

    /// Messages of a conversation, oldest first. Empty on failure.
    pub async fn messages(&self, conversation_id: Uuid) -> Vec<ChatMessage> {
        let path = format!("/chat/conversations/{conversation_id}/messages");
        let outcome = self.crud.read(&path, NO_PAYLOAD).await;
        or_fallback(outcome, Vec::new(), "messages")
    }

    /// Starts a conversation.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn start(&self, title: impl Into<String>) -> ApiResult<Conversation> {
        let payload = NewConversation {
            title: title.into(),
        };
        required(self.crud.create("/chat/conversations", Some(&payload)).await)
    }

    /// Sends a message and returns the tutor's reply.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn send(
        &self,
        conversation_id: Uuid,
        content: impl Into<String>,
    ) -> ApiResult<ChatMessage> {
        let path = format!("/chat/conversations/{conversation_id}/messages");
        let payload = NewChatMessage {
            content: content.into(),
        };
        required(self.crud.create(&path, Some(&payload)).await)
    }

    /// Deletes a conversation.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn delete(&self, conversation_id: Uuid) -> ApiResult<()> {
        let path = format!("/chat/conversations/{conversation_id}");
        let outcome = self.crud.delete::<_, IgnoredAny>(&path, NO_PAYLOAD).await;
        required(outcome).map(|_| ())
    }
}
