//! Conversation model and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::FreeScoutClient;
use crate::error::Result;
use crate::models::thread::Thread;
use crate::pagination::Page;
use crate::traits::{Get, List};

/// A FreeScout conversation.
///
/// Conversations are support cases; each holds an ordered sequence of
/// threads (emails, replies and internal notes).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: u64,

    /// Human-facing conversation number.
    #[serde(default)]
    pub number: Option<u64>,

    #[serde(default)]
    pub subject: Option<String>,

    /// Status (active, pending, closed, spam).
    #[serde(default)]
    pub status: Option<String>,

    /// Lifecycle state (draft, published, deleted).
    #[serde(default)]
    pub state: Option<String>,

    /// Conversation type (email, phone, chat).
    #[serde(rename = "type", default)]
    pub conversation_type: Option<String>,

    #[serde(default)]
    pub mailbox_id: Option<u64>,

    #[serde(default)]
    pub customer: Option<CustomerRef>,

    /// Short excerpt of the latest thread.
    #[serde(default)]
    pub preview: Option<String>,

    /// Threads when returned inline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threads: Vec<Thread>,

    /// Threads when returned through the HAL `_embedded` block.
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<ConversationEmbedded>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Embedded resources of a single conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationEmbedded {
    #[serde(default)]
    pub threads: Vec<Thread>,
}

/// Customer summary attached to tickets and conversations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CustomerRef {
    /// First and last name joined, trimmed.
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{first} {last}").trim().to_string()
    }
}

impl Conversation {
    /// The conversation's threads, oldest position first as sent by the server.
    pub fn threads(&self) -> &[Thread] {
        if !self.threads.is_empty() {
            return &self.threads;
        }
        self.embedded
            .as_ref()
            .map(|e| e.threads.as_slice())
            .unwrap_or(&[])
    }

    /// Consume the conversation and return its threads.
    pub fn into_threads(self) -> Vec<Thread> {
        if !self.threads.is_empty() {
            return self.threads;
        }
        self.embedded.map(|e| e.threads).unwrap_or_default()
    }

    /// Check whether the conversation is closed.
    pub fn is_closed(&self) -> bool {
        self.status.as_deref() == Some("closed")
    }
}

/// Filters for listing conversations.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailbox_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,

    /// Status filter (active, pending, closed, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Free-text search, passed through to the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Get for Conversation {
    const RESOURCE: &'static str = "conversations";
}

impl List for Conversation {
    type Query = ConversationListQuery;
    const PATH: &'static str = "conversations";
    const EMBEDDED: &'static str = "conversations";
}

/// Fetch a single page of conversations.
pub async fn list_conversations(
    client: &FreeScoutClient,
    query: &ConversationListQuery,
    page: u32,
    per_page: u32,
) -> Result<Page<Conversation>> {
    Conversation::list_page(client, query, page, per_page).await
}

/// Fetch conversations across all pages, optionally capped at `max_pages`.
/// A cap of `0` is the same as no cap.
///
/// # Example
///
/// ```ignore
/// let recent = list_all_conversations(&client, Some(2)).await?;
/// ```
pub async fn list_all_conversations(
    client: &FreeScoutClient,
    max_pages: Option<u32>,
) -> Result<Vec<Conversation>> {
    Conversation::list_all(client, &ConversationListQuery::default(), max_pages).await
}

/// Search conversations by free text, optionally within one mailbox.
pub async fn search_conversations(
    client: &FreeScoutClient,
    query: &str,
    mailbox_id: Option<u64>,
) -> Result<Vec<Conversation>> {
    let query = ConversationListQuery {
        mailbox_id,
        search: Some(query.to_string()),
        ..Default::default()
    };
    Conversation::list(client, &query).await
}

/// Fetch all threads of a conversation.
pub async fn get_conversation_threads(
    client: &FreeScoutClient,
    conversation_id: u64,
) -> Result<Vec<Thread>> {
    let conversation = Conversation::get(client, conversation_id).await?;
    Ok(conversation.into_threads())
}
