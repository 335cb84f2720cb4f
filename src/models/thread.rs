//! Thread model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::FreeScoutClient;
use crate::error::{FreeScoutError, Result};
use crate::models::customer::merge_extra;
use crate::traits::{Create, Get};

/// Thread type used when none is given.
pub const DEFAULT_THREAD_TYPE: &str = "message";

/// One message or note within a conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: u64,

    /// Thread type (customer, message, note, lineitem, ...).
    #[serde(rename = "type", default)]
    pub thread_type: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    /// Sender address as shown in the mail headers.
    #[serde(default)]
    pub from: Option<String>,

    /// Body text (HTML for emails).
    #[serde(default)]
    pub body: Option<String>,

    /// Author of the thread, user or customer.
    #[serde(default)]
    pub created_by: Option<ThreadAuthor>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Person who wrote a thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadAuthor {
    #[serde(default)]
    pub id: Option<u64>,
    /// "user" or "customer".
    #[serde(rename = "type", default)]
    pub author_type: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Thread {
    /// Check whether this is an internal note.
    pub fn is_note(&self) -> bool {
        self.thread_type.as_deref() == Some("note")
    }

    /// Best available sender description.
    pub fn sender(&self) -> Option<&str> {
        self.from
            .as_deref()
            .or_else(|| self.created_by.as_ref().and_then(|a| a.email.as_deref()))
    }

    /// At most `max_chars` characters of the body.
    pub fn body_preview(&self, max_chars: usize) -> &str {
        let body = self.body.as_deref().unwrap_or("");
        match body.char_indices().nth(max_chars) {
            Some((idx, _)) => &body[..idx],
            None => body,
        }
    }
}

/// Parameters for adding a thread (reply or note) to a conversation.
///
/// `extra` is merged over the generated fields and wins on collisions.
#[derive(Debug, Clone)]
pub struct ThreadCreateParams {
    pub conversation_id: u64,
    pub body: String,
    pub thread_type: String,
    pub extra: Map<String, Value>,
}

impl ThreadCreateParams {
    /// A `message` thread with the given body.
    pub fn new(conversation_id: u64, body: impl Into<String>) -> Self {
        Self {
            conversation_id,
            body: body.into(),
            thread_type: DEFAULT_THREAD_TYPE.to_string(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn thread_type(mut self, thread_type: impl Into<String>) -> Self {
        self.thread_type = thread_type.into();
        self
    }

    /// Add an extra field, replacing any generated value with the same key.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The JSON body sent to the API.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("body".into(), Value::from(self.body.as_str()));
        body.insert("type".into(), Value::from(self.thread_type.as_str()));
        merge_extra(body, &self.extra)
    }
}

impl Get for Thread {
    const RESOURCE: &'static str = "threads";
}

#[async_trait]
impl Create for Thread {
    type Params = ThreadCreateParams;

    #[tracing::instrument(skip(client, params), fields(conversation_id = params.conversation_id))]
    async fn create(client: &FreeScoutClient, params: Self::Params) -> Result<Self> {
        let path = format!("conversations/{}/threads", params.conversation_id);
        let response = client.post(&path, &params.to_body()).await?;
        let thread: Thread = response.json().await.map_err(FreeScoutError::HttpError)?;
        Ok(thread)
    }
}
