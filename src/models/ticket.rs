//! Ticket model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::FreeScoutClient;
use crate::error::{FreeScoutError, Result};
use crate::models::customer::merge_extra;
use crate::models::CustomerRef;
use crate::traits::{Create, Get, List};

/// A support ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: u64,

    /// Human-facing ticket number.
    #[serde(default)]
    pub number: Option<u64>,

    #[serde(default)]
    pub subject: Option<String>,

    /// Status (active, pending, closed, spam).
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub mailbox_id: Option<u64>,

    #[serde(default)]
    pub customer: Option<CustomerRef>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for listing tickets.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailbox_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
}

/// Parameters for creating a ticket.
///
/// `extra` is merged over the generated fields and wins on collisions.
#[derive(Debug, Clone, Default)]
pub struct TicketCreateParams {
    pub subject: String,
    /// First message of the ticket.
    pub text: String,
    pub mailbox_id: u64,
    pub customer_id: Option<u64>,
    /// Customer email, for tickets from unknown customers.
    pub email: Option<String>,
    pub extra: Map<String, Value>,
}

impl TicketCreateParams {
    /// Parameters with the required fields and no extras.
    pub fn new(subject: impl Into<String>, text: impl Into<String>, mailbox_id: u64) -> Self {
        Self {
            subject: subject.into(),
            text: text.into(),
            mailbox_id,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn customer_id(mut self, customer_id: u64) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
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
        body.insert("subject".into(), Value::from(self.subject.as_str()));
        body.insert("text".into(), Value::from(self.text.as_str()));
        body.insert("mailboxId".into(), Value::from(self.mailbox_id));
        if let Some(customer_id) = self.customer_id {
            body.insert("customerId".into(), Value::from(customer_id));
        }
        if let Some(ref email) = self.email {
            body.insert("email".into(), Value::from(email.as_str()));
        }
        merge_extra(body, &self.extra)
    }
}

impl Get for Ticket {
    const RESOURCE: &'static str = "tickets";
}

impl List for Ticket {
    type Query = TicketListQuery;
    const PATH: &'static str = "tickets";
    const EMBEDDED: &'static str = "tickets";
}

#[async_trait]
impl Create for Ticket {
    type Params = TicketCreateParams;

    #[tracing::instrument(skip(client, params), fields(mailbox_id = params.mailbox_id))]
    async fn create(client: &FreeScoutClient, params: Self::Params) -> Result<Self> {
        let response = client.post("tickets", &params.to_body()).await?;
        let ticket: Ticket = response.json().await.map_err(FreeScoutError::HttpError)?;
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_serialization() {
        let query = TicketListQuery {
            mailbox_id: Some(2),
            customer_id: None,
        };
        let serialized = serde_qs::to_string(&query).expect("Failed to serialize query");
        assert_eq!(serialized, "mailboxId=2");

        let serialized = serde_qs::to_string(&TicketListQuery::default()).unwrap();
        assert_eq!(serialized, "");
    }

    #[test]
    fn test_create_body_optional_fields() {
        let body = TicketCreateParams::new("Printer on fire", "Help", 3).to_body();
        assert_eq!(body["subject"], "Printer on fire");
        assert_eq!(body["text"], "Help");
        assert_eq!(body["mailboxId"], 3);
        assert!(body.get("customerId").is_none());
        assert!(body.get("email").is_none());

        let body = TicketCreateParams::new("s", "t", 3)
            .customer_id(9)
            .email("bob@example.com")
            .to_body();
        assert_eq!(body["customerId"], 9);
        assert_eq!(body["email"], "bob@example.com");
    }

    #[test]
    fn test_create_extra_fields_win() {
        let body = TicketCreateParams::new("Subject", "Body", 3)
            .with_field("mailboxId", 4)
            .with_field("status", "pending")
            .to_body();

        assert_eq!(body["mailboxId"], 4);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["subject"], "Subject");
    }
}
