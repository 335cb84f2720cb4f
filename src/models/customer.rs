//! Customer model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::FreeScoutClient;
use crate::error::{FreeScoutError, Result};
use crate::traits::{Create, Get, List, NoQuery};

/// A FreeScout customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer ID.
    pub id: u64,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// Company name.
    #[serde(default)]
    pub company: Option<String>,

    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,

    /// Email addresses, each tagged with a type (work, home, other).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<CustomerEmail>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// HAL-embedded resources; the server nests email addresses here.
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<CustomerEmbedded>,
}

/// Resources embedded in a customer payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerEmbedded {
    #[serde(default)]
    pub emails: Vec<CustomerEmail>,
}

/// An email address attached to a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerEmail {
    #[serde(default)]
    pub id: Option<u64>,

    /// The address itself.
    pub value: String,

    /// Address type tag (e.g. "work").
    #[serde(rename = "type", default)]
    pub email_type: Option<String>,
}

impl Customer {
    /// First and last name joined, trimmed.
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{first} {last}").trim().to_string()
    }

    /// Email addresses from the top-level array, else from `_embedded.emails`.
    pub fn emails(&self) -> &[CustomerEmail] {
        if !self.emails.is_empty() {
            return &self.emails;
        }
        self.embedded
            .as_ref()
            .map(|embedded| embedded.emails.as_slice())
            .unwrap_or_default()
    }

    /// The first email address, if any.
    pub fn primary_email(&self) -> Option<&str> {
        self.emails().first().map(|e| e.value.as_str())
    }
}

/// Parameters for creating a customer.
///
/// `extra` is merged over the generated fields; a colliding key in
/// `extra` replaces the generated value.
#[derive(Debug, Clone, Default)]
pub struct CustomerCreateParams {
    pub first_name: String,
    pub last_name: String,
    /// Stored as a single `work` email.
    pub email: String,
    pub extra: Map<String, Value>,
}

impl CustomerCreateParams {
    /// Parameters with the required fields and no extras.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            extra: Map::new(),
        }
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
        body.insert("firstName".into(), Value::from(self.first_name.as_str()));
        body.insert("lastName".into(), Value::from(self.last_name.as_str()));
        body.insert(
            "emails".into(),
            serde_json::json!([{ "value": self.email, "type": "work" }]),
        );
        merge_extra(body, &self.extra)
    }
}

/// Overlay `extra` on `body`; `extra` wins on key collisions.
pub(crate) fn merge_extra(mut body: Map<String, Value>, extra: &Map<String, Value>) -> Value {
    for (key, value) in extra {
        body.insert(key.clone(), value.clone());
    }
    Value::Object(body)
}

impl Get for Customer {
    const RESOURCE: &'static str = "customers";
}

impl List for Customer {
    type Query = NoQuery;
    const PATH: &'static str = "customers";
    const EMBEDDED: &'static str = "customers";
}

#[async_trait]
impl Create for Customer {
    type Params = CustomerCreateParams;

    #[tracing::instrument(skip(client, params), fields(email = %params.email))]
    async fn create(client: &FreeScoutClient, params: Self::Params) -> Result<Self> {
        let response = client.post("customers", &params.to_body()).await?;
        let customer: Customer = response.json().await.map_err(FreeScoutError::HttpError)?;
        Ok(customer)
    }
}
