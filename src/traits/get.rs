//! Get trait for fetching single entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::FreeScoutClient;
use crate::error::{FreeScoutError, Result};

/// Fetch a single entity by its numeric ID from `{RESOURCE}/{id}`.
///
/// # Example
///
/// ```ignore
/// use freescout::{FreeScoutClient, Get, Mailbox};
///
/// let client = FreeScoutClient::from_env()?;
/// let mailbox = Mailbox::get(&client, 1).await?;
/// ```
#[async_trait]
pub trait Get: DeserializeOwned + Send + Sized {
    /// Resource path relative to the API root (e.g. `threads`).
    const RESOURCE: &'static str;

    /// Fetch the entity with this ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &FreeScoutClient, id: u64) -> Result<Self> {
        tracing::debug!(resource = Self::RESOURCE, id, "fetching entity");
        let response = client.get(&format!("{}/{id}", Self::RESOURCE)).await?;
        response.json().await.map_err(FreeScoutError::HttpError)
    }
}
