//! Create trait for adding new entities.

use async_trait::async_trait;

use crate::client::FreeScoutClient;
use crate::error::Result;

/// Create a new entity.
///
/// The parameters carry the fields the endpoint requires plus a map of
/// extra fields. Extra fields are merged over the required ones, so a
/// caller-supplied key replaces the default value.
///
/// # Example
///
/// ```ignore
/// use freescout::{Create, Customer, CustomerCreateParams, FreeScoutClient};
///
/// let client = FreeScoutClient::from_env()?;
/// let customer = Customer::create(
///     &client,
///     CustomerCreateParams::new("Ada", "Lovelace", "ada@example.com"),
/// ).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters for the new entity.
    type Params: Send;

    /// Create the entity and return the server's representation of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the entity or the request fails.
    async fn create(client: &FreeScoutClient, params: Self::Params) -> Result<Self>;
}
