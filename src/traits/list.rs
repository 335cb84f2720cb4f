//! List trait for fetching collections of entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::FreeScoutClient;
use crate::error::{FreeScoutError, Result};
use crate::pagination::{HalCollection, Page};

/// Default page size for multi-page fetches.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Query type for collections that take no filters.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoQuery {}

/// List/filter entities from a HAL collection endpoint.
///
/// Implementors only name their endpoint and the `_embedded` key; the
/// request and envelope handling is shared.
///
/// # Example
///
/// ```ignore
/// use freescout::{Conversation, ConversationListQuery, FreeScoutClient, List};
///
/// let client = FreeScoutClient::from_env()?;
///
/// // Fetch a single page
/// let page = Conversation::list_page(&client, &Default::default(), 1, 10).await?;
///
/// // Fetch every page, at most five of them
/// let all = Conversation::list_all(&client, &Default::default(), Some(5)).await?;
/// ```
#[async_trait]
pub trait List: DeserializeOwned + Send + Sized {
    /// Query parameters for filtering.
    type Query: Default + Serialize + Send + Sync;

    /// Collection path relative to the API root (e.g. `conversations`).
    const PATH: &'static str;

    /// Key of the collection inside `_embedded`.
    const EMBEDDED: &'static str;

    /// List entities matching the query with the server's default paging.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope is malformed.
    async fn list(client: &FreeScoutClient, query: &Self::Query) -> Result<Vec<Self>> {
        let response = client.get_with_query(Self::PATH, query).await?;
        let mut collection: HalCollection =
            response.json().await.map_err(FreeScoutError::HttpError)?;
        collection.take_items(Self::EMBEDDED)
    }

    /// List a single page of entities matching the query.
    ///
    /// # Arguments
    ///
    /// * `client` - The FreeScout API client
    /// * `query` - Query parameters for filtering
    /// * `page` - Page number (1-indexed)
    /// * `per_page` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &FreeScoutClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams<'a, Q: Serialize> {
            #[serde(flatten)]
            query: &'a Q,
            page: u32,
            per_page: u32,
        }

        let params = RequestParams {
            query,
            page,
            per_page,
        };

        let response = client.get_with_query(Self::PATH, &params).await?;
        let collection: HalCollection =
            response.json().await.map_err(FreeScoutError::HttpError)?;
        collection.into_page(Self::EMBEDDED, page, per_page)
    }

    /// List entities across pages of [`DEFAULT_PAGE_SIZE`].
    ///
    /// Stops at the first empty page, once the reported page count is
    /// reached (a response without page info counts as a single page), or
    /// after `max_pages` requests. `None` and `Some(0)` both mean no cap.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(
        client: &FreeScoutClient,
        query: &Self::Query,
        max_pages: Option<u32>,
    ) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 1;
        let max_pages = max_pages.filter(|&max| max > 0);

        loop {
            if max_pages.is_some_and(|max| page > max) {
                break;
            }

            let result = Self::list_page(client, query, page, DEFAULT_PAGE_SIZE).await?;
            if result.is_empty() {
                break;
            }

            let total_pages = result.total_pages.unwrap_or(1);
            tracing::debug!(page, total_pages, items = result.len(), "fetched {}", Self::PATH);
            all_items.extend(result.items);

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(all_items)
    }
}
