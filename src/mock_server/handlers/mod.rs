//! HTTP request handlers for the mock server.

pub mod conversations;
pub mod customers;
pub mod knowledge_base;
pub mod mailboxes;
pub mod tickets;

pub use conversations::*;
pub use customers::*;
pub use knowledge_base::*;
pub use mailboxes::*;
pub use tickets::*;

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::API_KEY_HEADER;

pub type SharedState = Arc<RwLock<MockState>>;

/// Page size the helpdesk API uses when none is requested.
const DEFAULT_PER_PAGE: u32 = 50;

/// Paging parameters shared by the collection endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageParams {
    fn resolve(&self) -> (u32, u32) {
        (
            self.page.unwrap_or(1).max(1),
            self.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1),
        )
    }
}

/// Reject the request unless it carries the required API key.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(ref required) = state.required_api_key else {
        return Ok(());
    };

    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if provided == Some(required.as_str()) {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Invalid or missing API key",
        ))
    }
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": error,
            "message": message
        })),
    )
        .into_response()
}

pub(crate) fn not_found(what: &str, id: u64) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        &format!("{what} not found"),
        &format!("No {} found with id: {}", what.to_lowercase(), id),
    )
}

/// Index of the first item on a 1-based `page`. Saturates instead of
/// overflowing for absurd page numbers.
pub(crate) fn page_offset(page: u32, per_page: u32) -> usize {
    let offset = u64::from(page.saturating_sub(1)) * u64::from(per_page);
    usize::try_from(offset).unwrap_or(usize::MAX)
}

/// Render one page of `items` as a HAL collection under `_embedded.<key>`.
pub(crate) fn hal_page<T: Serialize + Clone>(
    key: &str,
    items: &[&T],
    params: &PageParams,
) -> Response {
    let (page, per_page) = params.resolve();
    let total = items.len() as u64;
    let total_pages = total.div_ceil(u64::from(per_page));

    let page_items: Vec<T> = items
        .iter()
        .skip(page_offset(page, per_page))
        .take(per_page as usize)
        .map(|item| (*item).clone())
        .collect();

    // PHP serializes an empty map as a list
    let embedded = if page_items.is_empty() {
        serde_json::json!([])
    } else {
        serde_json::json!({ key: page_items })
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "_embedded": embedded,
            "page": {
                "size": per_page,
                "totalElements": total,
                "totalPages": total_pages,
                "number": page
            }
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 50), 0);
        assert_eq!(page_offset(3, 20), 40);
    }

    #[test]
    fn test_page_offset_does_not_overflow_on_huge_pages() {
        let expected = u64::from(u32::MAX - 1) * u64::from(u32::MAX);
        assert_eq!(
            page_offset(u32::MAX, u32::MAX),
            usize::try_from(expected).unwrap_or(usize::MAX)
        );
    }
}
