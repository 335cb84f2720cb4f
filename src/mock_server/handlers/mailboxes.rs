//! Mailbox endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::{authorize, hal_page, not_found, PageParams, SharedState};
use crate::Mailbox;

/// GET /api/mailboxes
pub async fn list_mailboxes(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let mailboxes: Vec<&Mailbox> = state.mailboxes.values().collect();
    hal_page("mailboxes", &mailboxes, &params)
}

/// GET /api/mailboxes/{id}
pub async fn get_mailbox(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.mailboxes.get(&id) {
        Some(mailbox) => (StatusCode::OK, Json(mailbox.clone())).into_response(),
        None => not_found("Mailbox", id),
    }
}
