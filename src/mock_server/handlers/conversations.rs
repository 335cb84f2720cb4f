//! Conversation and thread endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{authorize, error_response, hal_page, not_found, PageParams, SharedState};
use crate::{Thread, DEFAULT_THREAD_TYPE};

/// Query parameters for listing conversations.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConversationsQuery {
    pub mailbox_id: Option<u64>,
    pub customer_id: Option<u64>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    #[serde(rename = "per_page")]
    pub per_page: Option<u32>,
}

/// Body of a thread creation request.
#[derive(Debug, Deserialize)]
pub struct CreateThreadBody {
    pub body: String,
    #[serde(rename = "type")]
    pub thread_type: Option<String>,
    pub status: Option<String>,
}

/// GET /api/conversations
pub async fn list_conversations(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListConversationsQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let conversations = state.list_conversations(
        query.mailbox_id,
        query.customer_id,
        query.status.as_deref(),
        query.search.as_deref().filter(|s| !s.is_empty()),
    );
    let params = PageParams {
        page: query.page,
        per_page: query.per_page,
    };
    hal_page("conversations", &conversations, &params)
}

/// GET /api/conversations/{id}
///
/// Threads are embedded under `_embedded.threads`.
pub async fn get_conversation(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.get_conversation(id) {
        Some(conversation) => (StatusCode::OK, Json(conversation)).into_response(),
        None => not_found("Conversation", id),
    }
}

/// POST /api/conversations/{id}/threads
pub async fn create_thread(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(conversation_id): Path<u64>,
    Json(body): Json<CreateThreadBody>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    if body.body.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            "Thread body must not be empty",
        );
    }

    let thread = Thread {
        id: 0,
        thread_type: Some(
            body.thread_type
                .unwrap_or_else(|| DEFAULT_THREAD_TYPE.to_string()),
        ),
        status: Some(body.status.unwrap_or_else(|| "active".to_string())),
        body: Some(body.body),
        created_at: Some(chrono::Utc::now()),
        ..Default::default()
    };

    match state.insert_thread(conversation_id, thread) {
        Some(thread) => (StatusCode::CREATED, Json(thread)).into_response(),
        None => not_found("Conversation", conversation_id),
    }
}

/// GET /api/threads/{id}
pub async fn get_thread(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.get_thread(id) {
        Some(thread) => (StatusCode::OK, Json(thread.clone())).into_response(),
        None => not_found("Thread", id),
    }
}
