//! Knowledge base endpoint handlers.
//!
//! Each route exists twice: under `kb/public` without authentication,
//! serving public content only, and under `kb` behind the API key.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{authorize, page_offset, SharedState};
use crate::{KbArticleDetail, KbCategoryDetail, KbHealth, KB_DEFAULT_PER_PAGE};

/// Query parameters for listing articles.
#[derive(Debug, Default, Deserialize)]
pub struct ListArticlesQuery {
    pub category_id: Option<u64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Query parameters for searching articles.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

fn kb_ok<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "data": data })),
    )
        .into_response()
}

fn kb_error(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "success": false,
            "error": error,
            "message": message
        })),
    )
        .into_response()
}

fn module_missing() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Run the shared gatekeeping: module presence, then the key for private routes.
async fn gate(state: &SharedState, headers: &HeaderMap, public: bool) -> Result<(), Response> {
    let state = state.read().await;
    if !state.kb_enabled {
        return Err(module_missing());
    }
    if public {
        Ok(())
    } else {
        authorize(&state, headers)
    }
}

async fn categories(state: SharedState, headers: HeaderMap, public: bool) -> Response {
    if let Err(rejection) = gate(&state, &headers, public).await {
        return rejection;
    }
    let state = state.read().await;
    kb_ok(state.kb_category_tree(public))
}

async fn category(state: SharedState, headers: HeaderMap, id: u64, public: bool) -> Response {
    if let Err(rejection) = gate(&state, &headers, public).await {
        return rejection;
    }
    let state = state.read().await;

    match state.get_kb_category(id, public) {
        Some(category) => {
            let articles = state.list_kb_articles(Some(id), public);
            kb_ok(KbCategoryDetail {
                category,
                article_count: articles.len() as u64,
                articles,
            })
        }
        None => kb_error(StatusCode::NOT_FOUND, "Category not found", "Not Found"),
    }
}

async fn articles(
    state: SharedState,
    headers: HeaderMap,
    query: ListArticlesQuery,
    public: bool,
) -> Response {
    if let Err(rejection) = gate(&state, &headers, public).await {
        return rejection;
    }
    let state = state.read().await;

    let all = state.list_kb_articles(query.category_id, public);
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(KB_DEFAULT_PER_PAGE).max(1);
    let total = all.len() as u64;
    let total_pages = total.div_ceil(u64::from(per_page));

    let items: Vec<_> = all
        .into_iter()
        .skip(page_offset(page, per_page))
        .take(per_page as usize)
        .collect();

    // The module echoes paging from the query string, so counters arrive
    // as strings.
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "data": items,
            "pagination": {
                "total": total,
                "per_page": per_page.to_string(),
                "current_page": page.to_string(),
                "total_pages": total_pages
            }
        })),
    )
        .into_response()
}

async fn article(state: SharedState, headers: HeaderMap, id: u64, public: bool) -> Response {
    if let Err(rejection) = gate(&state, &headers, public).await {
        return rejection;
    }
    let mut state = state.write().await;

    match state.view_kb_article(id, public) {
        Some(mut article) => {
            let category = article
                .category_id
                .and_then(|category_id| state.get_kb_category(category_id, public));
            article.category = None;
            kb_ok(KbArticleDetail { article, category })
        }
        None => kb_error(StatusCode::NOT_FOUND, "Article not found", "Not Found"),
    }
}

async fn search(state: SharedState, headers: HeaderMap, query: SearchQuery, public: bool) -> Response {
    if let Err(rejection) = gate(&state, &headers, public).await {
        return rejection;
    }

    let Some(q) = query.q.filter(|q| !q.trim().is_empty()) else {
        return kb_error(
            StatusCode::BAD_REQUEST,
            "Search query is required",
            "Missing parameter: q",
        );
    };

    let state = state.read().await;
    kb_ok(state.search_kb_articles(q.trim(), public))
}

/// GET /api/kb/public/categories
pub async fn public_kb_categories(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    categories(state, headers, true).await
}

/// GET /api/kb/categories
pub async fn kb_categories(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    categories(state, headers, false).await
}

/// GET /api/kb/public/categories/{id}
pub async fn public_kb_category(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    category(state, headers, id, true).await
}

/// GET /api/kb/categories/{id}
pub async fn kb_category(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    category(state, headers, id, false).await
}

/// GET /api/kb/public/articles
pub async fn public_kb_articles(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListArticlesQuery>,
) -> Response {
    articles(state, headers, query, true).await
}

/// GET /api/kb/articles
pub async fn kb_articles(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListArticlesQuery>,
) -> Response {
    articles(state, headers, query, false).await
}

/// GET /api/kb/public/articles/{id}
pub async fn public_kb_article(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    article(state, headers, id, true).await
}

/// GET /api/kb/articles/{id}
pub async fn kb_article(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    article(state, headers, id, false).await
}

/// GET /api/kb/public/search
pub async fn public_kb_search(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Response {
    search(state, headers, query, true).await
}

/// GET /api/kb/search
pub async fn kb_search(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Response {
    search(state, headers, query, false).await
}

/// GET /api/kb/health
pub async fn kb_health(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if let Err(rejection) = gate(&state, &headers, false).await {
        return rejection;
    }

    (
        StatusCode::OK,
        Json(KbHealth {
            status: "ok".to_string(),
            module: Some("KnowledgeBaseApi".to_string()),
            version: Some("1.0.0".to_string()),
        }),
    )
        .into_response()
}
