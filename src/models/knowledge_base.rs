//! Knowledge base categories and articles.
//!
//! The knowledge base lives in an optional server module with two endpoint
//! families: `kb/public/...` (no authentication, public content only) and
//! `kb/...` (authenticated). Pick one with [`KbScope`].
//!
//! Listing and searching degrade to an empty result when the module is
//! missing or fails; the `try_` variants and [`kb_health`] surface the
//! underlying error instead.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::FreeScoutClient;
use crate::error::{FreeScoutError, Result};
use crate::pagination::{KbEnvelope, KbPagination, Page};
use crate::traits::NoQuery;

/// Page size the knowledge base module uses when none is requested.
pub const KB_DEFAULT_PER_PAGE: u32 = 20;

/// Which knowledge base endpoint family to call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KbScope {
    /// Unauthenticated endpoints serving public content.
    #[default]
    Public,
    /// Authenticated endpoints serving all published content.
    Private,
}

impl KbScope {
    /// Path prefix relative to the API root.
    pub fn prefix(self) -> &'static str {
        match self {
            KbScope::Public => "kb/public",
            KbScope::Private => "kb",
        }
    }
}

impl From<bool> for KbScope {
    /// `true` selects the public endpoints.
    fn from(public: bool) -> Self {
        if public {
            KbScope::Public
        } else {
            KbScope::Private
        }
    }
}

/// A knowledge base category; categories form a tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KbCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub order: Option<i64>,
    /// Nested child categories (only present in category listings).
    #[serde(default)]
    pub children: Vec<KbCategory>,
}

impl KbCategory {
    /// Number of categories in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(KbCategory::subtree_len).sum::<usize>()
    }
}

/// A knowledge base article.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KbArticle {
    pub id: u64,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Full body, only returned by the article detail endpoint.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub views: u64,
    /// Parent category, attached to list and search results.
    #[serde(default)]
    pub category: Option<KbCategory>,
    /// Database timestamp, e.g. `2024-05-01 10:20:30`.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl KbArticle {
    /// Title, or "Untitled".
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// Article detail: the article and its category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbArticleDetail {
    pub article: KbArticle,
    #[serde(default)]
    pub category: Option<KbCategory>,
}

/// Category detail: the category and its published articles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbCategoryDetail {
    pub category: KbCategory,
    #[serde(default)]
    pub articles: Vec<KbArticle>,
    #[serde(default)]
    pub article_count: u64,
}

/// Health report of the knowledge base module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbHealth {
    pub status: String,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Filters for listing articles.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KbArticleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
}

async fn kb_request<T, Q>(
    client: &FreeScoutClient,
    scope: KbScope,
    path: &str,
    query: &Q,
) -> Result<(T, Option<KbPagination>)>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    let path = format!("{}/{}", scope.prefix(), path);
    let response = match scope {
        KbScope::Public => client.get_public(&path, query).await?,
        KbScope::Private => client.get_with_query(&path, query).await?,
    };
    let envelope: KbEnvelope<T> = response.json().await.map_err(FreeScoutError::HttpError)?;
    envelope.into_data()
}

fn degrade<T>(what: &str, scope: KbScope, result: Result<T>, fallback: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                error = %e,
                scope = scope.prefix(),
                "knowledge base {what} unavailable, returning empty result"
            );
            fallback()
        }
    }
}

/// List the category tree, surfacing errors.
#[tracing::instrument(skip(client))]
pub async fn try_list_kb_categories(
    client: &FreeScoutClient,
    scope: KbScope,
) -> Result<Vec<KbCategory>> {
    let (categories, _) = kb_request(client, scope, "categories", &NoQuery {}).await?;
    Ok(categories)
}

/// List the category tree; empty if the knowledge base is unavailable.
pub async fn list_kb_categories(client: &FreeScoutClient, scope: KbScope) -> Vec<KbCategory> {
    let result = try_list_kb_categories(client, scope).await;
    degrade("categories", scope, result, Vec::new)
}

/// Fetch a category with its articles.
///
/// # Errors
///
/// Returns an error if the category does not exist or the request fails.
#[tracing::instrument(skip(client))]
pub async fn get_kb_category(
    client: &FreeScoutClient,
    id: u64,
    scope: KbScope,
) -> Result<KbCategoryDetail> {
    let (detail, _) = kb_request(client, scope, &format!("categories/{id}"), &NoQuery {}).await?;
    Ok(detail)
}

/// List a page of articles, surfacing errors.
#[tracing::instrument(skip(client))]
pub async fn try_list_kb_articles(
    client: &FreeScoutClient,
    scope: KbScope,
    query: &KbArticleQuery,
) -> Result<Page<KbArticle>> {
    let (articles, pagination): (Vec<KbArticle>, _) =
        kb_request(client, scope, "articles", query).await?;

    let requested_page = query.page.unwrap_or(1);
    let requested_per_page = query.per_page.unwrap_or(KB_DEFAULT_PER_PAGE);

    Ok(match pagination {
        Some(p) => Page::new(
            articles,
            if p.current_page > 0 { p.current_page } else { requested_page },
            if p.per_page > 0 { p.per_page } else { requested_per_page },
            Some(p.total),
            Some(p.total_pages),
        ),
        None => Page::new(articles, requested_page, requested_per_page, None, None),
    })
}

/// List a page of articles; an empty page if the knowledge base is unavailable.
pub async fn list_kb_articles(
    client: &FreeScoutClient,
    scope: KbScope,
    query: &KbArticleQuery,
) -> Page<KbArticle> {
    let result = try_list_kb_articles(client, scope, query).await;
    degrade("articles", scope, result, || {
        Page::empty(
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(KB_DEFAULT_PER_PAGE),
        )
    })
}

/// Fetch an article with its category.
///
/// The server counts every call as a view.
///
/// # Errors
///
/// Returns an error if the article does not exist or the request fails.
#[tracing::instrument(skip(client))]
pub async fn get_kb_article(
    client: &FreeScoutClient,
    id: u64,
    scope: KbScope,
) -> Result<KbArticleDetail> {
    let (detail, _) = kb_request(client, scope, &format!("articles/{id}"), &NoQuery {}).await?;
    Ok(detail)
}

/// Search article titles, excerpts and bodies, surfacing errors.
#[tracing::instrument(skip(client))]
pub async fn try_search_kb_articles(
    client: &FreeScoutClient,
    query: &str,
    scope: KbScope,
) -> Result<Vec<KbArticle>> {
    let (articles, _) = kb_request(client, scope, "search", &SearchParams { q: query }).await?;
    Ok(articles)
}

/// Search articles; empty if the knowledge base is unavailable.
pub async fn search_kb_articles(
    client: &FreeScoutClient,
    query: &str,
    scope: KbScope,
) -> Vec<KbArticle> {
    let result = try_search_kb_articles(client, query, scope).await;
    degrade("search", scope, result, Vec::new)
}

/// Check that the knowledge base module is installed and answering.
///
/// # Errors
///
/// Returns an error if the module is absent or the key is rejected.
#[tracing::instrument(skip(client))]
pub async fn kb_health(client: &FreeScoutClient) -> Result<KbHealth> {
    let response = client.get("kb/health").await?;
    let health: KbHealth = response.json().await.map_err(FreeScoutError::HttpError)?;
    Ok(health)
}
