//! Execution tests for the knowledge base endpoints.
//!
//! Covers public versus authenticated requests and the degradation of
//! listing and search to empty results.

use freescout::{
    get_kb_article, get_kb_category, kb_health, list_kb_articles, list_kb_categories,
    search_kb_articles, try_list_kb_categories, try_search_kb_articles, FreeScoutClient,
    FreeScoutError, KbArticleQuery, KbScope, API_KEY_HEADER,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn categories_body() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": [
            {"id": 1, "name": "Billing", "parent_id": null, "children": [
                {"id": 2, "name": "Invoices", "parent_id": 1, "children": []}
            ]}
        ]
    })
}

#[tokio::test]
async fn test_public_requests_omit_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kb/public/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(categories_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();
    let categories = list_kb_categories(&client, KbScope::Public).await;

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].subtree_len(), 2);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key(API_KEY_HEADER));
}

#[tokio::test]
async fn test_private_requests_send_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kb/categories"))
        .and(header("X-FreeScout-API-Key", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(categories_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();
    let categories = list_kb_categories(&client, KbScope::Private).await;

    assert_eq!(categories[0].children[0].name, "Invoices");
}

#[tokio::test]
async fn test_list_articles_reads_string_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kb/public/articles"))
        .and(query_param("category_id", "2"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [
                {"id": 10, "category_id": 2, "title": "Downloading invoices", "views": 3,
                 "category": {"id": 2, "name": "Invoices"}}
            ],
            "pagination": {"total": 6, "per_page": "5", "current_page": "1", "total_pages": 2}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();
    let query = KbArticleQuery {
        category_id: Some(2),
        per_page: Some(5),
        ..Default::default()
    };
    let page = list_kb_articles(&client, KbScope::Public, &query).await;

    assert_eq!(page.len(), 1);
    assert_eq!(page.per_page, 5);
    assert_eq!(page.total, Some(6));
    assert!(page.has_more);
    assert_eq!(page.items[0].category.as_ref().unwrap().name, "Invoices");
}

#[tokio::test]
async fn test_server_error_degrades_to_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kb/public/articles"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server Error"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/kb/public/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();

    let page = list_kb_articles(&client, KbScope::Public, &KbArticleQuery::default()).await;
    assert!(page.is_empty());
    assert!(!page.has_more);

    let results = search_kb_articles(&client, "help", KbScope::Public).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_missing_module_degrades_to_empty() {
    // Nothing mounted: every route answers 404
    let mock_server = MockServer::start().await;
    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();

    assert!(list_kb_categories(&client, KbScope::Private).await.is_empty());

    let err = try_list_kb_categories(&client, KbScope::Private)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kb/public/search"))
        .and(query_param("q", "x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": "Search failed",
            "message": "index missing"
        })))
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();

    assert!(search_kb_articles(&client, "x", KbScope::Public).await.is_empty());

    let err = try_search_kb_articles(&client, "x", KbScope::Public)
        .await
        .unwrap_err();
    match err {
        FreeScoutError::KbUnavailable(reason) => assert_eq!(reason, "Search failed: index missing"),
        other => panic!("Expected KbUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_article_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kb/public/articles/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "article": {"id": 10, "title": "Downloading invoices", "content": "<p>Go to Billing</p>", "views": 4},
                "category": {"id": 2, "name": "Invoices"}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();
    let detail = get_kb_article(&client, 10, KbScope::Public).await.unwrap();

    assert_eq!(detail.article.display_title(), "Downloading invoices");
    assert_eq!(detail.article.views, 4);
    assert_eq!(detail.category.unwrap().name, "Invoices");
}

#[tokio::test]
async fn test_get_missing_article_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kb/public/articles/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "success": false,
            "error": "Article not found"
        })))
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();
    let err = get_kb_article(&client, 99, KbScope::Public).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("Article not found"));
}

#[tokio::test]
async fn test_get_category_with_articles() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kb/categories/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "category": {"id": 1, "name": "Billing"},
                "articles": [{"id": 3, "title": "Refunds"}],
                "article_count": 1
            }
        })))
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();
    let detail = get_kb_category(&client, 1, KbScope::Private).await.unwrap();

    assert_eq!(detail.category.name, "Billing");
    assert_eq!(detail.article_count, 1);
    assert_eq!(detail.articles[0].display_title(), "Refunds");
}

#[tokio::test]
async fn test_health_is_authenticated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/kb/health"))
        .and(header("X-FreeScout-API-Key", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "module": "KnowledgeBaseApi",
            "version": "1.0.0"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();
    let health = kb_health(&client).await.unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(health.version.as_deref(), Some("1.0.0"));
}
