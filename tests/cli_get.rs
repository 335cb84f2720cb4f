//! Execution tests for single-entity fetches.
//!
//! Uses wiremock to mock the FreeScout API and test the request each
//! `Get` implementation sends.

use freescout::{Conversation, Customer, FreeScoutClient, FreeScoutError, Get, Mailbox, Thread};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_customer_returns_entity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/customers/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 5,
            "firstName": "Ann",
            "lastName": "Lee",
            "company": "Acme",
            "emails": [{"id": 9, "value": "ann@example.com", "type": "work"}],
            "createdAt": "2024-05-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "test-key").unwrap();
    let customer = Customer::get(&client, 5).await.unwrap();

    assert_eq!(customer.full_name(), "Ann Lee");
    assert_eq!(customer.primary_email(), Some("ann@example.com"));
    assert_eq!(customer.company.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_get_customer_reads_embedded_emails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/customers/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 5,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "_embedded": {
                "emails": [{"value": "ada@example.com", "type": "work"}]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "test-key").unwrap();
    let customer = Customer::get(&client, 5).await.unwrap();

    assert_eq!(customer.primary_email(), Some("ada@example.com"));
    assert_eq!(customer.emails()[0].email_type.as_deref(), Some("work"));
}

#[tokio::test]
async fn test_requests_carry_api_key_and_json_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mailboxes/1"))
        .and(header("X-FreeScout-API-Key", "secret-key"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json; charset=UTF-8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 1, "name": "Support"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "secret-key").unwrap();
    let mailbox = Mailbox::get(&client, 1).await.unwrap();

    assert_eq!(mailbox.name, "Support");
}

#[tokio::test]
async fn test_trailing_api_segment_in_base_url_is_ignored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mailboxes/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 2, "name": "Sales"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/api/", mock_server.uri());
    let client = FreeScoutClient::new(&base, "key").unwrap();
    let mailbox = Mailbox::get(&client, 2).await.unwrap();

    assert_eq!(mailbox.id, 2);
}

#[tokio::test]
async fn test_subdirectory_installation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/helpdesk/api/threads/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 3, "type": "note", "body": "internal"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/helpdesk", mock_server.uri());
    let client = FreeScoutClient::new(&base, "key").unwrap();
    let thread = Thread::get(&client, 3).await.unwrap();

    assert!(thread.is_note());
}

#[tokio::test]
async fn test_get_conversation_reads_embedded_threads() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/conversations/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 12,
            "number": 1012,
            "subject": "Broken login",
            "status": "active",
            "customer": {"id": 4, "firstName": "Bob", "lastName": "Smith", "email": "bob@example.com"},
            "_embedded": {
                "threads": [
                    {"id": 1, "type": "customer", "from": "bob@example.com", "body": "I can't log in"},
                    {"id": 2, "type": "message", "body": "Try resetting your password"}
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();
    let conversation = Conversation::get(&client, 12).await.unwrap();

    assert_eq!(conversation.threads().len(), 2);
    assert_eq!(conversation.threads()[0].sender(), Some("bob@example.com"));
    assert!(!conversation.is_closed());
}

#[tokio::test]
async fn test_not_found_is_api_error_with_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/customers/999"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "Customer not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();
    let err = Customer::get(&client, 999).await.unwrap_err();

    assert!(err.is_not_found());
    match err {
        FreeScoutError::ApiError {
            message,
            status_code,
            body,
        } => {
            assert_eq!(message, "Customer not found");
            assert_eq!(status_code, Some(404));
            assert!(body.unwrap().contains("Customer not found"));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_with_plain_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mailboxes/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Whoops, looks like something went wrong."))
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "key").unwrap();
    let err = Mailbox::get(&client, 1).await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert!(err.to_string().contains("Whoops"));
}

#[tokio::test]
async fn test_unauthorized_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mailboxes/1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "Unauthorized"
        })))
        .mount(&mock_server)
        .await;

    let client = FreeScoutClient::new(&mock_server.uri(), "bad-key").unwrap();
    let err = Mailbox::get(&client, 1).await.unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert!(err.to_string().contains("Unauthorized"));
}
