//! Mock FreeScout API server.
//!
//! Provides an axum-based HTTP server that simulates the FreeScout API,
//! including the knowledge base module.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock FreeScout API server for testing.
///
/// The server runs in the background and can be used to test the FreeScout
/// client against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `FreeScoutClient` for testing. It is the
    /// installation root; the API lives under `/api`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// The state [`MockServer::start`] serves.
    pub fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for mailbox in scenario.mailboxes {
            state = state.with_mailbox(mailbox);
        }

        for customer in scenario.customers {
            state = state.with_customer(customer);
        }

        for ticket in scenario.tickets {
            state = state.with_ticket(ticket);
        }

        for conversation in scenario.conversations {
            state = state.with_conversation(conversation);
        }

        for (category, public) in scenario.kb_categories {
            state = state.with_kb_category(category, public);
        }

        for (article, public, published) in scenario.kb_articles {
            state = state.with_kb_article(article, public, published);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Helpdesk routes
            .route("/api/mailboxes", get(handlers::list_mailboxes))
            .route("/api/mailboxes/:id", get(handlers::get_mailbox))
            .route(
                "/api/customers",
                get(handlers::list_customers).post(handlers::create_customer),
            )
            .route("/api/customers/:id", get(handlers::get_customer))
            .route(
                "/api/tickets",
                get(handlers::list_tickets).post(handlers::create_ticket),
            )
            .route("/api/tickets/:id", get(handlers::get_ticket))
            .route("/api/conversations", get(handlers::list_conversations))
            .route("/api/conversations/:id", get(handlers::get_conversation))
            .route(
                "/api/conversations/:id/threads",
                post(handlers::create_thread),
            )
            .route("/api/threads/:id", get(handlers::get_thread))
            // Knowledge base routes (public)
            .route("/api/kb/public/categories", get(handlers::public_kb_categories))
            .route("/api/kb/public/categories/:id", get(handlers::public_kb_category))
            .route("/api/kb/public/articles", get(handlers::public_kb_articles))
            .route("/api/kb/public/articles/:id", get(handlers::public_kb_article))
            .route("/api/kb/public/search", get(handlers::public_kb_search))
            // Knowledge base routes (authenticated)
            .route("/api/kb/categories", get(handlers::kb_categories))
            .route("/api/kb/categories/:id", get(handlers::kb_category))
            .route("/api/kb/articles", get(handlers::kb_articles))
            .route("/api/kb/articles/:id", get(handlers::kb_article))
            .route("/api/kb/search", get(handlers::kb_search))
            .route("/api/kb/health", get(handlers::kb_health))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Customer, FreeScoutClient, Get, List, Mailbox, NoQuery};

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_customer_with_client() {
        let server = MockServer::start().await;
        let client = FreeScoutClient::new(server.url(), "test-key").unwrap();

        let customer = Customer::get(&client, 1)
            .await
            .expect("Failed to get customer");

        assert_eq!(customer.full_name(), "Alice Johnson");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_mailboxes_with_client() {
        let server = MockServer::start().await;
        let client = FreeScoutClient::new(server.url(), "test-key").unwrap();

        let page = Mailbox::list_page(&client, &NoQuery {}, 1, 1)
            .await
            .expect("Failed to list mailboxes");

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Support");
        assert_eq!(page.total, Some(2));
        assert!(page.has_more);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = FreeScoutClient::new(server.url(), "test-key").unwrap();

        let err = Customer::get(&client, 1).await.unwrap_err();
        assert!(err.is_not_found());

        let mailboxes = Mailbox::list(&client, &NoQuery {}).await.unwrap();
        assert!(mailboxes.is_empty());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_api_key() {
        let state = MockState::new()
            .with_mailbox(Fixtures::mailbox(1, "Support", "support@example.com"))
            .with_required_api_key("secret");
        let server = MockServer::with_state(state).await;

        let wrong = FreeScoutClient::new(server.url(), "wrong").unwrap();
        let err = Mailbox::get(&wrong, 1).await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));

        let right = FreeScoutClient::new(server.url(), "secret").unwrap();
        let mailbox = Mailbox::get(&right, 1).await.unwrap();
        assert_eq!(mailbox.name, "Support");

        server.shutdown().await;
    }
}
