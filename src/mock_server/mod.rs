//! Mock FreeScout API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the FreeScout
//! API, knowledge base module included, for integration and end-to-end
//! testing. Unlike wiremock which mocks at the HTTP level per-test, this
//! server maintains state across requests, enabling realistic workflow
//! testing.
//!
//! # Example
//!
//! ```ignore
//! use freescout::mock_server::MockServer;
//! use freescout::{Conversation, FreeScoutClient, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = FreeScoutClient::new(server.url(), "test-key").unwrap();
//!
//!     // Server comes with default fixtures
//!     let conversation = Conversation::get(&client, 1).await.unwrap();
//!     assert_eq!(conversation.threads().len(), 3);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockKbArticle, MockKbCategory, MockState};
