//! FreeScout API client library.
//!
//! A Rust library for the FreeScout helpdesk REST API using a trait-based
//! architecture where each operation (Get, List, Create) is defined as a
//! trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use freescout::{Conversation, FreeScoutClient, Get, List, Mailbox, NoQuery};
//!
//! #[tokio::main]
//! async fn main() -> freescout::Result<()> {
//!     // Create client from environment variables
//!     let client = FreeScoutClient::from_env()?;
//!
//!     // List mailboxes
//!     let mailboxes = Mailbox::list(&client, &NoQuery {}).await?;
//!     println!("Found {} mailboxes", mailboxes.len());
//!
//!     // Fetch a conversation with its threads
//!     let conversation = Conversation::get(&client, 42).await?;
//!     println!("{} threads", conversation.threads().len());
//!
//!     // Fetch at most two pages of conversations
//!     let recent = freescout::list_all_conversations(&client, Some(2)).await?;
//!     println!("Fetched {} conversations", recent.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around three core traits:
//!
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch collections, one page or all pages
//! - [`Create`] - Create an entity from required fields plus extras
//!
//! Knowledge base endpoints live in an optional server module and are
//! exposed as free functions taking a [`KbScope`].
//!
//! # Configuration
//!
//! [`Config::from_env`] and [`FreeScoutClient::from_env`] read:
//!
//! - `FREESCOUT_BASE_URL` (required) - Installation URL; a trailing `/api` is ignored
//! - `FREESCOUT_API_KEY` (required) - Your FreeScout API key
//!
//! The library never loads `.env` files; binaries do that before resolving
//! configuration.

pub mod cli;
mod client;
mod config;
mod error;
mod models;
pub mod output;
mod pagination;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{FreeScoutClient, API_KEY_HEADER};
pub use config::{normalize_base_url, Config, API_KEY_ENV, BASE_URL_ENV};
pub use error::{FreeScoutError, Result};
pub use pagination::{HalPageInfo, KbPagination, Page};

// Re-export traits
pub use traits::{Create, Get, List, NoQuery, DEFAULT_PAGE_SIZE};

// Re-export output formatting
pub use output::PrettyPrint;

// Re-export models
pub use models::{
    // Customer types
    Customer,
    CustomerCreateParams,
    CustomerEmail,
    CustomerEmbedded,
    CustomerRef,
    // Ticket types
    Ticket,
    TicketCreateParams,
    TicketListQuery,
    // Mailbox types
    Mailbox,
    // Conversation types
    Conversation,
    ConversationEmbedded,
    ConversationListQuery,
    // Thread types
    Thread,
    ThreadAuthor,
    ThreadCreateParams,
    DEFAULT_THREAD_TYPE,
    // Knowledge base types
    KbArticle,
    KbArticleDetail,
    KbArticleQuery,
    KbCategory,
    KbCategoryDetail,
    KbHealth,
    KbScope,
    KB_DEFAULT_PER_PAGE,
};

// Re-export convenience functions
pub use models::{
    get_conversation_threads, list_all_conversations, list_conversations, search_conversations,
};
pub use models::{
    get_kb_article, get_kb_category, kb_health, list_kb_articles, list_kb_categories,
    search_kb_articles, try_list_kb_articles, try_list_kb_categories, try_search_kb_articles,
};
