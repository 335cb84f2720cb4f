//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the freescout binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{API_KEY_ENV, BASE_URL_ENV};

/// Key handed to the client for public knowledge base commands run without
/// one. Public endpoints never send it.
pub const PUBLIC_PLACEHOLDER_KEY: &str = "public";

/// FreeScout API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "freescout", about = "FreeScout helpdesk API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// FreeScout installation URL.
    #[arg(long, global = true, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    /// FreeScout API key.
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Whether the command only touches unauthenticated endpoints.
    ///
    /// True for `kb --public` commands except `health`, which has no
    /// public route.
    pub fn is_public_only(&self) -> bool {
        match &self.command {
            Command::Kb(args) => args.public && !matches!(args.command, KbCommand::Health),
            _ => false,
        }
    }

    /// The configured API key, or [`PUBLIC_PLACEHOLDER_KEY`] when none is
    /// set and the command is public-only. Blank keys count as unset.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.is_public_only().then_some(PUBLIC_PLACEHOLDER_KEY))
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The numeric ID.
        id: u64,
    },

    /// List entities with optional filtering and pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Only entities in this mailbox (tickets, conversations).
        #[arg(long)]
        mailbox: Option<u64>,

        /// Only entities of this customer (tickets, conversations).
        #[arg(long)]
        customer: Option<u64>,

        /// Conversation status filter (active, pending, closed, spam).
        #[arg(long)]
        status: Option<String>,

        /// Page number (1-indexed, conversations only).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page (conversations only).
        #[arg(long)]
        per_page: Option<u32>,

        /// Fetch every page of conversations.
        #[arg(long, conflicts_with = "page")]
        all: bool,

        /// Stop after this many pages when using --all.
        #[arg(long, requires = "all")]
        max_pages: Option<u32>,
    },

    /// Search conversations.
    Search {
        /// Search text.
        query: String,

        /// Limit the search to one mailbox.
        #[arg(long)]
        mailbox: Option<u64>,
    },

    /// Show the threads of a conversation.
    Threads {
        /// Conversation ID.
        conversation: u64,
    },

    /// Add a reply or note to a conversation.
    Reply {
        /// Conversation ID.
        conversation: u64,

        /// Message body.
        body: String,

        /// Add an internal note instead of a reply.
        #[arg(long)]
        note: bool,
    },

    /// Create a customer or ticket.
    #[command(subcommand)]
    Create(CreateCommand),

    /// Query the knowledge base.
    Kb(KbArgs),
}

/// Entities that can be created.
#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    /// Create a customer with a single work email.
    Customer {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,
    },

    /// Create a ticket in a mailbox.
    Ticket {
        #[arg(long)]
        subject: String,

        /// First message of the ticket.
        #[arg(long)]
        text: String,

        #[arg(long)]
        mailbox: u64,

        #[arg(long)]
        customer: Option<u64>,

        #[arg(long)]
        email: Option<String>,
    },
}

/// Knowledge base arguments.
#[derive(Args, Debug)]
pub struct KbArgs {
    /// Use the public (unauthenticated) endpoints.
    #[arg(long, global = true)]
    pub public: bool,

    #[command(subcommand)]
    pub command: KbCommand,
}

/// Knowledge base commands.
#[derive(Subcommand, Debug)]
pub enum KbCommand {
    /// List the category tree.
    Categories,

    /// Show a category with its articles.
    Category {
        id: u64,
    },

    /// List articles.
    Articles {
        /// Only articles in this category.
        #[arg(long)]
        category: Option<u64>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Show one article.
    Article {
        id: u64,
    },

    /// Search articles.
    Search {
        query: String,
    },

    /// Check that the knowledge base module is installed.
    Health,
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A customer.
    #[value(alias = "customers")]
    Customer,
    /// A ticket.
    #[value(alias = "tickets")]
    Ticket,
    /// A mailbox.
    #[value(alias = "mailboxes")]
    Mailbox,
    /// A conversation with its threads.
    #[value(alias = "conversations")]
    Conversation,
    /// A single thread.
    #[value(alias = "threads")]
    Thread,
}
