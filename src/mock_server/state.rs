//! Mock server state management.
//!
//! Provides the in-memory data store for the mock FreeScout API server.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    Conversation, ConversationEmbedded, Customer, KbArticle, KbCategory, Mailbox, Thread, Ticket,
};

/// A knowledge base category together with its visibility.
#[derive(Debug, Clone)]
pub struct MockKbCategory {
    pub category: KbCategory,
    /// Served by the `kb/public` endpoints.
    pub public: bool,
}

/// A knowledge base article together with its visibility.
#[derive(Debug, Clone)]
pub struct MockKbArticle {
    pub article: KbArticle,
    pub public: bool,
    /// Drafts are never served.
    pub published: bool,
}

/// Shared state for the mock server.
///
/// Entities are kept in ordered maps so pagination is deterministic.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    pub mailboxes: BTreeMap<u64, Mailbox>,
    pub customers: BTreeMap<u64, Customer>,
    pub tickets: BTreeMap<u64, Ticket>,

    /// Conversations without their threads.
    pub conversations: BTreeMap<u64, Conversation>,

    /// Threads indexed by ID, each tagged with its conversation ID.
    pub threads: BTreeMap<u64, (u64, Thread)>,

    pub kb_categories: BTreeMap<u64, MockKbCategory>,
    pub kb_articles: BTreeMap<u64, MockKbArticle>,

    /// When false, every knowledge base route answers 404 as if the module
    /// were not installed.
    pub kb_enabled: bool,

    /// Optional API key. If set, authenticated routes require this key.
    pub required_api_key: Option<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            mailboxes: BTreeMap::new(),
            customers: BTreeMap::new(),
            tickets: BTreeMap::new(),
            conversations: BTreeMap::new(),
            threads: BTreeMap::new(),
            kb_categories: BTreeMap::new(),
            kb_articles: BTreeMap::new(),
            kb_enabled: true,
            required_api_key: None,
        }
    }
}

fn next_id<V>(map: &BTreeMap<u64, V>) -> u64 {
    map.keys().next_back().map_or(1, |id| id + 1)
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(needle))
        .unwrap_or(false)
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_mailbox(mut self, mailbox: Mailbox) -> Self {
        self.mailboxes.insert(mailbox.id, mailbox);
        self
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customers.insert(customer.id, customer);
        self
    }

    pub fn with_ticket(mut self, ticket: Ticket) -> Self {
        self.tickets.insert(ticket.id, ticket);
        self
    }

    /// Add a conversation. Threads embedded in it are moved into the
    /// thread store.
    pub fn with_conversation(mut self, mut conversation: Conversation) -> Self {
        let mut threads = std::mem::take(&mut conversation.threads);
        if let Some(embedded) = conversation.embedded.take() {
            threads.extend(embedded.threads);
        }
        for thread in threads {
            self.threads.insert(thread.id, (conversation.id, thread));
        }
        self.conversations.insert(conversation.id, conversation);
        self
    }

    pub fn with_kb_category(mut self, category: KbCategory, public: bool) -> Self {
        self.kb_categories
            .insert(category.id, MockKbCategory { category, public });
        self
    }

    pub fn with_kb_article(mut self, article: KbArticle, public: bool, published: bool) -> Self {
        self.kb_articles.insert(
            article.id,
            MockKbArticle {
                article,
                public,
                published,
            },
        );
        self
    }

    /// Behave as if the knowledge base module were not installed.
    pub fn without_kb(mut self) -> Self {
        self.kb_enabled = false;
        self
    }

    /// Set the required API key.
    pub fn with_required_api_key(mut self, key: &str) -> Self {
        self.required_api_key = Some(key.to_string());
        self
    }

    // =========================================================================
    // Helpdesk
    // =========================================================================

    /// Threads of a conversation, in creation order.
    pub fn threads_of(&self, conversation_id: u64) -> Vec<Thread> {
        self.threads
            .values()
            .filter(|(owner, _)| *owner == conversation_id)
            .map(|(_, thread)| thread.clone())
            .collect()
    }

    /// A conversation with its threads embedded.
    pub fn get_conversation(&self, id: u64) -> Option<Conversation> {
        let mut conversation = self.conversations.get(&id)?.clone();
        conversation.embedded = Some(ConversationEmbedded {
            threads: self.threads_of(id),
        });
        Some(conversation)
    }

    pub fn get_thread(&self, id: u64) -> Option<&Thread> {
        self.threads.get(&id).map(|(_, thread)| thread)
    }

    /// Conversations matching every given filter.
    ///
    /// `search` matches subject, preview, customer email and thread bodies,
    /// case-insensitively.
    pub fn list_conversations(
        &self,
        mailbox_id: Option<u64>,
        customer_id: Option<u64>,
        status: Option<&str>,
        search: Option<&str>,
    ) -> Vec<&Conversation> {
        let needle = search.map(str::to_lowercase);

        self.conversations
            .values()
            .filter(|c| mailbox_id.map_or(true, |m| c.mailbox_id == Some(m)))
            .filter(|c| {
                customer_id.map_or(true, |id| {
                    c.customer.as_ref().and_then(|r| r.id) == Some(id)
                })
            })
            .filter(|c| status.map_or(true, |s| c.status.as_deref() == Some(s)))
            .filter(|c| match needle {
                None => true,
                Some(ref n) => {
                    contains_ci(c.subject.as_deref(), n)
                        || contains_ci(c.preview.as_deref(), n)
                        || contains_ci(
                            c.customer.as_ref().and_then(|r| r.email.as_deref()),
                            n,
                        )
                        || self
                            .threads_of(c.id)
                            .iter()
                            .any(|t| contains_ci(t.body.as_deref(), n))
                }
            })
            .collect()
    }

    pub fn list_tickets(&self, mailbox_id: Option<u64>, customer_id: Option<u64>) -> Vec<&Ticket> {
        self.tickets
            .values()
            .filter(|t| mailbox_id.map_or(true, |m| t.mailbox_id == Some(m)))
            .filter(|t| {
                customer_id.map_or(true, |id| {
                    t.customer.as_ref().and_then(|r| r.id) == Some(id)
                })
            })
            .collect()
    }

    /// Store a new customer under the next free ID.
    pub fn insert_customer(&mut self, mut customer: Customer) -> Customer {
        customer.id = next_id(&self.customers);
        self.customers.insert(customer.id, customer.clone());
        customer
    }

    /// Store a new ticket under the next free ID.
    pub fn insert_ticket(&mut self, mut ticket: Ticket) -> Ticket {
        ticket.id = next_id(&self.tickets);
        ticket.number = Some(ticket.id);
        self.tickets.insert(ticket.id, ticket.clone());
        ticket
    }

    /// Append a thread to a conversation. Returns `None` if the
    /// conversation does not exist.
    pub fn insert_thread(&mut self, conversation_id: u64, mut thread: Thread) -> Option<Thread> {
        if !self.conversations.contains_key(&conversation_id) {
            return None;
        }
        thread.id = next_id(&self.threads);
        self.threads
            .insert(thread.id, (conversation_id, thread.clone()));
        Some(thread)
    }

    // =========================================================================
    // Knowledge base
    // =========================================================================

    fn category_visible(&self, id: u64, public_only: bool) -> bool {
        self.kb_categories
            .get(&id)
            .map_or(false, |c| c.public || !public_only)
    }

    fn article_visible(&self, article: &MockKbArticle, public_only: bool) -> bool {
        article.published && (article.public || !public_only)
    }

    /// A visible category without children.
    pub fn get_kb_category(&self, id: u64, public_only: bool) -> Option<KbCategory> {
        if !self.category_visible(id, public_only) {
            return None;
        }
        self.kb_categories.get(&id).map(|c| c.category.clone())
    }

    /// Visible categories as a tree of root categories ordered by `order`.
    ///
    /// Children of a hidden category are dropped with it.
    pub fn kb_category_tree(&self, public_only: bool) -> Vec<KbCategory> {
        self.kb_children(None, public_only)
    }

    fn kb_children(&self, parent_id: Option<u64>, public_only: bool) -> Vec<KbCategory> {
        let mut children: Vec<KbCategory> = self
            .kb_categories
            .values()
            .filter(|c| c.category.parent_id == parent_id && (c.public || !public_only))
            .map(|c| {
                let mut category = c.category.clone();
                category.children = self.kb_children(Some(category.id), public_only);
                category
            })
            .collect();
        children.sort_by_key(|c| (c.order.unwrap_or(i64::MAX), c.id));
        children
    }

    fn visible_articles(&self, public_only: bool) -> impl Iterator<Item = &KbArticle> {
        self.kb_articles
            .values()
            .filter(move |a| self.article_visible(a, public_only))
            .filter(move |a| {
                a.article
                    .category_id
                    .map_or(true, |id| self.category_visible(id, public_only))
            })
            .map(|a| &a.article)
    }

    /// Visible articles with their category attached.
    pub fn list_kb_articles(&self, category_id: Option<u64>, public_only: bool) -> Vec<KbArticle> {
        self.visible_articles(public_only)
            .filter(|a| category_id.map_or(true, |id| a.category_id == Some(id)))
            .map(|a| self.with_category(a, public_only))
            .collect()
    }

    /// Visible articles whose title, excerpt or content contains `query`.
    pub fn search_kb_articles(&self, query: &str, public_only: bool) -> Vec<KbArticle> {
        let needle = query.to_lowercase();
        self.visible_articles(public_only)
            .filter(|a| {
                contains_ci(a.title.as_deref(), &needle)
                    || contains_ci(a.excerpt.as_deref(), &needle)
                    || contains_ci(a.content.as_deref(), &needle)
            })
            .map(|a| self.with_category(a, public_only))
            .collect()
    }

    /// Fetch a visible article and count the view.
    pub fn view_kb_article(&mut self, id: u64, public_only: bool) -> Option<KbArticle> {
        let visible = self
            .kb_articles
            .get(&id)
            .map_or(false, |a| self.article_visible(a, public_only));
        if !visible {
            return None;
        }

        let entry = self.kb_articles.get_mut(&id)?;
        entry.article.views += 1;
        let article = entry.article.clone();
        Some(article)
    }

    fn with_category(&self, article: &KbArticle, public_only: bool) -> KbArticle {
        let mut article = article.clone();
        article.content = None;
        article.category = article
            .category_id
            .and_then(|id| self.get_kb_category(id, public_only));
        article
    }
}
