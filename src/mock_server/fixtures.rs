//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    Conversation, Customer, CustomerEmail, CustomerRef, KbArticle, KbCategory, Mailbox, Thread,
    ThreadAuthor, Ticket,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

fn timestamp(day: u32, hour: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).single()
}

impl Fixtures {
    // =========================================================================
    // Helpdesk Fixtures
    // =========================================================================

    pub fn mailbox(id: u64, name: &str, email: &str) -> Mailbox {
        Mailbox {
            id,
            name: name.to_string(),
            email: Some(email.to_string()),
        }
    }

    /// Create a customer with a single work email.
    pub fn customer(id: u64, first_name: &str, last_name: &str, email: &str) -> Customer {
        Customer {
            id,
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            emails: vec![CustomerEmail {
                id: None,
                value: email.to_string(),
                email_type: Some("work".to_string()),
            }],
            created_at: timestamp(1, 9),
            ..Default::default()
        }
    }

    /// Reference to a customer as embedded in conversations and tickets.
    pub fn customer_ref(customer: &Customer) -> CustomerRef {
        CustomerRef {
            id: Some(customer.id),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.primary_email().map(str::to_string),
        }
    }

    pub fn thread(id: u64, thread_type: &str, body: &str) -> Thread {
        Thread {
            id,
            thread_type: Some(thread_type.to_string()),
            status: Some("active".to_string()),
            body: Some(body.to_string()),
            created_at: timestamp(2, 10),
            ..Default::default()
        }
    }

    /// A message written by a customer.
    pub fn customer_thread(id: u64, customer: &Customer, body: &str) -> Thread {
        let mut thread = Self::thread(id, "customer", body);
        thread.from = customer.primary_email().map(str::to_string);
        thread.created_by = Some(ThreadAuthor {
            id: Some(customer.id),
            author_type: Some("customer".to_string()),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.primary_email().map(str::to_string),
        });
        thread
    }

    /// A conversation with its threads embedded.
    pub fn conversation(
        id: u64,
        mailbox_id: u64,
        customer: &Customer,
        subject: &str,
        status: &str,
        threads: Vec<Thread>,
    ) -> Conversation {
        Conversation {
            id,
            number: Some(1000 + id),
            subject: Some(subject.to_string()),
            status: Some(status.to_string()),
            state: Some("published".to_string()),
            conversation_type: Some("email".to_string()),
            mailbox_id: Some(mailbox_id),
            customer: Some(Self::customer_ref(customer)),
            preview: threads.first().and_then(|t| t.body.clone()),
            threads,
            created_at: timestamp(2, 9),
            updated_at: timestamp(3, 12),
            ..Default::default()
        }
    }

    pub fn ticket(id: u64, mailbox_id: u64, customer: &Customer, subject: &str) -> Ticket {
        Ticket {
            id,
            number: Some(id),
            subject: Some(subject.to_string()),
            status: Some("active".to_string()),
            mailbox_id: Some(mailbox_id),
            customer: Some(Self::customer_ref(customer)),
            created_at: timestamp(4, 8),
        }
    }

    // =========================================================================
    // Knowledge Base Fixtures
    // =========================================================================

    pub fn kb_category(id: u64, name: &str, parent_id: Option<u64>, order: i64) -> KbCategory {
        KbCategory {
            id,
            name: name.to_string(),
            description: Some(format!("{name} articles")),
            slug: Some(name.to_lowercase().replace(' ', "-")),
            parent_id,
            order: Some(order),
            children: vec![],
        }
    }

    pub fn kb_article(id: u64, category_id: Option<u64>, title: &str, content: &str) -> KbArticle {
        let excerpt: String = content.chars().take(80).collect();
        KbArticle {
            id,
            category_id,
            title: Some(title.to_string()),
            slug: Some(title.to_lowercase().replace(' ', "-")),
            excerpt: Some(excerpt),
            content: Some(content.to_string()),
            views: 0,
            category: None,
            created_at: Some("2024-05-01 10:20:30".to_string()),
            updated_at: Some("2024-05-02 08:00:00".to_string()),
        }
    }

    // =========================================================================
    // Composite Scenarios
    // =========================================================================

    /// Create a default scenario with common test data.
    ///
    /// Returns a complete set of mailboxes, customers, conversations with
    /// threads, tickets and a knowledge base with public and private content.
    pub fn default_scenario() -> DefaultScenario {
        let alice = Self::customer(1, "Alice", "Johnson", "alice@example.com");
        let bob = Self::customer(2, "Bob", "Smith", "bob@example.com");
        let carol = Self::customer(3, "Carol", "White", "carol@example.com");

        let mut staff_note = Self::thread(3, "note", "Checked the logs, the password reset mail bounced.");
        staff_note.created_by = Some(ThreadAuthor {
            id: Some(1),
            author_type: Some("user".to_string()),
            first_name: Some("Support".to_string()),
            last_name: Some("Agent".to_string()),
            email: Some("agent@example.com".to_string()),
        });

        let conversations = vec![
            Self::conversation(
                1,
                1,
                &alice,
                "Cannot log in",
                "active",
                vec![
                    Self::customer_thread(1, &alice, "I can't log in since yesterday."),
                    Self::thread(2, "message", "Could you try resetting your password?"),
                    staff_note,
                ],
            ),
            Self::conversation(
                2,
                1,
                &bob,
                "Invoice question",
                "pending",
                vec![Self::customer_thread(4, &bob, "Why was I charged twice this month?")],
            ),
            Self::conversation(
                3,
                2,
                &carol,
                "Feature request: dark mode",
                "closed",
                vec![Self::customer_thread(5, &carol, "Please add a dark mode to the portal.")],
            ),
        ];

        DefaultScenario {
            mailboxes: vec![
                Self::mailbox(1, "Support", "support@example.com"),
                Self::mailbox(2, "Sales", "sales@example.com"),
            ],
            tickets: vec![
                Self::ticket(1, 1, &alice, "Cannot log in"),
                Self::ticket(2, 2, &bob, "Upgrade pricing"),
            ],
            customers: vec![alice, bob, carol],
            conversations,
            kb_categories: vec![
                (Self::kb_category(1, "Getting Started", None, 1), true),
                (Self::kb_category(2, "Billing", None, 2), true),
                (Self::kb_category(3, "Invoices", Some(2), 1), true),
                (Self::kb_category(4, "Internal Procedures", None, 3), false),
            ],
            kb_articles: vec![
                (
                    Self::kb_article(
                        1,
                        Some(1),
                        "How to get help",
                        "Open a ticket from the portal or email support to get help quickly.",
                    ),
                    true,
                    true,
                ),
                (
                    Self::kb_article(
                        2,
                        Some(1),
                        "Resetting your password",
                        "Use the forgot password link on the login page.",
                    ),
                    true,
                    true,
                ),
                (
                    Self::kb_article(
                        3,
                        Some(3),
                        "Downloading invoices",
                        "Invoices are listed under Account, Billing.",
                    ),
                    true,
                    true,
                ),
                (
                    Self::kb_article(
                        4,
                        Some(4),
                        "Escalation checklist",
                        "Page the on-call engineer before promising a fix.",
                    ),
                    false,
                    true,
                ),
                (
                    Self::kb_article(
                        5,
                        Some(1),
                        "Upcoming features",
                        "Draft notes about features we may help ship soon.",
                    ),
                    true,
                    false,
                ),
            ],
        }
    }
}

/// A complete test scenario with related data.
#[derive(Debug, Clone)]
pub struct DefaultScenario {
    pub mailboxes: Vec<Mailbox>,
    pub customers: Vec<Customer>,
    pub tickets: Vec<Ticket>,
    pub conversations: Vec<Conversation>,
    /// Categories with their public flag.
    pub kb_categories: Vec<(KbCategory, bool)>,
    /// Articles with their public and published flags.
    pub kb_articles: Vec<(KbArticle, bool, bool)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_fixture() {
        let customer = Fixtures::customer(1, "Alice", "Johnson", "alice@example.com");
        assert_eq!(customer.full_name(), "Alice Johnson");
        assert_eq!(customer.primary_email(), Some("alice@example.com"));
    }

    #[test]
    fn test_conversation_fixture_preview() {
        let alice = Fixtures::customer(1, "Alice", "Johnson", "alice@example.com");
        let conversation = Fixtures::conversation(
            1,
            1,
            &alice,
            "Hello",
            "active",
            vec![Fixtures::customer_thread(1, &alice, "First message")],
        );
        assert_eq!(conversation.preview.as_deref(), Some("First message"));
        assert_eq!(conversation.threads()[0].sender(), Some("alice@example.com"));
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.mailboxes.len(), 2);
        assert_eq!(scenario.customers.len(), 3);
        assert_eq!(scenario.conversations.len(), 3);
        assert!(scenario.kb_categories.iter().any(|(_, public)| !public));
        assert!(scenario.kb_articles.iter().any(|(_, _, published)| !published));
    }
}
