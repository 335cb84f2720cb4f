//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Conversation, Customer, KbArticleDetail, Mailbox, Thread, Ticket};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

const BODY_PREVIEW_CHARS: usize = 200;

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for Customer {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Customer #{}", self.id));
        lines.push(format!("Name:           {}", self.full_name()));

        for email in self.emails() {
            let kind = email.email_type.as_deref().unwrap_or("other");
            lines.push(format!("Email:          {} ({})", email.value, kind));
        }

        if let Some(ref company) = self.company {
            lines.push(format!("Company:        {}", company));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Mailbox {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Mailbox #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        if let Some(ref email) = self.email {
            lines.push(format!("Email:          {}", email));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Ticket {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Ticket #{}", self.number.unwrap_or(self.id)));
        lines.push(format!(
            "Subject:        {}",
            self.subject.as_deref().unwrap_or("(no subject)")
        ));
        lines.push(format!("Status:         {}", self.status.as_deref().unwrap_or("unknown")));

        if let Some(mailbox_id) = self.mailbox_id {
            lines.push(format!("Mailbox:        {}", mailbox_id));
        }

        if let Some(ref customer) = self.customer {
            lines.push(format!("Customer:       {}", customer.full_name()));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Thread {
    fn pretty_print(&self) -> String {
        let mut lines = vec![
            format!("Type:           {}", self.thread_type.as_deref().unwrap_or("unknown")),
            format!("From:           {}", self.sender().unwrap_or("N/A")),
        ];

        if let Some(ref created) = self.created_at {
            lines.push(format!("Date:           {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        lines.push(format!("Body preview:   {}...", self.body_preview(BODY_PREVIEW_CHARS)));
        lines.join("\n")
    }
}

impl PrettyPrint for Conversation {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Conversation #{}", self.number.unwrap_or(self.id)));
        lines.push(format!(
            "Subject:        {}",
            self.subject.as_deref().unwrap_or("(no subject)")
        ));
        lines.push(format!("Status:         {}", self.status.as_deref().unwrap_or("unknown")));

        if let Some(ref customer) = self.customer {
            let email = customer.email.as_deref().unwrap_or("no email");
            lines.push(format!("Customer:       {} ({})", customer.full_name(), email));
        }

        let threads = self.threads();
        lines.push(format!("Threads:        {}", threads.len()));

        for (i, thread) in threads.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("--- Thread #{} ---", i + 1));
            lines.push(thread.pretty_print());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for KbArticleDetail {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Article #{}", self.article.id));
        lines.push(format!("Title:          {}", self.article.display_title()));

        if let Some(ref excerpt) = self.article.excerpt {
            let preview: String = excerpt.chars().take(100).collect();
            lines.push(format!("Excerpt:        {}...", preview));
        }

        lines.push(format!("Views:          {}", self.article.views));

        if let Some(ref category) = self.category {
            lines.push(format!("Category:       {}", category.name));
        }

        lines.join("\n")
    }
}
