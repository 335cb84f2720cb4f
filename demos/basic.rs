//! Basic example demonstrating the FreeScout API client.
//!
//! Run with:
//! ```
//! FREESCOUT_BASE_URL=https://support.example.com FREESCOUT_API_KEY=your-key \
//!     cargo run --example basic
//! ```

use freescout::{
    get_kb_article, list_conversations, list_kb_articles, list_kb_categories, search_kb_articles,
    Conversation, ConversationListQuery, Customer, FreeScoutClient, Get, KbArticleQuery, KbScope,
    List, Mailbox, NoQuery,
};

fn banner(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}\n", "=".repeat(60));
}

#[tokio::main]
async fn main() -> freescout::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Configuration is resolved here, at the call site
    dotenvy::dotenv().ok();
    let client = FreeScoutClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\nFetching mailboxes...");
    let mailboxes = Mailbox::list(&client, &NoQuery {}).await?;
    println!("Found {} mailboxes:", mailboxes.len());
    for mailbox in &mailboxes {
        println!("  - {} (ID: {})", mailbox.name, mailbox.id);
    }

    println!("\nFetching customers...");
    let customers = Customer::list(&client, &NoQuery {}).await?;
    println!("Found {} customers:", customers.len());
    for customer in customers.iter().take(5) {
        println!("  - {} (ID: {})", customer.full_name(), customer.id);
    }

    banner("FREESCOUT EMAIL & CONVERSATION DATA");

    println!("Fetching conversations...");
    let page = list_conversations(&client, &ConversationListQuery::default(), 1, 10).await?;
    println!("Found {} conversations (showing first 10)\n", page.len());

    if let Some(first) = page.items.first() {
        println!("Getting full details for conversation #{}...", first.id);
        let conversation = Conversation::get(&client, first.id).await?;

        println!("\nSubject: {}", conversation.subject.as_deref().unwrap_or(""));
        println!("Status: {}", conversation.status.as_deref().unwrap_or(""));
        if let Some(ref customer) = conversation.customer {
            println!(
                "Customer: {} ({})",
                customer.full_name(),
                customer.email.as_deref().unwrap_or("no email")
            );
        }

        let threads = conversation.threads();
        println!("\nTotal emails/messages in this conversation: {}\n", threads.len());
        for (i, thread) in threads.iter().enumerate() {
            println!("--- Email/Message #{} ---", i + 1);
            println!("Type: {}", thread.thread_type.as_deref().unwrap_or("unknown"));
            println!("From: {}", thread.sender().unwrap_or("N/A"));
            if let Some(created) = thread.created_at {
                println!("Date: {created}");
            }
            println!("Body preview: {}...\n", thread.body_preview(200));
        }
    }

    banner("FREESCOUT KNOWLEDGE BASE");

    println!("Fetching knowledge base categories (public API)...");
    let categories = list_kb_categories(&client, KbScope::Public).await;
    if categories.is_empty() {
        println!("No categories found. Is the KnowledgeBaseAPI module installed and active?");
    } else {
        println!("Found {} knowledge base categories:", categories.len());
        for category in categories.iter().take(5) {
            println!("  - {} (ID: {})", category.name, category.id);
            for child in &category.children {
                println!("    └─ {} (ID: {})", child.name, child.id);
            }
        }
    }

    println!("\nFetching knowledge base articles (public API)...");
    let query = KbArticleQuery {
        per_page: Some(5),
        ..Default::default()
    };
    let articles = list_kb_articles(&client, KbScope::Public, &query).await;
    if articles.is_empty() {
        println!("No articles found. Is the KnowledgeBaseAPI module installed?");
        return Ok(());
    }

    println!("Found articles (showing first 5):");
    for article in &articles {
        println!(
            "  - {} (ID: {}, Views: {})",
            article.display_title(),
            article.id,
            article.views
        );
        if let Some(ref category) = article.category {
            println!("    Category: {}", category.name);
        }
    }

    println!("\nTesting search functionality...");
    let results = search_kb_articles(&client, "help", KbScope::Public).await;
    if results.is_empty() {
        println!("No search results found.");
    } else {
        println!("Found {} results for 'help':", results.len());
        for result in results.iter().take(3) {
            println!("  - {}", result.display_title());
        }
    }

    if let Some(first) = articles.items.first() {
        println!("\nFetching full details for article ID {}...", first.id);
        match get_kb_article(&client, first.id, KbScope::Public).await {
            Ok(detail) => {
                println!("Title: {}", detail.article.display_title());
                let excerpt: String = detail
                    .article
                    .excerpt
                    .as_deref()
                    .unwrap_or("No excerpt")
                    .chars()
                    .take(100)
                    .collect();
                println!("Excerpt: {excerpt}...");
                println!("Views: {}", detail.article.views);
                if let Some(category) = detail.category {
                    println!("Category: {}", category.name);
                }
            }
            Err(e) => println!("Could not fetch article: {e}"),
        }
    }

    println!("\nDone!");
    Ok(())
}
