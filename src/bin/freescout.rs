//! FreeScout API CLI binary.
//!
//! A command-line interface for interacting with the FreeScout API.

use clap::Parser;
use freescout::cli::{Cli, Command, CreateCommand, Entity, KbArgs, KbCommand};
use freescout::{
    get_conversation_threads, get_kb_article, get_kb_category, kb_health, search_conversations,
    try_list_kb_articles, try_list_kb_categories, try_search_kb_articles, Config, Conversation,
    ConversationListQuery, Create, Customer, CustomerCreateParams, FreeScoutClient, Get,
    KbArticle, KbArticleQuery, KbCategory, KbScope, List, Mailbox, NoQuery, Page, PrettyPrint,
    Thread, ThreadCreateParams, Ticket, TicketCreateParams, TicketListQuery,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_PER_PAGE: u32 = 20;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("freescout=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match Config::resolve(cli.base_url.as_deref(), cli.effective_api_key())
        .and_then(|config| FreeScoutClient::with_config(&config))
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set FREESCOUT_BASE_URL and FREESCOUT_API_KEY environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &FreeScoutClient, cli: Cli) -> freescout::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, id, json).await,
        Command::List {
            entity,
            mailbox,
            customer,
            status,
            page,
            per_page,
            all,
            max_pages,
        } => {
            let filters = ListFilters {
                mailbox,
                customer,
                status,
                page,
                per_page,
                all,
                max_pages,
            };
            handle_list(client, entity, filters, json).await
        }
        Command::Search { query, mailbox } => {
            let conversations = search_conversations(client, &query, mailbox).await?;
            output_list(&conversations, json, |c| ConversationRow::from(c))
        }
        Command::Threads { conversation } => {
            let threads = get_conversation_threads(client, conversation).await?;
            output_list(&threads, json, |t| ThreadRow::from(t))
        }
        Command::Reply {
            conversation,
            body,
            note,
        } => {
            let mut params = ThreadCreateParams::new(conversation, body);
            if note {
                params = params.thread_type("note");
            }
            let thread = Thread::create(client, params).await?;
            output_single(&thread, json)
        }
        Command::Create(create) => handle_create(client, create, json).await,
        Command::Kb(args) => handle_kb(client, args, json).await,
    }
}

async fn handle_get(
    client: &FreeScoutClient,
    entity: Entity,
    id: u64,
    json: bool,
) -> freescout::Result<()> {
    match entity {
        Entity::Customer => output_single(&Customer::get(client, id).await?, json),
        Entity::Ticket => output_single(&Ticket::get(client, id).await?, json),
        Entity::Mailbox => output_single(&Mailbox::get(client, id).await?, json),
        Entity::Conversation => output_single(&Conversation::get(client, id).await?, json),
        Entity::Thread => output_single(&Thread::get(client, id).await?, json),
    }
}

struct ListFilters {
    mailbox: Option<u64>,
    customer: Option<u64>,
    status: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
    all: bool,
    max_pages: Option<u32>,
}

async fn handle_list(
    client: &FreeScoutClient,
    entity: Entity,
    filters: ListFilters,
    json: bool,
) -> freescout::Result<()> {
    match entity {
        Entity::Customer => {
            let customers = Customer::list(client, &NoQuery {}).await?;
            output_list(&customers, json, |c| CustomerRow::from(c))
        }
        Entity::Ticket => {
            let query = TicketListQuery {
                mailbox_id: filters.mailbox,
                customer_id: filters.customer,
            };
            let tickets = Ticket::list(client, &query).await?;
            output_list(&tickets, json, |t| TicketRow::from(t))
        }
        Entity::Mailbox => {
            let mailboxes = Mailbox::list(client, &NoQuery {}).await?;
            output_list(&mailboxes, json, |m| MailboxRow::from(m))
        }
        Entity::Conversation => {
            let query = ConversationListQuery {
                mailbox_id: filters.mailbox,
                customer_id: filters.customer,
                status: filters.status,
                search: None,
            };
            if filters.all {
                let conversations = Conversation::list_all(client, &query, filters.max_pages).await?;
                output_list(&conversations, json, |c| ConversationRow::from(c))
            } else {
                let page = Conversation::list_page(
                    client,
                    &query,
                    filters.page.unwrap_or(1),
                    filters.per_page.unwrap_or(DEFAULT_PER_PAGE),
                )
                .await?;
                output_page(&page, json, |c| ConversationRow::from(c))
            }
        }
        Entity::Thread => {
            eprintln!("Error: Threads are listed per conversation");
            eprintln!("Hint: Use 'freescout threads <conversation-id>'");
            Err(freescout::FreeScoutError::InvalidArgument(
                "conversation ID required for threads".to_string(),
            ))
        }
    }
}

async fn handle_create(
    client: &FreeScoutClient,
    command: CreateCommand,
    json: bool,
) -> freescout::Result<()> {
    match command {
        CreateCommand::Customer {
            first_name,
            last_name,
            email,
        } => {
            let params = CustomerCreateParams::new(first_name, last_name, email);
            let customer = Customer::create(client, params).await?;
            output_single(&customer, json)
        }
        CreateCommand::Ticket {
            subject,
            text,
            mailbox,
            customer,
            email,
        } => {
            let mut params = TicketCreateParams::new(subject, text, mailbox);
            params.customer_id = customer;
            params.email = email;
            let ticket = Ticket::create(client, params).await?;
            output_single(&ticket, json)
        }
    }
}

async fn handle_kb(client: &FreeScoutClient, args: KbArgs, json: bool) -> freescout::Result<()> {
    let scope = KbScope::from(args.public);

    // The CLI reports knowledge base failures instead of printing nothing
    match args.command {
        KbCommand::Categories => {
            let categories = try_list_kb_categories(client, scope).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                let mut rows = Vec::new();
                flatten_categories(&categories, 0, &mut rows);
                println!("{}", Table::new(rows));
            }
            Ok(())
        }
        KbCommand::Category { id } => {
            let detail = get_kb_category(client, id, scope).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                println!("{} ({} articles)", detail.category.name, detail.article_count);
                let rows: Vec<ArticleRow> = detail.articles.iter().map(ArticleRow::from).collect();
                println!("{}", Table::new(rows));
            }
            Ok(())
        }
        KbCommand::Articles {
            category,
            page,
            per_page,
        } => {
            let query = KbArticleQuery {
                category_id: category,
                page,
                per_page,
            };
            let page = try_list_kb_articles(client, scope, &query).await?;
            output_page(&page, json, |a| ArticleRow::from(a))
        }
        KbCommand::Article { id } => {
            let detail = get_kb_article(client, id, scope).await?;
            output_single(&detail, json)
        }
        KbCommand::Search { query } => {
            let articles = try_search_kb_articles(client, &query, scope).await?;
            output_list(&articles, json, |a| ArticleRow::from(a))
        }
        KbCommand::Health => {
            let health = kb_health(client).await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
            Ok(())
        }
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> freescout::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> freescout::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} items", items.len());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> freescout::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        match (page.total_pages, page.total) {
            (Some(total_pages), Some(total)) => {
                println!("\nPage {}/{} ({} total items)", page.page, total_pages, total)
            }
            _ if page.has_more => println!("\nPage {} (more available)", page.page),
            _ => println!("\nPage {} (end)", page.page),
        }
    }
    Ok(())
}

fn flatten_categories(categories: &[KbCategory], depth: usize, rows: &mut Vec<CategoryRow>) {
    for category in categories {
        rows.push(CategoryRow {
            id: category.id,
            name: format!("{}{}", "  ".repeat(depth), category.name),
            description: category.description.clone().unwrap_or_default(),
        });
        flatten_categories(&category.children, depth + 1, rows);
    }
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct CustomerRow {
    id: u64,
    name: String,
    email: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            name: c.full_name(),
            email: c.primary_email().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Tabled)]
struct MailboxRow {
    id: u64,
    name: String,
    email: String,
}

impl From<&Mailbox> for MailboxRow {
    fn from(m: &Mailbox) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            email: m.email.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct TicketRow {
    id: u64,
    subject: String,
    status: String,
    customer: String,
}

impl From<&Ticket> for TicketRow {
    fn from(t: &Ticket) -> Self {
        Self {
            id: t.id,
            subject: t.subject.clone().unwrap_or_default(),
            status: t.status.clone().unwrap_or_default(),
            customer: t.customer.as_ref().map(|c| c.full_name()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ConversationRow {
    id: u64,
    number: String,
    subject: String,
    status: String,
    customer: String,
}

impl From<&Conversation> for ConversationRow {
    fn from(c: &Conversation) -> Self {
        Self {
            id: c.id,
            number: c.number.map(|n| n.to_string()).unwrap_or_default(),
            subject: c.subject.clone().unwrap_or_default(),
            status: c.status.clone().unwrap_or_default(),
            customer: c.customer.as_ref().map(|c| c.full_name()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ThreadRow {
    id: u64,
    #[tabled(rename = "type")]
    thread_type: String,
    from: String,
    date: String,
    preview: String,
}

impl From<&Thread> for ThreadRow {
    fn from(t: &Thread) -> Self {
        Self {
            id: t.id,
            thread_type: t.thread_type.clone().unwrap_or_default(),
            from: t.sender().unwrap_or("N/A").to_string(),
            date: t
                .created_at
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            preview: t.body_preview(60).to_string(),
        }
    }
}

#[derive(Tabled)]
struct CategoryRow {
    id: u64,
    name: String,
    description: String,
}

#[derive(Tabled)]
struct ArticleRow {
    id: u64,
    title: String,
    views: u64,
    category: String,
}

impl From<&KbArticle> for ArticleRow {
    fn from(a: &KbArticle) -> Self {
        Self {
            id: a.id,
            title: a.display_title().to_string(),
            views: a.views,
            category: a
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }
}
