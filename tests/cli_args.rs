//! CLI argument parsing tests.

use clap::Parser;
use freescout::cli::{Cli, Command, CreateCommand, Entity, KbCommand, PUBLIC_PLACEHOLDER_KEY};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["freescout", "get", "conversation", "42"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Conversation);
            assert_eq!(id, 42);
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_accepts_plural_entity_names() {
    let cli = Cli::parse_from(["freescout", "list", "mailboxes"]);

    match cli.command {
        Command::List { entity, all, .. } => {
            assert_eq!(entity, Entity::Mailbox);
            assert!(!all);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_list_filters() {
    let cli = Cli::parse_from([
        "freescout",
        "list",
        "conversations",
        "--mailbox",
        "3",
        "--status",
        "closed",
        "--page",
        "2",
        "--per-page",
        "25",
    ]);

    match cli.command {
        Command::List {
            entity,
            mailbox,
            status,
            page,
            per_page,
            ..
        } => {
            assert_eq!(entity, Entity::Conversation);
            assert_eq!(mailbox, Some(3));
            assert_eq!(status.as_deref(), Some("closed"));
            assert_eq!(page, Some(2));
            assert_eq!(per_page, Some(25));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_all_with_max_pages() {
    let cli = Cli::parse_from([
        "freescout",
        "list",
        "conversations",
        "--all",
        "--max-pages",
        "3",
    ]);

    match cli.command {
        Command::List { all, max_pages, .. } => {
            assert!(all);
            assert_eq!(max_pages, Some(3));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_all_conflicts_with_page() {
    let result = Cli::try_parse_from([
        "freescout",
        "list",
        "conversations",
        "--all",
        "--page",
        "2",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_max_pages_requires_all() {
    let result = Cli::try_parse_from(["freescout", "list", "conversations", "--max-pages", "2"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_reply_as_note() {
    let cli = Cli::parse_from(["freescout", "reply", "7", "Looking into it", "--note"]);

    match cli.command {
        Command::Reply {
            conversation,
            body,
            note,
        } => {
            assert_eq!(conversation, 7);
            assert_eq!(body, "Looking into it");
            assert!(note);
        }
        _ => panic!("Expected Reply command"),
    }
}

#[test]
fn test_cli_parses_create_customer() {
    let cli = Cli::parse_from([
        "freescout",
        "create",
        "customer",
        "--first-name",
        "Ann",
        "--last-name",
        "Lee",
        "--email",
        "ann@example.com",
    ]);

    match cli.command {
        Command::Create(CreateCommand::Customer {
            first_name,
            last_name,
            email,
        }) => {
            assert_eq!(first_name, "Ann");
            assert_eq!(last_name, "Lee");
            assert_eq!(email, "ann@example.com");
        }
        _ => panic!("Expected Create Customer command"),
    }
}

#[test]
fn test_cli_create_ticket_requires_mailbox() {
    let result = Cli::try_parse_from([
        "freescout",
        "create",
        "ticket",
        "--subject",
        "Help",
        "--text",
        "Body",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_kb_public_flag_after_subcommand() {
    let cli = Cli::parse_from(["freescout", "kb", "search", "password", "--public"]);

    match cli.command {
        Command::Kb(args) => {
            assert!(args.public);
            match args.command {
                KbCommand::Search { query } => assert_eq!(query, "password"),
                _ => panic!("Expected Kb Search command"),
            }
        }
        _ => panic!("Expected Kb command"),
    }
}

#[test]
fn test_cli_parses_kb_articles() {
    let cli = Cli::parse_from(["freescout", "kb", "articles", "--category", "4", "--per-page", "5"]);

    match cli.command {
        Command::Kb(args) => {
            assert!(!args.public);
            match args.command {
                KbCommand::Articles {
                    category,
                    page,
                    per_page,
                } => {
                    assert_eq!(category, Some(4));
                    assert_eq!(page, None);
                    assert_eq!(per_page, Some(5));
                }
                _ => panic!("Expected Kb Articles command"),
            }
        }
        _ => panic!("Expected Kb command"),
    }
}

#[test]
fn test_cli_json_flag_is_global() {
    let cli = Cli::parse_from(["freescout", "kb", "categories", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_cli_explicit_connection_flags() {
    let cli = Cli::parse_from([
        "freescout",
        "--base-url",
        "https://help.example.com",
        "--api-key",
        "k",
        "threads",
        "9",
    ]);

    assert_eq!(cli.base_url.as_deref(), Some("https://help.example.com"));
    assert_eq!(cli.api_key.as_deref(), Some("k"));
    assert!(matches!(cli.command, Command::Threads { conversation: 9 }));
}

#[test]
fn test_cli_public_kb_runs_without_api_key() {
    // An empty flag value shadows any FREESCOUT_API_KEY in the environment
    let cli = Cli::parse_from(["freescout", "--api-key", "", "kb", "--public", "categories"]);

    assert!(cli.is_public_only());
    assert_eq!(cli.effective_api_key(), Some(PUBLIC_PLACEHOLDER_KEY));
}

#[test]
fn test_cli_private_commands_need_api_key() {
    let private_kb = Cli::parse_from(["freescout", "--api-key", "", "kb", "categories"]);
    assert!(!private_kb.is_public_only());
    assert_eq!(private_kb.effective_api_key(), None);

    let health = Cli::parse_from(["freescout", "--api-key", "", "kb", "--public", "health"]);
    assert!(!health.is_public_only());

    let helpdesk = Cli::parse_from(["freescout", "--api-key", "", "list", "mailboxes"]);
    assert_eq!(helpdesk.effective_api_key(), None);
}

#[test]
fn test_cli_configured_key_wins_for_public_kb() {
    let cli = Cli::parse_from(["freescout", "--api-key", "k", "kb", "--public", "search", "x"]);
    assert_eq!(cli.effective_api_key(), Some("k"));
}

#[test]
fn test_cli_rejects_non_numeric_id() {
    let result = Cli::try_parse_from(["freescout", "get", "customer", "abc"]);
    assert!(result.is_err());
}
