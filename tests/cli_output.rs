//! Tests for CLI output formatting.
//!
//! JSON output with --json and pretty-print output as default.

use freescout::{
    Conversation, Customer, CustomerEmail, CustomerEmbedded, KbArticle, KbArticleDetail,
    KbCategory, PrettyPrint, Thread, Ticket,
};

fn make_test_customer() -> Customer {
    Customer {
        id: 7,
        first_name: Some("Ann".to_string()),
        last_name: Some("Lee".to_string()),
        company: Some("Acme".to_string()),
        emails: vec![CustomerEmail {
            id: Some(1),
            value: "ann@example.com".to_string(),
            email_type: Some("work".to_string()),
        }],
        ..Default::default()
    }
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_uses_api_field_names() {
    let customer = make_test_customer();
    let json_output = serde_json::to_string_pretty(&customer).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed["firstName"], "Ann");
    assert_eq!(parsed["emails"][0]["type"], "work");
}

#[test]
fn test_json_output_for_list_is_array() {
    let customers = vec![make_test_customer(), make_test_customer()];
    let json_output = serde_json::to_string_pretty(&customers).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_json_output_round_trips_conversation_threads() {
    let conversation: Conversation = serde_json::from_value(serde_json::json!({
        "id": 3,
        "_embedded": {"threads": [{"id": 1, "type": "note", "body": "hi"}]}
    }))
    .unwrap();

    let value = serde_json::to_value(&conversation).unwrap();
    assert_eq!(value["_embedded"]["threads"][0]["type"], "note");
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_customer_pretty_print() {
    let output = make_test_customer().pretty_print();

    assert!(output.starts_with("Customer #7"));
    assert!(output.contains("Name:           Ann Lee"));
    assert!(output.contains("ann@example.com (work)"));
    assert!(output.contains("Company:        Acme"));
}

#[test]
fn test_customer_pretty_print_lists_embedded_emails() {
    let customer = Customer {
        id: 8,
        first_name: Some("Ada".to_string()),
        embedded: Some(CustomerEmbedded {
            emails: vec![CustomerEmail {
                id: None,
                value: "ada@example.com".to_string(),
                email_type: Some("work".to_string()),
            }],
        }),
        ..Default::default()
    };

    let output = customer.pretty_print();
    assert!(output.contains("ada@example.com (work)"));
}

#[test]
fn test_ticket_pretty_print_falls_back_to_id() {
    let ticket = Ticket {
        id: 15,
        subject: None,
        ..Default::default()
    };
    let output = ticket.pretty_print();

    assert!(output.starts_with("Ticket #15"));
    assert!(output.contains("(no subject)"));
    assert!(output.contains("Status:         unknown"));
}

#[test]
fn test_thread_pretty_print_truncates_body() {
    let thread = Thread {
        id: 1,
        thread_type: Some("customer".to_string()),
        body: Some("é".repeat(500)),
        ..Default::default()
    };
    let output = thread.pretty_print();

    assert!(output.contains("From:           N/A"));
    let preview_line = output
        .lines()
        .find(|l| l.starts_with("Body preview:"))
        .unwrap();
    assert_eq!(preview_line.matches('é').count(), 200);
    assert!(preview_line.ends_with("..."));
}

#[test]
fn test_article_detail_pretty_print() {
    let detail = KbArticleDetail {
        article: KbArticle {
            id: 4,
            title: None,
            excerpt: Some("Short excerpt".to_string()),
            views: 12,
            ..Default::default()
        },
        category: Some(KbCategory {
            id: 1,
            name: "Billing".to_string(),
            ..Default::default()
        }),
    };
    let output = detail.pretty_print();

    assert!(output.starts_with("Article #4"));
    assert!(output.contains("Title:          Untitled"));
    assert!(output.contains("Views:          12"));
    assert!(output.contains("Category:       Billing"));
}
