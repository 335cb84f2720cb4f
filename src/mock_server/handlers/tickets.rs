//! Ticket endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{authorize, error_response, hal_page, not_found, PageParams, SharedState};
use crate::{CustomerRef, Ticket};

/// Query parameters for listing tickets.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketsQuery {
    pub mailbox_id: Option<u64>,
    pub customer_id: Option<u64>,
    pub page: Option<u32>,
    #[serde(rename = "per_page")]
    pub per_page: Option<u32>,
}

/// Body of a ticket creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketBody {
    pub subject: String,
    pub text: String,
    pub mailbox_id: u64,
    pub customer_id: Option<u64>,
    pub email: Option<String>,
    pub status: Option<String>,
}

/// GET /api/tickets
pub async fn list_tickets(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListTicketsQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let tickets = state.list_tickets(query.mailbox_id, query.customer_id);
    let params = PageParams {
        page: query.page,
        per_page: query.per_page,
    };
    hal_page("tickets", &tickets, &params)
}

/// GET /api/tickets/{id}
pub async fn get_ticket(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.tickets.get(&id) {
        Some(ticket) => (StatusCode::OK, Json(ticket.clone())).into_response(),
        None => not_found("Ticket", id),
    }
}

/// POST /api/tickets
pub async fn create_ticket(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CreateTicketBody>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    if !state.mailboxes.contains_key(&body.mailbox_id) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            &format!("Unknown mailbox: {}", body.mailbox_id),
        );
    }

    let customer = match body.customer_id {
        Some(id) => match state.customers.get(&id) {
            Some(customer) => Some(CustomerRef {
                id: Some(customer.id),
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                email: customer.primary_email().map(str::to_string),
            }),
            None => return not_found("Customer", id),
        },
        None => body.email.map(|email| CustomerRef {
            email: Some(email),
            ..Default::default()
        }),
    };

    let ticket = state.insert_ticket(Ticket {
        id: 0,
        number: None,
        subject: Some(body.subject),
        status: Some(body.status.unwrap_or_else(|| "active".to_string())),
        mailbox_id: Some(body.mailbox_id),
        customer,
        created_at: Some(chrono::Utc::now()),
    });

    tracing::debug!(ticket_id = ticket.id, text_len = body.text.len(), "mock ticket created");

    (StatusCode::CREATED, Json(ticket)).into_response()
}
