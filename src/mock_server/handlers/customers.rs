//! Customer endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{authorize, error_response, hal_page, not_found, PageParams, SharedState};
use crate::{Customer, CustomerEmail};

/// Body of a customer creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    #[serde(default)]
    pub emails: Vec<CustomerEmail>,
}

/// GET /api/customers
pub async fn list_customers(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let customers: Vec<&Customer> = state.customers.values().collect();
    hal_page("customers", &customers, &params)
}

/// GET /api/customers/{id}
pub async fn get_customer(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.customers.get(&id) {
        Some(customer) => (StatusCode::OK, Json(customer.clone())).into_response(),
        None => not_found("Customer", id),
    }
}

/// POST /api/customers
pub async fn create_customer(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<CreateCustomerBody>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    if body.first_name.is_none() && body.emails.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            "A customer needs a first name or an email",
        );
    }

    let customer = state.insert_customer(Customer {
        id: 0,
        first_name: body.first_name,
        last_name: body.last_name,
        company: body.company,
        job_title: body.job_title,
        emails: body.emails,
        created_at: Some(chrono::Utc::now()),
        ..Default::default()
    });

    (StatusCode::CREATED, Json(customer)).into_response()
}
