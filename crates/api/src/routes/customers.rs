//! Customer handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use favorites_core::{CustomerName, Email};

use super::{JsonBody, parse_customer_id};
use crate::error::{AppError, Result};
use crate::models::Customer;
use crate::services::CustomerService;
use crate::state::AppState;

/// Create and update request body.
#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    /// At least 3 characters.
    pub name: CustomerName,
    pub email: Email,
}

/// `POST /api/v1/customers`
pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CustomerRequest>,
) -> Result<(StatusCode, Json<Customer>)> {
    let customer = CustomerService::new(state.customers())
        .create(req.name, req.email)
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

/// `GET /api/v1/customers`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    let customers = CustomerService::new(state.customers()).list().await?;
    Ok(Json(customers))
}

/// `GET /api/v1/customers/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>> {
    let id = parse_customer_id(&id)?;

    CustomerService::new(state.customers())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))
}

/// `PUT /api/v1/customers/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CustomerRequest>,
) -> Result<StatusCode> {
    let id = parse_customer_id(&id)?;

    CustomerService::new(state.customers())
        .update(id, req.name, req.email)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/v1/customers/{id}`
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_customer_id(&id)?;

    CustomerService::new(state.customers()).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
