//! Favorite product handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use favorites_core::{Product, ProductId};

use super::{INVALID_REQUEST_MESSAGE, JsonBody, parse_customer_id};
use crate::error::{AppError, Result};
use crate::services::FavoriteService;
use crate::state::AppState;

/// Add-favorite request body.
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    /// Catalog product ID; zero is rejected.
    pub product_id: ProductId,
}

/// `POST /api/v1/customers/{id}/favorites`
pub async fn add(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<AddFavoriteRequest>,
) -> Result<StatusCode> {
    let customer_id = parse_customer_id(&id)?;
    if req.product_id.get() == 0 {
        return Err(AppError::BadRequest(INVALID_REQUEST_MESSAGE.to_string()));
    }

    FavoriteService::new(state.favorites(), state.catalog())
        .add(customer_id, req.product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/v1/customers/{id}/favorites`
pub async fn list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>> {
    let customer_id = parse_customer_id(&id)?;

    let products = FavoriteService::new(state.favorites(), state.catalog())
        .products_for(customer_id)
        .await?;

    Ok(Json(products))
}

/// `DELETE /api/v1/customers/{id}/favorites/{product_id}`
///
/// Removes the product from every customer's favorites, not just `{id}`'s.
pub async fn remove(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    parse_customer_id(&id)?;
    let product_id: ProductId = product_id
        .parse()
        .map_err(|_| AppError::BadRequest(INVALID_REQUEST_MESSAGE.to_string()))?;

    let removed = FavoriteService::new(state.favorites(), state.catalog())
        .remove(product_id)
        .await?;

    if removed == 0 {
        return Err(AppError::NotFound("Favorite not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
