//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! POST   /signup                                         - Create a user
//! POST   /signin                                         - Issue a session token
//! GET    /health                                         - Database connectivity check
//!
//! # Customers (bearer token required)
//! POST   /api/v1/customers                               - Create
//! GET    /api/v1/customers                               - List
//! GET    /api/v1/customers/{id}                          - Show
//! PUT    /api/v1/customers/{id}                          - Update
//! DELETE /api/v1/customers/{id}                          - Delete
//!
//! # Favorites (bearer token required)
//! POST   /api/v1/customers/{id}/favorites                - Add a product
//! GET    /api/v1/customers/{id}/favorites                - List products
//! DELETE /api/v1/customers/{id}/favorites/{product_id}   - Remove a product (all customers)
//! ```

pub mod auth;
pub mod customers;
pub mod favorites;
pub mod health;

use axum::{
    Json, Router,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use favorites_core::CustomerId;

use crate::error::AppError;
use crate::middleware::{request_id_middleware, require_bearer};
use crate::state::AppState;

/// Message for bodies that fail to parse or validate.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request data";

/// Message for path IDs that are not UUIDs.
pub const INVALID_CUSTOMER_ID_MESSAGE: &str = "Invalid customer ID";

/// Build the full application router, including tracing and request IDs.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/signup", post(auth::sign_up))
        .route("/signin", post(auth::sign_in))
        .route("/health", get(health::health))
        .nest("/api/v1", api_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(
                    |request: &http::Request<_>| {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = tracing::field::Empty,
                            user_id = tracing::field::Empty,
                        )
                    },
                ))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(state)
}

/// Routes behind bearer authentication.
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/customers", post(customers::create).get(customers::list))
        .route(
            "/customers/{id}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::delete),
        )
        .route(
            "/customers/{id}/favorites",
            post(favorites::add).get(favorites::list),
        )
        .route(
            "/customers/{id}/favorites/{product_id}",
            delete(favorites::remove),
        )
        .route_layer(axum::middleware::from_fn_with_state(state, require_bearer))
}

/// JSON body extractor that rejects with a `400 {"message": ...}` body.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::BadRequest(INVALID_REQUEST_MESSAGE.to_string()))
            }
        }
    }
}

/// Parse a customer ID path segment.
fn parse_customer_id(raw: &str) -> Result<CustomerId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(INVALID_CUSTOMER_ID_MESSAGE.to_string()))
}
