//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with `request_id` and `user_id` fields)
//! 3. Request ID (fills `request_id`, echoes `x-request-id`)
//! 4. Bearer auth on `/api/v1` only (fills `user_id`)

pub mod auth;
pub mod request_id;

pub use auth::require_bearer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
