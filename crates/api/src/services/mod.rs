//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Sign-up, sign-in and session tokens
//! - `customers` - Customer CRUD with email uniqueness
//! - `favorites` - Favorite products joined against the live catalog
//!
//! Services are built per request and borrow the shared stores.

pub mod auth;
pub mod customers;
pub mod favorites;

pub use auth::AuthService;
pub use customers::{CustomerError, CustomerService};
pub use favorites::{FavoriteError, FavoriteService};
