//! Domain models for the favorites service.
//!
//! These are validated domain objects, separate from the database row types
//! in [`crate::db`].

pub mod customer;
pub mod user;

pub use customer::Customer;
pub use user::User;
