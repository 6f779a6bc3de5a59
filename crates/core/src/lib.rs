//! Customer Favorites Core - Shared types library.
//!
//! This crate provides the validated domain types used by the service:
//! - `api` - HTTP service (auth, customers, favorites)
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Database encoding for the ID and email types is
//! available behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, usernames, customer names and catalog products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
