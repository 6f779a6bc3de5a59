//! Customer favorites service.
//!
//! Users sign up and sign in for a bearer token; with it they manage
//! customers and each customer's favorite products. Products live in an
//! external catalog and are joined in at read time.
//!
//! The crate is a library so the router can be driven in-process by tests;
//! `src/main.rs` wires it to `PostgreSQL`, the HTTP catalog and a TCP listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::router;
pub use state::AppState;
