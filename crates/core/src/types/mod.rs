//! Core types for the customer favorites service.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod name;
pub mod product;

pub use email::{Email, EmailError};
pub use id::*;
pub use name::{CustomerName, NameError, Username};
pub use product::{Product, Rating};
