//! Core types for Bookverse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod book;
pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod user;

pub use book::Book;
pub use cart::CartLine;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use user::{Role, User};
