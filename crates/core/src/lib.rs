//! Bookverse Core - Shared types library.
//!
//! This crate provides common types used across all Bookverse components:
//! - `storefront` - Public-facing bookstore site
//! - `cli` - Command-line catalog and cart tool
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no network I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and emails, plus the book,
//!   cart and user records
//! - [`storage`] - String-keyed key-value storage abstraction
//! - [`observer`] - Current-value subject with ordered subscribers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod observer;
pub mod storage;
pub mod types;

pub use observer::{Observer, Subject, SubscriptionId};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use types::*;
