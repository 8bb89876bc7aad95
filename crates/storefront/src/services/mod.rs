//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Observable cart persisted in visitor storage
//! - `auth` - Mock login/signup backed by visitor storage
//!
//! Both stores are generic over [`KeyValueStore`] and are built per request
//! from the visitor's storage. Nothing here is a process-wide singleton.
//!
//! [`KeyValueStore`]: bookverse_core::KeyValueStore

pub mod auth;
pub mod cart;

pub use auth::{AuthError, SessionStore};
pub use cart::CartStore;
