//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Bookverse IDs are
//! opaque strings: catalog volume IDs come from Google Books and user IDs are
//! fabricated by the session store.

use chrono::{DateTime, Utc};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use bookverse_core::define_id;
/// define_id!(ShelfId);
/// define_id!(ReviewId);
///
/// let shelf_id = ShelfId::new("s-1");
/// let review_id = ReviewId::new("s-1");
///
/// // These are different types, so this won't compile:
/// // let _: ShelfId = review_id;
/// # let _ = (shelf_id, review_id);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Google Books volume ID.
define_id!(BookId);
define_id!(UserId);

impl UserId {
    /// Prefix for user IDs fabricated at signup.
    pub const SIGNUP_PREFIX: &'static str = "new_";

    /// Fabricate a user ID from a signup timestamp (`new_<unix millis>`).
    #[must_use]
    pub fn from_signup_time(at: DateTime<Utc>) -> Self {
        Self(format!("{}{}", Self::SIGNUP_PREFIX, at.timestamp_millis()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_id_uses_millis() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(UserId::from_signup_time(at).as_str(), "new_1700000000123");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = BookId::new("zyTCAlFPjgYC");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"zyTCAlFPjgYC\"");
        assert_eq!(id.to_string(), "zyTCAlFPjgYC");
    }
}
