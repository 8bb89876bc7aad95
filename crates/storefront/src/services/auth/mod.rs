//! Session store.
//!
//! Mock authentication against the configured demo credential pair. The
//! signed-in profile lives in a [`Subject`] so observers (the Sentry user
//! scope, for one) follow login and logout; the token and profile are kept in
//! visitor storage under [`keys::AUTH_TOKEN`] and [`keys::CURRENT_USER`].

mod error;

pub use error::AuthError;

use std::time::Duration;

use bookverse_core::storage::{get_json, keys, set_json};
use bookverse_core::{Email, KeyValueStore, Role, Subject, SubscriptionId, User, UserId};
use chrono::Utc;
use tracing::{info, warn};

use crate::config::DemoAccountConfig;

/// Token stored for every signed-in visitor.
pub const MOCK_TOKEN: &str = "mock-jwt-token";

/// Id of the demo user.
const DEMO_USER_ID: &str = "1";

/// The visitor's authentication state.
pub struct SessionStore<S> {
    storage: S,
    demo: DemoAccountConfig,
    login_delay: Duration,
    signup_delay: Duration,
    user: Subject<Option<User>>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Build a store, hydrating from storage.
    ///
    /// The visitor counts as signed in only when both a token and a profile
    /// are stored. A profile that cannot be parsed is discarded with a
    /// warning, together with its token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the storage cannot be read.
    pub async fn load(storage: S, demo: DemoAccountConfig) -> Result<Self, AuthError> {
        let token = storage.get(keys::AUTH_TOKEN).await?;
        let user = match get_json::<User, _>(&storage, keys::CURRENT_USER).await {
            Ok(user) => user,
            Err(bookverse_core::StorageError::Serialization(e)) => {
                warn!(error = %e, "Discarding malformed stored user");
                storage.remove(keys::AUTH_TOKEN).await?;
                storage.remove(keys::CURRENT_USER).await?;
                None
            }
            Err(e) => return Err(e.into()),
        };

        let user = token.and(user);

        Ok(Self {
            storage,
            demo,
            login_delay: Duration::ZERO,
            signup_delay: Duration::ZERO,
            user: Subject::new(user),
        })
    }

    /// Set the simulated latency of `login` and `signup`.
    #[must_use]
    pub fn with_delays(mut self, login: Duration, signup: Duration) -> Self {
        self.login_delay = login;
        self.signup_delay = signup;
        self
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.value().is_some()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.value().as_ref()
    }

    /// The stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the storage cannot be read.
    pub async fn token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.storage.get(keys::AUTH_TOKEN).await?)
    }

    /// Register an observer; it is called with the current user right away.
    pub fn subscribe(
        &mut self,
        observer: impl Fn(&Option<User>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.user.subscribe(observer)
    }

    /// Check `email`/`password` against the demo pair.
    ///
    /// Waits the login delay either way. Returns `false` on a mismatch and
    /// leaves the state untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the configured demo email is not a
    /// valid address, or `AuthError::Storage` if the session cannot be saved.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool, AuthError> {
        tokio::time::sleep(self.login_delay).await;

        if !self.demo.matches(email, password) {
            info!("Login rejected");
            return Ok(false);
        }

        let user = User {
            id: UserId::new(DEMO_USER_ID),
            email: Email::parse(&self.demo.email)?,
            name: self.demo.name.clone(),
            role: Role::User,
        };
        self.sign_in(user).await?;

        Ok(true)
    }

    /// Create an account. Always succeeds after the signup delay.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be saved.
    pub async fn signup(&mut self, name: &str, email: Email) -> Result<User, AuthError> {
        tokio::time::sleep(self.signup_delay).await;

        let user = User {
            id: UserId::from_signup_time(Utc::now()),
            email,
            name: name.trim().to_string(),
            role: Role::User,
        };
        self.sign_in(user.clone()).await?;

        Ok(user)
    }

    /// Erase the stored token and profile under a fresh storage identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be updated.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        self.storage.rotate().await?;
        self.storage.remove(keys::AUTH_TOKEN).await?;
        self.storage.remove(keys::CURRENT_USER).await?;
        self.user.next(None);
        info!("User signed out");
        Ok(())
    }

    async fn sign_in(&mut self, user: User) -> Result<(), AuthError> {
        self.storage.rotate().await?;
        self.storage
            .set(keys::AUTH_TOKEN, MOCK_TOKEN.to_string())
            .await?;
        set_json(&self.storage, keys::CURRENT_USER, &user).await?;
        info!(user_id = %user.id, "User signed in");
        self.user.next(Some(user));
        Ok(())
    }
}

impl<S> std::fmt::Debug for SessionStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", self.user.value())
            .finish_non_exhaustive()
    }
}
