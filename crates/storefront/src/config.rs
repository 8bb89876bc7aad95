//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `GOOGLE_BOOKS_API_URL` - Catalog endpoint (default: <https://www.googleapis.com/books/v1>)
//! - `GOOGLE_BOOKS_API_KEY` - Google Books API key
//! - `CATALOG_CACHE_TTL_SECS` - Catalog response cache TTL (default: 300)
//! - `DEMO_ACCOUNT_EMAIL` - Demo login email (default: demo@bookverse.dev)
//! - `DEMO_ACCOUNT_PASSWORD` - Demo login password (default: bookverse)
//! - `DEMO_ACCOUNT_NAME` - Demo display name (default: Demo Reader)
//! - `LOGIN_DELAY_MS`, `SIGNUP_DELAY_MS`, `CHECKOUT_DELAY_MS`, `CONTACT_DELAY_MS` -
//!   Simulated latency for the mock flows
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default Google Books API endpoint.
pub const DEFAULT_CATALOG_API_URL: &str = "https://www.googleapis.com/books/v1";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Google Books catalog configuration
    pub catalog: CatalogConfig,
    /// Fixed credential pair accepted by the mock login
    pub demo_account: DemoAccountConfig,
    /// Simulated latency for the mock flows
    pub latency: SimulatedLatency,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors reported to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Google Books API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the volumes API (no trailing slash)
    pub api_url: String,
    /// Optional API key sent as the `key` query parameter
    pub api_key: Option<SecretString>,
    /// How long catalog responses stay cached
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

/// The demo credential pair.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DemoAccountConfig {
    /// Email accepted by the mock login
    pub email: String,
    /// Password accepted by the mock login
    pub password: SecretString,
    /// Display name given to the demo user
    pub name: String,
}

impl DemoAccountConfig {
    /// Whether `email` and `password` match the demo pair exactly.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password.expose_secret() == password
    }
}

impl std::fmt::Debug for DemoAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoAccountConfig")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

impl Default for DemoAccountConfig {
    fn default() -> Self {
        Self {
            email: "demo@bookverse.dev".to_string(),
            password: SecretString::from("bookverse"),
            name: "Demo Reader".to_string(),
        }
    }
}

/// Fixed delays applied by the simulated flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub login: Duration,
    pub signup: Duration,
    pub checkout: Duration,
    pub contact: Duration,
}

impl SimulatedLatency {
    /// No delays at all (used by tests).
    pub const NONE: Self = Self {
        login: Duration::ZERO,
        signup: Duration::ZERO,
        checkout: Duration::ZERO,
        contact: Duration::ZERO,
    };
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            signup: Duration::from_millis(1000),
            checkout: Duration::from_millis(1500),
            contact: Duration::from_millis(1500),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid or if the API key fails
    /// validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STOREFRONT_PORT", "3000")?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let catalog = CatalogConfig::from_env()?;
        let demo_account = DemoAccountConfig::from_env();
        let latency = SimulatedLatency::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_env_or_default::<f32>("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate =
            parse_env_or_default::<f32>("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog,
            demo_account,
            latency,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl CatalogConfig {
    /// Load the catalog settings on their own (also used by the CLI).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL or TTL is invalid or the API key looks
    /// like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = get_env_or_default("GOOGLE_BOOKS_API_URL", DEFAULT_CATALOG_API_URL);
        url::Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("GOOGLE_BOOKS_API_URL".to_string(), e.to_string())
        })?;

        let api_key = get_optional_validated_secret("GOOGLE_BOOKS_API_KEY")?;
        let ttl_secs = parse_env_or_default::<u64>("CATALOG_CACHE_TTL_SECS", "300")?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }

    /// Configuration pointing at `api_url` with no key and the default TTL.
    #[must_use]
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: None,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl DemoAccountConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            email: get_optional_env("DEMO_ACCOUNT_EMAIL").unwrap_or(defaults.email),
            password: get_optional_env("DEMO_ACCOUNT_PASSWORD")
                .map_or(defaults.password, SecretString::from),
            name: get_optional_env("DEMO_ACCOUNT_NAME").unwrap_or(defaults.name),
        }
    }
}

impl SimulatedLatency {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            login: get_millis("LOGIN_DELAY_MS", 1000)?,
            signup: get_millis("SIGNUP_DELAY_MS", 1000)?,
            checkout: get_millis("CHECKOUT_DELAY_MS", 1500)?,
            contact: get_millis("CONTACT_DELAY_MS", 1500)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Read a millisecond duration.
fn get_millis(key: &str, default: u64) -> Result<Duration, ConfigError> {
    parse_env_or_default::<u64>(key, &default.to_string()).map(Duration::from_millis)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key issued by the provider."
            ),
        ));
    }

    Ok(())
}

/// Load and validate an optional secret from environment.
fn get_optional_validated_secret(key: &str) -> Result<Option<SecretString>, ConfigError> {
    match get_optional_env(key) {
        Some(value) => {
            validate_secret_strength(&value, key)?;
            Ok(Some(SecretString::from(value)))
        }
        None => Ok(None),
    }
}
