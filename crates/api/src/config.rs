//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `POSTGRES_USER` - Database user
//! - `POSTGRES_PASSWORD` - Database password
//! - `POSTGRES_DB` - Database name
//!
//! ## Optional
//! - `POSTGRES_HOST` - Database host (default: localhost)
//! - `POSTGRES_PORT` - Database port (default: 5432)
//! - `JWT_SECRET` - Token signing secret (default: insecure built-in value, warned at startup)
//! - `APP_MODE` - `debug` or `release` (default: debug)
//! - `API_HOST` - Bind address (default: 0.0.0.0)
//! - `API_PORT` - Listen port (default: 3002)
//! - `CATALOG_BASE_URL` - Product catalog base URL (default: <https://fakestoreapi.com>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;
use url::Url;

/// Signing secret used when `JWT_SECRET` is not set.
pub const DEFAULT_JWT_SECRET: &str = "default_jwt_secret";

/// Lifetime of an issued session token.
pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

const DEFAULT_CATALOG_BASE_URL: &str = "https://fakestoreapi.com";

const MIN_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "default",
    "secret",
    "password",
    "xxx",
    "todo",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Human-readable logs.
    #[default]
    Debug,
    /// JSON logs for log shipping.
    Release,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            other => Err(format!("expected `debug` or `release`, got `{other}`")),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log format selection
    pub run_mode: RunMode,
    /// `PostgreSQL` connection settings
    pub database: DatabaseConfig,
    /// Session token settings
    pub token: TokenConfig,
    /// Product catalog settings
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// `PostgreSQL` connection settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
    pub name: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// Session token settings.
///
/// Implements `Debug` manually to redact the signing secret.
#[derive(Clone)]
pub struct TokenConfig {
    /// HMAC signing secret
    pub secret: SecretString,
    /// Token lifetime
    pub ttl: Duration,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Product catalog settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; products are fetched from `{base_url}/products`
    pub base_url: Url,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        Ok(Self {
            host: env.parsed("API_HOST", "0.0.0.0")?,
            port: env.parsed("API_PORT", "3002")?,
            run_mode: env.parsed("APP_MODE", "debug")?,
            database: DatabaseConfig::load(&env)?,
            token: TokenConfig::load(&env),
            catalog: CatalogConfig::load(&env)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Load only the database settings from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let lookup = |key: &str| std::env::var(key).ok();
        Self::load(&Env(&lookup))
    }

    fn load(env: &Env<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: env.or_default("POSTGRES_HOST", "localhost"),
            port: env.parsed("POSTGRES_PORT", "5432")?,
            user: env.required("POSTGRES_USER")?,
            password: SecretString::from(env.required("POSTGRES_PASSWORD")?),
            name: env.required("POSTGRES_DB")?,
        })
    }

    /// Connection options for the `sqlx` pool.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.name)
    }
}

impl TokenConfig {
    fn load(env: &Env<'_>) -> Self {
        let secret = env
            .optional("JWT_SECRET")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_owned());

        Self {
            secret: SecretString::from(secret),
            ttl: TOKEN_TTL,
        }
    }

    /// Describe why the configured secret is unsafe, if it is.
    ///
    /// The service still starts with a weak secret; callers log the reason.
    #[must_use]
    pub fn weakness(&self) -> Option<String> {
        let secret = self.secret.expose_secret();
        if secret == DEFAULT_JWT_SECRET {
            return Some("JWT_SECRET is not set, using the built-in default".to_owned());
        }
        validate_secret_strength(secret).err()
    }
}

impl CatalogConfig {
    fn load(env: &Env<'_>) -> Result<Self, ConfigError> {
        let raw = env.or_default("CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL);
        let base_url = Url::parse(&raw).map_err(|e| {
            ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string())
        })?;
        Ok(Self { base_url })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Environment variable lookup.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get a required environment variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional environment variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get an environment variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse an environment variable, falling back to a default value.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
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
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Check that a secret is long enough, not a placeholder, and has sufficient entropy.
fn validate_secret_strength(secret: &str) -> Result<(), String> {
    if secret.len() < MIN_SECRET_LENGTH {
        return Err(format!(
            "JWT_SECRET should be at least {MIN_SECRET_LENGTH} characters (got {})",
            secret.len()
        ));
    }

    let lower = secret.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(format!(
            "JWT_SECRET appears to be a placeholder (contains '{pattern}')"
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(format!(
            "JWT_SECRET entropy too low ({entropy:.2} bits/char, \
             want >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const DB_VARS: &[(&str, &str)] = &[
        ("POSTGRES_USER", "favorites"),
        ("POSTGRES_PASSWORD", "hunter2-db-password"),
        ("POSTGRES_DB", "favorites"),
    ];

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(DB_VARS)).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3002");
        assert_eq!(config.run_mode, RunMode::Debug);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.token.ttl, Duration::from_secs(3600));
        assert_eq!(config.token.secret.expose_secret(), DEFAULT_JWT_SECRET);
        assert_eq!(config.catalog.base_url.as_str(), "https://fakestoreapi.com/");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_database_user() {
        let err =
            ApiConfig::from_lookup(lookup(&[("POSTGRES_PASSWORD", "x"), ("POSTGRES_DB", "y")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "POSTGRES_USER"));
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = DB_VARS.to_vec();
        vars.push(("API_PORT", "not-a-port"));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::InvalidEnvVar(ref key, _)) if key == "API_PORT"
        ));

        let mut vars = DB_VARS.to_vec();
        vars.push(("APP_MODE", "production"));
        assert!(ApiConfig::from_lookup(lookup(&vars)).is_err());

        let mut vars = DB_VARS.to_vec();
        vars.push(("CATALOG_BASE_URL", "not a url"));
        assert!(ApiConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_release_mode_and_secret() {
        let mut vars = DB_VARS.to_vec();
        vars.push(("APP_MODE", "Release"));
        vars.push(("JWT_SECRET", "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%"));
        let config = ApiConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.run_mode, RunMode::Release);
        assert!(config.token.weakness().is_none());
    }

    #[test]
    fn test_empty_secret_falls_back_to_default() {
        let mut vars = DB_VARS.to_vec();
        vars.push(("JWT_SECRET", ""));
        let config = ApiConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.token.secret.expose_secret(), DEFAULT_JWT_SECRET);
        assert!(config.token.weakness().unwrap().contains("not set"));
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#") > 3.3);
    }

    #[test]
    fn test_validate_secret_strength() {
        assert!(validate_secret_strength("short").is_err());
        assert!(validate_secret_strength("changeme-changeme-changeme-changeme").is_err());
        assert!(validate_secret_strength(&"a".repeat(40)).is_err());
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%").is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ApiConfig::from_lookup(lookup(DB_VARS)).unwrap();
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("favorites"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2-db-password"));
        assert!(!debug_output.contains(DEFAULT_JWT_SECRET));
    }
}
