//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `SITE_BASE_URL` - Public URL of the site
//! - `ADMIN_USERNAME` - Admin login name
//! - `ADMIN_PASSWORD` - Admin login password (min 12 chars, no placeholders)
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: base URL only)
//! - `CHAT_API_KEY` - Chat-completion provider API key (chat widget disabled if unset)
//! - `CHAT_MODEL` - Model ID (default: claude-sonnet-4-20250514)
//! - `SMTP_HOST` / `SMTP_USERNAME` / `SMTP_PASSWORD` / `SMTP_FROM` - contact
//!   notification emails (disabled if unset; all four must be set together)
//! - `SMTP_PORT` - SMTP port (default: 587)
//! - `CONTACT_RECIPIENT` - Where contact notifications land (default: SMTP_FROM)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` / `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE`

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_ADMIN_PASSWORD_LENGTH: usize = 12;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_CHAT_MODEL: &str = "claude-sonnet-4-20250514";

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

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the site
    pub base_url: String,
    /// CORS origins allowed to call the JSON APIs
    pub allowed_origins: Vec<String>,
    /// Admin credential pair for the dashboard login
    pub admin: AdminCredentials,
    /// Chat relay configuration (optional - widget disabled if unset)
    pub chat: Option<ChatConfig>,
    /// Email configuration (optional - contact notifications disabled if unset)
    pub email: Option<EmailConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Admin login credentials.
///
/// A single static pair - there is exactly one admin. Implements `Debug`
/// manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    /// Admin login name
    pub username: String,
    /// Admin login password
    pub password: SecretString,
}

impl AdminCredentials {
    /// Check a submitted credential pair against the configured one.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Chat-completion provider configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ChatConfig {
    /// Provider API key
    pub api_key: SecretString,
    /// Model ID (e.g., claude-sonnet-4-20250514)
    pub model: String,
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// Email (SMTP) configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP authentication username
    pub smtp_username: String,
    /// SMTP authentication password
    pub smtp_password: SecretString,
    /// Email sender address (From header)
    pub from_address: String,
    /// Address that receives contact-form notifications
    pub contact_recipient: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("contact_recipient", &self.contact_recipient)
            .finish()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the admin password fails validation (length, placeholder check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_required_secret("DATABASE_URL")?;
        let host = get_env_or_default("SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SITE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("SITE_BASE_URL")?;
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SITE_BASE_URL".to_string(), e.to_string())
        })?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let allowed_origins = get_optional_env("ALLOWED_ORIGINS").map_or_else(
            || vec![base_url.clone()],
            |s| s.split(',').map(|o| o.trim().to_string()).collect(),
        );

        let admin = AdminCredentials::from_env()?;
        let chat = ChatConfig::from_env();
        let email = EmailConfig::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            allowed_origins,
            admin,
            chat,
            email,
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
}

impl AdminCredentials {
    fn from_env() -> Result<Self, ConfigError> {
        let username = get_required_env("ADMIN_USERNAME")?;
        let password = get_required_env("ADMIN_PASSWORD")?;
        validate_admin_password(&password, "ADMIN_PASSWORD")?;
        Ok(Self {
            username,
            password: SecretString::from(password),
        })
    }
}

impl ChatConfig {
    /// Load chat configuration from environment.
    ///
    /// Returns `None` if `CHAT_API_KEY` is not set (chat widget disabled).
    fn from_env() -> Option<Self> {
        let api_key = get_optional_env("CHAT_API_KEY")?;
        if let Err(e) = validate_secret_strength(&api_key, "CHAT_API_KEY") {
            tracing::warn!("CHAT_API_KEY validation warning: {e}");
        }
        Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default("CHAT_MODEL", DEFAULT_CHAT_MODEL),
        })
    }
}

impl EmailConfig {
    /// Load email configuration from environment.
    ///
    /// Returns `Ok(None)` if none of the SMTP variables are set (contact
    /// notifications disabled). All of host/username/password/from must be
    /// set together.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let smtp_host = get_optional_env("SMTP_HOST");
        let smtp_username = get_optional_env("SMTP_USERNAME");
        let smtp_password = get_optional_env("SMTP_PASSWORD");
        let from_address = get_optional_env("SMTP_FROM");

        match (smtp_host, smtp_username, smtp_password, from_address) {
            (Some(host), Some(username), Some(password), Some(from)) => {
                let smtp_port = get_env_or_default("SMTP_PORT", "587")
                    .parse::<u16>()
                    .map_err(|e| {
                        ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), e.to_string())
                    })?;
                let contact_recipient =
                    get_optional_env("CONTACT_RECIPIENT").unwrap_or_else(|| from.clone());
                Ok(Some(Self {
                    smtp_host: host,
                    smtp_port,
                    smtp_username: username,
                    smtp_password: SecretString::from(password),
                    from_address: from,
                    contact_recipient,
                }))
            }
            (None, None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "SMTP_*".to_string(),
                "SMTP_HOST, SMTP_USERNAME, SMTP_PASSWORD and SMTP_FROM must be set together"
                    .to_string(),
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate the admin password: minimum length plus placeholder blocklist.
///
/// No entropy floor here - a human types this password, so an API-key-grade
/// entropy requirement would reject every real passphrase.
fn validate_admin_password(password: &str, var_name: &str) -> Result<(), ConfigError> {
    if password.len() < MIN_ADMIN_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_ADMIN_PASSWORD_LENGTH,
                password.len()
            ),
        ));
    }
    let lower = password.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
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

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_admin_password_rejects_short() {
        let err = validate_admin_password("short", "ADMIN_PASSWORD").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_admin_password_rejects_placeholder() {
        assert!(validate_admin_password("changeme-now-please", "ADMIN_PASSWORD").is_err());
        assert!(validate_admin_password("your-admin-pass-here", "ADMIN_PASSWORD").is_err());
    }

    #[test]
    fn test_admin_password_accepts_passphrase() {
        assert!(validate_admin_password("orange kettle drums", "ADMIN_PASSWORD").is_ok());
    }

    #[test]
    fn test_secret_strength_rejects_low_entropy() {
        assert!(validate_secret_strength("aaaaaaaaaaaaaaaa", "CHAT_API_KEY").is_err());
    }

    #[test]
    fn test_secret_strength_accepts_random_key() {
        assert!(validate_secret_strength("sk-ant-REDACTED", "CHAT_API_KEY").is_ok());
    }

    #[test]
    fn test_credentials_match() {
        let creds = AdminCredentials {
            username: "mara".to_string(),
            password: SecretString::from("orange kettle drums"),
        };
        assert!(creds.matches("mara", "orange kettle drums"));
        assert!(!creds.matches("mara", "wrong"));
        assert!(!creds.matches("other", "orange kettle drums"));
    }
}
