//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `SITE_NAME` - Site name used as the fallback page title (default: Acme Store)
//! - `SHOPIFY_STORE_DOMAIN` - Shopify store domain; when unset every call serves mock data
//! - `SHOPIFY_STOREFRONT_ACCESS_TOKEN` - Storefront API access token (required with a store domain)
//! - `SHOPIFY_API_VERSION` - API version (default: 2023-01)
//! - `SHOPIFY_REVALIDATION_SECRET` - Shared secret for the revalidation webhook
//! - `STOREFRONT_CACHE_TTL_SECONDS` - Cache lifetime (default: 86400)
//! - `STOREFRONT_CACHE_CAPACITY` - Maximum cached entries (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default Storefront API version.
pub const DEFAULT_API_VERSION: &str = "2023-01";

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
    /// Site name, used when a page has no title of its own
    pub site_name: String,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Response cache configuration
    pub cache: CacheConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone, Default)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com). `None` means mock mode.
    pub store_domain: Option<String>,
    /// Shopify API version (e.g., 2023-01)
    pub api_version: String,
    /// Storefront API access token
    pub access_token: Option<SecretString>,
    /// Shared secret expected on revalidation webhooks
    pub revalidation_secret: Option<SecretString>,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store_domain", &self.store_domain)
            .field("api_version", &self.api_version)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "revalidation_secret",
                &self.revalidation_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ShopifyStorefrontConfig {
    /// The store origin with a scheme, e.g. `https://shop.myshopify.com`.
    ///
    /// Domains given without a scheme get `https://`.
    #[must_use]
    pub fn origin(&self) -> Option<String> {
        let domain = self.store_domain.as_deref()?.trim().trim_end_matches('/');
        if domain.is_empty() {
            return None;
        }
        if domain.starts_with("https://") || domain.starts_with("http://") {
            Some(domain.to_string())
        } else {
            Some(format!("https://{domain}"))
        }
    }

    /// The GraphQL endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> Option<String> {
        self.origin()
            .map(|origin| format!("{origin}/api/{}/graphql.json", self.api_version))
    }
}

/// In-process response cache configuration.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Time-to-live for cached entries
    pub ttl: Duration,
    /// Maximum number of cached entries
    pub capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            capacity: 1000,
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
    /// Returns `ConfigError` if a variable is invalid or if the revalidation
    /// secret fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_parsed_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = get_parsed_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;
        let site_name = get_env_or_default("SITE_NAME", "Acme Store");

        let shopify = ShopifyStorefrontConfig::from_env()?;
        let cache = CacheConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            site_name,
            shopify,
            cache,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_parsed_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: get_parsed_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let store_domain = get_optional_env("SHOPIFY_STORE_DOMAIN");
        if let Some(domain) = &store_domain {
            let origin = if domain.contains("://") {
                domain.clone()
            } else {
                format!("https://{domain}")
            };
            url::Url::parse(&origin).map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPIFY_STORE_DOMAIN".to_string(), e.to_string())
            })?;
        }

        let revalidation_secret = get_optional_env("SHOPIFY_REVALIDATION_SECRET")
            .map(|value| {
                validate_secret_strength(&value, "SHOPIFY_REVALIDATION_SECRET")?;
                Ok::<_, ConfigError>(SecretString::from(value))
            })
            .transpose()?;

        let access_token = get_optional_env("SHOPIFY_STOREFRONT_ACCESS_TOKEN");
        require_access_token(store_domain.as_deref(), access_token.as_deref())?;

        Ok(Self {
            store_domain,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            access_token: access_token.map(SecretString::from),
            revalidation_secret,
        })
    }
}

impl CacheConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let ttl_seconds: u64 = get_parsed_env("STOREFRONT_CACHE_TTL_SECONDS", "86400")?;
        let capacity = get_parsed_env("STOREFRONT_CACHE_CAPACITY", "1000")?;
        Ok(Self {
            ttl: Duration::from_secs(ttl_seconds),
            capacity,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// A configured store needs an access token; mock mode needs neither.
fn require_access_token(
    store_domain: Option<&str>,
    access_token: Option<&str>,
) -> Result<(), ConfigError> {
    if store_domain.is_some() && access_token.is_none() {
        return Err(ConfigError::MissingEnvVar(
            "SHOPIFY_STOREFRONT_ACCESS_TOKEN".to_string(),
        ));
    }
    Ok(())
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable (or its default) parsed into `T`.
fn get_parsed_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
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

    fn shopify_config(domain: Option<&str>) -> ShopifyStorefrontConfig {
        ShopifyStorefrontConfig {
            store_domain: domain.map(String::from),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: Some(SecretString::from("super_secret_access_token")),
            revalidation_secret: Some(SecretString::from("super_secret_webhook_value")),
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-webhook-secret", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_endpoint_adds_https_scheme() {
        let config = shopify_config(Some("shop.myshopify.com"));
        assert_eq!(
            config.endpoint().unwrap(),
            "https://shop.myshopify.com/api/2023-01/graphql.json"
        );
    }

    #[test]
    fn test_endpoint_keeps_existing_scheme() {
        let config = shopify_config(Some("http://127.0.0.1:8080/"));
        assert_eq!(config.origin().unwrap(), "http://127.0.0.1:8080");
        assert_eq!(
            config.endpoint().unwrap(),
            "http://127.0.0.1:8080/api/2023-01/graphql.json"
        );
    }

    #[test]
    fn test_endpoint_absent_without_domain() {
        assert!(shopify_config(None).endpoint().is_none());
        assert!(shopify_config(Some("  ")).endpoint().is_none());
    }

    #[test]
    fn test_store_domain_requires_access_token() {
        assert!(matches!(
            require_access_token(Some("acme.myshopify.com"), None),
            Err(ConfigError::MissingEnvVar(var)) if var == "SHOPIFY_STOREFRONT_ACCESS_TOKEN"
        ));
        assert!(require_access_token(Some("acme.myshopify.com"), Some("token")).is_ok());
        assert!(require_access_token(None, None).is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            site_name: "Acme Store".to_string(),
            shopify: shopify_config(None),
            cache: CacheConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_shopify_config_debug_redacts_secrets() {
        let config = shopify_config(Some("test.myshopify.com"));
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("test.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_access_token"));
        assert!(!debug_output.contains("super_secret_webhook_value"));
    }
}
