//! Shopify Storefront API client with mock-data fallback.
//!
//! # Architecture
//!
//! - `graphql_client` request/response envelopes, HTTP via `reqwest`
//! - Shopify is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka`, labelled with cache tags so webhooks can
//!   invalidate whole groups of entries
//! - Every failed call is reported as [`ShopifyError::Unavailable`]; the public
//!   client methods answer it with deterministic data from [`mock`]
//!
//! # Example
//!
//! ```rust,ignore
//! use commerce_storefront::shopify::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config.shopify, &config.cache);
//!
//! // Never fails because of the vendor: falls back to mock products
//! let products = client.get_products(None, None, false).await?;
//! ```

pub mod mock;
mod storefront;
pub mod types;

pub use storefront::StorefrontClient;
pub use storefront::cache::{CacheKey, TagCache};
pub use storefront::conversions;
pub use types::*;

use thiserror::Error;

/// Why a call to the Storefront API produced no usable data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No store domain configured; no request was sent.
    #[error("store domain not configured")]
    NotConfigured,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response carried GraphQL errors; this is the first one.
    #[error("GraphQL error: {}", format_graphql_error(.0))]
    GraphQL(GraphQLError),

    /// Neither data nor errors in the response.
    #[error("No data in response")]
    EmptyResponse,
}

/// Errors that can occur when interacting with the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// The remote call failed. Callers substitute mock data.
    #[error("Shopify API call failed during {operation}: {source}")]
    Unavailable {
        /// GraphQL operation name.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: FetchError,
    },

    /// The call succeeded but the payload lacked a required field.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// User error from mutation (e.g., invalid merchandise ID).
    #[error("User error: {0}")]
    UserError(String),
}

impl ShopifyError {
    /// Whether the caller should substitute mock data for this failure.
    #[must_use]
    pub const fn use_mock_data(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(e: graphql_client::Error) -> Self {
        Self {
            message: e.message,
            locations: e.locations.map_or_else(Vec::new, |locs| {
                locs.into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: i64::from(l.line),
                        column: i64::from(l.column),
                    })
                    .collect()
            }),
            path: e.path.map_or_else(Vec::new, |p| {
                p.into_iter()
                    .map(|fragment| match fragment {
                        graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                        graphql_client::PathFragment::Index(i) => {
                            serde_json::Value::Number(i.into())
                        }
                    })
                    .collect()
            }),
        }
    }
}

fn format_graphql_error(error: &GraphQLError) -> String {
    let mut parts = Vec::new();

    if !error.message.is_empty() {
        parts.push(error.message.clone());
    }

    if !error.path.is_empty() {
        let path_str = error
            .path
            .iter()
            .map(|p| match p {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        parts.push(format!("path: {path_str}"));
    }

    if let Some(loc) = error.locations.first() {
        parts.push(format!("at line {}:{}", loc.line, loc.column));
    }

    if parts.is_empty() {
        "(no details)".to_string()
    } else {
        parts.join(" ")
    }
}
