//! Cache tags used to label cached storefront data.
//!
//! Webhook deliveries invalidate everything carrying a tag at once.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label attached to cached results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheTag {
    Collections,
    Products,
}

impl CacheTag {
    /// Tag name as used in logs and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collections => "collections",
            Self::Products => "products",
        }
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
