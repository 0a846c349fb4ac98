//! Webhook topics delivered by the commerce backend.

use crate::types::CacheTag;

/// Topic of an incoming webhook (`x-shopify-topic` header).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookTopic {
    CollectionsCreate,
    CollectionsDelete,
    CollectionsUpdate,
    ProductsCreate,
    ProductsDelete,
    ProductsUpdate,
    /// Any topic the storefront does not react to.
    Other(String),
}

impl WebhookTopic {
    /// Topic name used when the header is missing.
    pub const UNKNOWN: &'static str = "unknown";

    /// Parse a topic header value. Matching is exact.
    #[must_use]
    pub fn parse(topic: &str) -> Self {
        match topic {
            "collections/create" => Self::CollectionsCreate,
            "collections/delete" => Self::CollectionsDelete,
            "collections/update" => Self::CollectionsUpdate,
            "products/create" => Self::ProductsCreate,
            "products/delete" => Self::ProductsDelete,
            "products/update" => Self::ProductsUpdate,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether this topic reports a collection change.
    #[must_use]
    pub const fn is_collection_update(&self) -> bool {
        matches!(
            self,
            Self::CollectionsCreate | Self::CollectionsDelete | Self::CollectionsUpdate
        )
    }

    /// Whether this topic reports a product change.
    #[must_use]
    pub const fn is_product_update(&self) -> bool {
        matches!(
            self,
            Self::ProductsCreate | Self::ProductsDelete | Self::ProductsUpdate
        )
    }

    /// Cache tags to invalidate for this topic.
    #[must_use]
    pub const fn tags(&self) -> &'static [CacheTag] {
        if self.is_collection_update() {
            &[CacheTag::Collections]
        } else if self.is_product_update() {
            &[CacheTag::Products]
        } else {
            &[]
        }
    }
}
