//! Collection reshaping.

use crate::shopify::types::{Collection, Seo};

use super::super::schema::ShopifyCollection;
use super::convert_seo;

/// Storefront path for a collection handle.
#[must_use]
pub fn collection_path(handle: &str) -> String {
    format!("/search/{handle}")
}

/// The synthetic collection listing every product.
#[must_use]
pub fn all_collection(updated_at: String) -> Collection {
    Collection {
        handle: String::new(),
        title: "All".to_string(),
        description: "All products".to_string(),
        seo: Seo {
            title: Some("All".to_string()),
            description: Some("All products".to_string()),
        },
        updated_at,
        path: "/search".to_string(),
    }
}

#[must_use]
pub fn reshape_collection(collection: ShopifyCollection) -> Collection {
    Collection {
        path: collection_path(&collection.handle),
        handle: collection.handle,
        title: collection.title,
        description: collection.description,
        seo: convert_seo(collection.seo),
        updated_at: collection.updated_at,
    }
}

/// Reshape a list of collections, skipping absent entries.
#[must_use]
pub fn reshape_collections(collections: Vec<Option<ShopifyCollection>>) -> Vec<Collection> {
    collections
        .into_iter()
        .flatten()
        .map(reshape_collection)
        .collect()
}
