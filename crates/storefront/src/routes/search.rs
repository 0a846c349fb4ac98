//! Search and collection listing handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use commerce_core::{SORTING, SortOption};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::metadata::{PageMetadata, collection_metadata, site_metadata};
use crate::error::Result;
use crate::shopify::types::{Collection, Product};
use crate::state::AppState;

/// Search page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub sort: Option<String>,
}

impl SearchQuery {
    fn search_value(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    fn sort_option(&self) -> SortOption {
        SortOption::from_slug(self.sort.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub metadata: PageMetadata,
    pub query: Option<String>,
    pub sort: SortOption,
    pub sorting: &'static [SortOption],
    /// Summary line shown above results when searching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_text: Option<String>,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct CollectionPage {
    pub metadata: PageMetadata,
    pub handle: String,
    pub collection: Option<Collection>,
    pub sort: SortOption,
    pub sorting: &'static [SortOption],
    pub products: Vec<Product>,
}

fn results_text(count: usize, query: &str) -> String {
    let noun = if count == 1 { "result" } else { "results" };
    if count == 0 {
        format!("There are no products that match \"{query}\"")
    } else {
        format!("Showing {count} {noun} for \"{query}\"")
    }
}

/// Search all products.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchPage>> {
    let sort = query.sort_option();
    let search_value = query.search_value();

    let products = state
        .storefront()
        .get_products(search_value, Some(sort.sort_key), sort.reverse)
        .await?;

    Ok(Json(SearchPage {
        metadata: site_metadata("Search", "Search for products in the store."),
        query: search_value.map(String::from),
        sort,
        sorting: &SORTING,
        results_text: search_value.map(|q| results_text(products.len(), q)),
        products,
    }))
}

/// Display a collection's products.
#[instrument(skip(state))]
pub async fn collection(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<CollectionPage>> {
    let sort = query.sort_option();
    let storefront = state.storefront();

    let (collection, products) = tokio::try_join!(
        storefront.get_collection(&handle),
        storefront.get_collection_products(&handle, Some(sort.sort_key), sort.reverse),
    )?;

    Ok(Json(CollectionPage {
        metadata: collection_metadata(&handle, collection.as_ref(), &state.config().site_name),
        handle,
        collection,
        sort,
        sorting: &SORTING,
        products,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_value_ignores_blank_query() {
        let query = SearchQuery {
            q: Some("   ".to_string()),
            sort: None,
        };
        assert_eq!(query.search_value(), None);
        assert_eq!(query.sort_option().sort_key, "RELEVANCE");
    }

    #[test]
    fn test_sort_slug() {
        let query = SearchQuery {
            q: None,
            sort: Some("price-desc".to_string()),
        };
        let sort = query.sort_option();
        assert_eq!(sort.sort_key, "PRICE");
        assert!(sort.reverse);
    }

    #[test]
    fn test_results_text() {
        assert_eq!(results_text(1, "mug"), "Showing 1 result for \"mug\"");
        assert_eq!(results_text(3, "mug"), "Showing 3 results for \"mug\"");
        assert_eq!(
            results_text(0, "mug"),
            "There are no products that match \"mug\""
        );
    }
}
