//! Sort catalogue for product listings.
//!
//! Each option maps a URL slug (`?sort=price-asc`) to the vendor sort key
//! and direction.

use serde::Serialize;

/// A selectable sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortOption {
    /// Display title.
    pub title: &'static str,
    /// URL slug (`None` for the default order).
    pub slug: Option<&'static str>,
    /// Vendor product sort key.
    pub sort_key: &'static str,
    /// Whether to reverse the order.
    pub reverse: bool,
}

/// Default order (relevance).
pub const DEFAULT_SORT: SortOption = SortOption {
    title: "Relevance",
    slug: None,
    sort_key: "RELEVANCE",
    reverse: false,
};

/// All sort options, default first.
pub const SORTING: [SortOption; 5] = [
    DEFAULT_SORT,
    SortOption {
        title: "Trending",
        slug: Some("trending-desc"),
        sort_key: "BEST_SELLING",
        reverse: false,
    },
    SortOption {
        title: "Latest arrivals",
        slug: Some("latest-desc"),
        sort_key: "CREATED_AT",
        reverse: true,
    },
    SortOption {
        title: "Price: Low to high",
        slug: Some("price-asc"),
        sort_key: "PRICE",
        reverse: false,
    },
    SortOption {
        title: "Price: High to low",
        slug: Some("price-desc"),
        sort_key: "PRICE",
        reverse: true,
    },
];

impl SortOption {
    /// Resolve a slug from the query string, falling back to [`DEFAULT_SORT`].
    #[must_use]
    pub fn from_slug(slug: Option<&str>) -> Self {
        slug.and_then(|slug| SORTING.iter().find(|option| option.slug == Some(slug)))
            .copied()
            .unwrap_or(DEFAULT_SORT)
    }
}
