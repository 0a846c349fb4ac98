//! Page metadata (title, description, robots, open graph) for JSON pages.

use serde::Serialize;

use crate::shopify::types::{Collection, Image, Page, Product, Seo};

/// Robots directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
}

impl Robots {
    pub const ALLOW: Self = Self {
        index: true,
        follow: true,
    };

    pub const DENY: Self = Self {
        index: false,
        follow: false,
    };
}

/// Open graph card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub robots: Robots,
    pub open_graph: OpenGraph,
}

/// First non-empty candidate.
fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

/// Open graph title: SEO title, then the record title, then the site name.
#[must_use]
pub fn open_graph_title(seo: Option<&Seo>, title: &str, site_name: &str) -> String {
    first_non_empty([seo.and_then(|s| s.title.as_deref()), Some(title)])
        .unwrap_or(site_name)
        .to_string()
}

/// Metadata for the home and search pages.
#[must_use]
pub fn site_metadata(site_name: &str, description: &str) -> PageMetadata {
    PageMetadata {
        title: site_name.to_string(),
        description: description.to_string(),
        robots: Robots::ALLOW,
        open_graph: OpenGraph {
            title: site_name.to_string(),
            images: vec![],
        },
    }
}

/// Metadata for a collection page. A missing collection still gets a title
/// derived from its handle.
#[must_use]
pub fn collection_metadata(
    handle: &str,
    collection: Option<&Collection>,
    site_name: &str,
) -> PageMetadata {
    let Some(collection) = collection else {
        let title = format!("{handle} Collection");
        return PageMetadata {
            open_graph: OpenGraph {
                title: title.clone(),
                images: vec![],
            },
            title,
            description: format!("Browse {handle} products"),
            robots: Robots::ALLOW,
        };
    };

    let title = first_non_empty([collection.seo.title.as_deref(), Some(collection.title.as_str())])
        .unwrap_or_default()
        .to_string();
    let description = first_non_empty([
        collection.seo.description.as_deref(),
        Some(collection.description.as_str()),
    ])
    .map_or_else(|| format!("{} products", collection.title), String::from);

    PageMetadata {
        title,
        description,
        robots: Robots::ALLOW,
        open_graph: OpenGraph {
            title: open_graph_title(Some(&collection.seo), &collection.title, site_name),
            images: vec![],
        },
    }
}

/// Metadata for a product page. Hidden products are not indexed.
#[must_use]
pub fn product_metadata(product: &Product, site_name: &str) -> PageMetadata {
    let title = first_non_empty([product.seo.title.as_deref(), Some(product.title.as_str())])
        .unwrap_or_default()
        .to_string();
    let description = first_non_empty([
        product.seo.description.as_deref(),
        Some(product.description.as_str()),
    ])
    .unwrap_or_default()
    .to_string();

    PageMetadata {
        title,
        description,
        robots: if product.is_hidden() {
            Robots::DENY
        } else {
            Robots::ALLOW
        },
        open_graph: OpenGraph {
            title: open_graph_title(Some(&product.seo), &product.title, site_name),
            images: product.featured_image.iter().cloned().collect(),
        },
    }
}

/// Metadata for a content page.
#[must_use]
pub fn page_metadata(page: &Page, site_name: &str) -> PageMetadata {
    let seo = page.seo.as_ref();
    let title = first_non_empty([seo.and_then(|s| s.title.as_deref()), Some(page.title.as_str())])
        .unwrap_or_default()
        .to_string();
    let description = first_non_empty([
        seo.and_then(|s| s.description.as_deref()),
        Some(page.body_summary.as_str()),
    ])
    .unwrap_or_default()
    .to_string();

    PageMetadata {
        title,
        description,
        robots: Robots::ALLOW,
        open_graph: OpenGraph {
            title: open_graph_title(seo, &page.title, site_name),
            images: vec![],
        },
    }
}
