//! Home page route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use super::metadata::{PageMetadata, site_metadata};
use crate::error::Result;
use crate::shopify::types::{Menu, Product};
use crate::state::AppState;

/// Collection shown in the featured grid.
pub const FEATURED_COLLECTION: &str = "hidden-homepage-featured-items";

/// Collection shown in the carousel.
pub const CAROUSEL_COLLECTION: &str = "hidden-homepage-carousel";

/// Menu shown in the footer.
pub const FOOTER_MENU: &str = "next-js-frontend-footer-menu";

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub metadata: PageMetadata,
    pub featured: Vec<Product>,
    pub carousel: Vec<Product>,
    pub menu: Vec<Menu>,
}

/// Display home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomePage>> {
    let storefront = state.storefront();

    let (featured, carousel, menu) = tokio::try_join!(
        storefront.get_collection_products(FEATURED_COLLECTION, None, false),
        storefront.get_collection_products(CAROUSEL_COLLECTION, None, false),
        storefront.get_menu(FOOTER_MENU),
    )?;

    let site_name = &state.config().site_name;

    Ok(Json(HomePage {
        metadata: site_metadata(
            site_name,
            "Headless storefront powered by Shopify.",
        ),
        featured,
        carousel,
        menu,
    }))
}
