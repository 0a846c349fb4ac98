//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use super::metadata::{PageMetadata, product_metadata};
use crate::error::{AppError, Result};
use crate::shopify::types::Product;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub metadata: PageMetadata,
    pub product: Product,
    pub related_products: Vec<Product>,
}

/// Display product detail page.
#[instrument(skip(state), fields(handle = %handle))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ProductPage>> {
    let product = state
        .storefront()
        .get_product(&handle)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {handle}")))?;

    let related_products = state
        .storefront()
        .get_product_recommendations(&product.id)
        .await?;

    Ok(Json(ProductPage {
        metadata: product_metadata(&product, &state.config().site_name),
        product,
        related_products,
    }))
}
