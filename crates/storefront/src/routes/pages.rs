//! Content page route handlers.
//!
//! Pages are managed in the commerce backend and served under `/{handle}`.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use super::metadata::{PageMetadata, page_metadata};
use crate::error::{AppError, Result};
use crate::shopify::types::Page;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContentPage {
    pub metadata: PageMetadata,
    pub page: Page,
}

/// Display a content page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ContentPage>> {
    let page = state
        .storefront()
        .get_page(&handle)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Page not found: {handle}")))?;

    Ok(Json(ContentPage {
        metadata: page_metadata(&page, &state.config().site_name),
        page,
    }))
}

/// List all content pages.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Page>>> {
    Ok(Json(state.storefront().get_pages().await?))
}
