//! Collection listing and navigation menu handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::error::Result;
use crate::shopify::types::{Collection, Menu};
use crate::state::AppState;

/// List collections, "All" first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Collection>>> {
    Ok(Json(state.storefront().get_collections().await?))
}

/// Get a navigation menu.
#[instrument(skip(state))]
pub async fn menu(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Vec<Menu>>> {
    Ok(Json(state.storefront().get_menu(&handle).await?))
}
