//! HTTP route handlers for storefront.
//!
//! Every page handler answers with the JSON data its page needs.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured, carousel, footer menu)
//! GET  /health                 - Health check
//!
//! # Catalogue
//! GET  /search?q=&sort=        - Product search
//! GET  /search/:collection     - Collection products
//! GET  /product/:handle        - Product detail with recommendations
//! GET  /collections            - Collection listing
//! GET  /menu/:handle           - Navigation menu
//!
//! # Content
//! GET  /pages                  - Content page listing
//! GET  /:page                  - Content page
//!
//! # Cart
//! GET  /cart                   - Current cart (or null)
//! POST /cart                   - Create cart and set cookie
//! POST /cart/add               - Add one unit of a variant
//! POST /cart/remove            - Remove a variant's line
//! POST /cart/update            - Set a variant's quantity
//!
//! # Checkout
//! GET  /checkout               - Redirect to vendor checkout
//!
//! # Webhooks
//! POST /api/revalidate         - Invalidate cached vendor data
//! ```

pub mod cart;
pub mod collections;
pub mod home;
pub mod metadata;
pub mod pages;
pub mod products;
pub mod revalidate;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).post(cart::create))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/update", post(cart::update))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalogue
        .route("/search", get(search::index))
        .route("/search/{collection}", get(search::collection))
        .route("/product/{handle}", get(products::show))
        .route("/collections", get(collections::index))
        .route("/menu/{handle}", get(collections::menu))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout redirect
        .route("/checkout", get(cart::checkout))
        // Webhooks
        .route("/api/revalidate", post(revalidate::revalidate))
        // Content pages
        .route("/pages", get(pages::index))
        .route("/{page}", get(pages::show))
}
