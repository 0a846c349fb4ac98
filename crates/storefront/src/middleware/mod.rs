//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! The cart cookie is read per handler through the [`CartCookie`] extractor.

pub mod cart_cookie;
pub mod request_id;

pub use cart_cookie::{CART_COOKIE_NAME, CartCookie, set_cart_cookie_header};
pub use request_id::request_id_middleware;
