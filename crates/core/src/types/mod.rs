//! Core types for the commerce storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod price;
pub mod sort;
pub mod tag;
pub mod topic;

pub use price::{CurrencyCode, Price};
pub use sort::{DEFAULT_SORT, SORTING, SortOption};
pub use tag::CacheTag;
pub use topic::WebhookTopic;
