//! Commerce Core - Shared types library.
//!
//! This crate provides common types used by the storefront and its tests:
//! - `storefront` - Storefront data service (vendor client, mock fallback, routes)
//! - `integration-tests` - End-to-end tests against a fake vendor endpoint
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no caches.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Prices, cache tags, webhook topics and the sort catalogue

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
