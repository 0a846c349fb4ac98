//! Tagged cache for Storefront API responses.
//!
//! Every key knows which [`CacheTag`]s it belongs to, so a webhook can drop
//! all product or collection data at once without tracking individual keys.
//!
//! Each tag also has a generation counter that `invalidate_tag` bumps. Reads
//! take a [`Generation`] before calling the vendor and hand it back on insert,
//! so a response fetched before an invalidation is never stored after it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use commerce_core::CacheTag;
use moka::future::Cache;
use tracing::debug;

use crate::config::CacheConfig;
use crate::shopify::types::{Collection, Menu, Product};

/// Cache key for products, collections and menus.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Products {
        query: Option<String>,
        sort_key: Option<String>,
        reverse: bool,
    },
    ProductRecommendations(String),
    Collection(String),
    Collections,
    CollectionProducts {
        handle: String,
        sort_key: Option<String>,
        reverse: bool,
    },
    Menu(String),
}

impl CacheKey {
    /// Tags this entry is invalidated by.
    #[must_use]
    pub const fn tags(&self) -> &'static [CacheTag] {
        match self {
            Self::Product(_) | Self::Products { .. } | Self::ProductRecommendations(_) => {
                &[CacheTag::Products]
            }
            Self::Collection(_) | Self::Collections | Self::Menu(_) => &[CacheTag::Collections],
            Self::CollectionProducts { .. } => &[CacheTag::Collections, CacheTag::Products],
        }
    }

    /// Whether this entry carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: CacheTag) -> bool {
        self.tags().contains(&tag)
    }
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Option<Box<Product>>),
    Products(Vec<Product>),
    Collection(Option<Box<Collection>>),
    Collections(Vec<Collection>),
    Menu(Vec<Menu>),
}

/// Per-tag invalidation counters.
#[derive(Debug, Default)]
struct Counters {
    collections: AtomicU64,
    products: AtomicU64,
}

impl Counters {
    const fn counter(&self, tag: CacheTag) -> &AtomicU64 {
        match tag {
            CacheTag::Collections => &self.collections,
            CacheTag::Products => &self.products,
        }
    }
}

/// Tag generations observed before a vendor call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    collections: u64,
    products: u64,
}

impl Generation {
    const fn of(self, tag: CacheTag) -> u64 {
        match tag {
            CacheTag::Collections => self.collections,
            CacheTag::Products => self.products,
        }
    }
}

/// In-memory response cache with tag-based invalidation.
#[derive(Clone)]
pub struct TagCache {
    inner: Cache<CacheKey, CacheValue>,
    counters: Arc<Counters>,
}

impl TagCache {
    /// Build a cache from configuration.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_settings(config.capacity, config.ttl)
    }

    /// Build a cache with explicit capacity and time-to-live.
    #[must_use]
    pub fn with_settings(capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .support_invalidation_closures()
            .build();

        Self {
            inner,
            counters: Arc::default(),
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.inner.get(key).await
    }

    /// Current tag generations. Take this before fetching a value to insert.
    #[must_use]
    pub fn generation(&self) -> Generation {
        Generation {
            collections: self.counters.collections.load(Ordering::SeqCst),
            products: self.counters.products.load(Ordering::SeqCst),
        }
    }

    fn is_current(&self, key: &CacheKey, seen: Generation) -> bool {
        key.tags()
            .iter()
            .all(|tag| self.counters.counter(*tag).load(Ordering::SeqCst) == seen.of(*tag))
    }

    /// Store `value` unless one of the key's tags was invalidated since `seen`.
    pub async fn insert(&self, key: CacheKey, value: CacheValue, seen: Generation) {
        if !self.is_current(&key, seen) {
            debug!(key = ?key, "Skipping cache insert for invalidated tag");
            return;
        }

        self.inner.insert(key.clone(), value).await;

        // An invalidation that landed between the check and the insert
        if !self.is_current(&key, seen) {
            self.inner.invalidate(&key).await;
        }
    }

    /// Drop every entry labelled with `tag`.
    ///
    /// Invalidation is lazy: entries stop being returned immediately and are
    /// evicted in the background. Values fetched before this call are not
    /// stored afterwards.
    pub fn invalidate_tag(&self, tag: CacheTag) {
        self.counters.counter(tag).fetch_add(1, Ordering::SeqCst);

        match self.inner.invalidate_entries_if(move |key, _| key.has_tag(tag)) {
            Ok(_) => debug!(tag = %tag, "Invalidated cache tag"),
            // Only possible if the builder did not enable invalidation closures
            Err(e) => {
                tracing::error!(tag = %tag, error = %e, "Tag invalidation unsupported");
                self.inner.invalidate_all();
            }
        }
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
