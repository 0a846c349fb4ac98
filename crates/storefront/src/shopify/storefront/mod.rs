//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` request/response envelopes with `reqwest` 0.13 for
//! HTTP. Successful product, collection and menu lookups are cached in a
//! [`TagCache`]; failed calls are answered with data from [`mock`].

pub mod cache;
pub mod conversions;
pub mod queries;
pub mod schema;

use std::sync::Arc;

use commerce_core::CacheTag;
use graphql_client::{GraphQLQuery, QueryBody, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use crate::config::{CacheConfig, ShopifyStorefrontConfig};
use crate::error::add_breadcrumb;
use crate::shopify::mock::{
    self, DEFAULT_COLLECTION_PRODUCT_COUNT, DEFAULT_PRODUCT_COUNT, RECOMMENDATION_COUNT,
};
use crate::shopify::types::{
    Cart, CartLineInput, CartLineUpdateInput, Collection, Menu, Page, Product,
};
use crate::shopify::{FetchError, ShopifyError};

use cache::{CacheKey, CacheValue, TagCache};
use conversions::{
    all_collection, remove_edges_and_nodes, reshape_cart, reshape_cart_payload,
    reshape_collection, reshape_collections, reshape_menu, reshape_page, reshape_pages,
    reshape_product, reshape_products,
};
use queries::{
    AddToCart, CreateCart, EditCartItems, GetCart, GetCollection, GetCollectionProducts,
    GetCollections, GetMenu, GetPage, GetPages, GetProduct, GetProductRecommendations,
    GetProducts, RemoveFromCart, add_to_cart, create_cart, edit_cart_items, get_cart,
    get_collection, get_collection_products, get_collections, get_menu, get_page, get_pages,
    get_product, get_product_recommendations, get_products, remove_from_cart,
};

/// Header carrying the public Storefront API token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Collection handles with this prefix are excluded from listings.
const HIDDEN_COLLECTION_PREFIX: &str = "hidden";

/// Answer a failed call with mock data when the failure allows it.
fn fallback<T>(error: ShopifyError, mock_data: impl FnOnce() -> T) -> Result<T, ShopifyError> {
    if !error.use_mock_data() {
        return Err(error);
    }

    warn!(error = %error, "Using mock data");
    if let ShopifyError::Unavailable { operation, .. } = &error {
        add_breadcrumb("shopify", "Using mock data", Some(&[("operation", *operation)]));
    }

    Ok(mock_data())
}

/// Product sort keys are shared between product and collection queries except
/// for the creation date, which collections call `CREATED`.
fn collection_sort_key(sort_key: Option<&str>) -> Option<String> {
    sort_key.map(|key| match key {
        "CREATED_AT" => "CREATED".to_string(),
        other => other.to_string(),
    })
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Every read operation falls back to deterministic mock data when the API is
/// unavailable; cart mutations fall back to an empty mock cart.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    /// `None` when no store is configured; no requests are sent then.
    endpoint: Option<String>,
    /// Store origin, stripped from menu URLs.
    origin: String,
    access_token: Option<SecretString>,
    cache: TagCache,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig, cache: &CacheConfig) -> Self {
        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint(),
                origin: config.origin().unwrap_or_default(),
                access_token: config.access_token.clone(),
                cache: TagCache::new(cache),
            }),
        }
    }

    /// Whether a store is configured. Without one every call serves mock data.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.endpoint.is_some()
    }

    /// Execute a GraphQL operation.
    ///
    /// Every failure is reported as [`ShopifyError::Unavailable`].
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);
        let operation = request_body.operation_name;

        self.send::<Q>(&request_body)
            .await
            .map_err(|source| ShopifyError::Unavailable { operation, source })
    }

    async fn send<Q: GraphQLQuery>(
        &self,
        request_body: &QueryBody<Q::Variables>,
    ) -> Result<Q::ResponseData, FetchError> {
        let endpoint = self
            .inner
            .endpoint
            .as_deref()
            .ok_or(FetchError::NotConfigured)?;

        let mut request = self
            .inner
            .client
            .post(endpoint)
            .header("Content-Type", "application/json");
        if let Some(token) = &self.inner.access_token {
            request = request.header(ACCESS_TOKEN_HEADER, token.expose_secret());
        }

        let response = request.json(request_body).send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(FetchError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(FetchError::Parse(e));
            }
        };

        if let Some(error) = response.errors.and_then(|errors| errors.into_iter().next()) {
            tracing::debug!(error = ?error, "GraphQL error in response");
            return Err(FetchError::GraphQL(error.into()));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            FetchError::EmptyResponse
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its handle. Hidden products are returned too.
    ///
    /// # Errors
    ///
    /// Never fails because of the API; the error type is kept for symmetry
    /// with the mutations.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product(&self, handle: &str) -> Result<Option<Product>, ShopifyError> {
        let cache_key = CacheKey::Product(handle.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(product.map(|p| *p));
        }

        let variables = get_product::Variables {
            handle: handle.to_string(),
        };

        let generation = self.inner.cache.generation();
        let data = match self.execute::<GetProduct>(variables).await {
            Ok(data) => data,
            Err(e) => return fallback(e, || Some(mock::mock_product_by_handle(handle))),
        };

        let product = data.product.and_then(|p| reshape_product(p, false));

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Product(product.clone().map(Box::new)),
                generation,
            )
            .await;

        Ok(product)
    }

    /// List products, optionally filtered by a search query and sorted.
    ///
    /// # Errors
    ///
    /// Never fails because of the API.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        query: Option<&str>,
        sort_key: Option<&str>,
        reverse: bool,
    ) -> Result<Vec<Product>, ShopifyError> {
        let cache_key = CacheKey::Products {
            query: query.map(String::from),
            sort_key: sort_key.map(String::from),
            reverse,
        };

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let variables = get_products::Variables {
            query: query.map(String::from),
            reverse: Some(reverse),
            sort_key: sort_key.map(String::from),
        };

        let generation = self.inner.cache.generation();
        let data = match self.execute::<GetProducts>(variables).await {
            Ok(data) => data,
            Err(e) => return fallback(e, || mock::mock_products(DEFAULT_PRODUCT_COUNT)),
        };

        let products = reshape_products(remove_edges_and_nodes(data.products));

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()), generation)
            .await;

        Ok(products)
    }

    /// Get products related to the given product.
    ///
    /// # Errors
    ///
    /// Never fails because of the API.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product_recommendations(
        &self,
        product_id: &str,
    ) -> Result<Vec<Product>, ShopifyError> {
        let cache_key = CacheKey::ProductRecommendations(product_id.to_string());

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product recommendations");
            return Ok(products);
        }

        let variables = get_product_recommendations::Variables {
            product_id: product_id.to_string(),
        };

        let generation = self.inner.cache.generation();
        let data = match self.execute::<GetProductRecommendations>(variables).await {
            Ok(data) => data,
            Err(e) => return fallback(e, || mock::mock_products(RECOMMENDATION_COUNT)),
        };

        let products = reshape_products(data.product_recommendations.unwrap_or_default());

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()), generation)
            .await;

        Ok(products)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get a collection by its handle.
    ///
    /// # Errors
    ///
    /// Never fails because of the API.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection(&self, handle: &str) -> Result<Option<Collection>, ShopifyError> {
        let cache_key = CacheKey::Collection(handle.to_string());

        if let Some(CacheValue::Collection(collection)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection");
            return Ok(collection.map(|c| *c));
        }

        let variables = get_collection::Variables {
            handle: handle.to_string(),
        };

        let generation = self.inner.cache.generation();
        let data = match self.execute::<GetCollection>(variables).await {
            Ok(data) => data,
            Err(e) => return fallback(e, || None),
        };

        let collection = data.collection.map(reshape_collection);

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Collection(collection.clone().map(Box::new)),
                generation,
            )
            .await;

        Ok(collection)
    }

    /// List the products of a collection. Unknown collections yield no products.
    ///
    /// # Errors
    ///
    /// Never fails because of the API.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_products(
        &self,
        handle: &str,
        sort_key: Option<&str>,
        reverse: bool,
    ) -> Result<Vec<Product>, ShopifyError> {
        let sort_key = collection_sort_key(sort_key);
        let cache_key = CacheKey::CollectionProducts {
            handle: handle.to_string(),
            sort_key: sort_key.clone(),
            reverse,
        };

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection products");
            return Ok(products);
        }

        let variables = get_collection_products::Variables {
            handle: handle.to_string(),
            reverse: Some(reverse),
            sort_key,
        };

        let generation = self.inner.cache.generation();
        let data = match self.execute::<GetCollectionProducts>(variables).await {
            Ok(data) => data,
            Err(e) => {
                return fallback(e, || {
                    mock::mock_collection_products(handle, DEFAULT_COLLECTION_PRODUCT_COUNT)
                });
            }
        };

        let products = match data.collection {
            Some(collection) => reshape_products(remove_edges_and_nodes(collection.products)),
            None => {
                debug!("No collection found");
                Vec::new()
            }
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()), generation)
            .await;

        Ok(products)
    }

    /// List collections, starting with the synthetic "All" collection.
    ///
    /// # Errors
    ///
    /// Never fails because of the API.
    #[instrument(skip(self))]
    pub async fn get_collections(&self) -> Result<Vec<Collection>, ShopifyError> {
        let listed = if let Some(CacheValue::Collections(collections)) =
            self.inner.cache.get(&CacheKey::Collections).await
        {
            debug!("Cache hit for collections");
            collections
        } else {
            let generation = self.inner.cache.generation();
            let data = match self.execute::<GetCollections>(get_collections::Variables).await {
                Ok(data) => data,
                Err(e) => {
                    return fallback(e, || {
                        let mut collections = vec![all_collection(now_rfc3339())];
                        collections.extend(mock::mock_collections());
                        collections
                    });
                }
            };

            let collections: Vec<Collection> =
                reshape_collections(remove_edges_and_nodes(data.collections))
                    .into_iter()
                    .filter(|c| !c.handle.starts_with(HIDDEN_COLLECTION_PREFIX))
                    .collect();

            self.inner
                .cache
                .insert(
                    CacheKey::Collections,
                    CacheValue::Collections(collections.clone()),
                    generation,
                )
                .await;

            collections
        };

        let mut collections = Vec::with_capacity(listed.len() + 1);
        collections.push(all_collection(now_rfc3339()));
        collections.extend(listed);
        Ok(collections)
    }

    // =========================================================================
    // Content Methods
    // =========================================================================

    /// Get a navigation menu with storefront paths.
    ///
    /// # Errors
    ///
    /// Never fails because of the API.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_menu(&self, handle: &str) -> Result<Vec<Menu>, ShopifyError> {
        let cache_key = CacheKey::Menu(handle.to_string());

        if let Some(CacheValue::Menu(menu)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for menu");
            return Ok(menu);
        }

        let variables = get_menu::Variables {
            handle: handle.to_string(),
        };

        let generation = self.inner.cache.generation();
        let data = match self.execute::<GetMenu>(variables).await {
            Ok(data) => data,
            Err(e) => return fallback(e, mock::mock_menu),
        };

        let menu = data
            .menu
            .map(|menu| reshape_menu(menu, &self.inner.origin))
            .unwrap_or_default();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Menu(menu.clone()), generation)
            .await;

        Ok(menu)
    }

    /// Get a content page by handle.
    ///
    /// # Errors
    ///
    /// Never fails because of the API.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_page(&self, handle: &str) -> Result<Option<Page>, ShopifyError> {
        let variables = get_page::Variables {
            handle: handle.to_string(),
        };

        match self.execute::<GetPage>(variables).await {
            Ok(data) => Ok(data.page_by_handle.map(reshape_page)),
            Err(e) => fallback(e, || Some(mock::mock_page(handle))),
        }
    }

    /// List all content pages.
    ///
    /// # Errors
    ///
    /// Never fails because of the API.
    #[instrument(skip(self))]
    pub async fn get_pages(&self) -> Result<Vec<Page>, ShopifyError> {
        match self.execute::<GetPages>(get_pages::Variables).await {
            Ok(data) => Ok(reshape_pages(remove_edges_and_nodes(data.pages))),
            Err(e) => fallback(e, mock::mock_pages),
        }
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Create a new empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation reports user errors or an incomplete
    /// payload.
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<Cart, ShopifyError> {
        match self
            .execute::<CreateCart>(create_cart::Variables::default())
            .await
        {
            Ok(data) => reshape_cart_payload(data.cart_create, "cartCreate"),
            Err(e) => fallback(e, mock::mock_cart),
        }
    }

    /// Get an existing cart. Checked-out carts come back as `None`.
    ///
    /// # Errors
    ///
    /// Never fails because of the API.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, cart_id: Option<&str>) -> Result<Option<Cart>, ShopifyError> {
        let Some(cart_id) = cart_id else {
            return Ok(None);
        };

        let variables = get_cart::Variables {
            cart_id: cart_id.to_string(),
        };

        match self.execute::<GetCart>(variables).await {
            Ok(data) => Ok(data.cart.map(reshape_cart)),
            Err(e) => fallback(e, || None),
        }
    }

    /// Add lines to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation reports user errors or an incomplete
    /// payload.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_to_cart(
        &self,
        cart_id: &str,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError> {
        let variables = add_to_cart::Variables {
            cart_id: cart_id.to_string(),
            lines,
        };

        match self.execute::<AddToCart>(variables).await {
            Ok(data) => reshape_cart_payload(data.cart_lines_add, "cartLinesAdd"),
            Err(e) => fallback(e, mock::mock_cart),
        }
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation reports user errors or an incomplete
    /// payload.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    pub async fn remove_from_cart(
        &self,
        cart_id: &str,
        line_ids: Vec<String>,
    ) -> Result<Cart, ShopifyError> {
        let variables = remove_from_cart::Variables {
            cart_id: cart_id.to_string(),
            line_ids,
        };

        match self.execute::<RemoveFromCart>(variables).await {
            Ok(data) => reshape_cart_payload(data.cart_lines_remove, "cartLinesRemove"),
            Err(e) => fallback(e, mock::mock_cart),
        }
    }

    /// Update quantities of cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation reports user errors or an incomplete
    /// payload.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn update_cart(
        &self,
        cart_id: &str,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, ShopifyError> {
        let variables = edit_cart_items::Variables {
            cart_id: cart_id.to_string(),
            lines,
        };

        match self.execute::<EditCartItems>(variables).await {
            Ok(data) => reshape_cart_payload(data.cart_lines_update, "cartLinesUpdate"),
            Err(e) => fallback(e, mock::mock_cart),
        }
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Drop every cached result labelled with `tag`.
    pub fn revalidate_tag(&self, tag: CacheTag) {
        self.inner.cache.invalidate_tag(tag);
    }

    /// Invalidate all cached data.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }
}
