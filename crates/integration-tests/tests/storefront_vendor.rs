//! Storefront client against a mocked vendor endpoint: reshaping and caching.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use commerce_core::CacheTag;
use commerce_integration_tests::{
    ACCESS_TOKEN, GRAPHQL_PATH, cart_payload, mock_operation, operation, vendor_cart,
    vendor_collection, vendor_product, vendor_state,
};
use commerce_storefront::shopify::ShopifyError;
use commerce_storefront::shopify::types::CartLineInput;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_products_are_flattened_in_order() {
    let server = MockServer::start_async().await;
    let mock = mock_operation(
        &server,
        "getProducts",
        json!({ "products": { "edges": [
            { "node": vendor_product("shirt", "Shirt", &[]) },
            { "node": vendor_product("secret", "Secret", &["nextjs-frontend-hidden"]) },
            { "node": vendor_product("mug", "Mug", &["kitchen"]) }
        ] } }),
    )
    .await;

    let state = vendor_state(&server);
    let products = state
        .storefront()
        .get_products(Some("s"), Some("PRICE"), false)
        .await
        .unwrap();

    mock.assert_async().await;
    let handles: Vec<&str> = products.iter().map(|p| p.handle.as_str()).collect();
    assert_eq!(handles, ["shirt", "mug"]);

    let shirt = &products[0];
    assert_eq!(shirt.variants.len(), 2);
    assert_eq!(shirt.variants[0].id, "shirt-small");
    assert_eq!(shirt.variants[1].id, "shirt-medium");
    assert_eq!(shirt.price_range.min_variant_price.amount, "20.0");
    assert_eq!(shirt.images.len(), 2);
    assert_eq!(shirt.images[0].alt_text, "Shirt - shirt");
    assert_eq!(shirt.images[1].alt_text, "Back view");
}

#[tokio::test]
async fn test_hidden_product_is_reachable_by_handle() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getProduct",
        json!({ "product": vendor_product("secret", "Secret", &["nextjs-frontend-hidden"]) }),
    )
    .await;

    let state = vendor_state(&server);
    let product = state.storefront().get_product("secret").await.unwrap();

    assert_eq!(product.unwrap().handle, "secret");
}

#[tokio::test]
async fn test_access_token_is_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GRAPHQL_PATH)
                .header("X-Shopify-Storefront-Access-Token", ACCESS_TOKEN)
                .body_contains(operation("getPages").as_str());
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "data": { "pages": { "edges": [] } } }));
        })
        .await;

    let state = vendor_state(&server);
    let pages = state.storefront().get_pages().await.unwrap();

    mock.assert_async().await;
    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_collections_start_with_all_and_skip_hidden() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCollections",
        json!({ "collections": { "edges": [
            { "node": vendor_collection("shoes", "Shoes") },
            { "node": vendor_collection("hidden-homepage-carousel", "Carousel") },
            { "node": null },
            { "node": vendor_collection("hats", "Hats") }
        ] } }),
    )
    .await;

    let state = vendor_state(&server);
    let collections = state.storefront().get_collections().await.unwrap();

    let titles: Vec<&str> = collections.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["All", "Shoes", "Hats"]);
    assert_eq!(collections[0].path, "/search");
    assert_eq!(collections[1].path, "/search/shoes");
}

#[tokio::test]
async fn test_unknown_collection_has_no_products() {
    let server = MockServer::start_async().await;
    mock_operation(&server, "getCollectionProducts", json!({ "collection": null })).await;

    let state = vendor_state(&server);
    let products = state
        .storefront()
        .get_collection_products("missing", None, false)
        .await
        .unwrap();

    assert!(products.is_empty());
}

#[tokio::test]
async fn test_menu_urls_become_storefront_paths() {
    let server = MockServer::start_async().await;
    let origin = server.base_url();
    mock_operation(
        &server,
        "getMenu",
        json!({ "menu": { "items": [
            { "title": "Shoes", "url": format!("{origin}/collections/shoes") },
            { "title": "About", "url": format!("{origin}/pages/about") },
            { "title": "Blog", "url": "https://blog.example.com/news" }
        ] } }),
    )
    .await;

    let state = vendor_state(&server);
    let menu = state.storefront().get_menu("main").await.unwrap();

    let paths: Vec<&str> = menu.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(paths, ["/search/shoes", "/about", "https://blog.example.com/news"]);
}

#[tokio::test]
async fn test_cart_is_reshaped() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart("cart-1", "https://checkout.example.com/c/1", &[
            ("line-1", "shirt-small", 2)
        ]) }),
    )
    .await;

    let state = vendor_state(&server);
    let cart = state
        .storefront()
        .get_cart(Some("cart-1"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(cart.total_quantity, 2);
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].merchandise.id, "shirt-small");
    assert_eq!(cart.cost.total_tax_amount.amount, "0.0");
    assert_eq!(cart.cost.total_tax_amount.currency_code, "USD");
}

#[tokio::test]
async fn test_checked_out_cart_is_none() {
    let server = MockServer::start_async().await;
    mock_operation(&server, "getCart", json!({ "cart": null })).await;

    let state = vendor_state(&server);
    assert!(
        state
            .storefront()
            .get_cart(Some("cart-1"))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_cart_user_errors_are_reported() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "addToCart",
        json!({ "cartLinesAdd": {
            "cart": null,
            "userErrors": [
                { "field": ["lines"], "message": "Variant is sold out" },
                { "field": null, "message": "Quantity too high" }
            ]
        } }),
    )
    .await;

    let state = vendor_state(&server);
    let err = state
        .storefront()
        .add_to_cart(
            "cart-1",
            vec![CartLineInput {
                merchandise_id: "shirt-small".to_string(),
                quantity: 1,
            }],
        )
        .await
        .unwrap_err();

    match err {
        ShopifyError::UserError(message) => {
            assert!(message.contains("Variant is sold out; Quantity too high"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_cart_mutation_returns_cart() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "createCart",
        json!({ "cartCreate": cart_payload(vendor_cart("cart-9", "", &[])) }),
    )
    .await;

    let state = vendor_state(&server);
    let cart = state.storefront().create_cart().await.unwrap();

    assert_eq!(cart.id, "cart-9");
    assert!(cart.lines.is_empty());
}

#[tokio::test]
async fn test_results_are_cached_until_their_tag_is_revalidated() {
    let server = MockServer::start_async().await;
    let mock = mock_operation(
        &server,
        "getProducts",
        json!({ "products": { "edges": [
            { "node": vendor_product("shirt", "Shirt", &[]) }
        ] } }),
    )
    .await;

    let state = vendor_state(&server);
    let storefront = state.storefront();

    storefront.get_products(None, None, false).await.unwrap();
    storefront.get_products(None, None, false).await.unwrap();
    assert_eq!(mock.hits_async().await, 1);

    storefront.revalidate_tag(CacheTag::Collections);
    storefront.get_products(None, None, false).await.unwrap();
    assert_eq!(mock.hits_async().await, 1);

    storefront.revalidate_tag(CacheTag::Products);
    storefront.get_products(None, None, false).await.unwrap();
    assert_eq!(mock.hits_async().await, 2);
}

#[tokio::test]
async fn test_cache_keys_include_arguments() {
    let server = MockServer::start_async().await;
    let mock = mock_operation(
        &server,
        "getProducts",
        json!({ "products": { "edges": [] } }),
    )
    .await;

    let state = vendor_state(&server);
    let storefront = state.storefront();

    storefront.get_products(Some("a"), None, false).await.unwrap();
    storefront.get_products(Some("b"), None, false).await.unwrap();
    storefront.get_products(Some("a"), None, true).await.unwrap();

    assert_eq!(mock.hits_async().await, 3);
}
