//! Revalidation webhook: authentication and tag invalidation.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use commerce_integration_tests::{
    GRAPHQL_PATH, REVALIDATION_SECRET, mock_operation, operation, offline_state, send, test_config, vendor_collection,
    vendor_product, vendor_state,
};
use commerce_storefront::state::AppState;
use httpmock::prelude::*;
use serde_json::json;

fn webhook(secret: Option<&str>, topic: Option<&str>) -> Request<Body> {
    let uri = secret.map_or_else(
        || "/api/revalidate".to_string(),
        |secret| format!("/api/revalidate?secret={secret}"),
    );
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(topic) = topic {
        builder = builder.header("x-shopify-topic", topic);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_missing_secret_is_unauthorized() {
    let response = send(&offline_state(), webhook(None, Some("products/update"))).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "status": 401 }));
}

#[tokio::test]
async fn test_wrong_secret_is_unauthorized() {
    let response = send(
        &offline_state(),
        webhook(Some("not-the-secret"), Some("products/update")),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "status": 401 }));
}

#[tokio::test]
async fn test_unconfigured_secret_rejects_everything() {
    let mut config = test_config(None);
    config.shopify.revalidation_secret = None;
    let state = AppState::new(config);

    let response = send(&state, webhook(Some(""), Some("products/update"))).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ignored_topic_is_acknowledged() {
    let response = send(
        &offline_state(),
        webhook(Some(REVALIDATION_SECRET), Some("orders/create")),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": 200 }));
}

#[tokio::test]
async fn test_missing_topic_is_acknowledged() {
    let response = send(&offline_state(), webhook(Some(REVALIDATION_SECRET), None)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": 200 }));
}

#[tokio::test]
async fn test_product_topic_revalidates() {
    let response = send(
        &offline_state(),
        webhook(Some(REVALIDATION_SECRET), Some("products/delete")),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], 200);
    assert_eq!(response.body["revalidated"], true);
    assert!(response.body["now"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_topics_invalidate_only_their_tag() {
    let server = MockServer::start_async().await;
    let products = mock_operation(
        &server,
        "getProducts",
        json!({ "products": { "edges": [
            { "node": vendor_product("shirt", "Shirt", &[]) }
        ] } }),
    )
    .await;
    let collections = mock_operation(
        &server,
        "getCollections",
        json!({ "collections": { "edges": [
            { "node": vendor_collection("shoes", "Shoes") }
        ] } }),
    )
    .await;

    let state = vendor_state(&server);
    let storefront = state.storefront();
    storefront.get_products(None, None, false).await.unwrap();
    storefront.get_collections().await.unwrap();

    let response = send(
        &state,
        webhook(Some(REVALIDATION_SECRET), Some("collections/update")),
    )
    .await;
    assert_eq!(response.body["revalidated"], true);

    storefront.get_products(None, None, false).await.unwrap();
    storefront.get_collections().await.unwrap();
    assert_eq!(products.hits_async().await, 1);
    assert_eq!(collections.hits_async().await, 2);

    send(
        &state,
        webhook(Some(REVALIDATION_SECRET), Some("products/create")),
    )
    .await;

    storefront.get_products(None, None, false).await.unwrap();
    storefront.get_collections().await.unwrap();
    assert_eq!(products.hits_async().await, 2);
    assert_eq!(collections.hits_async().await, 2);
}

#[tokio::test]
async fn test_rejected_webhook_keeps_cache() {
    let server = MockServer::start_async().await;
    let products = mock_operation(
        &server,
        "getProducts",
        json!({ "products": { "edges": [] } }),
    )
    .await;

    let state = vendor_state(&server);
    state.storefront().get_products(None, None, false).await.unwrap();

    send(&state, webhook(Some("wrong"), Some("products/update"))).await;
    state.storefront().get_products(None, None, false).await.unwrap();

    assert_eq!(products.hits_async().await, 1);
}

#[tokio::test]
async fn test_read_in_flight_during_webhook_is_not_cached() {
    let server = MockServer::start_async().await;
    let body = operation("getProducts");
    let products = server
        .mock_async(move |when, then| {
            when.method(POST)
                .path(GRAPHQL_PATH)
                .body_contains(body.as_str());
            then.status(200)
                .header("content-type", "application/json")
                .delay(Duration::from_millis(500))
                .json_body(json!({ "data": { "products": { "edges": [
                    { "node": vendor_product("shirt", "Shirt", &[]) }
                ] } } }));
        })
        .await;

    let state = vendor_state(&server);
    let storefront = state.storefront();

    let webhook_during_read = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        send(
            &state,
            webhook(Some(REVALIDATION_SECRET), Some("products/update")),
        )
        .await
    };
    let (read, response) = tokio::join!(
        storefront.get_products(None, None, false),
        webhook_during_read
    );

    assert_eq!(read.unwrap().len(), 1);
    assert_eq!(response.body["revalidated"], true);

    storefront.get_products(None, None, false).await.unwrap();
    assert_eq!(products.hits_async().await, 2);

    // The second read started after the webhook and is cached
    storefront.get_products(None, None, false).await.unwrap();
    assert_eq!(products.hits_async().await, 2);
}
