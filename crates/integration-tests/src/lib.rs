//! Integration tests for the commerce storefront.
//!
//! The vendor GraphQL endpoint is replaced by an `httpmock` server and the
//! router is driven in-process with `tower::ServiceExt::oneshot`, so no
//! network access or credentials are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p commerce-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_vendor` - reshaping and caching of vendor responses
//! - `storefront_fallback` - mock data when the vendor fails
//! - `revalidate` - webhook authentication and tag invalidation
//! - `cart` - cart cookie and cart actions
//! - `pages` - JSON page handlers

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr};

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use commerce_storefront::{
    app,
    config::{CacheConfig, ShopifyStorefrontConfig, StorefrontConfig},
    state::AppState,
};
use httpmock::Mock;
use httpmock::prelude::*;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const API_VERSION: &str = "2023-01";
pub const GRAPHQL_PATH: &str = "/api/2023-01/graphql.json";
pub const ACCESS_TOKEN: &str = "test-storefront-token";
pub const REVALIDATION_SECRET: &str = "Zq8vL2mX4nR7tK1pW9sB3dF6";

/// Configuration pointing at `store_domain`, or mock mode when `None`.
#[must_use]
pub fn test_config(store_domain: Option<String>) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        site_name: "Acme Store".to_string(),
        shopify: ShopifyStorefrontConfig {
            store_domain,
            api_version: API_VERSION.to_string(),
            access_token: Some(SecretString::from(ACCESS_TOKEN)),
            revalidation_secret: Some(SecretString::from(REVALIDATION_SECRET)),
        },
        cache: CacheConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// State talking to the mock vendor server.
#[must_use]
pub fn vendor_state(server: &MockServer) -> AppState {
    AppState::new(test_config(Some(server.base_url())))
}

/// State without a configured store; everything is served from mock data.
#[must_use]
pub fn offline_state() -> AppState {
    AppState::new(test_config(None))
}

/// Request body fragment identifying a GraphQL operation.
#[must_use]
pub fn operation(name: &str) -> String {
    format!("\"operationName\":\"{name}\"")
}

/// Answer `name` with `{"data": data}`.
pub async fn mock_operation<'a>(server: &'a MockServer, name: &str, data: Value) -> Mock<'a> {
    let body = operation(name);
    server
        .mock_async(move |when, then| {
            when.method(POST)
                .path(GRAPHQL_PATH)
                .body_contains(body.as_str());
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "data": data }));
        })
        .await
}

/// Fail every GraphQL request with `status`.
pub async fn mock_failure(server: &MockServer, status: u16) -> Mock<'_> {
    server
        .mock_async(move |when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(status).body("upstream failure");
        })
        .await
}

fn money(amount: &str) -> Value {
    json!({ "amount": amount, "currencyCode": "USD" })
}

fn image(url: &str) -> Value {
    json!({ "url": url, "altText": null, "width": 800, "height": 600 })
}

/// A vendor product as returned on the wire.
#[must_use]
pub fn vendor_product(handle: &str, title: &str, tags: &[&str]) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "availableForSale": true,
        "title": title,
        "description": format!("{title} description"),
        "descriptionHtml": format!("<p>{title} description</p>"),
        "options": [{ "id": "opt-size", "name": "Size", "values": ["S", "M"] }],
        "priceRange": {
            "maxVariantPrice": money("30.0"),
            "minVariantPrice": money("20.0")
        },
        "variants": { "edges": [
            { "node": {
                "id": format!("{handle}-small"),
                "title": "S",
                "availableForSale": true,
                "selectedOptions": [{ "name": "Size", "value": "S" }],
                "price": money("20.0")
            } },
            { "node": {
                "id": format!("{handle}-medium"),
                "title": "M",
                "availableForSale": false,
                "selectedOptions": [{ "name": "Size", "value": "M" }],
                "price": money("30.0")
            } }
        ] },
        "featuredImage": image(&format!("https://cdn.example.com/files/{handle}.jpg")),
        "images": { "edges": [
            { "node": image(&format!("https://cdn.example.com/files/{handle}.jpg")) },
            { "node": {
                "url": format!("https://cdn.example.com/files/{handle}-back.png"),
                "altText": "Back view",
                "width": 800,
                "height": 600
            } }
        ] },
        "seo": { "title": null, "description": null },
        "tags": tags,
        "updatedAt": "2024-03-01T12:00:00Z"
    })
}

/// A vendor collection as returned on the wire.
#[must_use]
pub fn vendor_collection(handle: &str, title: &str) -> Value {
    json!({
        "handle": handle,
        "title": title,
        "description": format!("{title} collection"),
        "seo": { "title": null, "description": null },
        "updatedAt": "2024-03-01T12:00:00Z"
    })
}

/// A vendor cart holding `(line id, merchandise id, quantity)` lines.
#[must_use]
pub fn vendor_cart(id: &str, checkout_url: &str, lines: &[(&str, &str, i64)]) -> Value {
    let edges: Vec<Value> = lines
        .iter()
        .map(|(line_id, merchandise_id, quantity)| {
            json!({ "node": {
                "id": line_id,
                "quantity": quantity,
                "cost": { "totalAmount": money("20.0") },
                "merchandise": {
                    "id": merchandise_id,
                    "title": "S",
                    "selectedOptions": [{ "name": "Size", "value": "S" }],
                    "product": {
                        "id": "gid://shopify/Product/shirt",
                        "handle": "shirt",
                        "title": "Shirt",
                        "featuredImage": null
                    }
                }
            } })
        })
        .collect();
    let total_quantity: i64 = lines.iter().map(|(_, _, quantity)| quantity).sum();

    json!({
        "id": id,
        "checkoutUrl": checkout_url,
        "cost": {
            "subtotalAmount": money("20.0"),
            "totalAmount": money("20.0"),
            "totalTaxAmount": null
        },
        "lines": { "edges": edges },
        "totalQuantity": total_quantity
    })
}

/// Wrap a cart in a mutation payload.
#[must_use]
pub fn cart_payload(cart: Value) -> Value {
    json!({ "cart": cart, "userErrors": [] })
}

/// Response captured from the router.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` when the body is not JSON.
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header, if any.
    #[must_use]
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(axum::http::header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
    }

    /// The `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(axum::http::header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// Send a request through the full router.
pub async fn send(state: &AppState, request: Request<Body>) -> TestResponse {
    let response = app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
    }
}

/// `GET uri`.
#[must_use]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Form `POST` with an optional cart cookie.
#[must_use]
pub fn post_form(uri: &str, form: &str, cart_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(cart_id) = cart_id {
        builder = builder.header("cookie", format!("cartId={cart_id}"));
    }
    builder.body(Body::from(form.to_string())).unwrap()
}
