//! Cart cookie and cart action flows through the router.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use commerce_integration_tests::{
    cart_payload, get, mock_operation, offline_state, post_form, send, vendor_cart, vendor_state,
};
use commerce_storefront::shopify::mock::MOCK_CART_ID;
use httpmock::prelude::*;
use serde_json::{Value, json};

const CART_ID: &str = "gid-cart-1";

#[tokio::test]
async fn test_show_without_cookie_is_null() {
    let response = send(&offline_state(), get("/cart")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Value::Null);
}

#[tokio::test]
async fn test_create_sets_cookie() {
    let response = send(&offline_state(), post_form("/cart", "", None)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], MOCK_CART_ID);

    let cookie = response.set_cookie().unwrap();
    assert!(cookie.starts_with("cartId=mock-cart-id"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_add_without_variant_reports_error() {
    let response = send(&offline_state(), post_form("/cart/add", "", None)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "message": "Error adding item to cart" })
    );
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_add_creates_cart_and_sets_cookie() {
    let response = send(
        &offline_state(),
        post_form("/cart/add", "selectedVariantId=v1", None),
    )
    .await;

    assert_eq!(response.body["message"], "Item added to cart successfully");
    assert_eq!(response.body["cart"]["id"], MOCK_CART_ID);
    assert!(
        response
            .set_cookie()
            .unwrap()
            .starts_with("cartId=mock-cart-id")
    );
}

#[tokio::test]
async fn test_add_to_existing_cart_keeps_cookie() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart(CART_ID, "", &[]) }),
    )
    .await;
    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains("\"operationName\":\"addToCart\"")
                .body_contains("\"merchandiseId\":\"shirt-small\"")
                .body_contains("\"quantity\":1");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "data": { "cartLinesAdd": cart_payload(
                    vendor_cart(CART_ID, "", &[("line-1", "shirt-small", 1)])
                ) } }));
        })
        .await;

    let response = send(
        &vendor_state(&server),
        post_form("/cart/add", "selectedVariantId=shirt-small", Some(CART_ID)),
    )
    .await;

    add.assert_async().await;
    assert_eq!(response.body["message"], "Item added to cart successfully");
    assert_eq!(response.body["cart"]["total_quantity"], 1);
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_add_reports_user_errors() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart(CART_ID, "", &[]) }),
    )
    .await;
    mock_operation(
        &server,
        "addToCart",
        json!({ "cartLinesAdd": {
            "cart": null,
            "userErrors": [{ "field": null, "message": "Sold out" }]
        } }),
    )
    .await;

    let response = send(
        &vendor_state(&server),
        post_form("/cart/add", "selectedVariantId=v1", Some(CART_ID)),
    )
    .await;

    assert_eq!(
        response.body,
        json!({ "message": "Error adding item to cart" })
    );
}

#[tokio::test]
async fn test_remove_without_cart() {
    let response = send(
        &offline_state(),
        post_form("/cart/remove", "merchandiseId=v1", None),
    )
    .await;

    assert_eq!(response.body, json!({ "message": "Error fetching cart" }));
}

#[tokio::test]
async fn test_remove_unknown_item() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart(CART_ID, "", &[("line-1", "shirt-small", 1)]) }),
    )
    .await;

    let response = send(
        &vendor_state(&server),
        post_form("/cart/remove", "merchandiseId=mug", Some(CART_ID)),
    )
    .await;

    assert_eq!(response.body, json!({ "message": "Item not found in cart" }));
}

#[tokio::test]
async fn test_remove_item() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart(CART_ID, "", &[("line-1", "shirt-small", 1)]) }),
    )
    .await;
    let remove = server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains("\"operationName\":\"removeFromCart\"")
                .body_contains("\"lineIds\":[\"line-1\"]");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "data": { "cartLinesRemove": cart_payload(
                    vendor_cart(CART_ID, "", &[])
                ) } }));
        })
        .await;

    let response = send(
        &vendor_state(&server),
        post_form("/cart/remove", "merchandiseId=shirt-small", Some(CART_ID)),
    )
    .await;

    remove.assert_async().await;
    assert!(response.body.get("message").is_none());
    assert_eq!(response.body["cart"]["lines"], json!([]));
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart(CART_ID, "", &[("line-1", "shirt-small", 2)]) }),
    )
    .await;
    let remove = mock_operation(
        &server,
        "removeFromCart",
        json!({ "cartLinesRemove": cart_payload(vendor_cart(CART_ID, "", &[])) }),
    )
    .await;

    let response = send(
        &vendor_state(&server),
        post_form(
            "/cart/update",
            "merchandiseId=shirt-small&quantity=0",
            Some(CART_ID),
        ),
    )
    .await;

    remove.assert_async().await;
    assert_eq!(response.body["cart"]["total_quantity"], 0);
}

#[tokio::test]
async fn test_update_existing_line() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart(CART_ID, "", &[("line-1", "shirt-small", 1)]) }),
    )
    .await;
    let edit = server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains("\"operationName\":\"editCartItems\"")
                .body_contains("\"id\":\"line-1\"")
                .body_contains("\"quantity\":3");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "data": { "cartLinesUpdate": cart_payload(
                    vendor_cart(CART_ID, "", &[("line-1", "shirt-small", 3)])
                ) } }));
        })
        .await;

    let response = send(
        &vendor_state(&server),
        post_form(
            "/cart/update",
            "merchandiseId=shirt-small&quantity=3",
            Some(CART_ID),
        ),
    )
    .await;

    edit.assert_async().await;
    assert_eq!(response.body["cart"]["total_quantity"], 3);
}

#[tokio::test]
async fn test_update_missing_line_adds_it() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart(CART_ID, "", &[]) }),
    )
    .await;
    let add = mock_operation(
        &server,
        "addToCart",
        json!({ "cartLinesAdd": cart_payload(
            vendor_cart(CART_ID, "", &[("line-1", "shirt-small", 2)])
        ) }),
    )
    .await;

    let response = send(
        &vendor_state(&server),
        post_form(
            "/cart/update",
            "merchandiseId=shirt-small&quantity=2",
            Some(CART_ID),
        ),
    )
    .await;

    add.assert_async().await;
    assert_eq!(response.body["cart"]["total_quantity"], 2);
}

#[tokio::test]
async fn test_update_failure_reports_error() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart(CART_ID, "", &[("line-1", "shirt-small", 1)]) }),
    )
    .await;
    mock_operation(
        &server,
        "editCartItems",
        json!({ "cartLinesUpdate": null }),
    )
    .await;

    let response = send(
        &vendor_state(&server),
        post_form(
            "/cart/update",
            "merchandiseId=shirt-small&quantity=5",
            Some(CART_ID),
        ),
    )
    .await;

    assert_eq!(
        response.body,
        json!({ "message": "Error updating item quantity" })
    );
}

#[tokio::test]
async fn test_update_with_invalid_quantity_reports_error() {
    let server = MockServer::start_async().await;
    let get_cart = mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart(CART_ID, "", &[("line-1", "shirt-small", 1)]) }),
    )
    .await;
    let state = vendor_state(&server);

    for form in [
        "merchandiseId=shirt-small&quantity=two",
        "merchandiseId=shirt-small&quantity=",
        "merchandiseId=shirt-small",
    ] {
        let response = send(&state, post_form("/cart/update", form, Some(CART_ID))).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body,
            json!({ "message": "Error updating item quantity" })
        );
    }

    assert_eq!(get_cart.hits_async().await, 0);
}

#[tokio::test]
async fn test_checkout_redirects_to_vendor() {
    let server = MockServer::start_async().await;
    mock_operation(
        &server,
        "getCart",
        json!({ "cart": vendor_cart(
            CART_ID,
            "https://checkout.example.com/c/1",
            &[("line-1", "shirt-small", 1)]
        ) }),
    )
    .await;

    let request = axum::http::Request::builder()
        .uri("/checkout")
        .header("cookie", format!("theme=dark; cartId={CART_ID}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = send(&vendor_state(&server), request).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("https://checkout.example.com/c/1"));
}

#[tokio::test]
async fn test_checkout_without_cart_returns_to_cart() {
    let response = send(&offline_state(), get("/checkout")).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));
}
