//! Cart route handlers.
//!
//! The cart id lives in the `cartId` cookie. Cart actions always answer 200
//! with a user-facing message and/or the updated cart; failures are logged
//! and reported through the message only.

use axum::{
    Form, Json,
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{CartCookie, set_cart_cookie_header};
use crate::shopify::types::{Cart, CartLineInput, CartLineUpdateInput};
use crate::shopify::{ShopifyError, StorefrontClient};
use crate::state::AppState;

pub const ADD_ERROR: &str = "Error adding item to cart";
pub const ADD_SUCCESS: &str = "Item added to cart successfully";
pub const FETCH_ERROR: &str = "Error fetching cart";
pub const NOT_IN_CART: &str = "Item not found in cart";
pub const REMOVE_ERROR: &str = "Error removing item from cart";
pub const UPDATE_ERROR: &str = "Error updating item quantity";

/// Result of a cart action.
#[derive(Debug, Default, Serialize)]
pub struct CartActionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<Cart>,
}

impl CartActionResponse {
    fn message(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            cart: None,
        }
    }

    fn cart(cart: Cart) -> Self {
        Self {
            message: None,
            cart: Some(cart),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemForm {
    pub selected_variant_id: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemForm {
    pub merchandise_id: String,
}

/// Update quantity form data.
///
/// The quantity is kept as text so a bad value gets the cart error message
/// instead of an extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemForm {
    pub merchandise_id: String,
    pub quantity: Option<String>,
}

impl UpdateItemForm {
    fn quantity(&self) -> Option<i64> {
        self.quantity.as_deref()?.trim().parse().ok()
    }
}

/// Attach the cart cookie to a response.
fn with_cart_cookie(state: &AppState, response: impl IntoResponse, cart_id: &str) -> Response {
    let mut response = response.into_response();

    match set_cart_cookie_header(cart_id, state.config().is_secure()) {
        Some(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        None => tracing::error!(cart_id = %cart_id, "Cart id is not a valid cookie value"),
    }

    response
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart, or `null` when there is none.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CartCookie(cart_id): CartCookie,
) -> Result<Json<Option<Cart>>> {
    Ok(Json(state.storefront().get_cart(cart_id.as_deref()).await?))
}

/// Create a cart and store its id in the cookie.
#[instrument(skip(state))]
pub async fn create(State(state): State<AppState>) -> Result<Response> {
    let cart = state.storefront().create_cart().await?;
    let cart_id = cart.id.clone();

    Ok(with_cart_cookie(&state, Json(cart), &cart_id))
}

/// Add one unit of a variant, creating the cart first if needed.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    CartCookie(cart_id): CartCookie,
    Form(form): Form<AddItemForm>,
) -> Response {
    let Some(variant_id) = form.selected_variant_id.filter(|id| !id.is_empty()) else {
        return Json(CartActionResponse::message(ADD_ERROR)).into_response();
    };

    match add_item(state.storefront(), cart_id.as_deref(), variant_id).await {
        Ok((cart, created)) => {
            let cart_id = cart.id.clone();
            let body = Json(CartActionResponse {
                message: Some(ADD_SUCCESS.to_string()),
                cart: Some(cart),
            });
            if created {
                with_cart_cookie(&state, body, &cart_id)
            } else {
                body.into_response()
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to add item to cart");
            Json(CartActionResponse::message(ADD_ERROR)).into_response()
        }
    }
}

/// Returns the updated cart and whether it was newly created.
async fn add_item(
    storefront: &StorefrontClient,
    cart_id: Option<&str>,
    merchandise_id: String,
) -> std::result::Result<(Cart, bool), ShopifyError> {
    let (cart_id, created) = match storefront.get_cart(cart_id).await? {
        Some(cart) => (cart.id, false),
        None => (storefront.create_cart().await?.id, true),
    };

    let cart = storefront
        .add_to_cart(
            &cart_id,
            vec![CartLineInput {
                merchandise_id,
                quantity: 1,
            }],
        )
        .await?;

    Ok((cart, created))
}

/// Remove the line holding a variant.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    CartCookie(cart_id): CartCookie,
    Form(form): Form<RemoveItemForm>,
) -> Json<CartActionResponse> {
    let storefront = state.storefront();

    let cart = match storefront.get_cart(cart_id.as_deref()).await {
        Ok(Some(cart)) => cart,
        Ok(None) => return Json(CartActionResponse::message(FETCH_ERROR)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch cart");
            return Json(CartActionResponse::message(REMOVE_ERROR));
        }
    };

    let Some(line) = cart.line_for_merchandise(&form.merchandise_id) else {
        return Json(CartActionResponse::message(NOT_IN_CART));
    };

    match storefront
        .remove_from_cart(&cart.id, vec![line.id.clone()])
        .await
    {
        Ok(cart) => Json(CartActionResponse::cart(cart)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to remove from cart");
            Json(CartActionResponse::message(REMOVE_ERROR))
        }
    }
}

/// Set the quantity of a variant. Zero removes the line; a variant not yet in
/// the cart is added.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    CartCookie(cart_id): CartCookie,
    Form(form): Form<UpdateItemForm>,
) -> Json<CartActionResponse> {
    let Some(quantity) = form.quantity() else {
        tracing::warn!(quantity = ?form.quantity, "Invalid cart quantity");
        return Json(CartActionResponse::message(UPDATE_ERROR));
    };
    let storefront = state.storefront();

    let cart = match storefront.get_cart(cart_id.as_deref()).await {
        Ok(Some(cart)) => cart,
        Ok(None) => return Json(CartActionResponse::message(FETCH_ERROR)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch cart");
            return Json(CartActionResponse::message(UPDATE_ERROR));
        }
    };

    let result = match cart.line_for_merchandise(&form.merchandise_id) {
        Some(line) if quantity == 0 => {
            storefront
                .remove_from_cart(&cart.id, vec![line.id.clone()])
                .await
        }
        Some(line) => {
            storefront
                .update_cart(
                    &cart.id,
                    vec![CartLineUpdateInput {
                        id: line.id.clone(),
                        merchandise_id: form.merchandise_id,
                        quantity,
                    }],
                )
                .await
        }
        None if quantity > 0 => {
            storefront
                .add_to_cart(
                    &cart.id,
                    vec![CartLineInput {
                        merchandise_id: form.merchandise_id,
                        quantity,
                    }],
                )
                .await
        }
        None => Ok(cart),
    };

    match result {
        Ok(cart) => Json(CartActionResponse::cart(cart)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update cart");
            Json(CartActionResponse::message(UPDATE_ERROR))
        }
    }
}

/// Redirect to the vendor checkout, or back to the cart when there is none.
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    CartCookie(cart_id): CartCookie,
) -> Redirect {
    match state.storefront().get_cart(cart_id.as_deref()).await {
        Ok(Some(cart)) if !cart.checkout_url.is_empty() => Redirect::to(&cart.checkout_url),
        Ok(_) => Redirect::to("/cart"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to get cart for checkout");
            Redirect::to("/cart")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(quantity: Option<&str>) -> UpdateItemForm {
        UpdateItemForm {
            merchandise_id: "variant-1".to_string(),
            quantity: quantity.map(String::from),
        }
    }

    #[test]
    fn test_update_quantity_parsing() {
        assert_eq!(form(Some("3")).quantity(), Some(3));
        assert_eq!(form(Some(" 0 ")).quantity(), Some(0));
        assert_eq!(form(Some("two")).quantity(), None);
        assert_eq!(form(Some("")).quantity(), None);
        assert_eq!(form(None).quantity(), None);
    }

    #[test]
    fn test_action_response_skips_empty_fields() {
        let json = serde_json::to_value(CartActionResponse::message(UPDATE_ERROR)).unwrap();
        assert_eq!(json, serde_json::json!({ "message": UPDATE_ERROR }));
    }
}
