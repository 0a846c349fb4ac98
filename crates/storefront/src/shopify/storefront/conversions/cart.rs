//! Cart reshaping.

use crate::shopify::ShopifyError;
use crate::shopify::types::{
    Cart, CartCost, CartLine, CartLineCost, CartMerchandise, CartProduct, Money,
};

use super::super::schema::{CartMutationPayload, ShopifyCart, ShopifyCartLine};
use super::{convert_image, convert_money, convert_selected_option, remove_edges_and_nodes};

/// Tax amount reported when the vendor omits it.
const DEFAULT_TAX_AMOUNT: &str = "0.0";

fn convert_line(line: ShopifyCartLine) -> CartLine {
    let merchandise = line.merchandise;

    CartLine {
        id: line.id,
        quantity: line.quantity,
        cost: CartLineCost {
            total_amount: convert_money(line.cost.total_amount),
        },
        merchandise: CartMerchandise {
            id: merchandise.id,
            title: merchandise.title,
            selected_options: merchandise
                .selected_options
                .into_iter()
                .map(convert_selected_option)
                .collect(),
            product: CartProduct {
                id: merchandise.product.id,
                handle: merchandise.product.handle,
                title: merchandise.product.title,
                featured_image: merchandise.product.featured_image.map(convert_image),
            },
        },
    }
}

/// Reshape a cart, flattening its lines and defaulting the tax amount.
#[must_use]
pub fn reshape_cart(cart: ShopifyCart) -> Cart {
    let total_amount = convert_money(cart.cost.total_amount);
    let total_tax_amount = cart.cost.total_tax_amount.map_or_else(
        || Money {
            amount: DEFAULT_TAX_AMOUNT.to_string(),
            currency_code: total_amount.currency_code.clone(),
        },
        convert_money,
    );

    Cart {
        id: cart.id,
        checkout_url: cart.checkout_url,
        cost: CartCost {
            subtotal_amount: convert_money(cart.cost.subtotal_amount),
            total_amount,
            total_tax_amount,
        },
        lines: remove_edges_and_nodes(cart.lines)
            .into_iter()
            .map(convert_line)
            .collect(),
        total_quantity: cart.total_quantity,
    }
}

/// Unwrap a cart mutation payload.
///
/// # Errors
///
/// Returns [`ShopifyError::UserError`] when the mutation reported user errors
/// and [`ShopifyError::MalformedResponse`] when the payload or its cart is
/// missing.
pub fn reshape_cart_payload(
    payload: Option<CartMutationPayload>,
    mutation: &str,
) -> Result<Cart, ShopifyError> {
    let payload = payload
        .ok_or_else(|| ShopifyError::MalformedResponse(format!("{mutation}: missing payload")))?;

    if !payload.user_errors.is_empty() {
        return Err(ShopifyError::UserError(
            payload
                .user_errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; "),
        ));
    }

    payload
        .cart
        .map(reshape_cart)
        .ok_or_else(|| ShopifyError::MalformedResponse(format!("{mutation}: missing cart")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn raw_cart(tax: &Value) -> ShopifyCart {
        serde_json::from_value(json!({
            "id": "gid://shopify/Cart/1",
            "checkoutUrl": "https://shop.example.com/checkout/1",
            "cost": {
                "subtotalAmount": { "amount": "40.0", "currencyCode": "EUR" },
                "totalAmount": { "amount": "40.0", "currencyCode": "EUR" },
                "totalTaxAmount": tax
            },
            "lines": { "edges": [
                { "node": {
                    "id": "line-1",
                    "quantity": 2,
                    "cost": { "totalAmount": { "amount": "40.0", "currencyCode": "EUR" } },
                    "merchandise": {
                        "id": "variant-1",
                        "title": "Small",
                        "selectedOptions": [{ "name": "Size", "value": "Small" }],
                        "product": {
                            "id": "product-1",
                            "handle": "mug",
                            "title": "Mug",
                            "featuredImage": null
                        }
                    }
                } }
            ] },
            "totalQuantity": 2
        }))
        .unwrap()
    }

    #[test]
    fn test_reshape_cart_defaults_tax_to_total_currency() {
        let cart = reshape_cart(raw_cart(&Value::Null));
        assert_eq!(cart.cost.total_tax_amount.amount, "0.0");
        assert_eq!(cart.cost.total_tax_amount.currency_code, "EUR");
    }

    #[test]
    fn test_reshape_cart_keeps_vendor_tax() {
        let cart = reshape_cart(raw_cart(&json!({ "amount": "3.2", "currencyCode": "EUR" })));
        assert_eq!(cart.cost.total_tax_amount.amount, "3.2");
    }

    #[test]
    fn test_reshape_cart_flattens_lines() {
        let cart = reshape_cart(raw_cart(&Value::Null));
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].merchandise.product.handle, "mug");
        assert_eq!(cart.line_for_merchandise("variant-1").unwrap().id, "line-1");
        assert!(cart.line_for_merchandise("variant-2").is_none());
    }

    #[test]
    fn test_payload_user_error_propagates() {
        let payload: CartMutationPayload = serde_json::from_value(json!({
            "cart": null,
            "userErrors": [{ "field": ["lines"], "message": "Merchandise does not exist" }]
        }))
        .unwrap();
        let err = reshape_cart_payload(Some(payload), "cartLinesAdd").unwrap_err();
        assert!(matches!(err, ShopifyError::UserError(m) if m == "Merchandise does not exist"));
    }

    #[test]
    fn test_payload_missing_is_malformed() {
        let err = reshape_cart_payload(None, "cartCreate").unwrap_err();
        assert!(matches!(err, ShopifyError::MalformedResponse(_)));
    }
}
