//! Reshaping of raw Storefront API payloads into domain types.
//!
//! Every function here is pure. Timestamps that are not part of the vendor
//! payload are passed in by the caller.

pub mod cart;
pub mod collections;
pub mod content;
pub mod products;

pub use cart::{reshape_cart, reshape_cart_payload};
pub use collections::{all_collection, collection_path, reshape_collection, reshape_collections};
pub use content::{reshape_menu, reshape_menu_path, reshape_page, reshape_pages};
pub use products::{reshape_images, reshape_product, reshape_products};

use crate::shopify::types::{Image, Money, SelectedOption, Seo};

use super::schema::{Connection, ShopifyImage, ShopifyMoney, ShopifySelectedOption, ShopifySeo};

/// Flatten a connection into its nodes, keeping their order.
#[must_use]
pub fn remove_edges_and_nodes<T>(connection: Connection<T>) -> Vec<T> {
    connection.edges.into_iter().map(|edge| edge.node).collect()
}

fn convert_money(money: ShopifyMoney) -> Money {
    Money {
        amount: money.amount,
        currency_code: money.currency_code,
    }
}

fn convert_seo(seo: ShopifySeo) -> Seo {
    Seo {
        title: seo.title,
        description: seo.description,
    }
}

fn convert_selected_option(option: ShopifySelectedOption) -> SelectedOption {
    SelectedOption {
        name: option.name,
        value: option.value,
    }
}

/// Image conversion that keeps whatever alt text the vendor sent.
fn convert_image(image: ShopifyImage) -> Image {
    Image {
        url: image.url,
        alt_text: image.alt_text.unwrap_or_default(),
        width: image.width,
        height: image.height,
    }
}
