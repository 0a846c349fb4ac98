//! Product reshaping.

use std::sync::LazyLock;

use regex::Regex;

use crate::shopify::types::{
    HIDDEN_PRODUCT_TAG, Image, PriceRange, Product, ProductOption, ProductVariant,
};

use super::super::schema::{Connection, ShopifyImage, ShopifyProduct, ShopifyProductVariant};
use super::{convert_money, convert_selected_option, convert_seo, remove_edges_and_nodes};

/// Captures the file name (without extension) from an image URL.
#[allow(clippy::expect_used)]
static FILENAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*/(.*)\..*").expect("Invalid regex"));

fn image_filename(url: &str) -> Option<&str> {
    FILENAME_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
}

/// Flatten product images, filling in missing alt text from the product title.
#[must_use]
pub fn reshape_images(images: Connection<ShopifyImage>, product_title: &str) -> Vec<Image> {
    remove_edges_and_nodes(images)
        .into_iter()
        .map(|image| {
            let alt_text = match image.alt_text {
                Some(alt) if !alt.is_empty() => alt,
                _ => image_filename(&image.url).map_or_else(
                    || product_title.to_string(),
                    |filename| format!("{product_title} - {filename}"),
                ),
            };

            Image {
                url: image.url,
                alt_text,
                width: image.width,
                height: image.height,
            }
        })
        .collect()
}

fn convert_variant(variant: ShopifyProductVariant) -> ProductVariant {
    ProductVariant {
        id: variant.id,
        title: variant.title,
        available_for_sale: variant.available_for_sale,
        selected_options: variant
            .selected_options
            .into_iter()
            .map(convert_selected_option)
            .collect(),
        price: convert_money(variant.price),
    }
}

/// Reshape a product.
///
/// Returns `None` when `filter_hidden` is set and the product carries the
/// hidden tag.
#[must_use]
pub fn reshape_product(product: ShopifyProduct, filter_hidden: bool) -> Option<Product> {
    if filter_hidden && product.tags.iter().any(|tag| tag == HIDDEN_PRODUCT_TAG) {
        return None;
    }

    let images = reshape_images(product.images, &product.title);

    Some(Product {
        id: product.id,
        handle: product.handle,
        available_for_sale: product.available_for_sale,
        title: product.title,
        description: product.description,
        description_html: product.description_html,
        options: product
            .options
            .into_iter()
            .map(|option| ProductOption {
                id: option.id,
                name: option.name,
                values: option.values,
            })
            .collect(),
        price_range: PriceRange {
            max_variant_price: convert_money(product.price_range.max_variant_price),
            min_variant_price: convert_money(product.price_range.min_variant_price),
        },
        variants: remove_edges_and_nodes(product.variants)
            .into_iter()
            .map(convert_variant)
            .collect(),
        featured_image: product.featured_image.map(super::convert_image),
        images,
        seo: convert_seo(product.seo),
        tags: product.tags,
        updated_at: product.updated_at,
    })
}

/// Reshape a product list, dropping hidden products.
#[must_use]
pub fn reshape_products(products: Vec<ShopifyProduct>) -> Vec<Product> {
    products
        .into_iter()
        .filter_map(|product| reshape_product(product, true))
        .collect()
}
