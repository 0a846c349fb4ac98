//! Raw Storefront API response shapes.
//!
//! These mirror the vendor schema as returned on the wire: lists come
//! wrapped in `Connection { edges: [{ node }] }` and optional fields are
//! `Option`. The `conversions` module reshapes them into the flat domain
//! types in [`crate::shopify::types`].

use serde::Deserialize;

/// Custom scalar for DateTime (Shopify returns ISO 8601 strings).
pub type DateTime = String;

/// Custom scalar for Decimal (Shopify returns decimal strings).
pub type Decimal = String;

/// Custom scalar for URL (Shopify returns URL strings).
#[allow(clippy::upper_case_acronyms)]
pub type URL = String;

/// Custom scalar for HTML (Shopify returns HTML strings).
#[allow(clippy::upper_case_acronyms)]
pub type HTML = String;

/// Cursor-paginated list wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

/// A single entry of a [`Connection`].
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyMoney {
    pub amount: Decimal,
    pub currency_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyImage {
    pub url: URL,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopifySeo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifySelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyProductOption {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyPriceRange {
    pub max_variant_price: ShopifyMoney,
    pub min_variant_price: ShopifyMoney,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyProductVariant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub selected_options: Vec<ShopifySelectedOption>,
    pub price: ShopifyMoney,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyProduct {
    pub id: String,
    pub handle: String,
    pub available_for_sale: bool,
    pub title: String,
    pub description: String,
    pub description_html: HTML,
    pub options: Vec<ShopifyProductOption>,
    pub price_range: ShopifyPriceRange,
    pub variants: Connection<ShopifyProductVariant>,
    pub featured_image: Option<ShopifyImage>,
    pub images: Connection<ShopifyImage>,
    #[serde(default)]
    pub seo: ShopifySeo,
    pub tags: Vec<String>,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyCollection {
    pub handle: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub seo: ShopifySeo,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyCartCost {
    pub subtotal_amount: ShopifyMoney,
    pub total_amount: ShopifyMoney,
    pub total_tax_amount: Option<ShopifyMoney>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyCartProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub featured_image: Option<ShopifyImage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyCartMerchandise {
    pub id: String,
    pub title: String,
    pub selected_options: Vec<ShopifySelectedOption>,
    pub product: ShopifyCartProduct,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyCartLineCost {
    pub total_amount: ShopifyMoney,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyCartLine {
    pub id: String,
    pub quantity: i64,
    pub cost: ShopifyCartLineCost,
    pub merchandise: ShopifyCartMerchandise,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyCart {
    pub id: String,
    pub checkout_url: URL,
    pub cost: ShopifyCartCost,
    pub lines: Connection<ShopifyCartLine>,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyPage {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub body: HTML,
    pub body_summary: String,
    pub seo: Option<ShopifySeo>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyMenuItem {
    pub title: String,
    pub url: URL,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyMenu {
    pub items: Vec<ShopifyMenuItem>,
}

/// Mutation user error.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyUserError {
    pub message: String,
}

/// Payload shared by all cart mutations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<ShopifyCart>,
    #[serde(default)]
    pub user_errors: Vec<ShopifyUserError>,
}
