//! Deterministic placeholder data served when the Storefront API is
//! unavailable.
//!
//! Output depends only on the arguments: prices and image picks come from an
//! RNG seeded with the product index, and every timestamp is
//! [`MOCK_TIMESTAMP`].

use commerce_core::{CurrencyCode, Price};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::storefront::conversions::collection_path;
use super::types::{
    Cart, CartCost, Collection, Image, Menu, Money, Page, PriceRange, Product, ProductOption,
    ProductVariant, SelectedOption, Seo,
};

/// Timestamp carried by all generated records.
pub const MOCK_TIMESTAMP: &str = "2024-01-01T00:00:00Z";

/// Identifier of the placeholder cart.
pub const MOCK_CART_ID: &str = "mock-cart-id";

/// Products in a full listing fallback.
pub const DEFAULT_PRODUCT_COUNT: usize = 12;

/// Products returned for a collection page.
pub const DEFAULT_COLLECTION_PRODUCT_COUNT: usize = 8;

/// Products returned as recommendations.
pub const RECOMMENDATION_COUNT: usize = 4;

const IMAGE_SIZE: i64 = 800;

// =============================================================================
// Categories
// =============================================================================

/// Product category used to pick names and images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCategory {
    Electronics,
    Clothing,
    Accessories,
    Home,
}

impl MockCategory {
    pub const ALL: [Self; 4] = [
        Self::Electronics,
        Self::Clothing,
        Self::Accessories,
        Self::Home,
    ];

    #[must_use]
    pub const fn handle(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Accessories => "accessories",
            Self::Home => "home",
        }
    }

    /// Category named by a collection handle, if any.
    #[must_use]
    pub fn from_handle(handle: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.handle() == handle)
    }

    fn for_index(index: usize) -> Self {
        Self::ALL
            .get(index % Self::ALL.len())
            .copied()
            .unwrap_or(Self::Electronics)
    }

    const fn product_names(self) -> [&'static str; 5] {
        match self {
            Self::Electronics => [
                "Wireless Headphones",
                "Smart Watch",
                "Bluetooth Speaker",
                "Laptop Stand",
                "Phone Case",
            ],
            Self::Clothing => [
                "Cotton T-Shirt",
                "Denim Jacket",
                "Casual Sneakers",
                "Summer Dress",
                "Wool Sweater",
            ],
            Self::Accessories => ["Leather Wallet", "Sunglasses", "Watch", "Backpack", "Belt"],
            Self::Home => [
                "Coffee Mug",
                "Throw Pillow",
                "Table Lamp",
                "Plant Pot",
                "Wall Art",
            ],
        }
    }

    const fn images(self) -> [&'static str; 3] {
        match self {
            Self::Electronics => [
                "https://images.unsplash.com/photo-1468495244123-6c6c332eeece?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1484704849700-f032a568e944?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=800&h=800&fit=crop",
            ],
            Self::Clothing => [
                "https://images.unsplash.com/photo-1441986300917-64674bd600d8?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1434389677669-e08b4cac3105?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1445205170230-053b83016050?w=800&h=800&fit=crop",
            ],
            Self::Accessories => [
                "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1572635196237-14b3f281503f?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1544966503-7cc5ac882d5f?w=800&h=800&fit=crop",
            ],
            Self::Home => [
                "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1555041469-a586c61ea9bc?w=800&h=800&fit=crop",
                "https://images.unsplash.com/photo-1567538096630-e0c55bd6374c?w=800&h=800&fit=crop",
            ],
        }
    }
}

// =============================================================================
// Products
// =============================================================================

fn random_image(rng: &mut StdRng, category: MockCategory) -> Image {
    let images = category.images();
    let url = images
        .get(rng.random_range(0..images.len()))
        .copied()
        .unwrap_or_default();

    Image {
        url: url.to_string(),
        alt_text: format!("{} product image", category.handle()),
        width: Some(IMAGE_SIZE),
        height: Some(IMAGE_SIZE),
    }
}

fn usd(cents: i64) -> Money {
    Price::from_cents(cents, CurrencyCode::USD).into()
}

fn handle_for(name: &str, index: usize) -> String {
    let slug = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("{slug}-{index}")
}

/// Generate one placeholder product.
///
/// The category defaults to the one at `index` in [`MockCategory::ALL`].
#[must_use]
pub fn mock_product(index: usize, category: Option<MockCategory>) -> Product {
    let category = category.unwrap_or_else(|| MockCategory::for_index(index));
    let names = category.product_names();
    let name = names.get(index % names.len()).copied().unwrap_or("Product");
    let lower = name.to_lowercase();

    let mut rng = StdRng::seed_from_u64(u64::try_from(index).unwrap_or_default());

    // min <= variant <= max
    let min_cents: i64 = rng.random_range(1_000..11_000);
    let variant_cents = min_cents + rng.random_range(0..5_000);
    let max_cents = variant_cents + rng.random_range(0..10_000);

    let featured_image = random_image(&mut rng, category);
    let mut images = vec![featured_image.clone()];
    images.extend((0..2).map(|_| random_image(&mut rng, category)));

    Product {
        id: format!("mock-product-{index}"),
        handle: handle_for(name, index),
        available_for_sale: true,
        title: name.to_string(),
        description: format!(
            "High-quality {lower} perfect for everyday use. Made with premium materials and designed for comfort and durability."
        ),
        description_html: format!(
            "<p>High-quality <strong>{lower}</strong> perfect for everyday use.</p><p>Made with premium materials and designed for comfort and durability.</p>"
        ),
        options: vec![
            ProductOption {
                id: format!("option-{index}-1"),
                name: "Size".to_string(),
                values: vec!["Small".into(), "Medium".into(), "Large".into()],
            },
            ProductOption {
                id: format!("option-{index}-2"),
                name: "Color".to_string(),
                values: vec!["Black".into(), "White".into(), "Gray".into()],
            },
        ],
        price_range: PriceRange {
            max_variant_price: usd(max_cents),
            min_variant_price: usd(min_cents),
        },
        variants: vec![ProductVariant {
            id: format!("variant-{index}-1"),
            title: "Default".to_string(),
            available_for_sale: true,
            selected_options: vec![
                SelectedOption {
                    name: "Size".to_string(),
                    value: "Medium".to_string(),
                },
                SelectedOption {
                    name: "Color".to_string(),
                    value: "Black".to_string(),
                },
            ],
            price: usd(variant_cents),
        }],
        featured_image: Some(featured_image),
        images,
        seo: Seo {
            title: Some(format!("{name} - Premium Quality")),
            description: Some(format!(
                "Shop our {lower} for the best quality and value. Free shipping available."
            )),
        },
        tags: vec![
            category.handle().to_string(),
            "featured".to_string(),
            "bestseller".to_string(),
        ],
        updated_at: MOCK_TIMESTAMP.to_string(),
    }
}

/// Generate `count` products cycling through every category.
#[must_use]
pub fn mock_products(count: usize) -> Vec<Product> {
    (0..count).map(|index| mock_product(index, None)).collect()
}

/// Generate the product a mock handle refers to.
///
/// Handles produced by [`mock_product`] end in `-<index>`; anything else maps
/// to index 0.
#[must_use]
pub fn mock_product_by_handle(handle: &str) -> Product {
    let index = handle
        .rsplit_once('-')
        .map(|(_, suffix)| suffix)
        .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|suffix| suffix.parse().ok())
        .unwrap_or(0);

    mock_product(index, None)
}

/// Generate products for a collection page.
///
/// Handles naming a category yield products from that category only.
#[must_use]
pub fn mock_collection_products(collection: &str, count: usize) -> Vec<Product> {
    MockCategory::from_handle(collection).map_or_else(
        || mock_products(count),
        |category| {
            (0..count)
                .map(|index| mock_product(index, Some(category)))
                .collect()
        },
    )
}

// =============================================================================
// Collections / navigation / content
// =============================================================================

fn mock_collection(handle: &str, title: &str, description: &str, seo_description: &str) -> Collection {
    Collection {
        handle: handle.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        seo: Seo {
            title: Some(format!("{title} Collection")),
            description: Some(seo_description.to_string()),
        },
        updated_at: MOCK_TIMESTAMP.to_string(),
        path: collection_path(handle),
    }
}

/// One collection per category.
#[must_use]
pub fn mock_collections() -> Vec<Collection> {
    vec![
        mock_collection(
            "electronics",
            "Electronics",
            "Latest electronic gadgets and accessories",
            "Discover our latest electronic gadgets and accessories",
        ),
        mock_collection(
            "clothing",
            "Clothing",
            "Trendy and comfortable clothing for all occasions",
            "Shop trendy and comfortable clothing for all occasions",
        ),
        mock_collection(
            "accessories",
            "Accessories",
            "Complete your look with our stylish accessories",
            "Complete your look with our stylish accessories",
        ),
        mock_collection(
            "home",
            "Home & Living",
            "Beautiful items to make your house a home",
            "Beautiful items to make your house a home",
        ),
    ]
}

#[must_use]
pub fn mock_menu() -> Vec<Menu> {
    [
        ("All", "/search"),
        ("Electronics", "/search/electronics"),
        ("Clothing", "/search/clothing"),
        ("Accessories", "/search/accessories"),
        ("Home & Living", "/search/home"),
    ]
    .into_iter()
    .map(|(title, path)| Menu {
        title: title.to_string(),
        path: path.to_string(),
    })
    .collect()
}

/// An empty cart with zero totals.
#[must_use]
pub fn mock_cart() -> Cart {
    Cart {
        id: MOCK_CART_ID.to_string(),
        checkout_url: String::new(),
        cost: CartCost {
            subtotal_amount: Money::zero(CurrencyCode::USD),
            total_amount: Money::zero(CurrencyCode::USD),
            total_tax_amount: Money::zero(CurrencyCode::USD),
        },
        lines: vec![],
        total_quantity: 0,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// A placeholder content page for any handle.
#[must_use]
pub fn mock_page(handle: &str) -> Page {
    let title = capitalize(handle);

    Page {
        id: format!("mock-page-{handle}"),
        title: title.clone(),
        handle: handle.to_string(),
        body: format!("This is a mock page for {handle}."),
        body_summary: format!("Mock page summary for {handle}"),
        seo: Some(Seo {
            title: Some(title),
            description: Some(format!("Mock page for {handle}")),
        }),
        created_at: MOCK_TIMESTAMP.to_string(),
        updated_at: MOCK_TIMESTAMP.to_string(),
    }
}

#[must_use]
pub fn mock_pages() -> Vec<Page> {
    ["about", "contact"]
        .into_iter()
        .map(|handle| {
            let title = capitalize(handle);
            Page {
                id: format!("mock-page-{handle}"),
                title: title.clone(),
                handle: handle.to_string(),
                body: format!("This is a mock {handle} page."),
                body_summary: format!("Mock {handle} page summary"),
                seo: Some(Seo {
                    title: Some(title),
                    description: Some(format!("Mock {handle} page")),
                }),
                created_at: MOCK_TIMESTAMP.to_string(),
                updated_at: MOCK_TIMESTAMP.to_string(),
            }
        })
        .collect()
}
