//! GraphQL operation definitions for the Shopify Storefront API.
//!
//! Each operation is a unit struct implementing [`GraphQLQuery`] plus a
//! snake_case module holding its `Variables` and `ResponseData`, the same
//! layout `graphql_client`'s derive generates. Documents are assembled from
//! shared fragments with `concat!`; a document must contain exactly the
//! fragments it spreads.

use graphql_client::{GraphQLQuery, QueryBody};

// =============================================================================
// Fragments
// =============================================================================

macro_rules! image_fragment {
    () => {
        "fragment image on Image { url altText width height }\n"
    };
}

macro_rules! seo_fragment {
    () => {
        "fragment seo on SEO { description title }\n"
    };
}

macro_rules! product_fragment {
    () => {
        r"fragment product on Product {
  id
  handle
  availableForSale
  title
  description
  descriptionHtml
  options { id name values }
  priceRange {
    maxVariantPrice { amount currencyCode }
    minVariantPrice { amount currencyCode }
  }
  variants(first: 250) {
    edges {
      node {
        id
        title
        availableForSale
        selectedOptions { name value }
        price { amount currencyCode }
      }
    }
  }
  featuredImage { ...image }
  images(first: 20) { edges { node { ...image } } }
  seo { ...seo }
  tags
  updatedAt
}
"
    };
}

macro_rules! collection_fragment {
    () => {
        "fragment collection on Collection { handle title description seo { ...seo } updatedAt }\n"
    };
}

macro_rules! cart_fragment {
    () => {
        r"fragment cart on Cart {
  id
  checkoutUrl
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
    totalTaxAmount { amount currencyCode }
  }
  lines(first: 100) {
    edges {
      node {
        id
        quantity
        cost { totalAmount { amount currencyCode } }
        merchandise {
          ... on ProductVariant {
            id
            title
            selectedOptions { name value }
            product { id handle title featuredImage { ...image } }
          }
        }
      }
    }
  }
  totalQuantity
}
"
    };
}

macro_rules! page_fragment {
    () => {
        r"fragment page on Page {
  id
  title
  handle
  body
  bodySummary
  seo { ...seo }
  createdAt
  updatedAt
}
"
    };
}

/// Define an operation struct and its [`GraphQLQuery`] implementation.
macro_rules! operation {
    ($name:ident, $module:ident, $operation_name:literal, $document:expr) => {
        pub struct $name;

        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $document,
                    operation_name: $operation_name,
                }
            }
        }
    };
}

// =============================================================================
// Product queries
// =============================================================================

operation!(
    GetProducts,
    get_products,
    "getProducts",
    concat!(
        r"query getProducts($sortKey: ProductSortKeys, $reverse: Boolean, $query: String) {
  products(sortKey: $sortKey, reverse: $reverse, query: $query, first: 100) {
    edges { node { ...product } }
  }
}
",
        product_fragment!(),
        image_fragment!(),
        seo_fragment!()
    )
);

pub mod get_products {
    use serde::{Deserialize, Serialize};

    use super::super::schema::{Connection, ShopifyProduct};

    #[derive(Debug, Clone, Default, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub query: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub reverse: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub sort_key: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Connection<ShopifyProduct>,
    }
}

operation!(
    GetProduct,
    get_product,
    "getProduct",
    concat!(
        r"query getProduct($handle: String!) {
  product(handle: $handle) { ...product }
}
",
        product_fragment!(),
        image_fragment!(),
        seo_fragment!()
    )
);

pub mod get_product {
    use serde::{Deserialize, Serialize};

    use super::super::schema::ShopifyProduct;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ShopifyProduct>,
    }
}

operation!(
    GetProductRecommendations,
    get_product_recommendations,
    "getProductRecommendations",
    concat!(
        r"query getProductRecommendations($productId: ID!) {
  productRecommendations(productId: $productId) { ...product }
}
",
        product_fragment!(),
        image_fragment!(),
        seo_fragment!()
    )
);

pub mod get_product_recommendations {
    use serde::{Deserialize, Serialize};

    use super::super::schema::ShopifyProduct;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub product_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_recommendations: Option<Vec<ShopifyProduct>>,
    }
}

// =============================================================================
// Collection queries
// =============================================================================

operation!(
    GetCollection,
    get_collection,
    "getCollection",
    concat!(
        r"query getCollection($handle: String!) {
  collection(handle: $handle) { ...collection }
}
",
        collection_fragment!(),
        seo_fragment!()
    )
);

pub mod get_collection {
    use serde::{Deserialize, Serialize};

    use super::super::schema::ShopifyCollection;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<ShopifyCollection>,
    }
}

operation!(
    GetCollections,
    get_collections,
    "getCollections",
    concat!(
        r"query getCollections {
  collections(first: 100, sortKey: TITLE) {
    edges { node { ...collection } }
  }
}
",
        collection_fragment!(),
        seo_fragment!()
    )
);

pub mod get_collections {
    use serde::{Deserialize, Serialize};

    use super::super::schema::{Connection, ShopifyCollection};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables;

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: Connection<Option<ShopifyCollection>>,
    }
}

operation!(
    GetCollectionProducts,
    get_collection_products,
    "getCollectionProducts",
    concat!(
        r"query getCollectionProducts($handle: String!, $sortKey: ProductCollectionSortKeys, $reverse: Boolean) {
  collection(handle: $handle) {
    products(sortKey: $sortKey, reverse: $reverse, first: 100) {
      edges { node { ...product } }
    }
  }
}
",
        product_fragment!(),
        image_fragment!(),
        seo_fragment!()
    )
);

pub mod get_collection_products {
    use serde::{Deserialize, Serialize};

    use super::super::schema::{Connection, ShopifyProduct};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub handle: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub reverse: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub sort_key: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<CollectionProducts>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CollectionProducts {
        pub products: Connection<ShopifyProduct>,
    }
}

// =============================================================================
// Content queries
// =============================================================================

operation!(
    GetMenu,
    get_menu,
    "getMenu",
    r"query getMenu($handle: String!) {
  menu(handle: $handle) { items { title url } }
}
"
);

pub mod get_menu {
    use serde::{Deserialize, Serialize};

    use super::super::schema::ShopifyMenu;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub menu: Option<ShopifyMenu>,
    }
}

operation!(
    GetPage,
    get_page,
    "getPage",
    concat!(
        r"query getPage($handle: String!) {
  pageByHandle(handle: $handle) { ...page }
}
",
        page_fragment!(),
        seo_fragment!()
    )
);

pub mod get_page {
    use serde::{Deserialize, Serialize};

    use super::super::schema::ShopifyPage;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub page_by_handle: Option<ShopifyPage>,
    }
}

operation!(
    GetPages,
    get_pages,
    "getPages",
    concat!(
        r"query getPages {
  pages(first: 100) {
    edges { node { ...page } }
  }
}
",
        page_fragment!(),
        seo_fragment!()
    )
);

pub mod get_pages {
    use serde::{Deserialize, Serialize};

    use super::super::schema::{Connection, ShopifyPage};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables;

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub pages: Connection<ShopifyPage>,
    }
}

// =============================================================================
// Cart queries and mutations
// =============================================================================

operation!(
    GetCart,
    get_cart,
    "getCart",
    concat!(
        r"query getCart($cartId: ID!) {
  cart(id: $cartId) { ...cart }
}
",
        cart_fragment!(),
        image_fragment!()
    )
);

pub mod get_cart {
    use serde::{Deserialize, Serialize};

    use super::super::schema::ShopifyCart;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        /// `None` once the cart has been checked out.
        pub cart: Option<ShopifyCart>,
    }
}

operation!(
    CreateCart,
    create_cart,
    "createCart",
    concat!(
        r"mutation createCart($lineItems: [CartLineInput!]) {
  cartCreate(input: { lines: $lineItems }) {
    cart { ...cart }
    userErrors { message }
  }
}
",
        cart_fragment!(),
        image_fragment!()
    )
);

pub mod create_cart {
    use serde::{Deserialize, Serialize};

    use super::super::schema::CartMutationPayload;
    use crate::shopify::types::CartLineInput;

    #[derive(Debug, Clone, Default, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub line_items: Option<Vec<CartLineInput>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_create: Option<CartMutationPayload>,
    }
}

operation!(
    AddToCart,
    add_to_cart,
    "addToCart",
    concat!(
        r"mutation addToCart($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart { ...cart }
    userErrors { message }
  }
}
",
        cart_fragment!(),
        image_fragment!()
    )
);

pub mod add_to_cart {
    use serde::{Deserialize, Serialize};

    use super::super::schema::CartMutationPayload;
    use crate::shopify::types::CartLineInput;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_add: Option<CartMutationPayload>,
    }
}

operation!(
    RemoveFromCart,
    remove_from_cart,
    "removeFromCart",
    concat!(
        r"mutation removeFromCart($cartId: ID!, $lineIds: [ID!]!) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {
    cart { ...cart }
    userErrors { message }
  }
}
",
        cart_fragment!(),
        image_fragment!()
    )
);

pub mod remove_from_cart {
    use serde::{Deserialize, Serialize};

    use super::super::schema::CartMutationPayload;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub line_ids: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_remove: Option<CartMutationPayload>,
    }
}

operation!(
    EditCartItems,
    edit_cart_items,
    "editCartItems",
    concat!(
        r"mutation editCartItems($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {
    cart { ...cart }
    userErrors { message }
  }
}
",
        cart_fragment!(),
        image_fragment!()
    )
);

pub mod edit_cart_items {
    use serde::{Deserialize, Serialize};

    use super::super::schema::CartMutationPayload;
    use crate::shopify::types::CartLineUpdateInput;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineUpdateInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_update: Option<CartMutationPayload>,
    }
}
