//! Page and menu reshaping.

use crate::shopify::types::{Menu, Page};

use super::super::schema::{ShopifyMenu, ShopifyPage};
use super::convert_seo;

/// Rewrite an absolute vendor URL into a storefront path.
///
/// Only the first occurrence of each pattern is replaced.
#[must_use]
pub fn reshape_menu_path(url: &str, domain: &str) -> String {
    let path = if domain.is_empty() {
        url.to_string()
    } else {
        url.replacen(domain, "", 1)
    };

    path.replacen("/collections", "/search", 1)
        .replacen("/pages", "", 1)
}

#[must_use]
pub fn reshape_menu(menu: ShopifyMenu, domain: &str) -> Vec<Menu> {
    menu.items
        .into_iter()
        .map(|item| Menu {
            path: reshape_menu_path(&item.url, domain),
            title: item.title,
        })
        .collect()
}

#[must_use]
pub fn reshape_page(page: ShopifyPage) -> Page {
    Page {
        id: page.id,
        title: page.title,
        handle: page.handle,
        body: page.body,
        body_summary: page.body_summary,
        seo: page.seo.map(convert_seo),
        created_at: page.created_at,
        updated_at: page.updated_at,
    }
}

#[must_use]
pub fn reshape_pages(pages: Vec<ShopifyPage>) -> Vec<Page> {
    pages.into_iter().map(reshape_page).collect()
}
