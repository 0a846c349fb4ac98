//! Cart cookie handling.
//!
//! The only per-visitor state is the vendor cart id, kept in a `cartId`
//! cookie. There is no server-side session store.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, header, request::Parts},
};
use tower_sessions::cookie::{Cookie, SameSite};

/// Cart cookie name.
pub const CART_COOKIE_NAME: &str = "cartId";

/// Extractor for the cart id cookie. Never rejects; a missing or empty
/// cookie yields `CartCookie(None)`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CartCookie(cart_id): CartCookie) -> impl IntoResponse {
///     format!("{cart_id:?}")
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartCookie(pub Option<String>);

impl<S> FromRequestParts<S> for CartCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(cart_id_from_headers(&parts.headers)))
    }
}

/// Read the cart id from all `Cookie` headers.
#[must_use]
pub fn cart_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == CART_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Build the cart cookie.
#[must_use]
pub fn cart_cookie(cart_id: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((CART_COOKIE_NAME, cart_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// `Set-Cookie` header value storing the cart id.
///
/// Returns `None` if the id contains bytes not allowed in a header.
#[must_use]
pub fn set_cart_cookie_header(cart_id: &str, secure: bool) -> Option<HeaderValue> {
    HeaderValue::from_str(&cart_cookie(cart_id, secure).to_string()).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        headers
    }

    #[test]
    fn test_reads_cart_id_among_other_cookies() {
        let headers = headers(&["theme=dark; cartId=gid://shopify/Cart/abc; lang=en"]);
        assert_eq!(
            cart_id_from_headers(&headers).as_deref(),
            Some("gid://shopify/Cart/abc")
        );
    }

    #[test]
    fn test_reads_cart_id_from_second_header() {
        let headers = headers(&["theme=dark", "cartId=cart-2"]);
        assert_eq!(cart_id_from_headers(&headers).as_deref(), Some("cart-2"));
    }

    #[test]
    fn test_missing_or_empty_cookie() {
        assert_eq!(cart_id_from_headers(&HeaderMap::new()), None);
        assert_eq!(cart_id_from_headers(&headers(&["cartId="])), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let value = set_cart_cookie_header("mock-cart-id", true).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("cartId=mock-cart-id"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Secure"));
        assert!(value.contains("Path=/"));

        let insecure = set_cart_cookie_header("mock-cart-id", false).unwrap();
        assert!(!insecure.to_str().unwrap().contains("Secure"));
    }
}
