//! Cache revalidation webhook.
//!
//! The commerce backend posts here on product and collection changes. The
//! shared secret travels in the `secret` query parameter and the event name in
//! the `x-shopify-topic` header.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
};
use commerce_core::WebhookTopic;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::state::AppState;

pub const TOPIC_HEADER: &str = "x-shopify-topic";

#[derive(Debug, Default, Deserialize)]
pub struct RevalidateQuery {
    pub secret: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RevalidateResponse {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revalidated: Option<bool>,
    /// Epoch milliseconds at which the tags were invalidated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub now: Option<i64>,
}

impl RevalidateResponse {
    const fn status(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            revalidated: None,
            now: None,
        }
    }
}

/// Constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

fn topic_from_headers(headers: &HeaderMap) -> WebhookTopic {
    let topic = headers
        .get(TOPIC_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(WebhookTopic::UNKNOWN);
    WebhookTopic::parse(topic)
}

/// Invalidate cached vendor data for the webhook's topic.
#[instrument(skip_all)]
pub async fn revalidate(
    State(state): State<AppState>,
    Query(query): Query<RevalidateQuery>,
    headers: HeaderMap,
) -> (StatusCode, Json<RevalidateResponse>) {
    let authorized = match (
        query.secret.as_deref(),
        state.config().shopify.revalidation_secret.as_ref(),
    ) {
        (Some(given), Some(expected)) => constant_time_compare(given, expected.expose_secret()),
        _ => false,
    };

    if !authorized {
        tracing::warn!("Rejected revalidation request with invalid secret");
        return (
            StatusCode::UNAUTHORIZED,
            Json(RevalidateResponse::status(StatusCode::UNAUTHORIZED)),
        );
    }

    let topic = topic_from_headers(&headers);
    let tags = topic.tags();

    if tags.is_empty() {
        tracing::debug!(topic = ?topic, "Ignoring webhook topic");
        return (StatusCode::OK, Json(RevalidateResponse::status(StatusCode::OK)));
    }

    for tag in tags {
        state.storefront().revalidate_tag(*tag);
        tracing::info!(tag = %tag, "Revalidated cache tag");
    }

    (
        StatusCode::OK,
        Json(RevalidateResponse {
            status: StatusCode::OK.as_u16(),
            revalidated: Some(true),
            now: Some(chrono::Utc::now().timestamp_millis()),
        }),
    )
}
