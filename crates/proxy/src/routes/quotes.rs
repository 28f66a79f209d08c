//! Quote (draft order) routes.
//!
//! Both handlers sit behind the App Proxy signature middleware; by the time
//! they run the request is known to come from Shopify.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::header::{CACHE_CONTROL, PRAGMA},
    response::{IntoResponse, Response},
};
use devis_proxy_core::{DraftOrderRecord, gid_to_legacy_id, normalize_gid};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::shopify::DRAFT_ORDER_RESOURCE;
use crate::state::AppState;

/// `include` value that requests line items.
const INCLUDE_ITEMS: &str = "items";

#[derive(Debug, Deserialize)]
pub struct ListQuotesParams {
    pub customer_id: Option<String>,
    pub after: Option<String>,
    pub include: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShowQuoteParams {
    pub include: Option<String>,
}

#[derive(Debug, Serialize)]
struct QuoteResponse {
    quote: DraftOrderRecord,
}

/// Whether a comma-separated `include` list asks for line items.
fn wants_items(include: Option<&str>) -> bool {
    include.is_some_and(|list| list.split(',').any(|part| part.trim() == INCLUDE_ITEMS))
}

/// Attach headers that keep browsers and Shopify's edge from caching.
fn no_store(body: impl IntoResponse) -> Response {
    (
        [
            (CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (PRAGMA, "no-cache"),
        ],
        body,
    )
        .into_response()
}

/// GET /devis - List a customer's quotes.
///
/// `customer_id` may be a customer handle or a bare numeric id. Validation
/// happens before any upstream call. A query string that does not decode
/// (for example a repeated key) is answered as a bad `customer_id`.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuotesParams>, QueryRejection>,
) -> Result<Response> {
    let Query(params) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Undecodable quote list query");
        AppError::MalformedParameter("customer_id")
    })?;
    let customer_id = params
        .customer_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingParameter("customer_id"))?;
    let legacy_id = gid_to_legacy_id(Some(customer_id))
        .ok_or(AppError::MalformedParameter("customer_id"))?;

    let after = params.after.as_deref().filter(|s| !s.is_empty());
    let include_items = wants_items(params.include.as_deref());

    let page = state
        .shopify()
        .get_draft_orders(&legacy_id, after, include_items)
        .await?;

    Ok(no_store(Json(page)))
}

/// GET /devis/{id} - Show one quote.
///
/// `id` may be a draft-order handle or a bare numeric id. An id with no
/// numeric part, or one that does not decode, cannot name a draft order and
/// is answered 404 directly. An undecodable query string is ignored.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<ShowQuoteParams>, QueryRejection>,
) -> Result<Response> {
    let Path(id) = path.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Undecodable quote id");
        AppError::NotFound
    })?;
    let gid = normalize_gid(DRAFT_ORDER_RESOURCE, &id).ok_or(AppError::NotFound)?;
    let include_items =
        query.is_ok_and(|Query(params)| wants_items(params.include.as_deref()));

    match state.shopify().get_draft_order(&gid, include_items).await {
        Ok(Some(quote)) => Ok(no_store(Json(QuoteResponse { quote }))),
        Ok(None) => Err(AppError::NotFound),
        Err(e) if e.is_not_found() => {
            tracing::info!(error = %e, "Upstream reported draft order missing");
            Err(AppError::NotFound)
        }
        Err(e) => Err(e.into()),
    }
}
