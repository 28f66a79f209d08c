//! The simplified quote contract returned to storefront callers.

use serde::{Deserialize, Serialize};

/// A draft order mapped into the shape the storefront consumes.
///
/// Identifier fields are copied verbatim from upstream; a missing field is
/// serialized as `null` rather than failing the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderRecord {
    /// Opaque resource handle (`gid://shopify/DraftOrder/<n>`).
    pub id: Option<String>,
    /// Legacy numeric id.
    pub legacy_resource_id: Option<String>,
    /// Display name, e.g. `#D12`.
    pub name: Option<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: Option<String>,
    /// Upstream status (`OPEN`, `INVOICE_SENT`, `COMPLETED`).
    pub status: Option<String>,
    /// Checkout link sent with the invoice.
    pub invoice_url: Option<String>,
    /// `"<amount> <currencyCode>"`.
    pub total: Option<String>,
    /// Only present when line items were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<QuoteLineItem>>,
}

/// A single line of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItem {
    pub title: Option<String>,
    pub quantity: Option<i64>,
    /// Empty string when the line has no variant.
    pub variant_title: String,
}

/// Cursor pagination metadata, passed through from upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of quotes for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePage {
    pub quotes: Vec<DraftOrderRecord>,
    pub page_info: PageInfo,
}
