//! Conversions from Admin API nodes into the quote contract.

use devis_proxy_core::{DraftOrderRecord, QuoteLineItem, QuotePage, format_total};

use crate::shopify::types::{DraftOrderConnection, DraftOrderNode, LineItemNode};

/// Map one draft-order node.
///
/// `line_items` is `None` unless `include_items` is set, so the field is
/// left out of the response entirely rather than sent as an empty list.
#[must_use]
pub fn convert_draft_order(node: &DraftOrderNode, include_items: bool) -> DraftOrderRecord {
    let total = node
        .total_price_set
        .as_ref()
        .and_then(|set| set.presentment_money.as_ref());

    let line_items = include_items.then(|| {
        node.line_items
            .as_ref()
            .map(|conn| conn.nodes.iter().map(convert_line_item).collect())
            .unwrap_or_default()
    });

    DraftOrderRecord {
        id: node.id.clone(),
        legacy_resource_id: node.legacy_resource_id.clone(),
        name: node.name.clone(),
        created_at: node.created_at.clone(),
        status: node.status.clone(),
        invoice_url: node.invoice_url.clone(),
        total: format_total(total),
        line_items,
    }
}

fn convert_line_item(item: &LineItemNode) -> QuoteLineItem {
    QuoteLineItem {
        title: item.title.clone(),
        quantity: item.quantity,
        variant_title: item.variant_title.clone().unwrap_or_default(),
    }
}

/// Map a page of draft orders, passing page info through untouched.
#[must_use]
pub fn convert_draft_order_connection(
    connection: &DraftOrderConnection,
    include_items: bool,
) -> QuotePage {
    QuotePage {
        quotes: connection
            .nodes
            .iter()
            .map(|node| convert_draft_order(node, include_items))
            .collect(),
        page_info: connection.page_info.clone(),
    }
}
