//! Admin API response shapes for draft-order queries.
//!
//! Every field is optional: the mapping into the quote contract tolerates
//! partial nodes instead of failing.

use devis_proxy_core::{Money, PageInfo};
use serde::Deserialize;

/// `data` of the draft-order list query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrdersData {
    pub draft_orders: DraftOrderConnection,
}

/// `data` of the single draft-order query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderData {
    #[serde(default)]
    pub draft_order: Option<DraftOrderNode>,
}

/// Paginated draft orders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderConnection {
    #[serde(default)]
    pub nodes: Vec<DraftOrderNode>,
    #[serde(default)]
    pub page_info: PageInfo,
}

/// A draft order as selected by the quote queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub legacy_resource_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub invoice_url: Option<String>,
    #[serde(default)]
    pub total_price_set: Option<MoneyBag>,
    /// Only selected when line items were requested.
    #[serde(default)]
    pub line_items: Option<LineItemConnection>,
}

/// Amount in shop and presentment currencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBag {
    #[serde(default)]
    pub presentment_money: Option<Money>,
}

/// First page of a draft order's line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LineItemConnection {
    #[serde(default)]
    pub nodes: Vec<LineItemNode>,
}

/// A single draft-order line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemNode {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub variant_title: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_list_data_deserializes() {
        let data: DraftOrdersData = serde_json::from_value(json!({
            "draftOrders": {
                "nodes": [{
                    "id": "gid://shopify/DraftOrder/1",
                    "legacyResourceId": "1",
                    "name": "#D1",
                    "createdAt": "2026-01-01T00:00:00Z",
                    "status": "OPEN",
                    "invoiceUrl": "https://shop.example/invoices/1",
                    "totalPriceSet": {
                        "presentmentMoney": {"amount": "10.00", "currencyCode": "USD"}
                    }
                }],
                "pageInfo": {
                    "hasNextPage": true,
                    "hasPreviousPage": false,
                    "startCursor": "s",
                    "endCursor": "e"
                }
            }
        }))
        .unwrap();

        let node = data.draft_orders.nodes.first().unwrap();
        assert_eq!(node.legacy_resource_id.as_deref(), Some("1"));
        assert!(node.line_items.is_none());
        assert!(data.draft_orders.page_info.has_next_page);
    }

    #[test]
    fn test_null_single_node() {
        let data: DraftOrderData = serde_json::from_value(json!({"draftOrder": null})).unwrap();
        assert!(data.draft_order.is_none());
    }

    #[test]
    fn test_sparse_node() {
        let node: DraftOrderNode = serde_json::from_value(json!({
            "id": null,
            "totalPriceSet": null,
            "lineItems": {"nodes": [{"title": "Hat", "quantity": 2, "variantTitle": null}]}
        }))
        .unwrap();
        assert!(node.id.is_none());
        assert!(node.total_price_set.is_none());
        assert_eq!(node.line_items.unwrap().nodes.len(), 1);
    }
}
