//! Draft order (quote) lookups.

use devis_proxy_core::{DraftOrderRecord, QuotePage};
use tracing::instrument;

use super::{
    AdminClient,
    conversions::{convert_draft_order, convert_draft_order_connection},
    queries,
};
use crate::shopify::{
    ShopifyError,
    types::{DraftOrderData, DraftOrdersData},
};

/// Resource type segment of draft-order handles.
pub const DRAFT_ORDER_RESOURCE: &str = "DraftOrder";

impl AdminClient {
    /// Get one page of a customer's draft orders.
    ///
    /// # Arguments
    ///
    /// * `customer_legacy_id` - Numeric customer id
    /// * `after` - Cursor for pagination
    /// * `include_items` - Also fetch up to 50 line items per quote
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(customer_id = %customer_legacy_id))]
    pub async fn get_draft_orders(
        &self,
        customer_legacy_id: &str,
        after: Option<&str>,
        include_items: bool,
    ) -> Result<QuotePage, ShopifyError> {
        let query = queries::draft_orders_query(include_items);
        let variables = queries::draft_orders_variables(customer_legacy_id, after);

        let data = self.execute(&query, variables).await?;
        let response: DraftOrdersData = serde_json::from_value(data)?;

        tracing::debug!(count = response.draft_orders.nodes.len(), "Fetched draft orders");

        Ok(convert_draft_order_connection(
            &response.draft_orders,
            include_items,
        ))
    }

    /// Get a single draft order by handle.
    ///
    /// Returns `Ok(None)` when upstream has no such draft order.
    ///
    /// # Arguments
    ///
    /// * `gid` - Draft order handle (e.g., `gid://shopify/DraftOrder/123`)
    /// * `include_items` - Also fetch up to 50 line items
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(draft_order_id = %gid))]
    pub async fn get_draft_order(
        &self,
        gid: &str,
        include_items: bool,
    ) -> Result<Option<DraftOrderRecord>, ShopifyError> {
        let query = queries::draft_order_query(include_items);
        let variables = queries::draft_order_variables(gid);

        let data = self.execute(&query, variables).await?;
        let response: DraftOrderData = serde_json::from_value(data)?;

        Ok(response
            .draft_order
            .as_ref()
            .map(|node| convert_draft_order(node, include_items)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::shopify::GraphQLTransport;

    /// Records every call and replays a canned response.
    struct Recorder {
        calls: Mutex<Vec<(String, Value)>>,
        response: Value,
    }

    #[async_trait]
    impl GraphQLTransport for Recorder {
        async fn execute(&self, query: &str, variables: Value) -> Result<Value, ShopifyError> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), variables));
            Ok(self.response.clone())
        }
    }

    fn client(response: Value) -> (AdminClient, Arc<Recorder>) {
        let recorder = Arc::new(Recorder {
            calls: Mutex::new(Vec::new()),
            response,
        });
        (AdminClient::with_transport(recorder.clone()), recorder)
    }

    #[tokio::test]
    async fn test_get_draft_orders_sends_filter_and_cursor() {
        let (client, recorder) = client(json!({
            "draftOrders": {
                "nodes": [{"id": "gid://shopify/DraftOrder/1", "legacyResourceId": "1"}],
                "pageInfo": {"hasNextPage": false, "hasPreviousPage": true,
                             "startCursor": "a", "endCursor": "b"}
            }
        }));

        let page = client
            .get_draft_orders("42", Some("cur"), false)
            .await
            .unwrap();
        assert_eq!(page.quotes.len(), 1);
        assert!(page.page_info.has_previous_page);
        assert!(page.quotes[0].line_items.is_none());

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (query, variables) = &calls[0];
        assert!(!query.contains("lineItems"));
        assert_eq!(variables["query"], "customer_id:42");
        assert_eq!(variables["after"], "cur");
        assert_eq!(variables["first"], 10);
    }

    #[tokio::test]
    async fn test_get_draft_orders_with_items() {
        let (client, recorder) = client(json!({
            "draftOrders": {
                "nodes": [{
                    "id": "gid://shopify/DraftOrder/1",
                    "lineItems": {"nodes": [{"title": "Cap", "quantity": 1}]}
                }],
                "pageInfo": {"hasNextPage": false, "hasPreviousPage": false}
            }
        }));

        let page = client.get_draft_orders("42", None, true).await.unwrap();
        let items = page.quotes[0].line_items.as_ref().unwrap();
        assert_eq!(items[0].variant_title, "");

        let calls = recorder.calls.lock().unwrap();
        assert!(calls[0].0.contains("lineItems(first: 50)"));
    }

    #[tokio::test]
    async fn test_get_draft_order_found() {
        let (client, recorder) = client(json!({
            "draftOrder": {
                "id": "gid://shopify/DraftOrder/9",
                "legacyResourceId": "9",
                "totalPriceSet": {"presentmentMoney": {"amount": "5.50", "currencyCode": "EUR"}}
            }
        }));

        let quote = client
            .get_draft_order("gid://shopify/DraftOrder/9", false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(quote.total.as_deref(), Some("5.50 EUR"));

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls[0].1["id"], "gid://shopify/DraftOrder/9");
    }

    #[tokio::test]
    async fn test_get_draft_order_missing() {
        let (client, _) = client(json!({"draftOrder": null}));
        assert!(
            client
                .get_draft_order("gid://shopify/DraftOrder/9", true)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_parse_error() {
        let (client, _) = client(json!({"draftOrders": "nope"}));
        let result = client.get_draft_orders("1", None, false).await;
        assert!(matches!(result, Err(ShopifyError::Parse(_))));
    }
}
