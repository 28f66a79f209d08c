//! GraphQL documents for draft-order lookups.
//!
//! The line-items selection is spliced in only when the caller asked for it,
//! so plain listings don't pay the upstream query cost.

use serde_json::{Value, json};

/// Quotes per page.
pub const PAGE_SIZE: i64 = 10;

/// Line items fetched per quote.
pub const LINE_ITEMS_PAGE_SIZE: i64 = 50;

const DRAFT_ORDER_FIELDS: &str = "
      id
      legacyResourceId
      name
      createdAt
      status
      invoiceUrl
      totalPriceSet {
        presentmentMoney {
          amount
          currencyCode
        }
      }";

fn line_items_selection() -> String {
    format!(
        "
      lineItems(first: {LINE_ITEMS_PAGE_SIZE}) {{
        nodes {{
          title
          quantity
          variantTitle
        }}
      }}"
    )
}

fn draft_order_selection(include_items: bool) -> String {
    if include_items {
        format!("{DRAFT_ORDER_FIELDS}{}", line_items_selection())
    } else {
        DRAFT_ORDER_FIELDS.to_string()
    }
}

/// Query listing a customer's draft orders, one page at a time.
#[must_use]
pub fn draft_orders_query(include_items: bool) -> String {
    format!(
        "query DraftOrders($first: Int!, $after: String, $query: String) {{
  draftOrders(first: $first, after: $after, query: $query) {{
    nodes {{{}
    }}
    pageInfo {{
      hasNextPage
      hasPreviousPage
      startCursor
      endCursor
    }}
  }}
}}",
        draft_order_selection(include_items)
    )
}

/// Variables for [`draft_orders_query`].
#[must_use]
pub fn draft_orders_variables(customer_legacy_id: &str, after: Option<&str>) -> Value {
    json!({
        "first": PAGE_SIZE,
        "after": after,
        "query": format!("customer_id:{customer_legacy_id}"),
    })
}

/// Query fetching a single draft order by handle.
#[must_use]
pub fn draft_order_query(include_items: bool) -> String {
    format!(
        "query DraftOrder($id: ID!) {{
  draftOrder(id: $id) {{{}
  }}
}}",
        draft_order_selection(include_items)
    )
}

/// Variables for [`draft_order_query`].
#[must_use]
pub fn draft_order_variables(gid: &str) -> Value {
    json!({ "id": gid })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_without_items() {
        let query = draft_orders_query(false);
        assert!(query.contains("draftOrders(first: $first, after: $after, query: $query)"));
        assert!(query.contains("legacyResourceId"));
        assert!(query.contains("hasNextPage"));
        assert!(!query.contains("lineItems"));
    }

    #[test]
    fn test_list_query_with_items() {
        let query = draft_orders_query(true);
        assert!(query.contains("lineItems(first: 50)"));
        assert!(query.contains("variantTitle"));
    }

    #[test]
    fn test_single_query_items_toggle() {
        assert!(draft_order_query(true).contains("lineItems"));
        assert!(!draft_order_query(false).contains("lineItems"));
        assert!(draft_order_query(false).contains("draftOrder(id: $id)"));
    }

    #[test]
    fn test_braces_balance() {
        for query in [
            draft_orders_query(true),
            draft_orders_query(false),
            draft_order_query(true),
            draft_order_query(false),
        ] {
            let open = query.matches('{').count();
            let close = query.matches('}').count();
            assert_eq!(open, close, "unbalanced query: {query}");
        }
    }

    #[test]
    fn test_list_variables() {
        let vars = draft_orders_variables("123", Some("cursor=="));
        assert_eq!(vars["first"], 10);
        assert_eq!(vars["after"], "cursor==");
        assert_eq!(vars["query"], "customer_id:123");

        let vars = draft_orders_variables("123", None);
        assert!(vars["after"].is_null());
    }

    #[test]
    fn test_single_variables() {
        let vars = draft_order_variables("gid://shopify/DraftOrder/9");
        assert_eq!(vars["id"], "gid://shopify/DraftOrder/9");
    }
}
