//! Order operations against the Admin API. Read only.

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use granito_core::ShopifyGid;

use super::client::{PAGE_SIZE, ShopifyClient};
use super::conversions::convert_order;
use super::queries::{self, with_fields};
use super::types::{Connection, OrderNode, ShopifyOrder};
use super::ShopifyError;

#[derive(Debug, Deserialize)]
struct OrdersData {
    orders: Connection<OrderNode>,
}

#[derive(Debug, Deserialize)]
struct OrderData {
    order: Option<OrderNode>,
}

impl ShopifyClient {
    /// List every order, newest first, following pagination cursors.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<ShopifyOrder>, ShopifyError> {
        let document = with_fields(queries::GET_ORDERS, queries::ORDER_FIELDS);
        let nodes = self
            .paginate(|after| {
                let document = &document;
                async move {
                    let data: OrdersData = self
                        .execute(document, json!({ "first": PAGE_SIZE, "after": after }))
                        .await?;
                    Ok(data.orders)
                }
            })
            .await?;

        Ok(nodes.into_iter().map(convert_order).collect())
    }

    /// Get one order by its numeric ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the order does not exist.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str) -> Result<ShopifyOrder, ShopifyError> {
        let document = with_fields(queries::GET_ORDER, queries::ORDER_FIELDS);
        let gid = ShopifyGid::build("Order", id);
        let data: OrderData = self
            .execute(&document, json!({ "id": gid.to_string() }))
            .await?;

        data.order
            .map(convert_order)
            .ok_or_else(|| ShopifyError::NotFound(format!("pedido {id}")))
    }
}
