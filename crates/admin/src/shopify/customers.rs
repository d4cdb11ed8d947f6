//! Customer operations against the Admin API. Read only.

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use granito_core::ShopifyGid;

use super::client::{PAGE_SIZE, ShopifyClient};
use super::conversions::convert_customer;
use super::queries::{self, with_fields};
use super::types::{Connection, CustomerNode, ShopifyCustomer};
use super::ShopifyError;

#[derive(Debug, Deserialize)]
struct CustomersData {
    customers: Connection<CustomerNode>,
}

#[derive(Debug, Deserialize)]
struct CustomerData {
    customer: Option<CustomerNode>,
}

impl ShopifyClient {
    /// List every customer, following pagination cursors.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<ShopifyCustomer>, ShopifyError> {
        let document = with_fields(queries::GET_CUSTOMERS, queries::CUSTOMER_FIELDS);
        let nodes = self
            .paginate(|after| {
                let document = &document;
                async move {
                    let data: CustomersData = self
                        .execute(document, json!({ "first": PAGE_SIZE, "after": after }))
                        .await?;
                    Ok(data.customers)
                }
            })
            .await?;

        Ok(nodes.into_iter().map(convert_customer).collect())
    }

    /// Get one customer by their numeric ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the customer does not exist.
    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: &str) -> Result<ShopifyCustomer, ShopifyError> {
        let document = with_fields(queries::GET_CUSTOMER, queries::CUSTOMER_FIELDS);
        let gid = ShopifyGid::build("Customer", id);
        let data: CustomerData = self
            .execute(&document, json!({ "id": gid.to_string() }))
            .await?;

        data.customer
            .map(convert_customer)
            .ok_or_else(|| ShopifyError::NotFound(format!("cliente {id}")))
    }
}
