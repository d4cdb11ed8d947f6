//! Product operations against the Admin API.

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use granito_core::{ProductStatus, ShopifyGid};

use super::client::{PAGE_SIZE, ShopifyClient};
use super::conversions::convert_product;
use super::queries::{self, with_fields};
use super::types::{Connection, ProductNode, ShopifyProduct, UserError};
use super::ShopifyError;

/// Input for creating a product.
#[derive(Debug, Default)]
pub struct ProductCreateInput {
    pub title: String,
    pub description_html: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub tags: Vec<String>,
    pub status: Option<ProductStatus>,
}

/// Input for updating a product. Only provided fields are sent.
#[derive(Debug, Default)]
pub struct ProductUpdateInput {
    pub title: Option<String>,
    pub description_html: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ProductStatus>,
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: Connection<ProductNode>,
}

#[derive(Debug, Deserialize)]
struct ProductData {
    product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
struct ProductCreateData {
    #[serde(rename = "productCreate")]
    product_create: ProductPayload,
}

#[derive(Debug, Deserialize)]
struct ProductUpdateData {
    #[serde(rename = "productUpdate")]
    product_update: ProductPayload,
}

#[derive(Debug, Deserialize)]
struct ProductPayload {
    product: Option<ProductNode>,
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
struct ProductDeleteData {
    #[serde(rename = "productDelete")]
    product_delete: ProductDeletePayload,
}

#[derive(Debug, Deserialize)]
struct ProductDeletePayload {
    #[serde(rename = "deletedProductId")]
    deleted_product_id: Option<String>,
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserError>,
}

impl ShopifyClient {
    /// List products, following pagination cursors. `query` narrows the
    /// listing with Shopify's search syntax (`title:deck*`, `sku:...`).
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<ShopifyProduct>, ShopifyError> {
        let document = with_fields(queries::GET_PRODUCTS, queries::PRODUCT_FIELDS);
        let nodes = self
            .paginate(|after| {
                let document = &document;
                async move {
                    let data: ProductsData = self
                        .execute(
                            document,
                            json!({ "first": PAGE_SIZE, "after": after, "query": query }),
                        )
                        .await?;
                    Ok(data.products)
                }
            })
            .await?;

        Ok(nodes.into_iter().map(convert_product).collect())
    }

    /// Get one product by its numeric ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the product does not exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<ShopifyProduct, ShopifyError> {
        let document = with_fields(queries::GET_PRODUCT, queries::PRODUCT_FIELDS);
        let gid = ShopifyGid::build("Product", id);
        let data: ProductData = self.execute(&document, json!({ "id": gid.to_string() })).await?;

        data.product
            .map(convert_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("producto {id}")))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `UserError` when Shopify rejects the input.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(
        &self,
        input: &ProductCreateInput,
    ) -> Result<ShopifyProduct, ShopifyError> {
        let document = with_fields(queries::PRODUCT_CREATE, queries::PRODUCT_FIELDS);
        let variables = json!({
            "input": {
                "title": input.title,
                "descriptionHtml": input.description_html,
                "vendor": input.vendor,
                "productType": input.product_type,
                "tags": input.tags,
                "status": input.status.unwrap_or_default().as_str(),
            }
        });

        let data: ProductCreateData = self.execute(&document, variables).await?;
        Self::check_user_errors(&data.product_create.user_errors)?;

        data.product_create
            .product
            .map(convert_product)
            .ok_or_else(|| ShopifyError::NotFound("producto creado".to_string()))
    }

    /// Update a product. Absent fields keep their current value.
    ///
    /// # Errors
    ///
    /// Returns `UserError` when Shopify rejects the input.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: &str,
        input: &ProductUpdateInput,
    ) -> Result<ShopifyProduct, ShopifyError> {
        let gid = ShopifyGid::build("Product", id);
        let mut fields = serde_json::Map::new();
        fields.insert("id".into(), json!(gid.to_string()));
        if let Some(title) = &input.title {
            fields.insert("title".into(), json!(title));
        }
        if let Some(description) = &input.description_html {
            fields.insert("descriptionHtml".into(), json!(description));
        }
        if let Some(vendor) = &input.vendor {
            fields.insert("vendor".into(), json!(vendor));
        }
        if let Some(product_type) = &input.product_type {
            fields.insert("productType".into(), json!(product_type));
        }
        if let Some(tags) = &input.tags {
            fields.insert("tags".into(), json!(tags));
        }
        if let Some(status) = input.status {
            fields.insert("status".into(), json!(status.as_str()));
        }

        let document = with_fields(queries::PRODUCT_UPDATE, queries::PRODUCT_FIELDS);
        let data: ProductUpdateData = self
            .execute(&document, json!({ "input": fields }))
            .await?;
        Self::check_user_errors(&data.product_update.user_errors)?;

        data.product_update
            .product
            .map(convert_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("producto {id}")))
    }

    /// Delete a product. Returns the numeric ID of the deleted product.
    ///
    /// # Errors
    ///
    /// Returns `UserError` when Shopify rejects the deletion and `NotFound`
    /// when the product does not exist.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<String, ShopifyError> {
        let gid = ShopifyGid::build("Product", id);
        let data: ProductDeleteData = self
            .execute(
                queries::PRODUCT_DELETE,
                json!({ "input": { "id": gid.to_string() } }),
            )
            .await?;
        Self::check_user_errors(&data.product_delete.user_errors)?;

        data.product_delete
            .deleted_product_id
            .map(|deleted| {
                ShopifyGid::parse(&deleted)
                    .map_or(deleted, |gid| gid.numeric().to_string())
            })
            .ok_or_else(|| ShopifyError::NotFound(format!("producto {id}")))
    }
}
