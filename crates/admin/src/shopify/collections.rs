//! Collection operations against the Admin API. Read only.

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use granito_core::ShopifyGid;

use super::client::{PAGE_SIZE, ShopifyClient};
use super::conversions::convert_collection;
use super::queries::{self, with_fields};
use super::types::{CollectionNode, Connection, ShopifyCollection};
use super::ShopifyError;

#[derive(Debug, Deserialize)]
struct CollectionsData {
    collections: Connection<CollectionNode>,
}

#[derive(Debug, Deserialize)]
struct CollectionData {
    collection: Option<CollectionNode>,
}

impl ShopifyClient {
    /// List every collection, following pagination cursors.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn list_collections(&self) -> Result<Vec<ShopifyCollection>, ShopifyError> {
        let document = with_fields(queries::GET_COLLECTIONS, queries::COLLECTION_FIELDS);
        let nodes = self
            .paginate(|after| {
                let document = &document;
                async move {
                    let data: CollectionsData = self
                        .execute(document, json!({ "first": PAGE_SIZE, "after": after }))
                        .await?;
                    Ok(data.collections)
                }
            })
            .await?;

        Ok(nodes.into_iter().map(convert_collection).collect())
    }

    /// Get one collection by its numeric ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the collection does not exist.
    #[instrument(skip(self))]
    pub async fn get_collection(&self, id: &str) -> Result<ShopifyCollection, ShopifyError> {
        let document = with_fields(queries::GET_COLLECTION, queries::COLLECTION_FIELDS);
        let gid = ShopifyGid::build("Collection", id);
        let data: CollectionData = self
            .execute(&document, json!({ "id": gid.to_string() }))
            .await?;

        data.collection
            .map(convert_collection)
            .ok_or_else(|| ShopifyError::NotFound(format!("colección {id}")))
    }
}
