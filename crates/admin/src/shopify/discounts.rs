//! Discount operations against the Admin API, surfaced as promotions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use granito_core::ShopifyGid;

use super::client::{PAGE_SIZE, ShopifyClient};
use super::conversions::convert_discount;
use super::queries::{self, with_fields};
use super::types::{Connection, DiscountNodeWrapper, ShopifyPromotion, UserError};
use super::ShopifyError;

/// Input for creating a basic code discount.
#[derive(Debug)]
pub struct PromotionCreateInput {
    pub titulo: String,
    pub codigo: String,
    /// `percentage` or `fixed_amount`.
    pub tipo: String,
    /// Percent points for `percentage`, money amount for `fixed_amount`.
    pub valor: Decimal,
    pub comienza_en: DateTime<Utc>,
    pub termina_en: Option<DateTime<Utc>>,
    pub limite_uso: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct DiscountsData {
    #[serde(rename = "discountNodes")]
    discount_nodes: Connection<DiscountNodeWrapper>,
}

#[derive(Debug, Deserialize)]
struct DiscountCreateData {
    #[serde(rename = "discountCodeBasicCreate")]
    create: DiscountCodePayload,
}

#[derive(Debug, Deserialize)]
struct DiscountDeactivateData {
    #[serde(rename = "discountCodeDeactivate")]
    deactivate: DiscountCodePayload,
}

#[derive(Debug, Deserialize)]
struct DiscountCodePayload {
    #[serde(rename = "codeDiscountNode")]
    code_discount_node: Option<DiscountNodeWrapper>,
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserError>,
}

impl ShopifyClient {
    /// List the discounts the dashboard manages (basic code and basic
    /// automatic discounts), flattened into promotions. Other discount
    /// classes are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn list_promotions(&self) -> Result<Vec<ShopifyPromotion>, ShopifyError> {
        let document = with_fields(queries::GET_DISCOUNTS, queries::DISCOUNT_FIELDS);
        let nodes = self
            .paginate(|after| {
                let document = &document;
                async move {
                    let data: DiscountsData = self
                        .execute(document, json!({ "first": PAGE_SIZE, "after": after }))
                        .await?;
                    Ok(data.discount_nodes)
                }
            })
            .await?;

        Ok(nodes.into_iter().filter_map(convert_discount).collect())
    }

    /// Create a basic code discount.
    ///
    /// # Errors
    ///
    /// Returns `UserError` when Shopify rejects the input.
    #[instrument(skip(self, input), fields(codigo = %input.codigo))]
    pub async fn create_promotion(
        &self,
        input: &PromotionCreateInput,
    ) -> Result<ShopifyPromotion, ShopifyError> {
        let value = if input.tipo == "fixed_amount" {
            json!({ "discountAmount": { "amount": input.valor.to_string(), "appliesOnEachItem": false } })
        } else {
            // Shopify expects a Float fraction in 0.0..=1.0.
            let fraction = (input.valor / Decimal::new(100, 0))
                .to_f64()
                .unwrap_or(0.0);
            json!({ "percentage": fraction })
        };

        let variables = json!({
            "basicCodeDiscount": {
                "title": input.titulo,
                "code": input.codigo,
                "startsAt": input.comienza_en,
                "endsAt": input.termina_en,
                "usageLimit": input.limite_uso,
                "customerSelection": { "all": true },
                "customerGets": {
                    "value": value,
                    "items": { "all": true }
                }
            }
        });

        let document = with_fields(queries::DISCOUNT_CODE_BASIC_CREATE, queries::DISCOUNT_FIELDS);
        let data: DiscountCreateData = self.execute(&document, variables).await?;
        Self::check_user_errors(&data.create.user_errors)?;

        data.create
            .code_discount_node
            .and_then(convert_discount)
            .ok_or_else(|| ShopifyError::NotFound("promoción creada".to_string()))
    }

    /// Deactivate a code discount.
    ///
    /// # Errors
    ///
    /// Returns `UserError` when Shopify rejects the request and `NotFound`
    /// when the discount does not exist.
    #[instrument(skip(self))]
    pub async fn deactivate_promotion(&self, id: &str) -> Result<ShopifyPromotion, ShopifyError> {
        let gid = ShopifyGid::build("DiscountCodeNode", id);
        let document = with_fields(queries::DISCOUNT_CODE_DEACTIVATE, queries::DISCOUNT_FIELDS);
        let data: DiscountDeactivateData = self
            .execute(&document, json!({ "id": gid.to_string() }))
            .await?;
        Self::check_user_errors(&data.deactivate.user_errors)?;

        data.deactivate
            .code_discount_node
            .and_then(convert_discount)
            .ok_or_else(|| ShopifyError::NotFound(format!("promoción {id}")))
    }
}
