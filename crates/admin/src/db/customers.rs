//! Customer mirror repository (`clientes`).

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{ReplaceOutcome, RepositoryError};
use crate::models::CustomerRecord;

#[derive(Debug, Clone)]
pub struct CustomerUpsert {
    pub shopify_id: String,
    pub email: Option<String>,
    pub nombre: String,
    pub telefono: Option<String>,
    pub estado: String,
    pub total_gastado: Decimal,
    pub pedidos_count: i32,
    pub pais: Option<String>,
    pub provincia: Option<String>,
}

pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<CustomerRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRecord>(
            "SELECT * FROM clientes ORDER BY actualizado_en DESC, shopify_id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, shopify_id: &str) -> Result<Option<CustomerRecord>, RepositoryError> {
        let row =
            sqlx::query_as::<_, CustomerRecord>("SELECT * FROM clientes WHERE shopify_id = $1")
                .bind(shopify_id)
                .fetch_optional(self.pool)
                .await?;
        Ok(row)
    }

    /// Transactional upsert-then-prune replacement of the whole table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction is rolled back.
    pub async fn replace_all(
        &self,
        items: &[CustomerUpsert],
    ) -> Result<ReplaceOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut keep: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            sqlx::query(
                "INSERT INTO clientes (shopify_id, email, nombre, telefono, estado, \
                     total_gastado, pedidos_count, pais, provincia, actualizado_en) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now()) \
                 ON CONFLICT (shopify_id) DO UPDATE SET \
                     email = EXCLUDED.email, \
                     nombre = EXCLUDED.nombre, \
                     telefono = EXCLUDED.telefono, \
                     estado = EXCLUDED.estado, \
                     total_gastado = EXCLUDED.total_gastado, \
                     pedidos_count = EXCLUDED.pedidos_count, \
                     pais = EXCLUDED.pais, \
                     provincia = EXCLUDED.provincia, \
                     actualizado_en = now()",
            )
            .bind(&item.shopify_id)
            .bind(&item.email)
            .bind(&item.nombre)
            .bind(&item.telefono)
            .bind(&item.estado)
            .bind(item.total_gastado)
            .bind(item.pedidos_count)
            .bind(&item.pais)
            .bind(&item.provincia)
            .execute(&mut *tx)
            .await?;
            keep.push(item.shopify_id.clone());
        }

        let deleted = sqlx::query("DELETE FROM clientes WHERE NOT (shopify_id = ANY($1))")
            .bind(&keep)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(ReplaceOutcome {
            upserted: items.len(),
            deleted: usize::try_from(deleted).unwrap_or(usize::MAX),
        })
    }
}
