//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod products;
mod search;

use catalog_search_core::{
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS, ProductId,
    SearchDocument,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool, Row};

use crate::error::StorageError;

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

pub(crate) fn row_to_product_id(row: &sqlx::postgres::PgRow, column: &str) -> Result<ProductId, StorageError> {
    Ok(ProductId::new(row.try_get::<i64, _>(column)?)?)
}

pub(crate) fn row_to_document(row: &sqlx::postgres::PgRow) -> Result<SearchDocument, StorageError> {
    Ok(SearchDocument {
        product_id: row_to_product_id(row, "product_id")?,
        combined_text: row.try_get("combined_text")?,
        combined_text_lower: row.try_get("combined_text_lower")?,
        search_tokens: row.try_get("search_tokens")?,
    })
}

/// Insert or replace a product's document on the caller's connection, so it
/// commits or rolls back together with the name write.
pub(crate) async fn upsert_document(
    conn: &mut PgConnection,
    doc: &SearchDocument,
) -> Result<(), StorageError> {
    sqlx::query(
        "INSERT INTO product_search_cache
                (product_id, combined_text, combined_text_lower, search_tokens, updated_at)
         VALUES ($1, $2, $3, $4, NOW())
         ON CONFLICT (product_id) DO UPDATE SET
            combined_text = EXCLUDED.combined_text,
            combined_text_lower = EXCLUDED.combined_text_lower,
            search_tokens = EXCLUDED.search_tokens,
            updated_at = NOW()",
    )
    .bind(doc.product_id.get())
    .bind(&doc.combined_text)
    .bind(&doc.combined_text_lower)
    .bind(&doc.search_tokens)
    .execute(conn)
    .await?;
    Ok(())
}
