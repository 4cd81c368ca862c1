use async_trait::async_trait;
use catalog_search_core::{ProductId, RankedProduct, SearchDocument, SearchQuery};
use sqlx::Row;

use super::{PgStorage, row_to_document, row_to_product_id, usize_to_i64};
use crate::error::StorageError;
use crate::traits::SearchDocumentStore;

#[async_trait]
impl SearchDocumentStore for PgStorage {
    async fn get_document(&self, id: ProductId) -> Result<Option<SearchDocument>, StorageError> {
        let row = sqlx::query(
            "SELECT product_id, combined_text, combined_text_lower, search_tokens
               FROM product_search_cache
              WHERE product_id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_document).transpose()
    }

    /// `ts_rank` normalization 2 divides by document length, matching the
    /// in-process backend's term-frequency rank.
    async fn rank_documents(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RankedProduct>, StorageError> {
        let rows = sqlx::query(
            r"SELECT product_id,
                     ts_rank(to_tsvector('simple', search_tokens),
                             plainto_tsquery('simple', $1), 2) AS rank
                FROM product_search_cache
               WHERE combined_text_lower LIKE $2 ESCAPE '\'
               ORDER BY rank DESC, product_id ASC
               LIMIT $3",
        )
        .bind(query.text())
        .bind(query.like_pattern())
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| -> Result<RankedProduct, StorageError> {
                Ok(RankedProduct {
                    product_id: row_to_product_id(row, "product_id")?,
                    rank: row.try_get::<f32, _>("rank")?,
                })
            })
            .collect()
    }

    async fn count_documents(&self) -> Result<usize, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_search_cache")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
