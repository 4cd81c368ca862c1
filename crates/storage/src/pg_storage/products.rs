use async_trait::async_trait;
use catalog_search_core::{
    NameChangeHook, NameChanges, ProductId, ProductNames, SearchDocument, name_changes_to_json,
};
use sqlx::Row;

use super::{PgStorage, row_to_product_id, upsert_document, usize_to_i64};
use crate::error::StorageError;
use crate::traits::ProductStore;

#[async_trait]
impl ProductStore for PgStorage {
    async fn create_product(
        &self,
        names: &NameChanges,
        hook: &dyn NameChangeHook,
    ) -> Result<SearchDocument, StorageError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query("INSERT INTO products (name) VALUES ($1::jsonb) RETURNING id, name")
            .bind(name_changes_to_json(names))
            .fetch_one(&mut *tx)
            .await?;
        let id = row_to_product_id(&row, "id")?;
        let product = ProductNames::from_json(id, row.try_get("name")?);
        let document = hook.on_name_changed(&product);
        upsert_document(&mut *tx, &document).await?;
        tx.commit().await?;
        tracing::debug!(product_id = %id, "product created");
        Ok(document)
    }

    async fn update_names(
        &self,
        id: ProductId,
        changes: &NameChanges,
        hook: &dyn NameChangeHook,
    ) -> Result<SearchDocument, StorageError> {
        let mut tx = self.pool.begin().await?;
        // UPDATE takes the row lock; concurrent renames and rebuilds of the
        // same product queue behind it until commit.
        let row = sqlx::query(
            "UPDATE products SET name = name || $2::jsonb, updated_at = NOW()
              WHERE id = $1
              RETURNING name",
        )
        .bind(id.get())
        .bind(name_changes_to_json(changes))
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Err(StorageError::product_not_found(id));
        };
        let product = ProductNames::from_json(id, row.try_get("name")?);
        let document = hook.on_name_changed(&product);
        upsert_document(&mut *tx, &document).await?;
        tx.commit().await?;
        Ok(document)
    }

    async fn refresh_document(
        &self,
        id: ProductId,
        hook: &dyn NameChangeHook,
    ) -> Result<Option<SearchDocument>, StorageError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query("SELECT name FROM products WHERE id = $1 FOR UPDATE")
            .bind(id.get())
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let product = ProductNames::from_json(id, row.try_get("name")?);
        let document = hook.on_name_changed(&product);
        upsert_document(&mut *tx, &document).await?;
        tx.commit().await?;
        Ok(Some(document))
    }

    async fn get_product_names(&self, id: ProductId) -> Result<Option<ProductNames>, StorageError> {
        let row = sqlx::query("SELECT name FROM products WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(ProductNames::from_json(id, row.try_get("name")?))),
            None => Ok(None),
        }
    }

    async fn list_product_ids(
        &self,
        after: Option<ProductId>,
        limit: usize,
    ) -> Result<Vec<ProductId>, StorageError> {
        let rows = sqlx::query("SELECT id FROM products WHERE id > $1 ORDER BY id LIMIT $2")
            .bind(after.map_or(0, ProductId::get))
            .bind(usize_to_i64(limit))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| row_to_product_id(row, "id")).collect()
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
