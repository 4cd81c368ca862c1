//! PostgreSQL schema migrations for catalog-search storage.

use sqlx::PgPool;

const MIGRATION_LOCK_ID: i64 = 4_121_907;

const STATEMENTS: &[&str] = &[
    // Trigram operator classes for the substring index
    "CREATE EXTENSION IF NOT EXISTS pg_trgm",
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        name JSONB NOT NULL DEFAULT '{}'::jsonb,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS product_search_cache (
        product_id BIGINT PRIMARY KEY REFERENCES products (id) ON DELETE CASCADE,
        combined_text TEXT NOT NULL DEFAULT '',
        combined_text_lower TEXT NOT NULL DEFAULT '',
        search_tokens TEXT NOT NULL DEFAULT '',
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    // Substring candidate filter: LIKE '%q%' on the lowercase text
    "CREATE INDEX IF NOT EXISTS idx_search_cache_lower_trgm
       ON product_search_cache USING GIN (combined_text_lower gin_trgm_ops)",
    // Must match the ranking expression in rank_documents exactly
    "CREATE INDEX IF NOT EXISTS idx_search_cache_tokens_fts
       ON product_search_cache USING GIN (to_tsvector('simple', search_tokens))",
];

/// Run all PostgreSQL migrations. Every statement is idempotent.
///
/// An advisory lock held for the transaction keeps concurrently starting
/// processes from racing on `CREATE EXTENSION` / `CREATE INDEX`.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(MIGRATION_LOCK_ID).execute(&mut *tx).await?;

    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;
    tracing::debug!("search cache schema is up to date");
    Ok(())
}
