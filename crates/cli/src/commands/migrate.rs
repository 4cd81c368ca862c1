use anyhow::Result;
use catalog_search_storage::StorageBackend;

/// Connecting runs every pending migration.
pub(crate) async fn run() -> Result<()> {
    let storage = StorageBackend::new_postgres(&super::database_url()?).await?;
    println!("Schema is up to date ({} backend).", storage.kind());
    Ok(())
}
