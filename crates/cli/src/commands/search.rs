use anyhow::Result;
use catalog_search_core::SearchConfig;
use catalog_search_storage::SearchDocumentStore;
use serde_json::json;

use super::{Context, print_json};

pub(crate) async fn run_search(config: SearchConfig, query: &str) -> Result<()> {
    let ctx = Context::connect(config).await?;
    let ranked = ctx.router().search(query).await?;

    let mut results = Vec::with_capacity(ranked.len());
    for hit in &ranked {
        let text = ctx.storage.get_document(hit.product_id).await?.map(|doc| doc.combined_text);
        results.push(json!({ "product_id": hit.product_id, "rank": hit.rank, "text": text }));
    }
    print_json(&results)
}
