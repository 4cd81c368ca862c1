use anyhow::Result;
use catalog_search_core::{LanguageCode, NameChanges, ProductId, SearchConfig};
use serde_json::json;

use super::{Context, print_json};

pub(crate) async fn run_create(config: SearchConfig, names: Vec<(LanguageCode, String)>) -> Result<()> {
    let ctx = Context::connect(config).await?;
    let names: NameChanges = names.into_iter().collect();
    let document = ctx.products().create_product(&names).await?;
    print_json(&document)
}

pub(crate) async fn run_rename(
    config: SearchConfig,
    id: ProductId,
    names: Vec<(LanguageCode, String)>,
) -> Result<()> {
    let ctx = Context::connect(config).await?;
    let changes: NameChanges = names.into_iter().collect();
    let document = ctx.products().rename(id, &changes).await?;
    print_json(&document)
}

pub(crate) async fn run_delete(config: SearchConfig, id: ProductId) -> Result<()> {
    let ctx = Context::connect(config).await?;
    if ctx.products().delete_product(id).await? {
        println!("Deleted product {id}");
    } else {
        println!("Product not found: {id}");
    }
    Ok(())
}

pub(crate) async fn run_show(config: SearchConfig, id: ProductId) -> Result<()> {
    let ctx = Context::connect(config).await?;
    let products = ctx.products();
    let Some(names) = products.get_names(id).await? else {
        println!("Product not found: {id}");
        return Ok(());
    };
    let document = products.get_document(id).await?;
    print_json(&json!({ "product": names, "search_document": document }))
}
