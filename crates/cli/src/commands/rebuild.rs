use anyhow::Result;
use catalog_search_core::{ProductId, SearchConfig};
use catalog_search_service::RebuildScheduler;
use tokio::sync::watch;

use super::{Context, print_json};

pub(crate) async fn run_rebuild(config: SearchConfig, id: ProductId) -> Result<()> {
    let ctx = Context::connect(config).await?;
    match ctx.builder.rebuild(id).await? {
        Some(document) => print_json(&document),
        None => {
            println!("Product not found: {id}");
            Ok(())
        },
    }
}

pub(crate) async fn run_rebuild_all(config: SearchConfig, batch_size: Option<usize>) -> Result<()> {
    let ctx = Context::connect(config).await?;
    let report = match batch_size {
        Some(batch_size) => ctx.builder.rebuild_all_with_batch_size(batch_size).await?,
        None => ctx.builder.rebuild_all().await?,
    };
    print_json(&report)?;
    if !report.is_clean() {
        eprintln!("Warning: {} products failed to rebuild", report.failed.len());
    }
    Ok(())
}

pub(crate) async fn run_schedule(config: SearchConfig) -> Result<()> {
    let ctx = Context::connect(config).await?;
    let scheduler = RebuildScheduler::new(ctx.builder.clone(), &ctx.config);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            return;
        }
        tracing::info!("shutdown requested");
        let _ = shutdown_tx.send(true);
    });

    scheduler.run(shutdown_rx).await;
    Ok(())
}
