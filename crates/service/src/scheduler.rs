use std::sync::Arc;
use std::time::Duration;

use catalog_search_core::SearchConfig;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use crate::{CacheBuilder, RebuildReport, ServiceError};

/// Periodic full rebuild of the search documents.
///
/// Catches names written around the hook, e.g. bulk imports straight into
/// the products table.
pub struct RebuildScheduler {
    builder: Arc<CacheBuilder>,
    interval: Duration,
}

impl RebuildScheduler {
    #[must_use]
    pub fn new(builder: Arc<CacheBuilder>, config: &SearchConfig) -> Self {
        Self { builder, interval: Duration::from_secs(config.rebuild_interval_secs.max(1)) }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn run_once(&self) -> Result<RebuildReport, ServiceError> {
        self.builder.rebuild_all().await
    }

    /// Rebuilds once per interval until `shutdown` flips to `true` or its
    /// sender is dropped. The first pass runs one interval after start.
    /// A failed pass is logged and retried on the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(interval_secs = self.interval.as_secs(), "rebuild scheduler started");
        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    match self.run_once().await {
                        Ok(report) if report.is_clean() => {},
                        Ok(report) => {
                            tracing::warn!(
                                run_id = %report.run_id,
                                failed = report.failed.len(),
                                "scheduled rebuild finished with failures"
                            );
                        },
                        Err(e) => tracing::error!(error = %e, "scheduled rebuild failed"),
                    }
                },
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                },
            }
        }
        tracing::info!("rebuild scheduler stopped");
    }
}
