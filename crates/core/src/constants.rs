//! Shared constants for catalog-search.

/// Default number of ranked products returned for a free-text query.
pub const DEFAULT_RESULT_CAP: usize = 100;

/// Hard ceiling on the ranked result size, whatever the configuration says.
pub const MAX_RESULT_CAP: usize = 1000;

/// Default number of products per chunk in a batch rebuild.
pub const DEFAULT_REBUILD_BATCH_SIZE: usize = 500;

/// Default interval between scheduled batch rebuilds (daily).
pub const DEFAULT_REBUILD_INTERVAL_SECS: u64 = 86_400;

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en_US";

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;
