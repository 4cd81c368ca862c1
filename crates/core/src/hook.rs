//! Post-write hook fired when a product's name changes.

use crate::{ProductNames, SearchDocument};

/// Synchronous callback invoked by storage inside the transaction that wrote
/// a product's names. The returned document is persisted in that same
/// transaction, so a failed write never leaves a stale document committed.
pub trait NameChangeHook: Send + Sync {
    fn on_name_changed(&self, names: &ProductNames) -> SearchDocument;
}
