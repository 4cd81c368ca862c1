//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=... cargo test -p catalog-search-storage -- --ignored pg_

#![cfg(feature = "postgres")]
#![allow(clippy::unwrap_used, reason = "integration test code")]

use catalog_search_core::{
    LanguageCode, LanguageSet, NameChangeHook, NameChanges, ProductNames, SearchDocument,
    SearchQuery,
};
use catalog_search_storage::PgStorage;
use catalog_search_storage::traits::{ProductStore, SearchDocumentStore};

struct ComposeHook(LanguageSet);

impl NameChangeHook for ComposeHook {
    fn on_name_changed(&self, names: &ProductNames) -> SearchDocument {
        SearchDocument::compose(names, &self.0)
    }
}

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

fn lang(code: &str) -> LanguageCode {
    LanguageCode::parse(code).unwrap()
}

fn hook() -> ComposeHook {
    ComposeHook(LanguageSet::new([lang("en_US"), lang("fr_FR")], Some(lang("en_US"))))
}

fn names(pairs: &[(&str, &str)]) -> NameChanges {
    pairs.iter().map(|(code, name)| (lang(code), (*name).to_owned())).collect()
}

/// Unique marker so tests sharing one database never see each other's rows.
fn marker() -> String {
    format!("zq{}", std::process::id())
        + &std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .subsec_nanos()
            .to_string()
}

#[tokio::test]
#[ignore]
async fn pg_create_and_get_document() {
    let storage = create_pg_storage().await;
    let tag = marker();
    let doc = storage
        .create_product(
            &names(&[("en_US", format!("Blue Shirt {tag}").as_str()), ("fr_FR", "Chemise Bleue")]),
            &hook(),
        )
        .await
        .unwrap();

    assert_eq!(doc.combined_text, format!("Blue Shirt {tag} Chemise Bleue"));
    let fetched = storage.get_document(doc.product_id).await.unwrap().unwrap();
    assert_eq!(fetched, doc);
    assert_eq!(fetched.combined_text_lower, fetched.combined_text.to_lowercase());
}

#[tokio::test]
#[ignore]
async fn pg_rename_is_visible_after_commit() {
    let storage = create_pg_storage().await;
    let tag = marker();
    let old = format!("old{tag}");
    let new = format!("new{tag}");
    let doc = storage.create_product(&names(&[("en_US", old.as_str())]), &hook()).await.unwrap();

    storage.update_names(doc.product_id, &names(&[("en_US", new.as_str())]), &hook()).await.unwrap();

    let by_new = storage.rank_documents(&SearchQuery::parse(&new).unwrap(), 100).await.unwrap();
    assert!(by_new.iter().any(|r| r.product_id == doc.product_id));
    let by_old = storage.rank_documents(&SearchQuery::parse(&old).unwrap(), 100).await.unwrap();
    assert!(by_old.iter().all(|r| r.product_id != doc.product_id));
}

#[tokio::test]
#[ignore]
async fn pg_rank_orders_and_escapes_wildcards() {
    let storage = create_pg_storage().await;
    let tag = marker();
    let exact = storage.create_product(&names(&[("en_US", tag.as_str())]), &hook()).await.unwrap();
    let longer = storage
        .create_product(&names(&[("en_US", format!("{tag} with many other words").as_str())]), &hook())
        .await
        .unwrap();

    let results = storage.rank_documents(&SearchQuery::parse(&tag).unwrap(), 100).await.unwrap();
    let ids: Vec<_> = results.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![exact.product_id, longer.product_id]);

    let wildcard = storage.rank_documents(&SearchQuery::parse("%_%").unwrap(), 100).await.unwrap();
    for ranked in wildcard {
        let doc = storage.get_document(ranked.product_id).await.unwrap().unwrap();
        assert!(doc.combined_text_lower.contains("%_%"));
    }
}

#[tokio::test]
#[ignore]
async fn pg_shorter_document_outranks_older_longer_one() {
    let storage = create_pg_storage().await;
    let tag = marker();
    let longer = storage
        .create_product(&names(&[("en_US", format!("{tag} with many other words").as_str())]), &hook())
        .await
        .unwrap();
    let exact = storage.create_product(&names(&[("en_US", tag.as_str())]), &hook()).await.unwrap();
    assert!(longer.product_id < exact.product_id);

    let results = storage.rank_documents(&SearchQuery::parse(&tag).unwrap(), 100).await.unwrap();
    let ids: Vec<_> = results.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![exact.product_id, longer.product_id]);
    assert!(results[0].rank > results[1].rank);
}

#[tokio::test]
#[ignore]
async fn pg_delete_cascades() {
    let storage = create_pg_storage().await;
    let doc = storage.create_product(&names(&[("en_US", marker().as_str())]), &hook()).await.unwrap();

    assert!(storage.delete_product(doc.product_id).await.unwrap());
    assert!(storage.get_document(doc.product_id).await.unwrap().is_none());
    assert!(storage.refresh_document(doc.product_id, &hook()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn pg_refresh_is_idempotent() {
    let storage = create_pg_storage().await;
    let doc = storage
        .create_product(&names(&[("en_US", "Lampe"), ("fr_FR", "Lampe")]), &hook())
        .await
        .unwrap();

    let first = storage.refresh_document(doc.product_id, &hook()).await.unwrap().unwrap();
    let second = storage.refresh_document(doc.product_id, &hook()).await.unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.combined_text, "Lampe");
}
