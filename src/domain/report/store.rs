//! Persisted, ordered report cart.
//!
//! The cart is a small ordered sequence the user curates while reading
//! research results. The whole sequence is the unit of persistence: it
//! is serialized whole on every mutation and deserialized whole at
//! load. Persistence failures are recovered locally and logged; a
//! broken disk must never take report curation down with it.
//!
//! Every mutation publishes an immutable snapshot over a watch channel,
//! synchronously with respect to the mutation, so observers re-render
//! from state they can never alias mutably.

use super::item::{MoveDirection, ReportItem};
use crate::domain::foundation::ReportItemId;
use crate::domain::report::ReportPayload;
use crate::ports::KeyValueStore;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::warn;

/// Storage key the whole cart is persisted under.
pub const REPORT_STORAGE_KEY: &str = "report_cart";

/// Envelope version written with every persisted cart.
const ENVELOPE_VERSION: u32 = 1;

/// Immutable view of the cart handed to subscribers.
pub type ReportSnapshot = Arc<[ReportItem]>;

/// Deserialized forms a persisted cart may take. Carts written before
/// the envelope was introduced are bare arrays.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredCart {
    Versioned { version: u32, items: Vec<ReportItem> },
    Legacy(Vec<ReportItem>),
}

/// The report cart: ordered items, persisted whole, observable.
pub struct ReportStore {
    storage: Arc<dyn KeyValueStore>,
    /// Guards the mutation + persist pair so concurrent callers cannot
    /// interleave between changing the sequence and writing it out.
    state: Mutex<Vec<ReportItem>>,
    snapshot_tx: watch::Sender<ReportSnapshot>,
}

impl ReportStore {
    /// Creates a store by loading the persisted cart.
    ///
    /// An absent key yields an empty cart. Malformed content or an
    /// unrecognized envelope version also yields an empty cart with a
    /// warning, never an error.
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let items = match storage.get(REPORT_STORAGE_KEY).await {
            Ok(Some(raw)) => parse_cart(&raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read persisted report cart, starting empty");
                Vec::new()
            }
        };
        let (snapshot_tx, _) = watch::channel(ReportSnapshot::from(items.clone()));
        Self {
            storage,
            state: Mutex::new(items),
            snapshot_tx,
        }
    }

    /// Subscribes to cart snapshots. The receiver immediately holds the
    /// current state and sees every subsequent mutation.
    pub fn subscribe(&self) -> watch::Receiver<ReportSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Returns the current cart contents.
    pub fn snapshot(&self) -> ReportSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Appends a new item at the end of the cart and returns it.
    pub async fn add_item(
        &self,
        title: impl Into<String>,
        payload: ReportPayload,
        comment: Option<String>,
    ) -> ReportItem {
        let mut items = self.state.lock().await;
        let item = ReportItem::new(title, payload, comment);
        items.push(item.clone());
        self.persist(&items).await;
        self.notify(&items);
        item
    }

    /// Removes the item with `id`. Unknown ids are a no-op; the cart is
    /// still persisted and subscribers still notified.
    pub async fn remove_item(&self, id: ReportItemId) {
        let mut items = self.state.lock().await;
        items.retain(|item| item.id != id);
        self.persist(&items).await;
        self.notify(&items);
    }

    /// Swaps the item with its immediate neighbor in `direction`.
    ///
    /// Moving past either end, or an unknown id, leaves the order
    /// unchanged; the cart is still persisted and subscribers still
    /// notified.
    pub async fn move_item(&self, id: ReportItemId, direction: MoveDirection) {
        let mut items = self.state.lock().await;
        if let Some(index) = items.iter().position(|item| item.id == id) {
            match direction {
                MoveDirection::Up if index > 0 => items.swap(index, index - 1),
                MoveDirection::Down if index + 1 < items.len() => items.swap(index, index + 1),
                _ => {}
            }
        }
        self.persist(&items).await;
        self.notify(&items);
    }

    /// Empties the cart and removes the persisted value entirely, so a
    /// cleared cart leaves no stored artifact behind.
    pub async fn clear(&self) {
        let mut items = self.state.lock().await;
        items.clear();
        if let Err(err) = self.storage.remove(REPORT_STORAGE_KEY).await {
            warn!(error = %err, "failed to remove persisted report cart, cleared in memory only");
        }
        self.notify(&items);
    }

    async fn persist(&self, items: &[ReportItem]) {
        let envelope = serde_json::json!({
            "version": ENVELOPE_VERSION,
            "items": items,
        });
        match serde_json::to_string(&envelope) {
            Ok(serialized) => {
                if let Err(err) = self.storage.put(REPORT_STORAGE_KEY, &serialized).await {
                    warn!(error = %err, "failed to persist report cart, keeping in-memory state");
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to serialize report cart, keeping in-memory state");
            }
        }
    }

    fn notify(&self, items: &[ReportItem]) {
        // send_replace stores the value even with no receivers, so
        // snapshot() stays current before anyone subscribes. watch
        // keeps only the latest value; observers re-render from whole
        // snapshots, so skipped intermediates are fine.
        self.snapshot_tx
            .send_replace(ReportSnapshot::from(items.to_vec()));
    }
}

fn parse_cart(raw: &str) -> Vec<ReportItem> {
    match serde_json::from_str::<StoredCart>(raw) {
        Ok(StoredCart::Versioned { version, items }) if version == ENVELOPE_VERSION => items,
        Ok(StoredCart::Versioned { version, .. }) => {
            warn!(version, "unrecognized report cart version, starting empty");
            Vec::new()
        }
        Ok(StoredCart::Legacy(items)) => items,
        Err(err) => {
            warn!(error = %err, "malformed persisted report cart, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;

    fn payload(text: &str) -> ReportPayload {
        ReportPayload::Text(text.to_string())
    }

    async fn empty_store() -> (ReportStore, Arc<InMemoryKeyValueStore>) {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let store = ReportStore::load(storage.clone()).await;
        (store, storage)
    }

    async fn stored_titles(storage: &InMemoryKeyValueStore) -> Vec<String> {
        let raw = storage
            .get(REPORT_STORAGE_KEY)
            .await
            .unwrap()
            .expect("cart should be persisted");
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        value["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["title"].as_str().unwrap().to_string())
            .collect()
    }

    mod loading {
        use super::*;

        #[tokio::test]
        async fn absent_key_loads_empty() {
            let (store, _) = empty_store().await;
            assert!(store.snapshot().is_empty());
        }

        #[tokio::test]
        async fn versioned_envelope_round_trips() {
            let storage = Arc::new(InMemoryKeyValueStore::new());
            {
                let store = ReportStore::load(storage.clone()).await;
                store.add_item("First", payload("a"), None).await;
                store.add_item("Second", payload("b"), Some("note".into())).await;
            }

            let reloaded = ReportStore::load(storage).await;
            let snapshot = reloaded.snapshot();
            assert_eq!(snapshot.len(), 2);
            assert_eq!(snapshot[0].title, "First");
            assert_eq!(snapshot[1].comment.as_deref(), Some("note"));
        }

        #[tokio::test]
        async fn legacy_bare_array_is_accepted() {
            let storage = Arc::new(InMemoryKeyValueStore::new());
            let legacy = serde_json::json!([{
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "type": "text",
                "data": "old entry",
                "title": "Legacy",
                "created_at": "2025-06-01T12:00:00Z"
            }]);
            storage
                .put(REPORT_STORAGE_KEY, &legacy.to_string())
                .await
                .unwrap();

            let store = ReportStore::load(storage).await;
            let snapshot = store.snapshot();
            assert_eq!(snapshot.len(), 1);
            assert_eq!(snapshot[0].title, "Legacy");
        }

        #[tokio::test]
        async fn malformed_content_loads_empty() {
            let storage = Arc::new(InMemoryKeyValueStore::new());
            storage.put(REPORT_STORAGE_KEY, "{not json").await.unwrap();

            let store = ReportStore::load(storage).await;
            assert!(store.snapshot().is_empty());
        }

        #[tokio::test]
        async fn non_sequence_content_loads_empty() {
            let storage = Arc::new(InMemoryKeyValueStore::new());
            storage
                .put(REPORT_STORAGE_KEY, "{\"version\": 1, \"items\": 42}")
                .await
                .unwrap();

            let store = ReportStore::load(storage).await;
            assert!(store.snapshot().is_empty());
        }

        #[tokio::test]
        async fn unknown_version_loads_empty() {
            let storage = Arc::new(InMemoryKeyValueStore::new());
            storage
                .put(REPORT_STORAGE_KEY, "{\"version\": 7, \"items\": []}")
                .await
                .unwrap();

            let store = ReportStore::load(storage).await;
            assert!(store.snapshot().is_empty());
        }

        #[tokio::test]
        async fn read_failure_loads_empty() {
            let storage = Arc::new(InMemoryKeyValueStore::new().with_failing_reads());
            let store = ReportStore::load(storage).await;
            assert!(store.snapshot().is_empty());
        }
    }

    mod mutations {
        use super::*;

        #[tokio::test]
        async fn add_appends_in_insertion_order() {
            let (store, storage) = empty_store().await;
            store.add_item("First", payload("a"), None).await;
            store.add_item("Second", payload("b"), None).await;
            store.add_item("Third", payload("c"), None).await;

            let snapshot = store.snapshot();
            let titles: Vec<_> = snapshot.iter().map(|item| item.title.as_str()).collect();
            assert_eq!(titles, vec!["First", "Second", "Third"]);
            assert_eq!(stored_titles(&storage).await, vec!["First", "Second", "Third"]);
        }

        #[tokio::test]
        async fn add_returns_the_created_item() {
            let (store, _) = empty_store().await;
            let item = store
                .add_item("Summary", payload("text"), Some("keep".into()))
                .await;

            assert_eq!(item.title, "Summary");
            assert_eq!(item.comment.as_deref(), Some("keep"));
            assert_eq!(store.snapshot()[0].id, item.id);
        }

        #[tokio::test]
        async fn ids_stay_unique_across_items() {
            let (store, _) = empty_store().await;
            for i in 0..10 {
                store.add_item(format!("Item {i}"), payload("x"), None).await;
            }
            let snapshot = store.snapshot();
            let mut ids: Vec<_> = snapshot.iter().map(|item| item.id).collect();
            ids.sort_by_key(|id| *id.as_uuid());
            ids.dedup();
            assert_eq!(ids.len(), 10);
        }

        #[tokio::test]
        async fn remove_deletes_only_the_matching_item() {
            let (store, storage) = empty_store().await;
            store.add_item("First", payload("a"), None).await;
            let middle = store.add_item("Second", payload("b"), None).await;
            store.add_item("Third", payload("c"), None).await;

            store.remove_item(middle.id).await;

            assert_eq!(stored_titles(&storage).await, vec!["First", "Third"]);
        }

        #[tokio::test]
        async fn remove_of_unknown_id_is_a_noop_but_still_persists() {
            let (store, storage) = empty_store().await;
            store.add_item("Only", payload("a"), None).await;

            store.remove_item(ReportItemId::new()).await;

            assert_eq!(store.snapshot().len(), 1);
            assert_eq!(stored_titles(&storage).await, vec!["Only"]);
        }

        #[tokio::test]
        async fn move_up_swaps_with_previous_neighbor() {
            let (store, storage) = empty_store().await;
            store.add_item("First", payload("a"), None).await;
            let second = store.add_item("Second", payload("b"), None).await;

            store.move_item(second.id, MoveDirection::Up).await;

            assert_eq!(stored_titles(&storage).await, vec!["Second", "First"]);
        }

        #[tokio::test]
        async fn move_at_boundary_keeps_order() {
            let (store, _) = empty_store().await;
            let first = store.add_item("First", payload("a"), None).await;
            let last = store.add_item("Last", payload("b"), None).await;

            store.move_item(first.id, MoveDirection::Up).await;
            store.move_item(last.id, MoveDirection::Down).await;

            let snapshot = store.snapshot();
            assert_eq!(snapshot[0].title, "First");
            assert_eq!(snapshot[1].title, "Last");
        }

        #[tokio::test]
        async fn clear_removes_the_persisted_key_entirely() {
            let (store, storage) = empty_store().await;
            store.add_item("First", payload("a"), None).await;
            assert!(storage.get(REPORT_STORAGE_KEY).await.unwrap().is_some());

            store.clear().await;

            assert!(store.snapshot().is_empty());
            assert!(storage.get(REPORT_STORAGE_KEY).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn write_failure_keeps_in_memory_state() {
            let storage = Arc::new(InMemoryKeyValueStore::new().with_failing_writes());
            let store = ReportStore::load(storage.clone()).await;

            let item = store.add_item("Kept", payload("a"), None).await;

            let snapshot = store.snapshot();
            assert_eq!(snapshot.len(), 1);
            assert_eq!(snapshot[0].id, item.id);
            assert!(storage.get(REPORT_STORAGE_KEY).await.unwrap().is_none());
        }
    }

    mod notifications {
        use super::*;

        #[tokio::test]
        async fn subscribers_see_every_mutation() {
            let (store, _) = empty_store().await;
            let mut rx = store.subscribe();
            assert!(rx.borrow_and_update().is_empty());

            store.add_item("First", payload("a"), None).await;
            assert!(rx.has_changed().unwrap());
            assert_eq!(rx.borrow_and_update().len(), 1);

            store.clear().await;
            assert!(rx.has_changed().unwrap());
            assert!(rx.borrow_and_update().is_empty());
        }

        #[tokio::test]
        async fn noop_mutations_still_notify() {
            let (store, _) = empty_store().await;
            let mut rx = store.subscribe();
            rx.borrow_and_update();

            store.remove_item(ReportItemId::new()).await;

            assert!(rx.has_changed().unwrap());
        }

        #[tokio::test]
        async fn snapshots_are_independent_of_later_mutations() {
            let (store, _) = empty_store().await;
            store.add_item("First", payload("a"), None).await;

            let before = store.snapshot();
            store.add_item("Second", payload("b"), None).await;

            assert_eq!(before.len(), 1);
            assert_eq!(store.snapshot().len(), 2);
        }
    }

    mod scenarios {
        use super::*;

        #[tokio::test]
        async fn full_curation_session_round_trips() {
            let storage = Arc::new(InMemoryKeyValueStore::new());
            {
                let store = ReportStore::load(storage.clone()).await;
                store.add_item("Summary", payload("overview"), None).await;
                let chart = store
                    .add_item(
                        "Trends",
                        ReportPayload::LineChart(vec![crate::domain::research::TrendPoint {
                            year: "2024".into(),
                            market_size: 75.0,
                        }]),
                        None,
                    )
                    .await;
                store.add_item("SWOT", payload("placeholder"), None).await;

                store.move_item(chart.id, MoveDirection::Up).await;
            }

            let reloaded = ReportStore::load(storage).await;
            let snapshot = reloaded.snapshot();
            let titles: Vec<_> = snapshot.iter().map(|item| item.title.as_str()).collect();
            assert_eq!(titles, vec!["Trends", "Summary", "SWOT"]);
            assert_eq!(snapshot[0].payload.kind(), "chart-line");
        }
    }
}
