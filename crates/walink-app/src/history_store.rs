use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

use walink_core::history::HistoryList;
use walink_core::link::WhatsAppLink;
use walink_ports::error::PortError;
use walink_ports::outbound::KeyValueStore;

enum WriteCommand {
    Put(String),
    Flush(oneshot::Sender<()>),
}

/// Session history backed by a key-value store.
///
/// The in-memory list is authoritative. Every mutation queues a write to a
/// background task that applies them in order; nothing waits for storage,
/// and storage failures are logged and otherwise ignored.
pub struct HistoryStore<S>
where
    S: KeyValueStore,
{
    storage: Arc<S>,
    key: String,
    list: Mutex<HistoryList>,
    writer: OnceLock<Option<mpsc::UnboundedSender<WriteCommand>>>,
}

impl<S> HistoryStore<S>
where
    S: KeyValueStore + 'static,
{
    pub fn new(storage: S, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            storage: Arc::new(storage),
            key: key.into(),
            list: Mutex::new(HistoryList::new(capacity)),
            writer: OnceLock::new(),
        }
    }

    /// Replaces the in-memory list with what storage holds. Missing or
    /// unreadable state yields an empty list; entries without the link
    /// prefix are dropped one by one.
    pub async fn load(&self) -> HistoryList {
        let capacity = self.lock().capacity();
        let loaded = match self.storage.get(&self.key).await {
            Ok(Some(raw)) => decode(&self.key, &raw, capacity),
            Ok(None) => HistoryList::new(capacity),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read history");
                HistoryList::new(capacity)
            }
        };
        *self.lock() = loaded.clone();
        loaded
    }

    /// Prepends `link`, evicting the oldest entry when full, and queues the
    /// write. Duplicates must be rejected by the caller beforehand.
    pub fn append(&self, link: WhatsAppLink) -> HistoryList {
        let mut list = self.lock();
        if let Some(evicted) = list.push_front(link) {
            tracing::debug!(link = %evicted, "history full, dropped oldest entry");
        }
        // queued under the lock so writes land in mutation order
        self.save(&list);
        list.clone()
    }

    pub fn clear(&self) {
        let mut list = self.lock();
        list.clear();
        self.save(&list);
    }

    /// Best-effort write; returns as soon as the write is queued.
    pub fn save(&self, list: &HistoryList) {
        let encoded = match serde_json::to_string(list.links()) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not encode history");
                return;
            }
        };
        if let Some(writer) = self.writer() {
            if writer.send(WriteCommand::Put(encoded)).is_err() {
                tracing::warn!(key = %self.key, "history writer stopped, write dropped");
            }
        }
    }

    /// Writes `list` directly and reports the outcome.
    pub async fn try_save(&self, list: &HistoryList) -> Result<(), PortError> {
        let encoded =
            serde_json::to_string(list.links()).map_err(|e| PortError::Persistence(e.to_string()))?;
        self.storage.set(&self.key, &encoded).await
    }

    /// Waits until every queued write has been attempted.
    pub async fn flush(&self) {
        let Some(Some(writer)) = self.writer.get() else {
            return;
        };
        let (done, flushed) = oneshot::channel();
        if writer.send(WriteCommand::Flush(done)).is_ok() {
            let _ = flushed.await;
        }
    }

    pub fn snapshot(&self) -> HistoryList {
        self.lock().clone()
    }

    /// 1-based position of `link` in the current list.
    pub fn position(&self, link: &WhatsAppLink) -> Option<usize> {
        self.lock().position(link)
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    fn writer(&self) -> Option<&mpsc::UnboundedSender<WriteCommand>> {
        self.writer
            .get_or_init(|| match Handle::try_current() {
                Ok(handle) => {
                    let (tx, rx) = mpsc::unbounded_channel();
                    handle.spawn(run_writer(Arc::clone(&self.storage), self.key.clone(), rx));
                    Some(tx)
                }
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "no runtime, history is not persisted");
                    None
                }
            })
            .as_ref()
    }

    fn lock(&self) -> MutexGuard<'_, HistoryList> {
        self.list.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn run_writer<S>(
    storage: Arc<S>,
    key: String,
    mut commands: mpsc::UnboundedReceiver<WriteCommand>,
) where
    S: KeyValueStore,
{
    while let Some(command) = commands.recv().await {
        match command {
            WriteCommand::Put(value) => {
                if let Err(e) = storage.set(&key, &value).await {
                    tracing::warn!(key = %key, error = %e, "could not save history");
                }
            }
            WriteCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}

fn decode(key: &str, raw: &str, capacity: usize) -> HistoryList {
    let entries: Vec<String> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored history is malformed, starting empty");
            return HistoryList::new(capacity);
        }
    };

    let links = entries
        .iter()
        .filter_map(|entry| match WhatsAppLink::parse(entry) {
            Ok(link) => Some(link),
            Err(e) => {
                tracing::warn!(key, error = %e, "dropping stored history entry");
                None
            }
        })
        .collect::<Vec<_>>();

    HistoryList::from_links(links, capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    const KEY: &str = "whatsapp_link_history";

    #[derive(Default)]
    struct MockStorage {
        values: Mutex<HashMap<String, String>>,
        fail_writes: bool,
        fail_reads: bool,
        write_delay: Option<Duration>,
    }

    impl MockStorage {
        fn with_value(value: &str) -> Self {
            let storage = Self::default();
            storage
                .values
                .lock()
                .unwrap()
                .insert(KEY.into(), value.into());
            storage
        }

        fn stored(&self) -> Option<String> {
            self.values.lock().unwrap().get(KEY).cloned()
        }
    }

    #[async_trait]
    impl KeyValueStore for MockStorage {
        async fn get(&self, key: &str) -> Result<Option<String>, PortError> {
            if self.fail_reads {
                return Err(PortError::Unavailable);
            }
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
            if let Some(delay) = self.write_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_writes {
                return Err(PortError::QuotaExceeded);
            }
            self.values.lock().unwrap().insert(key.into(), value.into());
            Ok(())
        }
    }

    fn link(n: u32) -> WhatsAppLink {
        WhatsAppLink::parse(&format!("https://wa.me/9665{n:08}")).unwrap()
    }

    #[tokio::test]
    async fn load_missing_state_is_empty() {
        let store = HistoryStore::new(MockStorage::default(), KEY, 5);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_drops_entries_without_link_prefix() {
        let storage = MockStorage::with_value(r#"["https://wa.me/966512345678", "not-a-link"]"#);
        let store = HistoryStore::new(storage, KEY, 5);

        let list = store.load().await;

        assert_eq!(list.len(), 1);
        assert_eq!(list.links()[0].as_str(), "https://wa.me/966512345678");
        assert_eq!(store.snapshot(), list);
    }

    #[tokio::test]
    async fn load_malformed_json_is_empty() {
        for raw in ["{not json", r#"{"a": 1}"#, r#"[1, 2]"#, r#""https://wa.me/1""#] {
            let store = HistoryStore::new(MockStorage::with_value(raw), KEY, 5);
            assert!(store.load().await.is_empty(), "{raw} should load empty");
        }
    }

    #[tokio::test]
    async fn load_collapses_duplicates_and_caps() {
        let raw = serde_json::to_string(&[
            "https://wa.me/966500000001",
            "https://wa.me/966500000001",
            "https://wa.me/966500000002",
            "https://wa.me/966500000003",
            "https://wa.me/966500000004",
            "https://wa.me/966500000005",
            "https://wa.me/966500000006",
        ])
        .unwrap();
        let store = HistoryStore::new(MockStorage::with_value(&raw), KEY, 5);

        let list = store.load().await;

        assert_eq!(list.links(), &[link(1), link(2), link(3), link(4), link(5)]);
    }

    #[tokio::test]
    async fn load_read_failure_is_empty() {
        let storage = MockStorage {
            fail_reads: true,
            ..Default::default()
        };
        let store = HistoryStore::new(storage, KEY, 5);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn append_persists_json_array_newest_first() {
        let store = HistoryStore::new(MockStorage::default(), KEY, 5);

        store.append(link(1));
        let list = store.append(link(2));
        store.flush().await;

        assert_eq!(list.links(), &[link(2), link(1)]);
        assert_eq!(
            store.storage.stored().unwrap(),
            r#"["https://wa.me/966500000002","https://wa.me/966500000001"]"#
        );
    }

    #[tokio::test]
    async fn append_to_full_list_evicts_oldest() {
        let store = HistoryStore::new(MockStorage::default(), KEY, 5);
        for n in 1..=5 {
            store.append(link(n));
        }

        let list = store.append(link(6));

        assert_eq!(list.len(), 5);
        assert_eq!(list.links()[0], link(6));
        assert_eq!(store.position(&link(1)), None);
    }

    #[tokio::test]
    async fn write_failure_keeps_in_memory_list() {
        let storage = MockStorage {
            fail_writes: true,
            ..Default::default()
        };
        let store = HistoryStore::new(storage, KEY, 5);

        let list = store.append(link(1));
        store.flush().await;

        assert_eq!(list.len(), 1);
        assert_eq!(store.snapshot().len(), 1);
        assert!(store.storage.stored().is_none());
        assert!(matches!(
            store.try_save(&list).await,
            Err(PortError::QuotaExceeded)
        ));
    }

    #[tokio::test]
    async fn clear_persists_empty_array() {
        let store = HistoryStore::new(MockStorage::default(), KEY, 5);
        store.append(link(1));

        store.clear();
        store.flush().await;

        assert!(store.snapshot().is_empty());
        assert_eq!(store.storage.stored().unwrap(), "[]");
    }

    #[tokio::test]
    async fn saved_history_loads_back() {
        let store = HistoryStore::new(MockStorage::default(), KEY, 5);
        store.append(link(1));
        store.append(link(2));
        store.flush().await;

        let reloaded = HistoryStore::new(
            MockStorage::with_value(&store.storage.stored().unwrap()),
            KEY,
            5,
        );

        assert_eq!(reloaded.load().await, store.snapshot());
    }

    #[tokio::test(start_paused = true)]
    async fn append_returns_before_slow_write_finishes() {
        let storage = MockStorage {
            write_delay: Some(Duration::from_secs(10)),
            ..Default::default()
        };
        let store = HistoryStore::new(storage, KEY, 5);
        let started = tokio::time::Instant::now();

        store.append(link(1));

        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.storage.stored(), None);

        store.flush().await;
        assert!(started.elapsed() >= Duration::from_secs(10));
        assert_eq!(
            store.storage.stored().unwrap(),
            r#"["https://wa.me/966500000001"]"#
        );
    }

    #[tokio::test(start_paused = true)]
    async fn queued_writes_land_in_mutation_order() {
        let storage = MockStorage {
            write_delay: Some(Duration::from_millis(100)),
            ..Default::default()
        };
        let store = HistoryStore::new(storage, KEY, 5);

        store.append(link(1));
        store.append(link(2));
        store.clear();
        store.append(link(3));
        store.flush().await;

        assert_eq!(
            store.storage.stored().unwrap(),
            r#"["https://wa.me/966500000003"]"#
        );
    }

    #[test]
    fn append_without_runtime_keeps_in_memory_list() {
        let store = HistoryStore::new(MockStorage::default(), KEY, 5);

        store.append(link(1));

        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.storage.stored(), None);
    }
}
