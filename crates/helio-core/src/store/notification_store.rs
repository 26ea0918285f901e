use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::kv::{KeyValueStore, StorageError};
use crate::constants::NOTIFICATIONS_KEY;
use crate::models::{seed_records, NotificationId, NotificationKind, NotificationRecord, Priority};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode notifications: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where the in-memory collection came from on the last `load()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    /// Nothing stored yet, seed records were written
    Seeded,
    /// Stored value was not valid JSON; it was replaced by seeds
    SeededAfterCorruption,
    /// The store could not be read. Seeds are held in memory only and the
    /// stored value is left untouched.
    SeededAfterReadError,
}

pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Owner of the notification collection and its persistence.
///
/// Order is newest first. Every mutation writes the whole collection back
/// before the in-memory copy changes, so the two never disagree.
pub struct NotificationStore<S: KeyValueStore> {
    kv: S,
    records: Vec<NotificationRecord>,
    clock: Clock,
    last_load: LoadSource,
}

impl<S: KeyValueStore> NotificationStore<S> {
    /// Open the store and load (or seed) the collection
    pub fn open(kv: S) -> Self {
        Self::with_clock(kv, Box::new(Utc::now))
    }

    pub fn with_clock(kv: S, clock: Clock) -> Self {
        let mut store = Self {
            kv,
            records: Vec::new(),
            clock,
            last_load: LoadSource::Persisted,
        };
        store.load();
        store
    }

    // ===== Persistence =====

    /// Read the persisted collection, seeding it when absent or corrupt.
    pub fn load(&mut self) -> Vec<NotificationRecord> {
        let (records, source) = match self.kv.get(NOTIFICATIONS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<NotificationRecord>>(&raw) {
                Ok(records) => (records, LoadSource::Persisted),
                Err(e) => {
                    warn!("Discarding unreadable notifications, reseeding: {}", e);
                    (self.seed(), LoadSource::SeededAfterCorruption)
                }
            },
            Ok(None) => (self.seed(), LoadSource::Seeded),
            Err(e) => {
                warn!("Failed to read notifications, using seeds in memory: {}", e);
                (seed_records((self.clock)()), LoadSource::SeededAfterReadError)
            }
        };

        debug!(count = records.len(), ?source, "Loaded notifications");
        self.records = records;
        self.last_load = source;
        self.records.clone()
    }

    fn seed(&mut self) -> Vec<NotificationRecord> {
        let seeds = seed_records((self.clock)());
        if let Err(e) = self.write(&seeds) {
            warn!("Failed to persist seed notifications: {}", e);
        }
        seeds
    }

    /// Replace the whole collection. The in-memory copy follows only once
    /// the write succeeds.
    pub fn save(&mut self, records: &[NotificationRecord]) -> Result<(), StoreError> {
        self.commit(records.to_vec())
    }

    fn write(&mut self, records: &[NotificationRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.kv.set(NOTIFICATIONS_KEY, &json)?;
        Ok(())
    }

    fn commit(&mut self, next: Vec<NotificationRecord>) -> Result<(), StoreError> {
        self.write(&next)?;
        self.records = next;
        Ok(())
    }

    pub fn last_load_source(&self) -> LoadSource {
        self.last_load
    }

    // ===== Getters =====

    pub fn records(&self) -> &[NotificationRecord] {
        &self.records
    }

    pub fn get(&self, id: NotificationId) -> Option<&NotificationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_unread()).count()
    }

    // ===== Mutations =====

    /// Add an info/medium notification
    pub fn add(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<NotificationRecord, StoreError> {
        self.add_with(title, message, NotificationKind::default(), Priority::default())
    }

    /// Create a record stamped with the current time and prepend it
    pub fn add_with(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        priority: Priority,
    ) -> Result<NotificationRecord, StoreError> {
        let record = NotificationRecord::new(title, message, kind, priority, (self.clock)());

        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record.clone());
        next.extend(self.records.iter().cloned());
        self.commit(next)?;

        info!(id = record.id, kind = record.kind.label(), "Added notification");
        Ok(record)
    }

    /// Mark one record read. Returns whether a record matched; an unknown id
    /// still rewrites the collection unchanged.
    pub fn mark_read(&mut self, id: NotificationId) -> Result<bool, StoreError> {
        let mut found = false;
        let next = self
            .records
            .iter()
            .cloned()
            .map(|mut r| {
                if r.id == id {
                    r.read = true;
                    found = true;
                }
                r
            })
            .collect();
        self.commit(next)?;

        if found {
            info!(id, "Marked notification read");
        } else {
            debug!(id, "mark_read: no such notification");
        }
        Ok(found)
    }

    pub fn mark_all_read(&mut self) -> Result<(), StoreError> {
        let next = self
            .records
            .iter()
            .cloned()
            .map(|mut r| {
                r.read = true;
                r
            })
            .collect();
        self.commit(next)?;
        info!(count = self.records.len(), "Marked all notifications read");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::kv::{FileStore, MemoryStore};
    use chrono::Duration;
    use std::cell::Cell;

    /// Clock that advances one millisecond per call so ids never collide
    pub(crate) fn stepping_clock(start: DateTime<Utc>) -> Clock {
        let tick = Cell::new(0i64);
        Box::new(move || {
            let n = tick.get();
            tick.set(n + 1);
            start + Duration::milliseconds(n)
        })
    }

    /// Store over an empty collection (seeds are loaded then cleared)
    pub(crate) fn empty_store(kv: MemoryStore) -> NotificationStore<MemoryStore> {
        let mut kv = kv;
        kv.set(NOTIFICATIONS_KEY, "[]").unwrap();
        NotificationStore::with_clock(kv, stepping_clock(Utc::now()))
    }

    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    /// Reads always fail; writes go through to the inner store
    struct UnreadableStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_seed_on_empty_storage() {
        let kv = MemoryStore::new();
        let mut store = NotificationStore::open(kv.clone());
        assert_eq!(store.last_load_source(), LoadSource::Seeded);

        let first = store.records().to_vec();
        let ids: Vec<_> = first.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(first[2].read);
        assert!(kv.raw(NOTIFICATIONS_KEY).is_some());

        let second = store.load();
        assert_eq!(store.last_load_source(), LoadSource::Persisted);
        assert_eq!(first, second);
    }

    #[test]
    fn test_corrupt_storage_falls_back_to_seeds() {
        let mut kv = MemoryStore::new();
        kv.set(NOTIFICATIONS_KEY, "{not json").unwrap();
        let store = NotificationStore::open(kv.clone());
        assert_eq!(store.last_load_source(), LoadSource::SeededAfterCorruption);
        assert_eq!(store.len(), 3);

        // The corrupt value was replaced
        let raw = kv.raw(NOTIFICATIONS_KEY).unwrap();
        assert!(serde_json::from_str::<Vec<NotificationRecord>>(&raw).is_ok());
    }

    #[test]
    fn test_add_prepends_unread() {
        let mut store = empty_store(MemoryStore::new());
        let a = store.add("A", "m").unwrap();
        let b = store.add("B", "m").unwrap();
        let c = store.add("C", "m").unwrap();

        let titles: Vec<_> = store.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
        assert!(store.records().iter().all(|r| !r.read));
        assert_eq!(a.kind, NotificationKind::Info);
        assert_eq!(a.priority, Priority::Medium);
        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn test_unread_count_tracks_mutations() {
        let mut store = NotificationStore::open(MemoryStore::new());
        assert_eq!(store.unread_count(), 2);

        store
            .add_with("x", "y", NotificationKind::Alert, Priority::High)
            .unwrap();
        assert_eq!(store.unread_count(), 3);
        assert_eq!(
            store.unread_count(),
            store.records().iter().filter(|r| !r.read).count()
        );

        store.mark_all_read().unwrap();
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_mark_read_idempotent() {
        let mut store = empty_store(MemoryStore::new());
        let a = store.add("A", "m").unwrap();
        store.add("B", "m").unwrap();

        assert!(store.mark_read(a.id).unwrap());
        let once = store.records().to_vec();
        assert!(store.mark_read(a.id).unwrap());
        assert_eq!(once, store.records());
    }

    #[test]
    fn test_mark_read_unknown_id_is_noop() {
        let mut store = NotificationStore::open(MemoryStore::new());
        let before = store.records().to_vec();
        assert!(!store.mark_read(999).unwrap());
        assert_eq!(before, store.records());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut store = empty_store(MemoryStore::new());
        store.add("A", "first").unwrap();
        store
            .add_with("B", "second", NotificationKind::Success, Priority::Low)
            .unwrap();
        let mut collection = store.records().to_vec();
        collection[1].read = true;

        store.save(&collection).unwrap();
        assert_eq!(store.load(), collection);
    }

    #[test]
    fn test_mutations_persist_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = NotificationStore::open(FileStore::new(dir.path()));
        let added = store.add("Hello", "world").unwrap();
        store.mark_read(1).unwrap();

        let reopened = NotificationStore::open(FileStore::new(dir.path()));
        assert_eq!(reopened.last_load_source(), LoadSource::Persisted);
        assert_eq!(reopened.records(), store.records());
        assert_eq!(reopened.records()[0].id, added.id);
        assert!(reopened.get(1).unwrap().read);
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let inner = MemoryStore::new();
        NotificationStore::open(inner.clone());
        let mut store = NotificationStore::open(ReadOnlyStore { inner });
        let before = store.records().to_vec();

        assert!(store.add("A", "m").is_err());
        assert!(store.mark_all_read().is_err());
        assert_eq!(before, store.records());
    }

    #[test]
    fn test_read_error_keeps_stored_collection() {
        let inner = MemoryStore::new();
        let mut first = empty_store(inner.clone());
        first.add("USER DATA", "keep me").unwrap();
        let stored = inner.raw(NOTIFICATIONS_KEY).unwrap();

        let store = NotificationStore::open(UnreadableStore {
            inner: inner.clone(),
        });
        assert_eq!(store.last_load_source(), LoadSource::SeededAfterReadError);
        assert_eq!(store.len(), 3);
        assert_eq!(inner.raw(NOTIFICATIONS_KEY).unwrap(), stored);
        assert!(stored.contains("USER DATA"));
    }

    #[test]
    fn test_save_replaces_in_memory_collection() {
        let kv = MemoryStore::new();
        let mut store = NotificationStore::open(kv.clone());
        let kept = store.records()[..1].to_vec();

        store.save(&kept).unwrap();
        assert_eq!(store.records(), kept.as_slice());

        store.add("new", "m").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[1], kept[0]);

        let persisted: Vec<NotificationRecord> =
            serde_json::from_str(&kv.raw(NOTIFICATIONS_KEY).unwrap()).unwrap();
        assert_eq!(persisted, store.records());
    }
}
