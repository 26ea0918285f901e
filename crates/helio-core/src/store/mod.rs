pub mod kv;
pub mod notification_store;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use notification_store::{Clock, LoadSource, NotificationStore, StoreError};
