pub mod accessibility;
pub mod config;
pub mod constants;
pub mod input;
pub mod models;
pub mod panel;
pub mod store;
pub mod time_format;
pub mod tracing_setup;

pub use accessibility::AccessibilityController;
pub use models::{NotificationId, NotificationKind, NotificationRecord, Priority};
pub use panel::NotificationPanelController;
pub use store::{FileStore, KeyValueStore, MemoryStore, NotificationStore};
