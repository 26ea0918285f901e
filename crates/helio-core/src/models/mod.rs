pub mod notification;

pub use notification::{
    seed_records, NotificationId, NotificationKind, NotificationRecord, Priority, PriorityTone,
};
