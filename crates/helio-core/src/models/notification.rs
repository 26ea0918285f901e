use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Notification identity. New records use their creation time in milliseconds.
pub type NotificationId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Appointment,
    Reminder,
    Result,
    Alert,
    Info,
    Success,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Appointment => "📅",
            Self::Reminder => "🔔",
            Self::Result => "📄",
            Self::Alert => "⚠",
            Self::Info => "ℹ",
            Self::Success => "✓",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Appointment => "appointment",
            Self::Reminder => "reminder",
            Self::Result => "result",
            Self::Alert => "alert",
            Self::Info => "info",
            Self::Success => "success",
        }
    }
}

impl Default for NotificationKind {
    fn default() -> Self {
        Self::Info
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "appointment" => Ok(Self::Appointment),
            "reminder" => Ok(Self::Reminder),
            "result" => Ok(Self::Result),
            "alert" => Ok(Self::Alert),
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            other => Err(format!("unknown notification kind: {}", other)),
        }
    }
}

/// Display-only severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Colour family a priority badge is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTone {
    Calm,
    Caution,
    Danger,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn tone(&self) -> PriorityTone {
        match self {
            Self::Low => PriorityTone::Calm,
            Self::Medium => PriorityTone::Caution,
            Self::High => PriorityTone::Danger,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// One notification entry as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
}

impl NotificationRecord {
    /// Fresh unread record stamped with `now`
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: now.timestamp_millis(),
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: now,
            priority,
        }
    }

    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

/// The three records a fresh store starts with
pub fn seed_records(now: DateTime<Utc>) -> Vec<NotificationRecord> {
    vec![
        NotificationRecord {
            id: 1,
            kind: NotificationKind::Appointment,
            title: "Appointment Confirmed".to_string(),
            message: "Your appointment with Dr. Silva is confirmed for 15/01/2024 at 14:30"
                .to_string(),
            read: false,
            created_at: now,
            priority: Priority::Medium,
        },
        NotificationRecord {
            id: 2,
            kind: NotificationKind::Reminder,
            title: "Medication Reminder".to_string(),
            message: "Remember to take your medication at 20:00".to_string(),
            read: false,
            created_at: now,
            priority: Priority::High,
        },
        NotificationRecord {
            id: 3,
            kind: NotificationKind::Result,
            title: "Results Available".to_string(),
            message: "Your lab results are available for viewing".to_string(),
            read: true,
            created_at: now - Duration::days(1),
            priority: Priority::Medium,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_camel_case_keys() {
        let now = Utc::now();
        let record = NotificationRecord::new("t", "m", NotificationKind::Alert, Priority::High, now);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "alert");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["read"], false);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_new_record_uses_millis_id() {
        let now = Utc::now();
        let record = NotificationRecord::new("t", "m", NotificationKind::Info, Priority::Low, now);
        assert_eq!(record.id, now.timestamp_millis());
        assert!(record.is_unread());
    }

    #[test]
    fn test_seed_records() {
        let now = Utc::now();
        let seeds = seed_records(now);
        let ids: Vec<_> = seeds.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(!seeds[0].read);
        assert!(!seeds[1].read);
        assert!(seeds[2].read);
        assert_eq!(seeds[2].created_at, now - Duration::days(1));
        assert_eq!(seeds[2].message, "Your lab results are available for viewing");
    }

    #[test]
    fn test_parse_kind_and_priority() {
        assert_eq!("Reminder".parse::<NotificationKind>(), Ok(NotificationKind::Reminder));
        assert!("bogus".parse::<NotificationKind>().is_err());
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(NotificationKind::default(), NotificationKind::Info);
    }
}
