use chrono::{DateTime, Local, Utc};

use crate::constants::DATE_FORMAT;

/// Format `created_at` relative to `now` ("Now", "5 min ago", "Yesterday", ...).
/// Anything a week or older falls back to the local calendar date.
pub fn format_relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - created_at).num_milliseconds();
    let mins = diff_ms.div_euclid(60_000);
    let hours = diff_ms.div_euclid(3_600_000);
    let days = diff_ms.div_euclid(86_400_000);

    if mins < 1 {
        "Now".to_string()
    } else if mins < 60 {
        format!("{} min ago", mins)
    } else if hours < 24 {
        format!("{} h ago", hours)
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        created_at.with_timezone(&Local).format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(d: Duration) -> String {
        let now = Utc::now();
        format_relative_time(now - d, now)
    }

    #[test]
    fn test_under_a_minute_is_now() {
        assert_eq!(ago(Duration::seconds(0)), "Now");
        assert_eq!(ago(Duration::seconds(30)), "Now");
        assert_eq!(ago(Duration::milliseconds(59_999)), "Now");
    }

    #[test]
    fn test_future_timestamp_is_now() {
        assert_eq!(ago(Duration::minutes(-10)), "Now");
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(ago(Duration::minutes(1)), "1 min ago");
        assert_eq!(ago(Duration::minutes(5)), "5 min ago");
        assert_eq!(ago(Duration::minutes(59)), "59 min ago");
        assert_eq!(ago(Duration::minutes(60)), "1 h ago");
        assert_eq!(ago(Duration::hours(23) + Duration::minutes(59)), "23 h ago");
    }

    #[test]
    fn test_days() {
        assert_eq!(ago(Duration::hours(24)), "Yesterday");
        assert_eq!(ago(Duration::hours(25)), "Yesterday");
        assert_eq!(ago(Duration::hours(47)), "Yesterday");
        assert_eq!(ago(Duration::days(2)), "2 days ago");
        assert_eq!(ago(Duration::days(6) + Duration::hours(23)), "6 days ago");
    }

    #[test]
    fn test_week_or_older_is_calendar_date() {
        let now = Utc::now();
        let created = now - Duration::days(7);
        let expected = created.with_timezone(&Local).format("%d/%m/%Y").to_string();
        assert_eq!(format_relative_time(created, now), expected);

        let older = now - Duration::days(400);
        let formatted = format_relative_time(older, now);
        assert_eq!(formatted.matches('/').count(), 2);
    }
}
