//! Human-readable staleness text.

use chrono::{DateTime, Utc};

/// Formats the age of the last successful fetch as display text.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use rota_engine::refresh::staleness_text;
///
/// let now = Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap();
/// assert_eq!(staleness_text(None, now), "Not yet updated");
/// assert_eq!(staleness_text(Some(now), now), "Updated just now");
/// assert_eq!(staleness_text(Some(now - Duration::minutes(5)), now), "Updated 5m ago");
/// ```
pub fn staleness_text(last_updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last_updated) = last_updated else {
        return "Not yet updated".to_string();
    };

    // A clock skew putting the fetch in the future reads as fresh.
    let elapsed = (now - last_updated).num_seconds().max(0);

    if elapsed < 60 {
        "Updated just now".to_string()
    } else if elapsed < 60 * 60 {
        format!("Updated {}m ago", elapsed / 60)
    } else if elapsed < 24 * 60 * 60 {
        format!("Updated {}h ago", elapsed / (60 * 60))
    } else {
        format!("Updated {}d ago", elapsed / (24 * 60 * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_never_updated() {
        assert_eq!(staleness_text(None, now()), "Not yet updated");
    }

    #[test]
    fn test_just_now_under_a_minute() {
        assert_eq!(staleness_text(Some(now()), now()), "Updated just now");
        assert_eq!(
            staleness_text(Some(now() - Duration::seconds(59)), now()),
            "Updated just now"
        );
    }

    #[test]
    fn test_minutes() {
        assert_eq!(
            staleness_text(Some(now() - Duration::seconds(60)), now()),
            "Updated 1m ago"
        );
        assert_eq!(
            staleness_text(Some(now() - Duration::minutes(59)), now()),
            "Updated 59m ago"
        );
    }

    #[test]
    fn test_hours() {
        assert_eq!(
            staleness_text(Some(now() - Duration::hours(1)), now()),
            "Updated 1h ago"
        );
        assert_eq!(
            staleness_text(Some(now() - Duration::hours(23)), now()),
            "Updated 23h ago"
        );
    }

    #[test]
    fn test_days() {
        assert_eq!(
            staleness_text(Some(now() - Duration::days(3)), now()),
            "Updated 3d ago"
        );
    }

    #[test]
    fn test_future_timestamp_reads_as_fresh() {
        assert_eq!(
            staleness_text(Some(now() + Duration::minutes(10)), now()),
            "Updated just now"
        );
    }
}
