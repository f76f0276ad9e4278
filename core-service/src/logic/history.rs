//! History Aggregator
//!
//! Windowed migraine counts (24h / 7d / 30d) and the most recent events.
//! Input order does not matter; events are sorted newest first here.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::Serialize;

/// Number of events listed under "Recent events"
pub const RECENT_LIMIT: usize = 5;

/// One line of the recent-events list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentEvent {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub last_24h: usize,
    pub last_7d: usize,
    pub last_30d: usize,
    /// Newest first, at most `RECENT_LIMIT`
    pub recent: Vec<RecentEvent>,
}

/// Events whose age is at most `window` (inclusive)
pub fn count_within(sorted: &[DateTime<Utc>], now: DateTime<Utc>, window: Duration) -> usize {
    sorted.iter().filter(|t| now - **t <= window).count()
}

/// Summarize, formatting recent events in local time
pub fn summarize(events: &[DateTime<Utc>], now: DateTime<Utc>) -> HistorySummary {
    summarize_in(events, now, &Local)
}

/// Summarize, formatting recent events in `tz`
pub fn summarize_in<Tz: TimeZone>(events: &[DateTime<Utc>], now: DateTime<Utc>, tz: &Tz) -> HistorySummary
where
    Tz::Offset: std::fmt::Display,
{
    let mut sorted = events.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let recent = sorted
        .iter()
        .take(RECENT_LIMIT)
        .map(|t| {
            let local = t.with_timezone(tz);
            RecentEvent {
                date: local.format("%Y-%m-%d").to_string(),
                time: local.format("%H:%M").to_string(),
            }
        })
        .collect();

    HistorySummary {
        last_24h: count_within(&sorted, now, Duration::hours(24)),
        last_7d: count_within(&sorted, now, Duration::days(7)),
        last_30d: count_within(&sorted, now, Duration::days(30)),
        recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    fn sample(now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let hours = |n: i64| now - Duration::hours(n);
        let days = |n: i64| now - Duration::days(n);
        vec![
            hours(3), hours(22), days(2), days(5), days(9),
            days(15), days(21), days(27), days(29),
        ]
    }

    #[test]
    fn test_two_events_in_last_day() {
        let now = now();
        let events = vec![now - Duration::hours(3), now - Duration::hours(22)];
        let summary = summarize_in(&events, now, &Utc);
        assert_eq!(summary.last_24h, 2);
        assert_eq!(summary.last_7d, 2);
        assert_eq!(summary.last_30d, 2);
    }

    #[test]
    fn test_sample_windows() {
        let now = now();
        let summary = summarize_in(&sample(now), now, &Utc);
        assert_eq!(summary.last_24h, 2);
        assert_eq!(summary.last_7d, 4);
        assert_eq!(summary.last_30d, 9);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let now = now();
        let events = vec![
            now - Duration::hours(24),
            now - Duration::days(7),
            now - Duration::days(30),
            now - Duration::days(30) - Duration::seconds(1),
        ];
        let summary = summarize_in(&events, now, &Utc);
        assert_eq!(summary.last_24h, 1);
        assert_eq!(summary.last_7d, 2);
        assert_eq!(summary.last_30d, 3);
    }

    #[test]
    fn test_recent_is_newest_first_and_capped() {
        let now = now();
        let summary = summarize_in(&sample(now), now, &Utc);
        assert_eq!(summary.recent.len(), RECENT_LIMIT);
        assert_eq!(summary.recent[0], RecentEvent { date: "2025-03-14".into(), time: "09:00".into() });
        assert_eq!(summary.recent[1], RecentEvent { date: "2025-03-13".into(), time: "14:00".into() });
        assert_eq!(summary.recent[4].date, "2025-03-05");
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let now = now();
        let ordered = sample(now);
        let mut shuffled = ordered.clone();
        shuffled.reverse();
        shuffled.swap(0, 4);
        shuffled.swap(2, 7);

        assert_eq!(summarize_in(&ordered, now, &Utc), summarize_in(&shuffled, now, &Utc));
    }

    #[test]
    fn test_empty_history() {
        let summary = summarize_in(&[], now(), &Utc);
        assert_eq!(summary, HistorySummary::default());
    }

    #[test]
    fn test_formatting_uses_given_zone() {
        let now = now();
        let plus_two = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        let summary = summarize_in(&[now - Duration::hours(3)], now, &plus_two);
        assert_eq!(summary.recent[0].time, "11:00");
    }
}
