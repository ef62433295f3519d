use std::collections::BTreeMap;

use time::{Date, Duration, OffsetDateTime, UtcOffset};

use crate::logs::repo_types::LogEntry;

pub fn local_date(ts: OffsetDateTime, offset: UtcOffset) -> Date {
    ts.to_offset(offset).date()
}

/// Buckets entries by local calendar date, keeping their input order
/// within each day.
pub fn group_by_date<T: LogEntry>(entries: &[T], offset: UtcOffset) -> BTreeMap<Date, Vec<&T>> {
    let mut grouped: BTreeMap<Date, Vec<&T>> = BTreeMap::new();
    for entry in entries {
        grouped
            .entry(local_date(entry.timestamp(), offset))
            .or_default()
            .push(entry);
    }
    grouped
}

/// The `days` calendar dates ending at `today`, oldest first.
pub fn trailing_dates(today: Date, days: u32) -> Vec<Date> {
    let mut dates: Vec<Date> = (0..i64::from(days))
        .map_while(|back| today.checked_sub(Duration::days(back)))
        .collect();
    dates.reverse();
    dates
}
