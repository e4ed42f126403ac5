use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Returns midnight UTC on the first day of the month after `now`.
///
/// Point periods are calendar months in UTC, so this marks the end of the
/// period containing `now`.
pub fn start_of_next_month(now: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };

    // Day 1 at midnight exists for every month, so this is always `Single`.
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}
