//! Local time handling for the account's home zone.
//!
//! Statement windows and rendered timestamps are pinned to Europe/Kyiv
//! regardless of the host's zone.

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::{Europe::Kyiv, Tz};

/// Zone used for day boundaries and displayed times.
pub const LOCAL_ZONE: Tz = Kyiv;

/// Extra look-back used by the balance query, in seconds.
pub const BALANCE_LOOKBACK_SECS: i64 = 86_400;

/// Start of today's statement window: 00:01:00 local time on the local date of `now`.
pub fn statement_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let local_date = now.with_timezone(&LOCAL_ZONE).date_naive();
    // Kyiv switches DST at 03:00/04:00, so 00:01 always exists exactly once.
    local_date
        .and_hms_opt(0, 1, 0)
        .and_then(|naive| LOCAL_ZONE.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or(now)
}

/// Start of the balance window: one day before the statement window.
pub fn balance_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    statement_window_start(now) - Duration::seconds(BALANCE_LOOKBACK_SECS)
}

/// `HH:MM:SS` wall-clock time of `instant` in the local zone.
pub fn local_clock(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&LOCAL_ZONE).format("%H:%M:%S").to_string()
}
