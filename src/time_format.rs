//! Textual rendering of record timestamps.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Timestamp;

/// Format used for the injected time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// `2023-11-14T22:13:20.000000000Z`
    #[default]
    Rfc3339,
    /// `2023-11-14 22:13:20.5 +0000 UTC`, fraction trimmed and omitted when zero
    HostLong,
}

/// Render a timestamp in UTC.
///
/// Never fails: instants outside the calendar range fall back to
/// `<secs>.<nanos>` epoch text.
///
/// # Example
///
/// ```
/// use enrich_filter::{format_timestamp, TimeFormat, Timestamp};
///
/// let ts = Timestamp::new(1_700_000_000, 0);
/// assert_eq!(format_timestamp(ts, TimeFormat::Rfc3339), "2023-11-14T22:13:20.000000000Z");
/// assert_eq!(format_timestamp(ts, TimeFormat::HostLong), "2023-11-14 22:13:20 +0000 UTC");
/// ```
pub fn format_timestamp(ts: Timestamp, format: TimeFormat) -> String {
    let (secs, nanos) = ts.normalized();

    let datetime = i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, nanos));

    match datetime {
        Some(dt) => match format {
            TimeFormat::Rfc3339 => dt.to_rfc3339_opts(SecondsFormat::Nanos, true),
            TimeFormat::HostLong => format_host_long(&dt, nanos),
        },
        None => ts.to_string(),
    }
}

fn format_host_long(dt: &DateTime<Utc>, nanos: u32) -> String {
    let mut out = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out.push_str(" +0000 UTC");
    out
}
