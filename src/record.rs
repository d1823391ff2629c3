//! Borrowed view of one log record handed over by the host.
//!
//! A `Record` only lives for the duration of a single filter call; it never
//! owns the bytes it points at.

use std::borrow::Cow;
use std::fmt;

use crate::error::FilterError;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Record timestamp as seconds and nanoseconds since the Unix epoch.
///
/// Both parts are taken verbatim from the host; neither is range checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timestamp {
    pub secs: i64,
    pub nanos: i64,
}

impl Timestamp {
    pub fn new(secs: i64, nanos: i64) -> Self {
        Self { secs, nanos }
    }

    /// Fold the nanosecond part into `[0, 1e9)`, carrying whole seconds
    /// into the seconds part.
    ///
    /// Computed in `i128` so that no pair of `i64` inputs can overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use enrich_filter::Timestamp;
    ///
    /// assert_eq!(Timestamp::new(10, -1).normalized(), (9, 999_999_999));
    /// assert_eq!(Timestamp::new(0, 2_500_000_000).normalized(), (2, 500_000_000));
    /// ```
    pub fn normalized(&self) -> (i128, u32) {
        let total = i128::from(self.secs) * NANOS_PER_SEC + i128::from(self.nanos);
        let secs = total.div_euclid(NANOS_PER_SEC);
        // rem_euclid is always in [0, 1e9)
        let nanos = total.rem_euclid(NANOS_PER_SEC) as u32;
        (secs, nanos)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (secs, nanos) = self.normalized();
        write!(f, "{}.{:09}", secs, nanos)
    }
}

/// One log record: tag, timestamp and raw payload.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub tag: &'a [u8],
    pub timestamp: Timestamp,
    pub payload: &'a [u8],
}

impl<'a> Record<'a> {
    pub fn new(tag: &'a [u8], timestamp: Timestamp, payload: &'a [u8]) -> Self {
        Self {
            tag,
            timestamp,
            payload,
        }
    }

    /// Tag as text. Invalid UTF-8 is replaced rather than rejected since the
    /// tag is only ever copied into the output as a string value.
    pub fn tag_text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.tag)
    }

    /// Payload as text, decoded strictly.
    pub fn payload_text(&self) -> Result<&'a str, FilterError> {
        Ok(std::str::from_utf8(self.payload)?)
    }
}
