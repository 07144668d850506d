use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Canonical rendering: RFC 3339, UTC, always six fractional digits.
const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// UTC creation instant of a record.
///
/// Held at microsecond resolution so that the canonical string form is
/// lossless: parsing [`Timestamp::canonical`] yields an equal value, and the
/// digest computed over it never depends on sub-microsecond clock noise.
///
/// Serialized as the canonical string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Capture the current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Wrap an existing instant, truncating it to microseconds.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.trunc_subsecs(6))
    }

    /// Build from microseconds since the UNIX epoch.
    pub fn from_unix_micros(micros: i64) -> Result<Self, TypeError> {
        DateTime::from_timestamp_micros(micros)
            .map(Self)
            .ok_or_else(|| TypeError::InvalidTimestamp(format!("{micros}us out of range")))
    }

    /// Parse any RFC 3339 timestamp; offsets are normalised to UTC.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let parsed = DateTime::parse_from_rfc3339(s)
            .map_err(|e| TypeError::InvalidTimestamp(format!("{s}: {e}")))?;
        Ok(Self::from_datetime(parsed.with_timezone(&Utc)))
    }

    /// Canonical string form used as digest input.
    pub fn canonical(&self) -> String {
        self.0.format(CANONICAL_FORMAT).to_string()
    }

    /// Microseconds since the UNIX epoch.
    pub fn unix_micros(&self) -> i64 {
        self.0.timestamp_micros()
    }
}

impl FromStr for Timestamp {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.canonical()
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.canonical())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn canonical_always_has_six_fraction_digits() {
        let ts = Timestamp::from_unix_micros(1_700_000_000_000_000).unwrap();
        assert_eq!(ts.canonical(), "2023-11-14T22:13:20.000000Z");

        let ts = Timestamp::from_unix_micros(1_700_000_000_123_456).unwrap();
        assert_eq!(ts.canonical(), "2023-11-14T22:13:20.123456Z");
    }

    #[test]
    fn sub_microsecond_precision_is_dropped() {
        let dt = DateTime::parse_from_rfc3339("2024-05-01T10:00:00.123456789Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.canonical(), "2024-05-01T10:00:00.123456Z");
    }

    #[test]
    fn parse_normalises_offsets_to_utc() {
        let ts = Timestamp::parse("2024-05-01T12:00:00.5+02:00").unwrap();
        assert_eq!(ts.canonical(), "2024-05-01T10:00:00.500000Z");
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = Timestamp::parse("yesterday").unwrap_err();
        assert!(matches!(err, TypeError::InvalidTimestamp(_)));
    }

    #[test]
    fn now_produces_reasonable_timestamp() {
        let ts = Timestamp::now();
        // Should be after 2020-01-01
        assert!(ts.unix_micros() > 1_577_836_800_000_000);
    }

    #[test]
    fn ordering_follows_time() {
        let a = Timestamp::from_unix_micros(1).unwrap();
        let b = Timestamp::from_unix_micros(2).unwrap();
        assert!(a < b);
    }

    #[test]
    fn serializes_as_canonical_string() {
        let ts = Timestamp::from_unix_micros(1_700_000_000_000_001).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2023-11-14T22:13:20.000001Z\"");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }

    proptest! {
        #[test]
        fn canonical_form_is_lossless(micros in 0i64..4_102_444_800_000_000) {
            let ts = Timestamp::from_unix_micros(micros).unwrap();
            prop_assert_eq!(Timestamp::parse(&ts.canonical()).unwrap(), ts);
        }
    }
}
