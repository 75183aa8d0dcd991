use super::ValidationError;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An audit timestamp as the API reports it: UTC, millisecond precision.
///
/// Always encoded as `YYYY-MM-DDTHH:MM:SS.mmmZ`, the format the server
/// emits, so server timestamps re-encode byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wrap a UTC instant, truncated to whole milliseconds.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at.trunc_subsecs(3))
    }

    /// Parse any RFC 3339 timestamp and normalize it to UTC.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        DateTime::parse_from_rfc3339(input)
            .map(|at| Self::new(at.with_timezone(&Utc)))
            .map_err(|e| ValidationError::InvalidTimestamp(format!("{}: {}", input, e)))
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The wire representation.
    pub fn to_wire(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::new(at)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn server_format_is_reproduced() {
        let ts = Timestamp::parse("2022-03-01T19:05:00.000Z").unwrap();
        assert_eq!(ts.to_wire(), "2022-03-01T19:05:00.000Z");
    }

    #[test]
    fn offsets_normalize_to_utc() {
        let ts = Timestamp::parse("2022-03-01T21:05:00.250+02:00").unwrap();
        assert_eq!(ts.to_wire(), "2022-03-01T19:05:00.250Z");
    }

    #[test]
    fn sub_millisecond_precision_is_truncated() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        assert_eq!(Timestamp::new(at).to_wire(), "2024-01-02T03:04:05.123Z");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
        assert!(serde_json::from_str::<Timestamp>("\"2022-13-01\"").is_err());
    }
}
