//! Vendor-observation timestamps carried on quotes.

use std::fmt::{Display, Formatter};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::error::ValidationError;

/// Moment a quote was produced, always UTC, rendered as RFC3339.
///
/// The service stamps quotes itself at normalization time rather than
/// trusting vendor clock fields, so the only ways in are `now()` and strict
/// RFC3339-UTC parsing (used when quotes round-trip through JSON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Strict RFC3339 with the `Z` suffix. A valid timestamp in a non-zero
    /// offset is rejected rather than converted; a quote stamp that is not
    /// already UTC means something upstream mishandled it.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let not_utc = || ValidationError::TimestampNotUtc {
            value: input.to_owned(),
        };

        let parsed = OffsetDateTime::parse(input, &Rfc3339).map_err(|_| not_utc())?;
        if parsed.offset() != UtcOffset::UTC {
            return Err(not_utc());
        }
        Ok(Self(parsed))
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .expect("UTC timestamps are always RFC3339 formattable")
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_utc_timestamps() {
        let parsed = UtcDateTime::parse("2026-08-28T14:30:00Z").expect("must parse");
        assert_eq!(parsed.format_rfc3339(), "2026-08-28T14:30:00Z");
    }

    #[test]
    fn rejects_offset_timestamps() {
        let err = UtcDateTime::parse("2026-08-28T14:30:00-03:00").expect_err("must fail");
        assert!(matches!(err, ValidationError::TimestampNotUtc { .. }));
    }

    #[test]
    fn quote_stamps_deserialize_strictly() {
        let ok: Result<UtcDateTime, _> = serde_json::from_str(r#""2026-08-28T14:30:00Z""#);
        assert!(ok.is_ok());

        let err: Result<UtcDateTime, _> = serde_json::from_str(r#""2026-08-28T14:30:00+01:00""#);
        assert!(err.is_err());
    }
}
