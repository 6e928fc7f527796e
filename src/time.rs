//! Timestamps as emitted by the DNS API.
//!
//! The API is not consistent about how it formats points in time. Zones use
//! `2020-04-07 01:24:37 +0000 UTC`, sometimes with a fractional part and
//! sometimes with a trailing monotonic clock reading (` m=+755.322810452`),
//! while records and primary servers may use RFC 3339. [`ApiTime`] accepts all
//! of them and always serializes to RFC 3339.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Seconds between the Unix epoch and `0001-01-01T00:00:00Z`.
const ZERO_SECS: i64 = -62_135_596_800;

const STANDARD_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.f %z UTC";
const MONOTONIC_MARKER: &str = " m=";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unable to parse time {input:?}, tried layouts {tried:?}")]
pub struct TimeParseError {
    input: String,
    tried: Vec<&'static str>,
}

impl TimeParseError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The layouts that were tried, in order.
    pub fn tried(&self) -> &[&'static str] {
        &self.tried
    }
}

#[derive(Clone, Copy)]
enum Layout {
    Standard,
    Monotonic,
    Rfc3339,
}

impl Layout {
    const ORDER: [Layout; 3] = [Layout::Standard, Layout::Monotonic, Layout::Rfc3339];

    fn name(self) -> &'static str {
        match self {
            Layout::Standard => "2006-01-02 15:04:05 -0700 UTC",
            Layout::Monotonic => "2006-01-02 15:04:05.999999999 -0700 UTC m=+0.000000000",
            Layout::Rfc3339 => "RFC 3339",
        }
    }

    fn parse(self, s: &str) -> Option<DateTime<Utc>> {
        let parsed = match self {
            Layout::Standard => DateTime::parse_from_str(s, STANDARD_LAYOUT),
            Layout::Monotonic => {
                let (time, clock) = s.rsplit_once(MONOTONIC_MARKER)?;
                if !clock.starts_with(['+', '-']) {
                    return None;
                }
                DateTime::parse_from_str(time, STANDARD_LAYOUT)
            }
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(s),
        };
        parsed.ok().map(|t| t.with_timezone(&Utc))
    }
}

/// A point in time as returned by the API.
///
/// The zero value (`0001-01-01T00:00:00Z`) stands for "not set"; the API
/// sends an empty string in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiTime(DateTime<Utc>);

impl ApiTime {
    /// The zero timestamp.
    pub fn zero() -> Self {
        Self(DateTime::from_timestamp(ZERO_SECS, 0).unwrap_or_default())
    }

    /// Whether this is the zero timestamp.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Parses a timestamp, trying each known layout in turn.
    ///
    /// An empty string parses to [`ApiTime::zero`].
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        if input.is_empty() {
            return Ok(Self::zero());
        }

        let mut tried = Vec::with_capacity(Layout::ORDER.len());
        for layout in Layout::ORDER {
            if let Some(time) = layout.parse(input) {
                return Ok(Self(time));
            }
            tried.push(layout.name());
        }

        Err(TimeParseError {
            input: input.to_string(),
            tried,
        })
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Formats as RFC 3339, with fractional seconds only when present.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl Default for ApiTime {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<DateTime<Utc>> for ApiTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<ApiTime> for DateTime<Utc> {
    fn from(value: ApiTime) -> Self {
        value.0
    }
}

impl FromStr for ApiTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ApiTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for ApiTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for ApiTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        match Option::<String>::deserialize(deserializer)? {
            Some(s) => Self::parse(&s).map_err(D::Error::custom),
            None => Ok(Self::zero()),
        }
    }
}
