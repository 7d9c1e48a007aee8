//! ISO-8601 date and timestamp wire values.

use core::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// A calendar date without a time component, `YYYY-MM-DD` on the wire.
///
/// Used for document issuance and expiry dates and voucher birthdates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SimpleDate(NaiveDate);

impl SimpleDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for SimpleDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| anyhow!("invalid date: {s}"))
    }
}

impl TryFrom<String> for SimpleDate {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SimpleDate> for String {
    fn from(value: SimpleDate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SimpleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl TryFrom<Json> for SimpleDate {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let s: String = serde_json::from_value(value)?;
        s.parse()
    }
}

impl From<SimpleDate> for Json {
    fn from(value: SimpleDate) -> Self {
        Json::String(value.to_string())
    }
}

/// An ISO-8601 timestamp with a time zone offset.
///
/// Identity assurance examples use minutes precision (`2012-04-23T18:25Z`,
/// `2012-04-23T18:25+09:00`); full RFC 3339 timestamps are accepted as well.
/// Serialization normalizes to seconds-precision RFC 3339, with `Z` for UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateWithTimeZoneOffset(DateTime<FixedOffset>);

impl DateWithTimeZoneOffset {
    pub fn new(timestamp: DateTime<FixedOffset>) -> Self {
        Self(timestamp)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl FromStr for DateWithTimeZoneOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt));
        }
        // Minutes precision with a numeric offset.
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
            return Ok(Self(dt));
        }
        // Minutes precision in UTC.
        if let Some(prefix) = s.strip_suffix('Z') {
            if let Ok(naive) = NaiveDateTime::parse_from_str(prefix, "%Y-%m-%dT%H:%M") {
                return Ok(Self(naive.and_utc().fixed_offset()));
            }
        }
        Err(anyhow!("invalid date-time: {s}"))
    }
}

impl TryFrom<String> for DateWithTimeZoneOffset {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DateWithTimeZoneOffset> for String {
    fn from(value: DateWithTimeZoneOffset) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DateWithTimeZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl TryFrom<Json> for DateWithTimeZoneOffset {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let s: String = serde_json::from_value(value)?;
        s.parse()
    }
}

impl From<DateWithTimeZoneOffset> for Json {
    fn from(value: DateWithTimeZoneOffset) -> Self {
        Json::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_date_round_trip() {
        let date: SimpleDate = "2010-03-23".parse().unwrap();
        assert_eq!(date.to_string(), "2010-03-23");
    }

    #[test]
    fn simple_date_rejects_other_shapes() {
        assert!("2010-3-23".parse::<SimpleDate>().is_err());
        assert!("2010-03-23T18:25Z".parse::<SimpleDate>().is_err());
        assert!("23.03.2010".parse::<SimpleDate>().is_err());
    }

    #[test]
    fn minutes_precision_utc() {
        let dtz: DateWithTimeZoneOffset = "2012-04-23T18:25Z".parse().unwrap();
        assert_eq!(dtz.to_string(), "2012-04-23T18:25:00Z");
    }

    #[test]
    fn minutes_precision_with_offset() {
        let dtz: DateWithTimeZoneOffset = "2012-04-23T18:25+09:00".parse().unwrap();
        assert_eq!(dtz.to_string(), "2012-04-23T18:25:00+09:00");
    }

    #[test]
    fn rfc3339_is_accepted() {
        let dtz: DateWithTimeZoneOffset = "2021-05-11T14:29:00Z".parse().unwrap();
        assert_eq!(dtz.to_string(), "2021-05-11T14:29:00Z");
    }

    #[test]
    fn invalid_timestamps_fail() {
        assert!("2012-04-23".parse::<DateWithTimeZoneOffset>().is_err());
        assert!("2012-04-23T18:25".parse::<DateWithTimeZoneOffset>().is_err());
        let err = "not-a-date".parse::<DateWithTimeZoneOffset>().unwrap_err();
        assert_eq!(err.to_string(), "invalid date-time: not-a-date");
    }
}
