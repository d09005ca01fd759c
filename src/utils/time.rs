//! Parsing and formatting for the timestamp shapes the API emits.

use crate::utils::error::{Result, SteamWebApiError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f+00:00";
const ISO_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

fn timestamp_error(value: &str, err: impl std::fmt::Display) -> SteamWebApiError {
    SteamWebApiError::Timestamp {
        value: value.to_string(),
        reason: err.to_string(),
    }
}

/// Parses `2024-05-01 12:30:45.123456`, read as UTC.
pub fn parse_timestamp(ts: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| timestamp_error(ts, e))
}

/// Parses `2024-05-01` to midnight UTC of that day.
pub fn parse_date(date: &str) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|e| timestamp_error(date, e))?;
    day.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| timestamp_error(date, "no midnight for date"))
}

/// Parses `2024-05-01T12:30:45.123456+00:00`.
pub fn parse_iso_utc_timestamp(ts: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(ts, ISO_UTC_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| timestamp_error(ts, e))
}

pub fn to_iso_format(dt: &DateTime<Utc>) -> String {
    dt.format(ISO_OUTPUT_FORMAT).to_string()
}

pub fn utcnow() -> DateTime<Utc> {
    Utc::now()
}

/// Serde adapter for fields holding [`parse_timestamp`]-style strings.
pub mod steam_timestamp {
    use super::{parse_timestamp, TIMESTAMP_OUTPUT_FORMAT};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&dt.format(TIMESTAMP_OUTPUT_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::super::{parse_timestamp, TIMESTAMP_OUTPUT_FORMAT};
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => serializer.collect_str(&dt.format(TIMESTAMP_OUTPUT_FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| parse_timestamp(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
