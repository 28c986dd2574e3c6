//! Serde helpers for the UI boundary.
//!
//! The scheduling screens exchange dates as `MM/DD/YYYY` strings and some
//! legacy payloads still send booleans as `"true"`/`"false"`. Records use
//! `chrono::NaiveDate` and `bool` internally and convert only here.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

pub const MDY_FORMAT: &str = "%m/%d/%Y";

pub fn format_mdy(date: &NaiveDate) -> String {
    date.format(MDY_FORMAT).to_string()
}

pub fn parse_mdy(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), MDY_FORMAT).ok()
}

/// `#[serde(with = "mdy")]` for required dates.
pub mod mdy {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_mdy(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_mdy(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid date '{raw}', expected MM/DD/YYYY"))
        })
    }
}

/// `#[serde(with = "mdy_option")]` for optional dates. Blank strings read as `None`.
pub mod mdy_option {
    use super::*;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&format_mdy(d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_mdy(s).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid date '{s}', expected MM/DD/YYYY"))
            }),
        }
    }
}

/// `#[serde(deserialize_with = "flag")]`: accepts `true`, `"true"`, `"TRUE"`, `"false"`, `""`.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Text(String),
    }

    match RawFlag::deserialize(deserializer)? {
        RawFlag::Bool(b) => Ok(b),
        RawFlag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid flag '{other}'"))),
        },
    }
}
