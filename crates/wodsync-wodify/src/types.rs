//! Wodify API types and data structures.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Wire format for class timestamps: UTC with a literal `Z`, second precision.
const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One upcoming class assigned to the coach.
///
/// Read-only: fetched fresh on every run, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRecord {
    pub name: String,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Why a wire record could not become a [`ClassRecord`].
#[derive(Error, Debug)]
pub enum InvalidClass {
    #[error("unparseable timestamp {0:?}")]
    BadTimestamp(String),

    #[error("class does not start before it ends ({start} >= {end})")]
    Unordered {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl ClassRecord {
    /// Convert a wire record, enforcing `start < end`.
    pub fn from_api(api: ApiClass) -> Result<Self, InvalidClass> {
        let start = parse_wire_timestamp(&api.start_date_time)?;
        let end = parse_wire_timestamp(&api.end_date_time)?;

        if start >= end {
            return Err(InvalidClass::Unordered { start, end });
        }

        Ok(Self {
            name: api.name,
            location: api.location,
            start,
            end,
        })
    }
}

fn parse_wire_timestamp(raw: &str) -> Result<DateTime<Utc>, InvalidClass> {
    NaiveDateTime::parse_from_str(raw, WIRE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| InvalidClass::BadTimestamp(raw.to_string()))
}

// API Response Types

/// Class object as returned by the Wodify search endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiClass {
    pub name: String,
    pub location: Option<String>,
    pub start_date_time: String,
    pub end_date_time: String,
}

/// Response envelope of `/v1/classes/search`.
#[derive(Debug, Deserialize)]
pub struct ClassesResponse {
    #[serde(default)]
    pub classes: Vec<ApiClass>,
}
