//! Domain DTOs for the item API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Only `id` and `name` are required on the wire. Everything else is optional
//! and omitted when absent, so a freshly added item serializes to exactly
//! `{"id": .., "name": ..}`.
//!
//! Optional fields are read leniently: a value of the wrong shape becomes
//! `None` instead of failing the record, so one odd record never fails a
//! whole list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// How a discarded item left the household.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RemovalMethod {
    #[serde(rename = "gespendet")]
    Donated,
    #[serde(rename = "recycled")]
    Recycled,
    #[serde(rename = "verkauft")]
    Sold,
    #[serde(rename = "entsorgt")]
    Trashed,
    /// Any value this client does not know, including `""`.
    #[serde(other)]
    Unknown,
}

/// A single discarded item as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Decimal string, assigned client-side before the create request.
    pub id: String,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason_for_removal: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,
    /// Age in years; fractional ages are kept.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub comments: Option<String>,
    /// RFC 3339 timestamp; a bare `YYYY-MM-DD` date is read as midnight UTC.
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_removed: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub removal_method: Option<RemovalMethod>,
}

/// Deserialize `T`, mapping `null` and any value of the wrong shape to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| v.as_str()).and_then(parse_date))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Item {
    /// Minimal record with every optional field absent.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reason_for_removal: None,
            photo_url: None,
            age: None,
            comments: None,
            date_removed: None,
            removal_method: None,
        }
    }
}
