//! Raw geographic unit records.
//!
//! The upstream datasets are phpMyAdmin-style JSON exports: a list of
//! wrapper objects where the table object carries the rows under `data`.
//! Identifiers show up both as strings and as numbers, so every id field is
//! normalised to a string.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One division, district, upazila, or union row.
///
/// Only the fields the tree builder reads are kept; everything else in the
/// upstream row is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeoRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bn_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub division_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub district_id: Option<String>,
    /// Parent reference on unions (upstream spelling).
    #[serde(default, deserialize_with = "lenient_string")]
    pub upazilla_id: Option<String>,
    /// Parent reference on unions (alternate spelling).
    #[serde(default, deserialize_with = "lenient_string")]
    pub upazila_id: Option<String>,
}

impl GeoRecord {
    /// Localized name first, then the secondary name, then the id.
    pub fn display_name(&self) -> String {
        first_non_empty([&self.bn_name, &self.name, &self.id])
            .unwrap_or_default()
            .to_string()
    }

    /// The parent upazila of a union under either field spelling; empty
    /// when neither is present.
    pub fn parent_upazila(&self) -> &str {
        first_non_empty([&self.upazilla_id, &self.upazila_id]).unwrap_or("")
    }
}

/// The four raw datasets, in hierarchy order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoSources {
    pub divisions: Vec<GeoRecord>,
    pub districts: Vec<GeoRecord>,
    pub upazilas: Vec<GeoRecord>,
    pub unions: Vec<GeoRecord>,
}

/// Pull the record list out of a fetched document.
///
/// Accepted shapes, in priority order:
/// 1. a list containing wrapper objects -- the first one with `data` wins;
/// 2. an object with a `data` field;
/// 3. a bare list of records.
///
/// Anything else yields an empty list. Rows without an `id` are dropped.
pub fn extract_records(doc: &Value) -> Vec<GeoRecord> {
    let rows = match doc {
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.as_object().and_then(|obj| obj.get("data")))
            .map_or(Some(items), Value::as_array),
        Value::Object(obj) => obj.get("data").and_then(Value::as_array),
        _ => None,
    };

    rows.map(|rows| {
        rows.iter()
            .filter_map(|row| GeoRecord::deserialize(row).ok())
            .filter(|record| record.id.is_some())
            .collect()
    })
    .unwrap_or_default()
}

fn first_non_empty<const N: usize>(candidates: [&Option<String>; N]) -> Option<&str> {
    candidates
        .into_iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
}

/// Accept a string, number, or null for an id/name field.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
