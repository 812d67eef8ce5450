//! Flattening a submission into spreadsheet rows.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde_json::json;

use crate::geo::ResolvedGeo;
use crate::labels::*;
use crate::survey::{Endpoint, FiberLineRecord, FormVariant, SubmissionBatch};

/// One persisted row, keyed by column header in insertion order.
pub type SheetRow = IndexMap<String, String>;

/// Timestamp format of the `Timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SIMPLE_COLUMNS: &[&str] = &[
    COL_TIMESTAMP,
    COL_NAME,
    COL_CONTACT,
    COL_DESIGNATION,
    COL_WORKPLACE,
    COL_LINE_NO,
    COL_DIVISION,
    COL_DISTRICT,
    COL_UPAZILA,
    COL_UNION,
    COL_COMPANY,
    COL_SOURCE,
    COL_SOURCE_CORE,
    COL_SOURCE_DISTANCE,
    COL_DEST,
    COL_DEST_CORE,
    COL_DEST_DISTANCE,
    COL_DEPENDENCY,
];

const EXTENDED_COLUMNS: &[&str] = &[
    COL_TIMESTAMP,
    COL_NAME,
    COL_CONTACT,
    COL_DESIGNATION,
    COL_WORKPLACE,
    COL_LINE_NO,
    COL_SOURCE_DIVISION,
    COL_SOURCE_DISTRICT,
    COL_SOURCE_UPAZILA,
    COL_SOURCE_UNION,
    COL_SOURCE,
    COL_SOURCE_CORE,
    COL_SOURCE_DISTANCE,
    COL_DEST_DIVISION,
    COL_DEST_DISTRICT,
    COL_DEST_UPAZILA,
    COL_DEST_UNION,
    COL_DEST,
    COL_DEST_CORE,
    COL_DEST_DISTANCE,
    COL_DEPENDENCY,
    COL_POINTS,
];

/// The persisted column order for a form variant.
pub fn column_order(variant: FormVariant) -> &'static [&'static str] {
    match variant {
        FormVariant::Simple => SIMPLE_COLUMNS,
        FormVariant::Extended => EXTENDED_COLUMNS,
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// One row per line, all stamped with the same `timestamp` and carrying the
/// same officer block.
pub fn survey_rows(batch: &SubmissionBatch, timestamp: &str) -> Vec<SheetRow> {
    batch
        .lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let mut row = SheetRow::new();
            let mut put = |col: &str, value: String| {
                row.insert(col.to_string(), value);
            };

            put(COL_TIMESTAMP, timestamp.to_string());
            put(COL_NAME, batch.officer.name.clone());
            put(COL_CONTACT, batch.officer.contact.clone());
            put(COL_DESIGNATION, batch.officer.designation.clone());
            put(COL_WORKPLACE, batch.officer.workplace.clone());
            put(COL_LINE_NO, (idx + 1).to_string());

            match batch.variant {
                FormVariant::Simple => {
                    put_geo(&mut put, &batch.shared_geo, [COL_DIVISION, COL_DISTRICT, COL_UPAZILA, COL_UNION]);
                    put(
                        COL_COMPANY,
                        line.company.map(|c| c.as_str().to_string()).unwrap_or_default(),
                    );
                    put_endpoint(&mut put, &line.source, [COL_SOURCE, COL_SOURCE_CORE, COL_SOURCE_DISTANCE]);
                    put_endpoint(&mut put, &line.destination, [COL_DEST, COL_DEST_CORE, COL_DEST_DISTANCE]);
                    put(COL_DEPENDENCY, format_km(line.dependency_km));
                }
                FormVariant::Extended => {
                    put_geo(
                        &mut put,
                        &line.source.geo,
                        [COL_SOURCE_DIVISION, COL_SOURCE_DISTRICT, COL_SOURCE_UPAZILA, COL_SOURCE_UNION],
                    );
                    put_endpoint(&mut put, &line.source, [COL_SOURCE, COL_SOURCE_CORE, COL_SOURCE_DISTANCE]);
                    put_geo(
                        &mut put,
                        &line.destination.geo,
                        [COL_DEST_DIVISION, COL_DEST_DISTRICT, COL_DEST_UPAZILA, COL_DEST_UNION],
                    );
                    put_endpoint(&mut put, &line.destination, [COL_DEST, COL_DEST_CORE, COL_DEST_DISTANCE]);
                    put(COL_DEPENDENCY, format_km(line.dependency_km));
                    put(COL_POINTS, points_cell(line));
                }
            }

            row
        })
        .collect()
}

fn put_geo(put: &mut impl FnMut(&str, String), geo: &ResolvedGeo, cols: [&str; 4]) {
    put(cols[0], geo.division.clone());
    put(cols[1], geo.district.clone());
    put(cols[2], geo.upazila.clone());
    put(cols[3], geo.union.clone());
}

fn put_endpoint(put: &mut impl FnMut(&str, String), end: &Endpoint, cols: [&str; 3]) {
    put(cols[0], end.name.clone());
    put(
        cols[1],
        end.core_type.map(|c| c.as_str().to_string()).unwrap_or_default(),
    );
    put(cols[2], format_km(end.distance_km));
}

/// JSON array of the line's points, or empty when there are none.
fn points_cell(line: &FiberLineRecord) -> String {
    if line.points.is_empty() {
        return String::new();
    }
    let points: Vec<_> = line
        .points
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            json!({
                "index": idx + 1,
                "name": p.name,
                "core_type": p.core_type.map(|c| c.as_str()),
                "distance_km": p.distance_km,
            })
        })
        .collect();
    serde_json::Value::Array(points).to_string()
}

fn format_km(km: f64) -> String {
    km.to_string()
}
