//! Submit-time validation.
//!
//! A submission is checked as a whole and every problem is reported at once,
//! by the label the officer sees on the form, so the form can show a single
//! list of what to fix.

use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::geo::ResolvedGeo;
use crate::labels;
use crate::survey::{FiberLineRecord, FormVariant, OfficerInfo, SubmissionBatch};

/// Required length of a contact number.
pub const CONTACT_DIGITS: usize = 11;

/// Validator error code for a non-empty but malformed contact number.
const CONTACT_CODE: &str = "contact_digits";

/// `true` if `contact` is exactly eleven decimal digits.
///
/// Bengali digits (০-৯) are accepted alongside ASCII ones since officers type
/// on Bengali keyboards.
pub fn is_valid_contact(contact: &str) -> bool {
    contact.chars().count() == CONTACT_DIGITS && contact.chars().all(is_decimal_digit)
}

fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit() || ('\u{09E6}'..='\u{09EF}').contains(&c)
}

/// `validator` hook for [`OfficerInfo::contact`]. Emptiness is reported by
/// the `length` rule, so an empty value passes here.
pub fn contact_digits(contact: &str) -> Result<(), ValidationError> {
    if contact.is_empty() || is_valid_contact(contact) {
        Ok(())
    } else {
        Err(ValidationError::new(CONTACT_CODE))
    }
}

/// Check a full submission.
///
/// Returns [`CoreError::Incomplete`] listing every missing or invalid field
/// in form order: officer block, shared geography (simple form), then each
/// line.
pub fn validate_batch(batch: &SubmissionBatch) -> Result<(), CoreError> {
    let mut fields = officer_problems(&batch.officer);

    if batch.variant == FormVariant::Simple {
        fields.extend(
            batch
                .shared_geo
                .missing_levels()
                .into_iter()
                .map(|level| level.label().to_string()),
        );
    }

    for (idx, line) in batch.lines.iter().enumerate() {
        line_problems(line, batch.variant, idx + 1, &mut fields);
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Incomplete { fields })
    }
}

fn officer_problems(officer: &OfficerInfo) -> Vec<String> {
    let Err(errors) = officer.validate() else {
        return Vec::new();
    };
    let by_field = errors.field_errors();

    let checks = [
        ("name", labels::FIELD_NAME),
        ("contact", labels::FIELD_CONTACT),
        ("designation", labels::FIELD_DESIGNATION),
        ("workplace", labels::FIELD_WORKPLACE),
    ];

    let mut fields = Vec::new();
    for (field, label) in checks {
        let Some(errs) = by_field.get(field) else {
            continue;
        };
        if errs.iter().all(|e| e.code == CONTACT_CODE) {
            fields.push(labels::FIELD_CONTACT_INVALID.to_string());
        } else {
            fields.push(label.to_string());
        }
    }
    fields
}

fn line_problems(line: &FiberLineRecord, variant: FormVariant, number: usize, out: &mut Vec<String>) {
    let suffix = labels::line_suffix(number);
    let mut missing = |label: &str| out.push(format!("{label} {suffix}"));

    match variant {
        FormVariant::Simple => {
            if line.company.is_none() {
                missing(labels::FIELD_COMPANY);
            }
        }
        FormVariant::Extended => {
            for level in geo_gaps(&line.source.geo) {
                missing(&format!("{} {level}", labels::SOURCE_PREFIX));
            }
        }
    }

    if !is_distance(line.dependency_km) {
        missing(labels::FIELD_DEPENDENCY);
    }
    if line.source.name.is_empty() {
        missing(labels::FIELD_SOURCE_NAME);
    }
    if line.source.core_type.is_none() {
        missing(labels::FIELD_SOURCE_CORE);
    }
    if !is_distance(line.source.distance_km) {
        missing(labels::FIELD_SOURCE_DISTANCE);
    }

    if variant == FormVariant::Extended {
        for level in geo_gaps(&line.destination.geo) {
            missing(&format!("{} {level}", labels::DEST_PREFIX));
        }
    }

    if line.destination.name.is_empty() {
        missing(labels::FIELD_DEST_NAME);
    }
    if line.destination.core_type.is_none() {
        missing(labels::FIELD_DEST_CORE);
    }
    if !is_distance(line.destination.distance_km) {
        missing(labels::FIELD_DEST_DISTANCE);
    }

    for (idx, point) in line.points.iter().enumerate() {
        if !is_distance(point.distance_km) {
            missing(&format!("{} #{}", labels::FIELD_POINT_DISTANCE, idx + 1));
        }
    }
}

fn geo_gaps(geo: &ResolvedGeo) -> Vec<&'static str> {
    geo.missing_levels().into_iter().map(|l| l.label()).collect()
}

/// Distances are non-negative and finite.
fn is_distance(km: f64) -> bool {
    km.is_finite() && km >= 0.0
}
