//! User-facing Bengali strings shared by validation, rows, and the HTTP layer.
//!
//! The form is Bengali-only; these are hardcoded rather than routed through
//! a translation catalog.

// ---------------------------------------------------------------------------
// Selector sentinels
// ---------------------------------------------------------------------------

/// The "not yet chosen" entry at the top of every selector.
pub const PLACEHOLDER: &str = "-- নির্বাচন করুন --";

/// The free-text escape at the bottom of every selector.
pub const OTHER: &str = "অন্যান্য";

/// Top-level tree key for districts whose division cannot be resolved.
/// Distinct from [`OTHER`] so the bucket stays selectable.
pub const UNKNOWN_DIVISION: &str = "অজানা বিভাগ";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Designations offered in the officer section (free text via [`OTHER`]).
pub const DESIGNATIONS: &[&str] = &[
    "প্রোগ্রামার",
    "মেইনটেন্যান্স ইঞ্জিনিয়ার",
    "নেটওয়ার্ক ইঞ্জিনিয়ার",
    "সহকারী পরিচালক",
    "সহকারী প্রোগ্রামার",
    "সহকারী মেইনটেন্যান্স ইঞ্জিনিয়ার",
    "সহকারী নেটওয়ার্ক ইঞ্জিনিয়ার",
    "ওয়েবসাইট এ্যাডমিনিস্ট্রেটর",
];

// ---------------------------------------------------------------------------
// Field labels (validation messages)
// ---------------------------------------------------------------------------

pub const FIELD_NAME: &str = "তথ্য প্রদানকারীর নাম (Name) *";
pub const FIELD_CONTACT: &str = "যোগাযোগ নম্বর *";
pub const FIELD_CONTACT_INVALID: &str =
    "যোগাযোগ নম্বর সঠিক নয় (১১ ডিজিট ও শুধুমাত্র সংখ্যা হতে হবে)";
pub const FIELD_DESIGNATION: &str = "পদবী (Designation) *";
pub const FIELD_WORKPLACE: &str = "কর্মস্থলের নাম (Workplace Name) *";

pub const FIELD_DIVISION: &str = "বিভাগ (Division)";
pub const FIELD_DISTRICT: &str = "জেলা (District)";
pub const FIELD_UPAZILA: &str = "উপজেলা (Upazila)";
pub const FIELD_UNION: &str = "ইউনিয়ন (Union)";

pub const FIELD_COMPANY: &str = "কোম্পানির নাম (Company) *";
pub const FIELD_DEPENDENCY: &str = "ডিপেন্ডেন্সি / Dependency (KM) *";
pub const FIELD_SOURCE_NAME: &str = "উৎস (Source Name) *";
pub const FIELD_SOURCE_CORE: &str = "উৎস কোর টাইপ *";
pub const FIELD_SOURCE_DISTANCE: &str = "উৎস দূরত্ব / Distance (KM) *";
pub const FIELD_DEST_NAME: &str = "গন্তব্য (Destination Name) *";
pub const FIELD_DEST_CORE: &str = "গন্তব্য কোর টাইপ *";
pub const FIELD_DEST_DISTANCE: &str = "গন্তব্য দূরত্ব / Distance (KM) *";
pub const FIELD_POINT_DISTANCE: &str = "পয়েন্ট দূরত্ব / Distance (KM)";

/// Prefix for the per-line source geography labels in the extended form.
pub const SOURCE_PREFIX: &str = "উৎস";

/// Prefix for the per-line destination geography labels in the extended form.
pub const DEST_PREFIX: &str = "গন্তব্য";

/// Suffix identifying which fiber line a message belongs to (1-based).
pub fn line_suffix(line_number: usize) -> String {
    format!("(লাইন {line_number})")
}

// ---------------------------------------------------------------------------
// Persisted column headers
// ---------------------------------------------------------------------------

pub const COL_TIMESTAMP: &str = "Timestamp";
pub const COL_NAME: &str = "নাম";
pub const COL_CONTACT: &str = "যোগাযোগ নম্বর";
pub const COL_DESIGNATION: &str = "পদবী";
pub const COL_WORKPLACE: &str = "কর্মস্থল";
pub const COL_LINE_NO: &str = "লাইন নং";
pub const COL_DIVISION: &str = "বিভাগ";
pub const COL_DISTRICT: &str = "জেলা";
pub const COL_UPAZILA: &str = "উপজেলা";
pub const COL_UNION: &str = "ইউনিয়ন";
pub const COL_COMPANY: &str = "কোম্পানির নাম";
pub const COL_SOURCE: &str = "উৎস (Source)";
pub const COL_SOURCE_CORE: &str = "উৎস কোর টাইপ";
pub const COL_SOURCE_DISTANCE: &str = "উৎস দূরত্ব (KM)";
pub const COL_SOURCE_DIVISION: &str = "উৎস বিভাগ";
pub const COL_SOURCE_DISTRICT: &str = "উৎস জেলা";
pub const COL_SOURCE_UPAZILA: &str = "উৎস উপজেলা";
pub const COL_SOURCE_UNION: &str = "উৎস ইউনিয়ন";
pub const COL_DEST: &str = "গন্তব্য (Destination)";
pub const COL_DEST_CORE: &str = "গন্তব্য কোর টাইপ";
pub const COL_DEST_DISTANCE: &str = "গন্তব্য দূরত্ব (KM)";
pub const COL_DEST_DIVISION: &str = "গন্তব্য বিভাগ";
pub const COL_DEST_DISTRICT: &str = "গন্তব্য জেলা";
pub const COL_DEST_UPAZILA: &str = "গন্তব্য উপজেলা";
pub const COL_DEST_UNION: &str = "গন্তব্য ইউনিয়ন";
pub const COL_DEPENDENCY: &str = "ডিপেন্ডেন্সি (KM)";
pub const COL_POINTS: &str = "পয়েন্টসমূহ (Points)";
