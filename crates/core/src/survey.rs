//! Submission records: what one officer's submit produces.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::geo::ResolvedGeo;
use crate::validation::contact_digits;

// ---------------------------------------------------------------------------
// Form variants
// ---------------------------------------------------------------------------

/// Which of the two survey forms a session is filling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    /// One shared geography for the whole submission, a company per line.
    Simple,
    /// Per-line source/destination geography plus intermediate points.
    /// Behind the static password.
    Extended,
}

impl FormVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Extended => "extended",
        }
    }

    pub fn requires_password(&self) -> bool {
        matches!(self, Self::Extended)
    }
}

impl FromStr for FormVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "extended" => Ok(Self::Extended),
            other => Err(CoreError::Validation(format!("Unknown form variant '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Fiber cable strand-count category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreType {
    #[serde(rename = "48")]
    Core48,
    #[serde(rename = "24")]
    Core24,
    #[serde(rename = "12")]
    Core12,
}

impl CoreType {
    pub const ALL: [CoreType; 3] = [CoreType::Core48, CoreType::Core24, CoreType::Core12];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core48 => "48",
            Self::Core24 => "24",
            Self::Core12 => "12",
        }
    }
}

/// Fiber provider a line is leased from (simple form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Company {
    #[serde(rename = "Fiber@Home")]
    FiberAtHome,
    #[serde(rename = "Summit")]
    Summit,
}

impl Company {
    pub const ALL: [Company; 2] = [Company::FiberAtHome, Company::Summit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FiberAtHome => "Fiber@Home",
            Self::Summit => "Summit",
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Identity block shared by every row of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OfficerInfo {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1), custom(function = "contact_digits"))]
    pub contact: String,
    #[validate(length(min = 1))]
    pub designation: String,
    #[validate(length(min = 1))]
    pub workplace: String,
}

/// An intermediate splice or access point along a fiber run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub core_type: Option<CoreType>,
    #[serde(default)]
    pub distance_km: f64,
}

/// One end of a fiber run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Endpoint {
    /// Per-end geography (extended form only; empty in the simple form).
    pub geo: ResolvedGeo,
    pub name: String,
    pub core_type: Option<CoreType>,
    pub distance_km: f64,
}

/// One physical fiber run, source to destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FiberLineRecord {
    /// Provider (simple form only).
    pub company: Option<Company>,
    pub dependency_km: f64,
    pub source: Endpoint,
    pub destination: Endpoint,
    pub points: Vec<PointRecord>,
}

/// Everything one submit persists: an officer block and its lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionBatch {
    pub variant: FormVariant,
    pub officer: OfficerInfo,
    /// Shared geography (simple form only; empty in the extended form).
    pub shared_geo: ResolvedGeo,
    pub lines: Vec<FiberLineRecord>,
}
