//! Editable form state: the officer block, the shared geography, and the
//! line/point repeater.
//!
//! Lines and points are plain vectors addressed by 0-based index. Growing a
//! list appends a blank entry; shrinking drops the last entry together with
//! its values, so a later grow never resurrects old input.

use serde::{Deserialize, Serialize};

use crate::choice::Choice;
use crate::error::CoreError;
use crate::geo::{GeoSelection, ResolvedGeo};
use crate::survey::{
    Company, CoreType, Endpoint, FiberLineRecord, FormVariant, OfficerInfo, PointRecord,
    SubmissionBatch,
};

/// Minimum number of lines a draft ever holds.
pub const MIN_LINES: usize = 1;

/// Officer identity as typed; designation is a selector with free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub designation: Choice,
    #[serde(default)]
    pub workplace: String,
}

impl OfficerDraft {
    pub fn resolved(&self) -> OfficerInfo {
        OfficerInfo {
            name: self.name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            designation: self.designation.resolve(),
            workplace: self.workplace.trim().to_string(),
        }
    }
}

/// One end of a line as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointDraft {
    /// Only read by the extended form.
    #[serde(default)]
    pub geo: GeoSelection,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub core_type: Option<CoreType>,
    #[serde(default)]
    pub distance_km: f64,
}

impl EndpointDraft {
    fn resolved(&self, with_geo: bool) -> Endpoint {
        Endpoint {
            geo: if with_geo {
                self.geo.resolved()
            } else {
                ResolvedGeo::default()
            },
            name: self.name.trim().to_string(),
            core_type: self.core_type,
            distance_km: self.distance_km,
        }
    }
}

/// The editable scalar fields of one line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineFields {
    /// Only read by the simple form.
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default)]
    pub dependency_km: f64,
    #[serde(default)]
    pub source: EndpointDraft,
    #[serde(default)]
    pub destination: EndpointDraft,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineDraft {
    #[serde(flatten)]
    pub fields: LineFields,
    #[serde(default)]
    pub points: Vec<PointRecord>,
}

/// The whole form for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyDraft {
    pub officer: OfficerDraft,
    /// Shared geography (simple form).
    pub geo: GeoSelection,
    lines: Vec<LineDraft>,
}

impl Default for SurveyDraft {
    fn default() -> Self {
        Self {
            officer: OfficerDraft::default(),
            geo: GeoSelection::default(),
            lines: vec![LineDraft::default(); MIN_LINES],
        }
    }
}

impl SurveyDraft {
    pub fn lines(&self) -> &[LineDraft] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn point_count(&self, line: usize) -> Result<usize, CoreError> {
        Ok(self.line(line)?.points.len())
    }

    pub fn add_line(&mut self) -> usize {
        self.lines.push(LineDraft::default());
        self.lines.len()
    }

    /// Drop the last line. The first line is never removed.
    pub fn remove_line(&mut self) -> usize {
        if self.lines.len() > MIN_LINES {
            self.lines.pop();
        }
        self.lines.len()
    }

    pub fn add_point(&mut self, line: usize) -> Result<usize, CoreError> {
        let points = &mut self.line_mut(line)?.points;
        points.push(PointRecord::default());
        Ok(points.len())
    }

    /// Drop the last point of `line`; a no-op when it has none.
    pub fn remove_point(&mut self, line: usize) -> Result<usize, CoreError> {
        let points = &mut self.line_mut(line)?.points;
        points.pop();
        Ok(points.len())
    }

    pub fn update_line(&mut self, line: usize, fields: LineFields) -> Result<(), CoreError> {
        self.line_mut(line)?.fields = fields;
        Ok(())
    }

    pub fn update_point(
        &mut self,
        line: usize,
        point: usize,
        value: PointRecord,
    ) -> Result<(), CoreError> {
        let slot = self
            .line_mut(line)?
            .points
            .get_mut(point)
            .ok_or(CoreError::NotFound {
                entity: "Point",
                index: point,
            })?;
        *slot = value;
        Ok(())
    }

    /// Back to one blank line with no points. Officer and geography stay.
    pub fn reset_lines(&mut self) {
        self.lines = vec![LineDraft::default(); MIN_LINES];
    }

    /// State after a successful submit: the repeater resets and the shared
    /// union is cleared, while the officer block and the shared division,
    /// district, and upazila carry over to the next submission.
    pub fn reset_after_submit(&mut self) {
        self.reset_lines();
        self.geo.union = Choice::Unset;
    }

    /// Resolve every selector into the records one submit persists.
    ///
    /// Fields the variant does not show are left out: the simple form drops
    /// per-line geography and points, the extended form drops the shared
    /// geography and company.
    pub fn to_batch(&self, variant: FormVariant) -> SubmissionBatch {
        let extended = variant == FormVariant::Extended;

        let lines = self
            .lines
            .iter()
            .map(|line| FiberLineRecord {
                company: if extended { None } else { line.fields.company },
                dependency_km: line.fields.dependency_km,
                source: line.fields.source.resolved(extended),
                destination: line.fields.destination.resolved(extended),
                points: if extended {
                    line.points
                        .iter()
                        .map(|p| PointRecord {
                            name: p.name.trim().to_string(),
                            ..p.clone()
                        })
                        .collect()
                } else {
                    Vec::new()
                },
            })
            .collect();

        SubmissionBatch {
            variant,
            officer: self.officer.resolved(),
            shared_geo: if extended {
                ResolvedGeo::default()
            } else {
                self.geo.resolved()
            },
            lines,
        }
    }

    fn line(&self, index: usize) -> Result<&LineDraft, CoreError> {
        self.lines.get(index).ok_or(CoreError::NotFound {
            entity: "Line",
            index,
        })
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut LineDraft, CoreError> {
        self.lines.get_mut(index).ok_or(CoreError::NotFound {
            entity: "Line",
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn filled_line(name: &str) -> LineFields {
        LineFields {
            company: Some(Company::FiberAtHome),
            dependency_km: 1.0,
            source: EndpointDraft {
                name: name.into(),
                core_type: Some(CoreType::Core48),
                distance_km: 2.5,
                ..Default::default()
            },
            destination: EndpointDraft {
                name: "গন্তব্য".into(),
                core_type: Some(CoreType::Core12),
                distance_km: 0.5,
                ..Default::default()
            },
        }
    }

    #[test]
    fn starts_with_one_blank_line() {
        let draft = SurveyDraft::default();
        assert_eq!(draft.line_count(), 1);
        assert_eq!(draft.point_count(0).unwrap(), 0);
    }

    #[test]
    fn remove_line_never_goes_below_one() {
        let mut draft = SurveyDraft::default();
        assert_eq!(draft.remove_line(), 1);
        assert_eq!(draft.remove_line(), 1);
        assert_eq!(draft.add_line(), 2);
        assert_eq!(draft.remove_line(), 1);
    }

    #[test]
    fn remove_point_never_goes_below_zero() {
        let mut draft = SurveyDraft::default();
        assert_eq!(draft.remove_point(0).unwrap(), 0);
        assert_eq!(draft.add_point(0).unwrap(), 1);
        assert_eq!(draft.remove_point(0).unwrap(), 0);
        assert_eq!(draft.remove_point(0).unwrap(), 0);
    }

    #[test]
    fn removed_line_comes_back_blank() {
        let mut draft = SurveyDraft::default();
        draft.add_line();
        draft.update_line(1, filled_line("POP-2")).unwrap();
        draft.add_point(1).unwrap();

        draft.remove_line();
        draft.add_line();

        assert_eq!(draft.lines()[1], LineDraft::default());
    }

    #[test]
    fn removed_point_comes_back_blank() {
        let mut draft = SurveyDraft::default();
        draft.add_point(0).unwrap();
        draft
            .update_point(
                0,
                0,
                PointRecord {
                    name: "P1".into(),
                    core_type: Some(CoreType::Core24),
                    distance_km: 3.0,
                },
            )
            .unwrap();

        draft.remove_point(0).unwrap();
        draft.add_point(0).unwrap();

        assert_eq!(draft.lines()[0].points[0], PointRecord::default());
    }

    #[test]
    fn out_of_range_indices_are_not_found() {
        let mut draft = SurveyDraft::default();
        assert_matches!(
            draft.add_point(3),
            Err(CoreError::NotFound { entity: "Line", index: 3 })
        );
        assert_matches!(
            draft.update_point(0, 0, PointRecord::default()),
            Err(CoreError::NotFound { entity: "Point", index: 0 })
        );
        assert_matches!(
            draft.update_line(1, LineFields::default()),
            Err(CoreError::NotFound { .. })
        );
        assert_matches!(draft.point_count(5), Err(CoreError::NotFound { .. }));
    }

    #[test]
    fn reset_after_submit_keeps_identity_and_upper_geo() {
        let mut draft = SurveyDraft::default();
        draft.officer.name = "করিম".into();
        draft.geo = GeoSelection {
            division: Choice::Listed("ঢাকা".into()),
            district: Choice::Listed("গাজীপুর".into()),
            upazila: Choice::Listed("কালিয়াকৈর".into()),
            union: Choice::Listed("মৌচাক".into()),
        };
        draft.add_line();
        draft.add_point(1).unwrap();

        draft.reset_after_submit();

        assert_eq!(draft.officer.name, "করিম");
        assert_eq!(draft.geo.upazila, Choice::Listed("কালিয়াকৈর".into()));
        assert_eq!(draft.geo.union, Choice::Unset);
        assert_eq!(draft.line_count(), 1);
        assert_eq!(draft.point_count(0).unwrap(), 0);
    }

    #[test]
    fn simple_batch_uses_shared_geo_and_drops_points() {
        let mut draft = SurveyDraft::default();
        draft.officer.designation = Choice::Other("সিনিয়র প্রোগ্রামার".into());
        draft.geo.division = Choice::Listed("ঢাকা".into());
        draft.geo.union = Choice::Other("নতুন ইউনিয়ন".into());
        draft.update_line(0, filled_line("POP-1")).unwrap();
        draft.add_point(0).unwrap();

        let batch = draft.to_batch(FormVariant::Simple);

        assert_eq!(batch.officer.designation, "সিনিয়র প্রোগ্রামার");
        assert_eq!(batch.shared_geo.division, "ঢাকা");
        assert_eq!(batch.shared_geo.district, "");
        assert_eq!(batch.shared_geo.union, "নতুন ইউনিয়ন");
        assert_eq!(batch.lines[0].company, Some(Company::FiberAtHome));
        assert!(batch.lines[0].points.is_empty());
        assert_eq!(batch.lines[0].source.geo, ResolvedGeo::default());
    }

    #[test]
    fn extended_batch_uses_line_geo_and_points() {
        let mut draft = SurveyDraft::default();
        draft.geo.division = Choice::Listed("ঢাকা".into());
        let mut fields = filled_line("POP-1");
        fields.source.geo.division = Choice::Listed("খুলনা".into());
        draft.update_line(0, fields).unwrap();
        draft.add_point(0).unwrap();

        let batch = draft.to_batch(FormVariant::Extended);

        assert_eq!(batch.shared_geo, ResolvedGeo::default());
        assert_eq!(batch.lines[0].company, None);
        assert_eq!(batch.lines[0].source.geo.division, "খুলনা");
        assert_eq!(batch.lines[0].points.len(), 1);
    }

    #[test]
    fn line_fields_flatten_in_json() {
        let value = serde_json::to_value(LineDraft::default()).unwrap();
        assert!(value.get("company").is_some());
        assert!(value.get("points").is_some());
        assert!(value.get("fields").is_none());
    }
}
