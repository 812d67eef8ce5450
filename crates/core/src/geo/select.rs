//! Cascading selection over the geo tree.
//!
//! Each level's options depend on the choices made at every shallower
//! level. A free-text answer ("other") never filters the tree, so every level
//! below it falls back to an empty option set.

use serde::{Deserialize, Serialize};

use crate::choice::Choice;
use crate::geo::tree::GeoTree;
use crate::labels;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoLevel {
    Division,
    District,
    Upazila,
    Union,
}

impl GeoLevel {
    pub const ALL: [GeoLevel; 4] = [
        GeoLevel::Division,
        GeoLevel::District,
        GeoLevel::Upazila,
        GeoLevel::Union,
    ];

    /// Field label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Division => labels::FIELD_DIVISION,
            Self::District => labels::FIELD_DISTRICT,
            Self::Upazila => labels::FIELD_UPAZILA,
            Self::Union => labels::FIELD_UNION,
        }
    }
}

/// A (possibly partial) path through the four levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoSelection {
    #[serde(default)]
    pub division: Choice,
    #[serde(default)]
    pub district: Choice,
    #[serde(default)]
    pub upazila: Choice,
    #[serde(default)]
    pub union: Choice,
}

impl GeoSelection {
    pub fn get(&self, level: GeoLevel) -> &Choice {
        match level {
            GeoLevel::Division => &self.division,
            GeoLevel::District => &self.district,
            GeoLevel::Upazila => &self.upazila,
            GeoLevel::Union => &self.union,
        }
    }

    /// Final string values for all four levels.
    pub fn resolved(&self) -> ResolvedGeo {
        ResolvedGeo {
            division: self.division.resolve(),
            district: self.district.resolve(),
            upazila: self.upazila.resolve(),
            union: self.union.resolve(),
        }
    }
}

/// A geo path after placeholder/"other" resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedGeo {
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub union: String,
}

impl ResolvedGeo {
    pub fn get(&self, level: GeoLevel) -> &str {
        match level {
            GeoLevel::Division => &self.division,
            GeoLevel::District => &self.district,
            GeoLevel::Upazila => &self.upazila,
            GeoLevel::Union => &self.union,
        }
    }

    /// Levels whose resolved value is empty, shallowest first.
    pub fn missing_levels(&self) -> Vec<GeoLevel> {
        GeoLevel::ALL
            .into_iter()
            .filter(|level| self.get(*level).is_empty())
            .collect()
    }
}

/// Options to offer at `level` given the shallower choices in `selection`.
///
/// Sorted and duplicate-free. Empty whenever a shallower level is unset,
/// answered with free text, or names something the tree does not contain.
/// Choices at `level` itself and below are ignored.
pub fn select_options(level: GeoLevel, tree: &GeoTree, selection: &GeoSelection) -> Vec<String> {
    let division = selection.division.listed();
    let district = selection.district.listed();
    let upazila = selection.upazila.listed();

    match level {
        GeoLevel::Division => sorted_unique(tree.division_names()),
        GeoLevel::District => division
            .and_then(|div| tree.districts(div))
            .map(|districts| sorted_unique(districts.keys()))
            .unwrap_or_default(),
        GeoLevel::Upazila => division
            .zip(district)
            .and_then(|(div, dist)| tree.upazilas(div, dist))
            .map(|upazilas| sorted_unique(upazilas.keys()))
            .unwrap_or_default(),
        GeoLevel::Union => division
            .zip(district)
            .zip(upazila)
            .and_then(|((div, dist), upz)| tree.unions(div, dist, upz))
            .map(|unions| sorted_unique(unions.iter()))
            .unwrap_or_default(),
    }
}

fn sorted_unique<'a>(names: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut options: Vec<String> = names.cloned().collect();
    options.sort();
    options.dedup();
    options
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::geo::record::{extract_records, GeoSources};

    fn tree() -> GeoTree {
        let rec = |v: serde_json::Value| extract_records(&json!({ "data": v }));
        GeoTree::build(&GeoSources {
            divisions: rec(json!([
                { "id": "2", "bn_name": "রাজশাহী" },
                { "id": "1", "bn_name": "খুলনা" },
            ])),
            districts: rec(json!([
                { "id": "20", "division_id": "2", "bn_name": "নাটোর" },
                { "id": "21", "division_id": "2", "bn_name": "বগুড়া" },
                { "id": "10", "division_id": "1", "bn_name": "যশোর" },
            ])),
            upazilas: rec(json!([
                { "id": "200", "district_id": "20", "bn_name": "সিংড়া" },
                { "id": "201", "district_id": "20", "bn_name": "বাগাতিপাড়া" },
                { "id": "210", "district_id": "21", "bn_name": "শেরপুর" },
                { "id": "100", "district_id": "10", "bn_name": "অভয়নগর" },
            ])),
            unions: rec(json!([
                { "id": "1", "upazilla_id": "200", "bn_name": "হাতিয়ানদহ" },
                { "id": "2", "upazilla_id": "200", "bn_name": "চামারী" },
                { "id": "3", "upazilla_id": "200", "bn_name": "চামারী" },
            ])),
        })
    }

    fn listed(s: &str) -> Choice {
        Choice::Listed(s.to_string())
    }

    #[test]
    fn divisions_are_sorted() {
        let options = select_options(GeoLevel::Division, &tree(), &GeoSelection::default());
        assert_eq!(options, vec!["খুলনা", "রাজশাহী"]);
    }

    #[test]
    fn districts_follow_division() {
        let selection = GeoSelection {
            division: listed("রাজশাহী"),
            ..Default::default()
        };
        let options = select_options(GeoLevel::District, &tree(), &selection);
        assert_eq!(options, vec!["নাটোর", "বগুড়া"]);
    }

    #[test]
    fn unions_are_sorted_and_deduplicated() {
        let selection = GeoSelection {
            division: listed("রাজশাহী"),
            district: listed("নাটোর"),
            upazila: listed("সিংড়া"),
            ..Default::default()
        };
        let options = select_options(GeoLevel::Union, &tree(), &selection);
        assert_eq!(options, vec!["চামারী", "হাতিয়ানদহ"]);
    }

    #[test]
    fn unset_shallower_level_empties_deeper_options() {
        let selection = GeoSelection {
            district: listed("নাটোর"),
            ..Default::default()
        };
        assert!(select_options(GeoLevel::District, &tree(), &selection).is_empty());
        assert!(select_options(GeoLevel::Upazila, &tree(), &selection).is_empty());
    }

    #[test]
    fn free_text_shallower_level_empties_deeper_options() {
        // Free text equal to a real key still does not filter.
        let selection = GeoSelection {
            division: Choice::Other("রাজশাহী".into()),
            district: listed("নাটোর"),
            ..Default::default()
        };
        assert!(select_options(GeoLevel::District, &tree(), &selection).is_empty());
        assert!(select_options(GeoLevel::Upazila, &tree(), &selection).is_empty());
        assert!(select_options(GeoLevel::Union, &tree(), &selection).is_empty());
    }

    #[test]
    fn inconsistent_path_yields_nothing() {
        let selection = GeoSelection {
            division: listed("খুলনা"),
            district: listed("নাটোর"),
            ..Default::default()
        };
        assert!(select_options(GeoLevel::Upazila, &tree(), &selection).is_empty());
    }

    #[test]
    fn empty_tree_offers_no_divisions() {
        let options = select_options(
            GeoLevel::Division,
            &GeoTree::default(),
            &GeoSelection::default(),
        );
        assert!(options.is_empty());
    }

    #[test]
    fn resolved_and_missing_levels() {
        let selection = GeoSelection {
            division: listed("রাজশাহী"),
            district: Choice::Other("নতুন জেলা".into()),
            upazila: Choice::Unset,
            union: Choice::Other(String::new()),
        };
        let resolved = selection.resolved();
        assert_eq!(resolved.division, "রাজশাহী");
        assert_eq!(resolved.district, "নতুন জেলা");
        assert_eq!(
            resolved.missing_levels(),
            vec![GeoLevel::Upazila, GeoLevel::Union]
        );
    }

    /// The unknown-division bucket is an ordinary option, never confused
    /// with the free-text entry.
    #[test]
    fn unknown_division_bucket_is_selectable() {
        let rec = |v: serde_json::Value| extract_records(&json!({ "data": v }));
        let tree = GeoTree::build(&GeoSources {
            divisions: Vec::new(),
            districts: rec(json!([{ "id": "9", "division_id": "99", "bn_name": "অজানা জেলা" }])),
            upazilas: rec(json!([{ "id": "90", "district_id": "9", "bn_name": "সদর" }])),
            unions: Vec::new(),
        });

        let options = crate::choice::with_sentinels(select_options(
            GeoLevel::Division,
            &tree,
            &GeoSelection::default(),
        ));
        assert_eq!(
            options,
            vec![labels::PLACEHOLDER, labels::UNKNOWN_DIVISION, labels::OTHER]
        );

        let division = Choice::from_raw(labels::UNKNOWN_DIVISION, "");
        assert_eq!(division, listed(labels::UNKNOWN_DIVISION));

        let selection = GeoSelection {
            division,
            ..GeoSelection::default()
        };
        assert_eq!(
            select_options(GeoLevel::District, &tree, &selection),
            vec!["অজানা জেলা"]
        );
    }
}
