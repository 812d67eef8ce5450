//! The four-level lookup tree keyed by display name.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geo::record::GeoSources;
use crate::labels::UNKNOWN_DIVISION;

/// Upazila name → union names.
pub type UpazilaMap = IndexMap<String, Vec<String>>;

/// District name → upazilas.
pub type DistrictMap = IndexMap<String, UpazilaMap>;

/// `division → district → upazila → [union]`, keyed by display name.
///
/// Insertion order follows the upazila dataset. Built once per process and
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoTree(IndexMap<String, DistrictMap>);

impl GeoTree {
    /// Join the four raw lists into a tree.
    ///
    /// The tree is driven by upazilas: divisions and districts that no
    /// upazila reaches never appear. An upazila whose district cannot be
    /// resolved is skipped outright, while a district whose division cannot
    /// be resolved is filed under [`UNKNOWN_DIVISION`].
    pub fn build(sources: &GeoSources) -> Self {
        let divisions: HashMap<&str, String> = sources
            .divisions
            .iter()
            .filter_map(|d| Some((d.id.as_deref()?, d.display_name())))
            .collect();

        let districts: HashMap<&str, (String, Option<&str>)> = sources
            .districts
            .iter()
            .filter_map(|d| Some((d.id.as_deref()?, (d.display_name(), d.division_id.as_deref()))))
            .collect();

        // Later duplicates overwrite earlier ones but keep the first position.
        let mut upazilas: IndexMap<&str, (String, Option<&str>)> = IndexMap::new();
        for u in &sources.upazilas {
            if let Some(id) = u.id.as_deref() {
                upazilas.insert(id, (u.display_name(), u.district_id.as_deref()));
            }
        }

        let mut unions: HashMap<&str, Vec<String>> = HashMap::new();
        for u in &sources.unions {
            unions
                .entry(u.parent_upazila())
                .or_default()
                .push(u.display_name());
        }

        let mut tree = IndexMap::<String, DistrictMap>::new();
        for (upazila_id, (upazila_name, district_id)) in &upazilas {
            let Some((district_name, division_id)) = district_id.and_then(|id| districts.get(id))
            else {
                continue;
            };

            let division_name = division_id
                .and_then(|id| divisions.get(id))
                .cloned()
                .unwrap_or_else(|| UNKNOWN_DIVISION.to_string());

            tree.entry(division_name)
                .or_default()
                .entry(district_name.clone())
                .or_default()
                .insert(
                    upazila_name.clone(),
                    unions.get(upazila_id).cloned().unwrap_or_default(),
                );
        }

        Self(tree)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Division names in insertion order.
    pub fn division_names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn districts(&self, division: &str) -> Option<&DistrictMap> {
        self.0.get(division)
    }

    pub fn upazilas(&self, division: &str, district: &str) -> Option<&UpazilaMap> {
        self.districts(division)?.get(district)
    }

    pub fn unions(&self, division: &str, district: &str, upazila: &str) -> Option<&[String]> {
        self.upazilas(division, district)?
            .get(upazila)
            .map(Vec::as_slice)
    }
}
