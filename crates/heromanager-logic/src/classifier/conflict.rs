//! Exclusion lists declared by a classifier.
//!
//! A conflict group is open-world: any id not explicitly listed is allowed.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Deserializer};

use super::Category;
use crate::error::DataError;

/// Ids of races, castes and professions that may not be combined with the
/// owning classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictGroup {
    races: BTreeSet<String>,
    castes: BTreeSet<String>,
    professions: BTreeSet<String>,
}

impl ConflictGroup {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a `{ category: [ids] }` JSON object.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        serde_json::from_str(json).map_err(DataError::malformed("conflict group"))
    }

    /// Exclude `id` under the named category. Unrecognized category names
    /// are logged and dropped, leaving the group unchanged.
    pub fn add(&mut self, category: &str, id: &str) {
        match category.parse::<Category>() {
            Ok(category) => self.exclude(category, id),
            Err(e) => log::warn!("abnormal conflict target {}:{} ({})", category, id, e),
        }
    }

    pub fn exclude(&mut self, category: Category, id: &str) {
        self.set_mut(category).insert(id.to_string());
    }

    /// Add every listed id. Entries under unknown categories are logged and
    /// skipped; they never fail the load.
    pub fn load(&mut self, conflicts: &HashMap<String, Vec<String>>) {
        for (category, ids) in conflicts {
            for id in ids {
                self.add(category, id);
            }
        }
    }

    pub fn allows(&self, category: Category, id: &str) -> bool {
        !self.set(category).contains(id)
    }

    pub fn allow_race(&self, id: &str) -> bool {
        self.allows(Category::Race, id)
    }

    pub fn allow_caste(&self, id: &str) -> bool {
        self.allows(Category::Caste, id)
    }

    pub fn allow_profession(&self, id: &str) -> bool {
        self.allows(Category::Profession, id)
    }

    pub fn excluded(&self, category: Category) -> &BTreeSet<String> {
        self.set(category)
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty() && self.castes.is_empty() && self.professions.is_empty()
    }

    fn set(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Race => &self.races,
            Category::Caste => &self.castes,
            Category::Profession => &self.professions,
        }
    }

    fn set_mut(&mut self, category: Category) -> &mut BTreeSet<String> {
        match category {
            Category::Race => &mut self.races,
            Category::Caste => &mut self.castes,
            Category::Profession => &mut self.professions,
        }
    }
}

impl<'de> Deserialize<'de> for ConflictGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, Vec<String>>::deserialize(deserializer)?;
        let mut group = ConflictGroup::empty();
        group.load(&raw);
        Ok(group)
    }
}
