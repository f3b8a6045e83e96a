//! Conflict-aware option filtering and per-category picks.
//!
//! A [`Selector`] is built for one hero-generation request. The caller
//! narrows each category to a set of option ids (or leaves it empty for
//! "anything the manifest knows"), and the selector works out which of
//! those options can coexist with the options of the other two categories.
//!
//! Compatibility is existential: a candidate survives against another
//! category if at least one option there allows it, not if all of them do.
//! An empty option set in the other category never rules anything out.

use std::collections::BTreeSet;

use rand::Rng;

use crate::classifier::{Category, Classifier, ClassifierManifest};
use crate::error::SelectionError;
use crate::weighted::{pick_index, Weighted};

/// A classifier chosen by the selector, together with its manifest id.
#[derive(Debug, Clone, Copy)]
pub struct Pick<'a> {
    pub id: &'a str,
    pub classifier: &'a Classifier,
}

impl Weighted for Pick<'_> {
    fn weight(&self) -> f64 {
        self.classifier.weight()
    }
}

/// Request-scoped filter and picker over a manifest.
#[derive(Debug, Clone)]
pub struct Selector<'a> {
    manifest: &'a ClassifierManifest,
    race_options: BTreeSet<String>,
    caste_options: BTreeSet<String>,
    profession_options: BTreeSet<String>,
}

impl<'a> Selector<'a> {
    pub fn new(manifest: &'a ClassifierManifest) -> Self {
        Self {
            manifest,
            race_options: BTreeSet::new(),
            caste_options: BTreeSet::new(),
            profession_options: BTreeSet::new(),
        }
    }

    /// Restrict `category` to include `id`. Adding the same id twice has no
    /// further effect.
    pub fn add_option(&mut self, category: Category, id: impl Into<String>) {
        self.explicit_mut(category).insert(id.into());
    }

    /// Builder form of [`add_option`](Self::add_option).
    pub fn with_option(mut self, category: Category, id: impl Into<String>) -> Self {
        self.add_option(category, id);
        self
    }

    pub fn add_race_option(&mut self, id: impl Into<String>) {
        self.add_option(Category::Race, id);
    }

    pub fn add_caste_option(&mut self, id: impl Into<String>) {
        self.add_option(Category::Caste, id);
    }

    pub fn add_profession_option(&mut self, id: impl Into<String>) {
        self.add_option(Category::Profession, id);
    }

    /// The caller's options for `category`, or every manifest id when the
    /// caller gave none.
    pub fn options(&self, category: Category) -> Vec<&str> {
        let explicit = self.explicit(category);
        if explicit.is_empty() {
            self.manifest
                .all(category)
                .iter()
                .map(String::as_str)
                .collect()
        } else {
            explicit.iter().map(String::as_str).collect()
        }
    }

    pub fn race_options(&self) -> Vec<&str> {
        self.options(Category::Race)
    }

    pub fn caste_options(&self) -> Vec<&str> {
        self.options(Category::Caste)
    }

    pub fn profession_options(&self) -> Vec<&str> {
        self.options(Category::Profession)
    }

    /// Options of `category` compatible with at least one option in each of
    /// the other two categories.
    pub fn selectable(&self, category: Category) -> BTreeSet<String> {
        let mut selectable: BTreeSet<String> = self
            .options(category)
            .into_iter()
            .map(str::to_string)
            .collect();

        for other in category.others() {
            let voters = self.explicit(other);
            if voters.is_empty() {
                continue;
            }

            // Unresolvable ids cast no vote.
            let voters: Vec<&Classifier> = voters
                .iter()
                .filter_map(|id| self.manifest.resolve(other, id))
                .collect();

            selectable.retain(|candidate| {
                voters
                    .iter()
                    .any(|voter| voter.conflicts.allows(category, candidate))
            });
        }

        selectable
    }

    pub fn selectable_races(&self) -> BTreeSet<String> {
        self.selectable(Category::Race)
    }

    pub fn selectable_castes(&self) -> BTreeSet<String> {
        self.selectable(Category::Caste)
    }

    pub fn selectable_professions(&self) -> BTreeSet<String> {
        self.selectable(Category::Profession)
    }

    /// Selectable options that resolve to a manifest entry, in id order.
    pub fn candidates(&self, category: Category) -> Vec<Pick<'a>> {
        let manifest = self.manifest;
        self.selectable(category)
            .iter()
            .filter_map(|id| manifest.resolve_entry(category, id))
            .map(|(id, classifier)| Pick { id, classifier })
            .collect()
    }

    /// Weighted pick from the eligible candidates of `category` using a
    /// caller-supplied roll in `[0, 1)`.
    pub fn pick_with_roll(
        &self,
        category: Category,
        roll: f64,
    ) -> Result<Pick<'a>, SelectionError> {
        let candidates = self.candidates(category);
        let index = pick_index(&candidates, roll)
            .ok_or(SelectionError::NoEligibleCandidates(category))?;
        let picked = candidates[index];

        log::debug!(
            "Picked {} {} from {} candidates (roll {:.4})",
            category,
            picked.id,
            candidates.len(),
            roll
        );
        Ok(picked)
    }

    /// Weighted pick from the eligible candidates of `category`.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        category: Category,
        rng: &mut R,
    ) -> Result<Pick<'a>, SelectionError> {
        self.pick_with_roll(category, rng.gen::<f64>())
    }

    pub fn pick_race<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Pick<'a>, SelectionError> {
        self.pick(Category::Race, rng)
    }

    pub fn pick_caste<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Pick<'a>, SelectionError> {
        self.pick(Category::Caste, rng)
    }

    pub fn pick_profession<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Pick<'a>, SelectionError> {
        self.pick(Category::Profession, rng)
    }

    fn explicit(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Race => &self.race_options,
            Category::Caste => &self.caste_options,
            Category::Profession => &self.profession_options,
        }
    }

    fn explicit_mut(&mut self, category: Category) -> &mut BTreeSet<String> {
        match category {
            Category::Race => &mut self.race_options,
            Category::Caste => &mut self.caste_options,
            Category::Profession => &mut self.profession_options,
        }
    }
}
