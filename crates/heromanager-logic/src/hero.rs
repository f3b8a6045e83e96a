//! Hero generation.
//!
//! A hero is one race, one caste and one profession, each picked
//! independently from the selector's filtered options, plus the attribute
//! profile that results from applying the three classifiers' modifiers to
//! a base table in turn. The profile is an [`AttributeView`] with one slot
//! per category, so a single source can be swapped later.
//!
//! The three picks are not re-filtered against each other once made: a
//! caste is compatible with some race option, not necessarily with the
//! race that was actually chosen.

use rand::Rng;
use serde::Serialize;

use crate::classifier::{Category, Classifier};
use crate::config::EngineConfig;
use crate::error::SelectionError;
use crate::selector::Selector;
use crate::table::{AttributeView, Values};

/// A generated hero.
#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub race: String,
    pub caste: String,
    pub profession: String,
    /// Slots `race`, `caste` and `profession`, in that order.
    pub attributes: AttributeView,
}

/// Base table successively adjusted by each classifier's modifier. Each
/// step is clamped by the table's policy.
pub fn attribute_profile<'a, I>(base: &Values, classifiers: I) -> Values
where
    I: IntoIterator<Item = &'a Classifier>,
{
    classifiers
        .into_iter()
        .fold(base.copy(), |table, c| table.adjust(&c.attributes))
}

/// Produces heroes from a base attribute table.
#[derive(Debug, Clone)]
pub struct HeroGenerator {
    base: Values,
}

impl HeroGenerator {
    pub fn new(base: Values) -> Self {
        Self { base }
    }

    /// Generator over the configured attribute policy and base value.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.base_attributes(config.attribute_policy()))
    }

    pub fn base(&self) -> &Values {
        &self.base
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        selector: &Selector<'_>,
        rng: &mut R,
    ) -> Result<Hero, SelectionError> {
        let rolls = [rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>()];
        self.generate_with_rolls(selector, rolls)
    }

    /// Generate with fixed rolls for race, caste and profession, in that
    /// order.
    pub fn generate_with_rolls(
        &self,
        selector: &Selector<'_>,
        rolls: [f64; 3],
    ) -> Result<Hero, SelectionError> {
        let race = selector.pick_with_roll(Category::Race, rolls[0])?;
        let caste = selector.pick_with_roll(Category::Caste, rolls[1])?;
        let profession = selector.pick_with_roll(Category::Profession, rolls[2])?;

        let mut attributes = AttributeView::new(self.base.copy());
        for (category, pick) in [
            (Category::Race, race),
            (Category::Caste, caste),
            (Category::Profession, profession),
        ] {
            attributes.modify(category.to_string(), pick.classifier.attributes.clone());
        }

        log::debug!(
            "Generated hero: {} {} {}",
            race.id,
            caste.id,
            profession.id
        );

        Ok(Hero {
            race: race.id.to_string(),
            caste: caste.id.to_string(),
            profession: profession.id.to_string(),
            attributes,
        })
    }
}
