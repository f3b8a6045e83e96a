//! Classifier records.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use super::ConflictGroup;
use crate::table::{Modifier, Policy};
use crate::weighted::{Weighted, DEFAULT_WEIGHT};

/// One race, caste or profession.
#[derive(Debug, Clone)]
pub struct Classifier {
    pub name: String,
    /// Influence on a hero's attributes.
    pub attributes: Modifier,
    /// Ids this classifier cannot be combined with.
    pub conflicts: ConflictGroup,
    /// Selection weight. `None` weighs the same as every other unweighted
    /// classifier.
    pub rarity: Option<f64>,
}

impl Classifier {
    /// A nameless classifier with a neutral modifier and no conflicts.
    pub fn blank(policy: Arc<Policy>) -> Self {
        Self {
            name: String::new(),
            attributes: Modifier::new(policy),
            conflicts: ConflictGroup::empty(),
            rarity: None,
        }
    }

    pub fn named(name: impl Into<String>, policy: Arc<Policy>) -> Self {
        Self {
            name: name.into(),
            ..Self::blank(policy)
        }
    }

    pub fn with_rarity(mut self, rarity: f64) -> Self {
        self.rarity = Some(rarity);
        self
    }
}

impl Weighted for Classifier {
    fn weight(&self) -> f64 {
        self.rarity.unwrap_or(DEFAULT_WEIGHT)
    }
}

/// Classifier as it appears in a data document, before it is bound to an
/// attribute policy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassifierRecord {
    pub name: String,
    pub attributes: HashMap<String, f64>,
    pub conflicts: ConflictGroup,
    pub rarity: Option<f64>,
}

impl ClassifierRecord {
    /// Bind the record to `policy`. Attribute keys the policy does not know
    /// are dropped.
    pub fn into_classifier(self, policy: Arc<Policy>) -> Classifier {
        for key in self.attributes.keys().filter(|k| !policy.valid_key(k)) {
            log::warn!("dropping unknown attribute {} on {}", key, self.name);
        }

        let mut attributes = Modifier::new(policy);
        attributes.load(&self.attributes);

        Classifier {
            name: self.name,
            attributes,
            conflicts: self.conflicts,
            rarity: self.rarity,
        }
    }
}
