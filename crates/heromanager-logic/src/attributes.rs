//! The five core hero attributes.
//!
//! Attribute tables and modifiers are keyed by the short codes below
//! (`BRN`, `INS`, ...), which is also how game data files refer to them.

use std::sync::Arc;

use crate::table::Policy;

/// Lowest value an attribute may take.
pub const ATTRIBUTE_MIN: f64 = 0.0;
/// Highest value an attribute may take.
pub const ATTRIBUTE_MAX: f64 = 500.0;

/// Core hero attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Raw physical strength.
    Brawn,
    /// Perception and reasoning.
    Insight,
    /// Dexterity and precision.
    Finesse,
    /// Stamina and resilience.
    Vigor,
    /// Charm and presence.
    Allure,
}

impl Attribute {
    /// Short code used as the table key.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Brawn => "BRN",
            Attribute::Insight => "INS",
            Attribute::Finesse => "FIN",
            Attribute::Vigor => "VIG",
            Attribute::Allure => "ALL",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Brawn => "Brawn",
            Attribute::Insight => "Insight",
            Attribute::Finesse => "Finesse",
            Attribute::Vigor => "Vigor",
            Attribute::Allure => "Allure",
        }
    }

    pub fn from_key(key: &str) -> Option<Attribute> {
        Attribute::all().iter().copied().find(|a| a.key() == key)
    }

    /// All attributes for iteration.
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Brawn,
            Attribute::Insight,
            Attribute::Finesse,
            Attribute::Vigor,
            Attribute::Allure,
        ]
    }
}

/// Policy over the core attribute keys with the given bounds and default.
pub fn attribute_policy(min: f64, max: f64, default: f64) -> Arc<Policy> {
    Policy::shared(min, max, default, Attribute::all().iter().map(|a| a.key()))
}
