//! Engine configuration.
//!
//! Everything has a default, and every field may be omitted from a JSON
//! config document, so an empty object `{}` is a valid configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::attributes::{attribute_policy, ATTRIBUTE_MAX, ATTRIBUTE_MIN};
use crate::error::DataError;
use crate::table::{Policy, Values};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub attributes: AttributeConfig,
}

/// Bounds and starting values for hero attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeConfig {
    /// Lowest permitted attribute value.
    pub min: f64,
    /// Highest permitted attribute value.
    pub max: f64,
    /// Value reported for unset keys.
    pub default: f64,
    /// Starting value of every attribute before classifier modifiers.
    pub base: f64,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            min: ATTRIBUTE_MIN,
            max: ATTRIBUTE_MAX,
            default: ATTRIBUTE_MIN,
            base: 100.0,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        serde_json::from_str(json).map_err(DataError::malformed("engine config"))
    }

    /// Policy over the core attributes using the configured bounds.
    pub fn attribute_policy(&self) -> Arc<Policy> {
        let a = &self.attributes;
        attribute_policy(a.min, a.max, a.default)
    }

    /// Base attribute table every generated hero starts from.
    pub fn base_attributes(&self, policy: Arc<Policy>) -> Values {
        Values::filled(policy, self.attributes.base)
    }
}
