//! Validation and clamping rules for one attribute domain.

use std::collections::BTreeSet;
use std::sync::Arc;

/// Immutable rule set shared by every table and modifier of a domain:
/// the recognized keys, the inclusive value bounds and the fallback value
/// returned for unset keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    min: f64,
    max: f64,
    default: f64,
    keys: BTreeSet<String>,
}

impl Policy {
    /// Build a policy. Inverted bounds are swapped and the default is pulled
    /// into range, so every value the policy hands out is itself valid.
    pub fn new<I, S>(min: f64, max: f64, default: f64, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let default = if default.is_nan() {
            min
        } else {
            default.max(min).min(max)
        };

        Self {
            min,
            max,
            default,
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Convenience for the common case of wrapping a new policy for sharing.
    pub fn shared<I, S>(min: f64, max: f64, default: f64, keys: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self::new(min, max, default, keys))
    }

    pub fn min_value(&self) -> f64 {
        self.min
    }

    pub fn max_value(&self) -> f64 {
        self.max
    }

    pub fn default_value(&self) -> f64 {
        self.default
    }

    pub fn valid_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Recognized keys in a stable (sorted) order.
    pub fn valid_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Pull `value` into `[min, max]`. NaN has no meaningful position in the
    /// range and falls back to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.default
        } else {
            value.max(self.min).min(self.max)
        }
    }
}
