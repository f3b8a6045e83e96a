//! Additive-delta adjustment ledger over a policy's keys.

use std::collections::{BTreeMap, HashMap};
use std::ops::AddAssign;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::Policy;
use crate::error::DataError;

/// Per-key deltas. The effective multiplier for a key is `1 + delta`, so an
/// untouched key scales by exactly 1.0. Combining modifiers sums deltas; it
/// does not multiply factors.
#[derive(Debug, Clone)]
pub struct Modifier {
    policy: Arc<Policy>,
    adjustments: BTreeMap<String, f64>,
}

impl Modifier {
    /// A neutral modifier: every valid key at delta 0.
    pub fn new(policy: Arc<Policy>) -> Self {
        let adjustments = policy.valid_keys().map(|k| (k.to_string(), 0.0)).collect();
        Self {
            policy,
            adjustments,
        }
    }

    pub fn policy(&self) -> &Arc<Policy> {
        &self.policy
    }

    /// Overwrite the delta for `key`. Keys outside the policy are ignored.
    pub fn set(&mut self, key: &str, delta: f64) {
        if self.policy.valid_key(key) {
            self.adjustments.insert(key.to_string(), delta);
        }
    }

    pub fn load<'a, I>(&mut self, adjustments: I)
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        for (key, delta) in adjustments {
            self.set(key, *delta);
        }
    }

    /// Bulk load from a JSON object of `key: delta`.
    pub fn load_json(&mut self, json: &str) -> Result<(), DataError> {
        let data: HashMap<String, f64> =
            serde_json::from_str(json).map_err(DataError::malformed("modifier"))?;
        self.load(&data);
        Ok(())
    }

    pub fn delta(&self, key: &str) -> f64 {
        self.adjustments.get(key).copied().unwrap_or(0.0)
    }

    pub fn factor(&self, key: &str) -> f64 {
        match self.adjustments.get(key) {
            Some(delta) => 1.0 + delta,
            None => 1.0,
        }
    }

    pub fn apply(&self, key: &str, value: f64) -> f64 {
        value * self.factor(key)
    }

    /// Sum `other`'s deltas into this modifier across this modifier's keys.
    ///
    /// Deltas `other` holds for keys this policy does not recognize are
    /// dropped. A policy mismatch is logged but not rejected.
    pub fn add(&mut self, other: &Modifier) {
        if !Arc::ptr_eq(&self.policy, &other.policy) && *self.policy != *other.policy {
            log::warn!(
                "combining modifiers built on different policies ({} keys vs {} keys)",
                self.policy.key_count(),
                other.policy.key_count()
            );
        }

        for key in self.policy.valid_keys() {
            let sum = self.delta(key) + other.delta(key);
            self.adjustments.insert(key.to_string(), sum);
        }
    }

    /// True when every factor is exactly 1.0.
    pub fn is_neutral(&self) -> bool {
        self.adjustments.values().all(|d| *d == 0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.adjustments.iter().map(|(k, d)| (k.as_str(), *d))
    }
}

impl AddAssign<&Modifier> for Modifier {
    fn add_assign(&mut self, other: &Modifier) {
        self.add(other);
    }
}

impl Serialize for Modifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.adjustments.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_policy() -> Arc<Policy> {
        Policy::shared(0.0, 200.0, 0.0, ["A", "B", "C", "D"])
    }

    #[test]
    fn test_new_modifier() {
        let m = Modifier::new(test_policy());

        for k in ["A", "B", "C", "D"] {
            assert_eq!(m.delta(k), 0.0);
            assert_eq!(m.factor(k), 1.0);
        }
        assert_eq!(m.adjustments.len(), 4);
        assert!(m.is_neutral());
    }

    #[test]
    fn test_set_and_factor() {
        let mut m = Modifier::new(test_policy());

        m.set("B", 0.5);
        assert_eq!(m.factor("A"), 1.0);
        assert_eq!(m.factor("B"), 1.5);

        // Replace, not accumulate
        m.set("B", 0.2);
        assert_eq!(m.factor("B"), 1.2);
    }

    #[test]
    fn test_factor_invalid_key() {
        let mut m = Modifier::new(test_policy());
        m.set("MISSING", 3.0);

        assert_eq!(m.factor("MISSING"), 1.0);
        assert!(!m.adjustments.contains_key("MISSING"));
    }

    #[test]
    fn test_load_over_existing() {
        let mut m = Modifier::new(test_policy());
        m.set("A", 0.7);
        m.set("D", 0.8);

        let data: HashMap<String, f64> = [("A", 0.1), ("B", 0.2), ("C", 0.3)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        m.load(&data);

        assert_eq!(m.delta("A"), 0.1);
        assert_eq!(m.delta("B"), 0.2);
        assert_eq!(m.delta("C"), 0.3);
        assert_eq!(m.delta("D"), 0.8);
    }

    #[test]
    fn test_add() {
        let policy = test_policy();
        let mut m = Modifier::new(Arc::clone(&policy));
        m.set("A", 0.5);
        m.set("B", 0.5);

        let mut m2 = Modifier::new(policy);
        m2.set("A", 0.5);

        m.add(&m2);

        assert_eq!(m.delta("A"), 1.0);
        assert_eq!(m.delta("B"), 0.5);
        assert_eq!(m.factor("A"), 2.0);
    }

    #[test]
    fn test_add_negative() {
        let policy = test_policy();
        let mut m = Modifier::new(Arc::clone(&policy));
        m.set("A", 0.5);
        m.set("B", 0.5);

        let mut m2 = Modifier::new(policy);
        m2.set("A", -0.5);

        m += &m2;

        assert_eq!(m.delta("A"), 0.0);
        assert_eq!(m.delta("B"), 0.5);
    }

    #[test]
    fn test_add_mismatched_policy_uses_receiver_keys() {
        let mut m = Modifier::new(Policy::shared(0.0, 1.0, 0.0, ["A", "B"]));
        let mut other = Modifier::new(Policy::shared(0.0, 1.0, 0.0, ["B", "Z"]));
        other.set("B", 0.25);
        other.set("Z", 0.75);

        m.add(&other);

        assert_eq!(m.delta("B"), 0.25);
        assert_eq!(m.factor("Z"), 1.0);
        assert!(!m.adjustments.contains_key("Z"));
    }

    #[test]
    fn test_apply() {
        let mut m = Modifier::new(test_policy());
        m.set("A", 0.5);

        assert!((m.apply("A", 15.0) - 22.5).abs() < 1e-9);
        assert_eq!(m.apply("B", 15.0), 15.0);
    }

    #[test]
    fn test_load_json() {
        let mut m = Modifier::new(test_policy());

        m.load_json(r#"{ "A": 0.3, "B": 1.1, "BLAH": 6.0 }"#).unwrap();

        assert!((m.factor("A") - 1.3).abs() < 1e-9);
        assert!((m.factor("B") - 2.1).abs() < 1e-9);
        assert_eq!(m.factor("C"), 1.0);
        assert!(!m.adjustments.contains_key("BLAH"));
    }

    #[test]
    fn test_load_json_malformed() {
        let mut m = Modifier::new(test_policy());
        assert!(m.load_json("not json").is_err());
        assert!(m.is_neutral());
    }

    proptest! {
        #[test]
        fn prop_add_is_commutative(
            a in proptest::collection::vec(-2.0f64..2.0, 4),
            b in proptest::collection::vec(-2.0f64..2.0, 4),
        ) {
            let policy = test_policy();
            let keys = ["A", "B", "C", "D"];
            let mut ma = Modifier::new(Arc::clone(&policy));
            let mut mb = Modifier::new(Arc::clone(&policy));
            for (i, k) in keys.iter().enumerate() {
                ma.set(k, a[i]);
                mb.set(k, b[i]);
            }

            let mut ab = ma.clone();
            ab.add(&mb);
            let mut ba = mb.clone();
            ba.add(&ma);

            for k in keys {
                prop_assert_eq!(ab.factor(k), ba.factor(k));
            }
        }

        #[test]
        fn prop_unset_key_is_neutral(key in "[A-Z]{1,4}") {
            let m = Modifier::new(test_policy());
            prop_assert_eq!(m.factor(&key), 1.0);
        }
    }
}
