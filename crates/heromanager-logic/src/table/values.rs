//! Bounded numeric state, one entry per policy key.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::{Modifier, Policy};
use crate::error::DataError;

/// A table of numbers keyed by a policy's keys. Every stored value lies in
/// the policy's bounds; unknown keys are never stored.
#[derive(Debug, Clone)]
pub struct Values {
    policy: Arc<Policy>,
    values: BTreeMap<String, f64>,
}

impl Values {
    /// Create a table with every valid key at the policy default.
    pub fn new(policy: Arc<Policy>) -> Self {
        let values = policy
            .valid_keys()
            .map(|k| (k.to_string(), policy.default_value()))
            .collect();

        Self { policy, values }
    }

    /// Create a table with every valid key set to `value` (clamped).
    pub fn filled(policy: Arc<Policy>, value: f64) -> Self {
        let value = policy.clamp(value);
        let values = policy
            .valid_keys()
            .map(|k| (k.to_string(), value))
            .collect();

        Self { policy, values }
    }

    pub fn policy(&self) -> &Arc<Policy> {
        &self.policy
    }

    /// Stored value for `key`, or the policy default when the key is
    /// unknown or unset.
    pub fn get(&self, key: &str) -> f64 {
        self.values
            .get(key)
            .copied()
            .unwrap_or_else(|| self.policy.default_value())
    }

    /// Store a clamped value. Keys outside the policy are ignored.
    pub fn set(&mut self, key: &str, value: f64) {
        if self.policy.valid_key(key) {
            self.values.insert(key.to_string(), self.policy.clamp(value));
        }
    }

    /// Apply `set` for each entry. Entries are independent: an invalid key
    /// is skipped without affecting the others.
    pub fn load<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        for (key, value) in values {
            self.set(key, *value);
        }
    }

    /// Bulk load from a JSON object of `key: number`.
    pub fn load_json(&mut self, json: &str) -> Result<(), DataError> {
        let data: HashMap<String, f64> =
            serde_json::from_str(json).map_err(DataError::malformed("value table"))?;
        self.load(&data);
        Ok(())
    }

    /// Deep copy. Values are re-clamped on the way through.
    pub fn copy(&self) -> Self {
        let mut copy = Self::new(Arc::clone(&self.policy));
        for (key, value) in &self.values {
            copy.values.insert(key.clone(), self.policy.clamp(*value));
        }
        copy
    }

    /// New table with every key scaled by the modifier's factor and
    /// clamped. The receiver is left untouched.
    pub fn adjust(&self, modifier: &Modifier) -> Self {
        let mut adjusted = self.copy();
        for key in self.policy.valid_keys() {
            adjusted.set(key, modifier.apply(key, self.get(key)));
        }
        adjusted
    }

    /// `(key, value)` pairs in policy key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Values {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.values.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_policy() -> Arc<Policy> {
        Policy::shared(4.0, 10.0, 5.0, ["A", "B", "C", "D"])
    }

    fn data(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_new_values() {
        let policy = test_policy();
        let v = Values::new(Arc::clone(&policy));

        for k in policy.valid_keys() {
            assert_eq!(v.get(k), policy.default_value());
        }
        assert_eq!(v.len(), policy.key_count());
    }

    #[test]
    fn test_load_partial() {
        let mut v = Values::new(test_policy());

        v.load(&data(&[("A", 5.5), ("C", 6.7)]));

        assert_eq!(v.get("A"), 5.5);
        assert_eq!(v.get("C"), 6.7);
        assert_eq!(v.get("B"), 5.0);
        assert_eq!(v.get("D"), 5.0);
    }

    #[test]
    fn test_load_abnormal() {
        let mut v = Values::new(test_policy());

        v.load(&data(&[("A", 4.0 - 1.2), ("B", 5.0), ("C", 10.0 + 4.4), ("E", 5.2)]));

        assert_eq!(v.get("A"), 4.0, "low clamp not applied");
        assert_eq!(v.get("B"), 5.0);
        assert_eq!(v.get("C"), 10.0, "high clamp not applied");
        assert_eq!(v.get("D"), 5.0, "untouched key was modified");
        assert!(!v.values.contains_key("E"), "invalid key was stored");
    }

    #[test]
    fn test_set_invalid_is_noop() {
        let mut v = Values::new(test_policy());
        let before = v.len();

        v.set("E", 6.6);

        assert_eq!(v.len(), before);
        assert_eq!(v.get("E"), 5.0);
        for k in ["A", "B", "C", "D"] {
            assert_eq!(v.get(k), 5.0);
        }
    }

    #[test]
    fn test_get_invalid_returns_default() {
        let mut v = Values::new(test_policy());
        for k in ["A", "B", "C", "D"] {
            v.set(k, 7.7);
        }

        assert_eq!(v.get("E"), 5.0);
    }

    #[test]
    fn test_filled() {
        let v = Values::filled(test_policy(), 42.0);
        assert!(v.iter().all(|(_, value)| value == 10.0));
    }

    #[test]
    fn test_copy_is_independent() {
        let mut v = Values::new(test_policy());
        v.load(&data(&[("A", 4.8), ("B", 5.2), ("C", 6.1), ("D", 7.6)]));

        let mut copy = v.copy();
        assert_eq!(copy.len(), v.len());
        for k in ["A", "B", "C", "D"] {
            assert_eq!(copy.get(k), v.get(k));
        }

        copy.set("A", 9.0);
        assert_eq!(v.get("A"), 4.8);
    }

    #[test]
    fn test_adjust() {
        let policy = test_policy();
        let mut v = Values::new(Arc::clone(&policy));
        v.set("A", 4.0);
        v.set("B", 9.0);
        v.set("C", 10.0);
        v.set("D", 5.0);

        let mut m = Modifier::new(Arc::clone(&policy));
        m.set("A", 0.5);
        m.set("B", -0.5);
        m.set("C", 0.3);

        let r = v.adjust(&m);

        assert!((r.get("A") - 6.0).abs() < 1e-9);
        assert!((r.get("B") - 4.5).abs() < 1e-9);
        assert!((r.get("C") - 10.0).abs() < 1e-9);
        assert!((r.get("D") - 5.0).abs() < 1e-9);

        // Source untouched
        assert_eq!(v.get("A"), 4.0);
        assert_eq!(v.get("B"), 9.0);
    }

    #[test]
    fn test_load_json() {
        let mut v = Values::new(test_policy());

        v.load_json(r#"{ "A": 3.1, "B": 4.1, "BLAH": 6.0 }"#).unwrap();

        assert_eq!(v.get("A"), 4.0);
        assert_eq!(v.get("B"), 4.1);
        assert_eq!(v.get("C"), 5.0);
        assert!(!v.values.contains_key("BLAH"));
    }

    #[test]
    fn test_load_json_malformed() {
        let mut v = Values::new(test_policy());

        assert!(v.load_json(r#"[1, 2, 3]"#).is_err());
        assert!(v.load_json(r#"{ "A": "foo" }"#).is_err());

        // Nothing applied on failure
        assert_eq!(v.get("A"), 5.0);
    }

    #[test]
    fn test_serialize_as_flat_map() {
        let mut v = Values::new(Policy::shared(0.0, 10.0, 1.0, ["A", "B"]));
        v.set("B", 2.5);

        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, serde_json::json!({ "A": 1.0, "B": 2.5 }));
    }

    proptest! {
        #[test]
        fn prop_set_then_get_is_clamped(key in "[A-D]", value in -100.0f64..100.0) {
            let policy = test_policy();
            let mut v = Values::new(Arc::clone(&policy));
            v.set(&key, value);
            prop_assert_eq!(v.get(&key), policy.clamp(value));
        }

        #[test]
        fn prop_invalid_key_never_stored(key in "[E-Z]{1,3}", value in -100.0f64..100.0) {
            let mut v = Values::new(test_policy());
            v.set(&key, value);
            prop_assert_eq!(v.get(&key), 5.0);
            prop_assert_eq!(v.len(), 4);
        }

        #[test]
        fn prop_copy_matches_and_is_independent(a in 0.0f64..20.0, b in 0.0f64..20.0) {
            let mut v = Values::new(test_policy());
            v.set("A", a);
            let before = v.get("A");

            let mut copy = v.copy();
            for k in ["A", "B", "C", "D"] {
                prop_assert_eq!(copy.get(k), v.get(k));
            }

            copy.set("A", b);
            prop_assert_eq!(v.get("A"), before);
        }

        #[test]
        fn prop_adjust_stays_in_bounds(value in -50.0f64..50.0, delta in -3.0f64..3.0) {
            let policy = test_policy();
            let mut v = Values::new(Arc::clone(&policy));
            v.set("A", value);
            let mut m = Modifier::new(Arc::clone(&policy));
            m.set("A", delta);

            let adjusted = v.adjust(&m).get("A");
            prop_assert!(adjusted >= policy.min_value() && adjusted <= policy.max_value());
        }
    }
}
