//! Registry of every known race, caste and profession.
//!
//! The manifest is filled during data load and read-mostly afterwards.
//! Registration needs `&mut self`, so writers are serialized by ownership;
//! reads only need `&self` and are safe from any number of threads.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::{Category, Classifier};

/// One category's classifiers plus a lazily built list of their ids.
#[derive(Debug, Clone, Default)]
struct Registry {
    entries: BTreeMap<String, Classifier>,
    ids: OnceLock<Vec<String>>,
}

impl Registry {
    fn insert(&mut self, id: String, classifier: Classifier) {
        self.entries.insert(id, classifier);
        self.ids = OnceLock::new();
    }

    fn ids(&self) -> &[String] {
        self.ids
            .get_or_init(|| self.entries.keys().cloned().collect())
            .as_slice()
    }
}

/// Classifiers keyed by id, one registry per category.
#[derive(Debug, Clone, Default)]
pub struct ClassifierManifest {
    races: Registry,
    castes: Registry,
    professions: Registry,
}

impl ClassifierManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. The previous entry under `id`, if any, is dropped.
    pub fn register(&mut self, category: Category, id: impl Into<String>, classifier: Classifier) {
        let id = id.into();
        log::info!("Registering {}: {}", category, id);
        self.registry_mut(category).insert(id, classifier);
    }

    pub fn register_race(&mut self, id: impl Into<String>, race: Classifier) {
        self.register(Category::Race, id, race);
    }

    pub fn register_caste(&mut self, id: impl Into<String>, caste: Classifier) {
        self.register(Category::Caste, id, caste);
    }

    pub fn register_profession(&mut self, id: impl Into<String>, profession: Classifier) {
        self.register(Category::Profession, id, profession);
    }

    pub fn resolve(&self, category: Category, id: &str) -> Option<&Classifier> {
        self.registry(category).entries.get(id)
    }

    /// Like [`resolve`](Self::resolve) but also hands back the manifest's
    /// own copy of the id.
    pub fn resolve_entry(&self, category: Category, id: &str) -> Option<(&str, &Classifier)> {
        self.registry(category)
            .entries
            .get_key_value(id)
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn resolve_race(&self, id: &str) -> Option<&Classifier> {
        self.resolve(Category::Race, id)
    }

    pub fn resolve_caste(&self, id: &str) -> Option<&Classifier> {
        self.resolve(Category::Caste, id)
    }

    pub fn resolve_profession(&self, id: &str) -> Option<&Classifier> {
        self.resolve(Category::Profession, id)
    }

    /// Every registered id in `category`. Callers must not rely on the order.
    pub fn all(&self, category: Category) -> &[String] {
        self.registry(category).ids()
    }

    pub fn all_races(&self) -> &[String] {
        self.all(Category::Race)
    }

    pub fn all_castes(&self) -> &[String] {
        self.all(Category::Caste)
    }

    pub fn all_professions(&self) -> &[String] {
        self.all(Category::Profession)
    }

    pub fn len(&self, category: Category) -> usize {
        self.registry(category).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        Category::all().iter().all(|c| self.len(*c) == 0)
    }

    fn registry(&self, category: Category) -> &Registry {
        match category {
            Category::Race => &self.races,
            Category::Caste => &self.castes,
            Category::Profession => &self.professions,
        }
    }

    fn registry_mut(&mut self, category: Category) -> &mut Registry {
        match category {
            Category::Race => &mut self.races,
            Category::Caste => &mut self.castes,
            Category::Profession => &mut self.professions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::attribute_policy;

    fn classifier(name: &str) -> Classifier {
        Classifier::named(name, attribute_policy(0.0, 500.0, 0.0))
    }

    #[test]
    fn test_new_manifest_is_empty() {
        let m = ClassifierManifest::new();

        assert!(m.is_empty());
        assert!(m.all_races().is_empty());
        assert!(m.all_castes().is_empty());
        assert!(m.all_professions().is_empty());
    }

    #[test]
    fn test_register_and_resolve() {
        let mut m = ClassifierManifest::new();
        m.register_race("Dwarf", classifier("Dwarf"));
        m.register_caste("Noble", classifier("Noble"));
        m.register_profession("Miner", classifier("Miner"));

        assert_eq!(m.resolve_race("Dwarf").map(|c| c.name.as_str()), Some("Dwarf"));
        assert_eq!(m.resolve_caste("Noble").map(|c| c.name.as_str()), Some("Noble"));
        assert_eq!(m.resolve_profession("Miner").map(|c| c.name.as_str()), Some("Miner"));

        // Registries are separate
        assert!(m.resolve_race("Noble").is_none());
        assert!(m.resolve_caste("Miner").is_none());
        assert!(m.resolve_profession("Dwarf").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut m = ClassifierManifest::new();
        m.register_race("Dwarf", classifier("First"));
        m.register_race("Dwarf", classifier("Second"));

        assert_eq!(m.all_races().len(), 1);
        assert_eq!(m.resolve_race("Dwarf").map(|c| c.name.as_str()), Some("Second"));
    }

    #[test]
    fn test_id_cache_rebuilt_after_register() {
        let mut m = ClassifierManifest::new();
        m.register_race("Dwarf", classifier("Dwarf"));
        m.register_race("Elf", classifier("Elf"));

        assert_eq!(m.all_races().len(), 2);

        m.register_race("Human", classifier("Human"));

        let ids = m.all_races();
        assert_eq!(ids.len(), 3);
        for id in ["Dwarf", "Elf", "Human"] {
            assert!(ids.iter().any(|i| i == id));
        }
    }

    #[test]
    fn test_resolve_entry_returns_manifest_id() {
        let mut m = ClassifierManifest::new();
        m.register_caste("Serf", classifier("Serf"));

        let (id, c) = m.resolve_entry(Category::Caste, "Serf").unwrap();
        assert_eq!(id, "Serf");
        assert_eq!(c.name, "Serf");
        assert!(m.resolve_entry(Category::Caste, "Noble").is_none());
    }

    #[test]
    fn test_concurrent_reads() {
        let mut m = ClassifierManifest::new();
        for id in ["A", "B", "C", "D"] {
            m.register_profession(id, classifier(id));
        }

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(m.all_professions().len(), 4));
            }
        });
    }
}
