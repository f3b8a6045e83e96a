//! A base table seen through a set of named modifiers.

use std::sync::OnceLock;

use serde::{Serialize, Serializer};

use super::{Modifier, Values};

/// Base values plus named modifier slots, compounded in slot order.
///
/// The adjusted table is rendered on first read and cached until the next
/// change to the slots.
#[derive(Debug, Clone)]
pub struct AttributeView {
    base: Values,
    slots: Vec<(String, Modifier)>,
    rendered: OnceLock<Values>,
}

impl AttributeView {
    pub fn new(base: Values) -> Self {
        Self {
            base,
            slots: Vec::new(),
            rendered: OnceLock::new(),
        }
    }

    pub fn base(&self) -> &Values {
        &self.base
    }

    /// Put `modifier` in the slot called `name`. An existing slot of that
    /// name is replaced in place and keeps its position; a new one goes last.
    pub fn modify(&mut self, name: impl Into<String>, modifier: Modifier) {
        let name = name.into();
        match self.slots.iter_mut().find(|(slot, _)| *slot == name) {
            Some((_, existing)) => *existing = modifier,
            None => self.slots.push((name, modifier)),
        }
        self.rendered = OnceLock::new();
    }

    /// Drop the slot called `name`, returning its modifier.
    pub fn remove(&mut self, name: &str) -> Option<Modifier> {
        let index = self.slots.iter().position(|(slot, _)| slot == name)?;
        self.rendered = OnceLock::new();
        Some(self.slots.remove(index).1)
    }

    pub fn modifier(&self, name: &str) -> Option<&Modifier> {
        self.slots
            .iter()
            .find(|(slot, _)| slot == name)
            .map(|(_, m)| m)
    }

    /// Slot names in application order.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|(name, _)| name.as_str())
    }

    /// The base adjusted by every slot in turn, each step clamped.
    pub fn values(&self) -> &Values {
        self.rendered.get_or_init(|| {
            self.slots
                .iter()
                .fold(self.base.copy(), |table, (_, m)| table.adjust(m))
        })
    }

    pub fn get(&self, key: &str) -> f64 {
        self.values().get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values().iter()
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

impl Serialize for AttributeView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values().serialize(serializer)
    }
}
