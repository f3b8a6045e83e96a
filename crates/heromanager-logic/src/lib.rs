//! Pure rules logic for HeroManager.
//!
//! This crate contains the rules engine behind hero generation: bounded
//! attribute tables, classifier modifiers, conflict constraints between
//! races, castes and professions, and the weighted selector that turns a
//! set of options into a concrete hero. Nothing here touches the disk, the
//! network or a clock; callers hand in parsed data (or JSON text) and get
//! plain values back.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`table`] | Policy-bounded value tables, additive-delta modifiers and attribute views |
//! | [`attributes`] | The five core hero attributes and their policy |
//! | [`classifier`] | Races, castes, professions, conflict groups, manifest and data loading |
//! | [`weighted`] | Cumulative-weight random pick |
//! | [`selector`] | Conflict-aware option filtering and per-category picks |
//! | [`hero`] | Hero generation and derived attribute profiles |
//! | [`config`] | Engine configuration (attribute bounds, base values) |
//! | [`error`] | Error types for data loading and selection |

pub mod attributes;
pub mod classifier;
pub mod config;
pub mod error;
pub mod hero;
pub mod selector;
pub mod table;
pub mod weighted;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::attributes::Attribute;
    pub use crate::classifier::{Category, Classifier, ClassifierManifest, ConflictGroup};
    pub use crate::config::EngineConfig;
    pub use crate::error::{DataError, SelectionError};
    pub use crate::hero::{Hero, HeroGenerator};
    pub use crate::selector::Selector;
    pub use crate::table::{AttributeView, Modifier, Policy, Values};
    pub use crate::weighted::Weighted;
}
