//! Races, castes and professions.
//!
//! All three categories share one shape, [`Classifier`]: a name, an
//! attribute [`Modifier`](crate::table::Modifier) and a [`ConflictGroup`]
//! listing the ids it cannot be combined with. The [`ClassifierManifest`]
//! keeps one registry per [`Category`].

mod category;
mod conflict;
mod definition;
mod loader;
mod manifest;

pub use category::*;
pub use conflict::*;
pub use definition::*;
pub use loader::*;
pub use manifest::*;
