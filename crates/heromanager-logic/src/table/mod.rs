//! Policy-bounded numeric tables.
//!
//! A [`Policy`] fixes the key set and bounds for one attribute domain. A
//! [`Values`] table holds clamped numbers for those keys, and a [`Modifier`]
//! holds additive deltas that scale a table without mutating it. An
//! [`AttributeView`] keeps a base table under named, replaceable modifiers.

mod modifier;
mod policy;
mod values;
mod view;

pub use modifier::*;
pub use policy::*;
pub use values::*;
pub use view::*;
