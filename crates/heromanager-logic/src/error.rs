//! Error types shared across the crate.
//!
//! Unknown keys and unknown conflict categories are not errors; they are
//! dropped and, where useful, logged. Only structurally invalid payloads and
//! empty selection domains surface here.

use thiserror::Error;

use crate::classifier::Category;

/// A payload handed to one of the bulk loaders could not be parsed.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("malformed {what} payload: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DataError {
    pub(crate) fn malformed(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| DataError::Malformed { what, source }
    }
}

/// Hero selection could not produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// After conflict filtering (and id resolution) nothing was left to pick
    /// from in this category.
    #[error("no eligible {0} candidates")]
    NoEligibleCandidates(Category),
}
