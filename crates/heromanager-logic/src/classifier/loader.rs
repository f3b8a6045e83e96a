//! Loading classifier documents into a manifest.
//!
//! A document is a JSON object mapping classifier id to record:
//!
//! ```json
//! {
//!   "Dwarf": {
//!     "name": "Dwarf",
//!     "rarity": 0.8,
//!     "attributes": { "BRN": 0.2, "FIN": -0.1 },
//!     "conflicts": { "castes": ["Noble"], "professions": ["Pirate"] }
//!   }
//! }
//! ```
//!
//! Reading the text from disk is the caller's business.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Category, Classifier, ClassifierManifest, ClassifierRecord};
use crate::error::DataError;
use crate::table::Policy;

/// Parse a classifier document. Records without a name take their id as
/// the name.
pub fn parse_classifiers(
    json: &str,
    policy: &Arc<Policy>,
) -> Result<BTreeMap<String, Classifier>, DataError> {
    let records: BTreeMap<String, ClassifierRecord> =
        serde_json::from_str(json).map_err(DataError::malformed("classifier document"))?;

    Ok(records
        .into_iter()
        .map(|(id, mut record)| {
            if record.name.is_empty() {
                record.name = id.clone();
            }
            (id, record.into_classifier(Arc::clone(policy)))
        })
        .collect())
}

/// Parse a document and register every classifier under `category`.
///
/// The document is parsed in full before anything is registered, so a
/// malformed document leaves the manifest untouched. Returns the number of
/// classifiers registered.
pub fn load_classifiers(
    category: Category,
    json: &str,
    policy: &Arc<Policy>,
    manifest: &mut ClassifierManifest,
) -> Result<usize, DataError> {
    let classifiers = parse_classifiers(json, policy)?;
    let count = classifiers.len();

    for (id, classifier) in classifiers {
        manifest.register(category, id, classifier);
    }

    log::info!("Loaded {} {} classifiers", count, category);
    Ok(count)
}
