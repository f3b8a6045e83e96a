//! The three classifier categories.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which registry a classifier lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Race,
    Caste,
    Profession,
}

/// A category name that is not one of `races`, `castes` or `professions`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown classifier category: {0:?}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories for iteration.
    pub fn all() -> &'static [Category] {
        &[Category::Race, Category::Caste, Category::Profession]
    }

    /// The two categories a candidate of this category is checked against.
    pub fn others(self) -> [Category; 2] {
        match self {
            Category::Race => [Category::Caste, Category::Profession],
            Category::Caste => [Category::Race, Category::Profession],
            Category::Profession => [Category::Race, Category::Caste],
        }
    }

    /// Plural name used as the key in conflict lists.
    pub fn plural(self) -> &'static str {
        match self {
            Category::Race => "races",
            Category::Caste => "castes",
            Category::Profession => "professions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Race => "race",
            Category::Caste => "caste",
            Category::Profession => "profession",
        };
        f.write_str(name)
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parses the plural conflict-list names, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "races" => Ok(Category::Race),
            "castes" => Ok(Category::Caste),
            "professions" => Ok(Category::Profession),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
