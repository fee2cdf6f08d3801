//! Category catalog supplied by the caller on every extraction.
//!
//! The engine only reads the catalog: it never caches it between calls and
//! never mutates it. Name matching is case-insensitive and insensitive to the
//! Unicode composition of accents (`"Saúde"` typed with a combining acute
//! matches the precomposed spelling).

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// A category the caller accepts as a transaction target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub is_income: bool,
}

impl Category {
    pub fn new(name: impl Into<String>, is_income: bool) -> Self {
        Self {
            name: name.into(),
            is_income,
        }
    }

    pub fn expense(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn income(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }
}

/// Capability to resolve a category label to a catalog entry.
///
/// Implemented by [`CategoryCatalog`] and plain slices; callers backed by a
/// data store can implement it on their own handle.
pub trait CategoryLookup {
    /// Returns the entry whose name equals `name`, ignoring case.
    fn find_by_name(&self, name: &str) -> Option<Category>;
}

/// Key used for case-insensitive exact name comparison.
pub(crate) fn name_key(name: &str) -> String {
    name.nfc().flat_map(char::to_lowercase).collect()
}

impl CategoryLookup for [Category] {
    fn find_by_name(&self, name: &str) -> Option<Category> {
        let wanted = name_key(name);
        self.iter()
            .find(|category| name_key(&category.name) == wanted)
            .cloned()
    }
}

/// Ordered collection of categories with unique (case-insensitive) names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// Builds a catalog, rejecting blank or duplicate names.
    pub fn new(categories: Vec<Category>) -> ResultEngine<Self> {
        let mut seen: Vec<String> = Vec::with_capacity(categories.len());
        for category in &categories {
            if category.name.trim().is_empty() {
                return Err(EngineError::InvalidCatalog(
                    "category name must not be empty".to_string(),
                ));
            }
            let key = name_key(&category.name);
            if seen.contains(&key) {
                return Err(EngineError::InvalidCatalog(format!(
                    "duplicate category \"{}\"",
                    category.name
                )));
            }
            seen.push(key);
        }
        Ok(Self { categories })
    }

    /// The catalog a fresh installation starts with.
    pub fn default_seed() -> Self {
        Self {
            categories: vec![
                Category::expense("Moradia"),
                Category::expense("Alimentação"),
                Category::expense("Transporte"),
                Category::expense("Lazer"),
                Category::expense("Saúde"),
                Category::expense("Compras"),
                Category::income("Salário"),
                Category::income("Freelance"),
                Category::income("Investimentos"),
                Category::expense("Outros"),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl CategoryLookup for CategoryCatalog {
    fn find_by_name(&self, name: &str) -> Option<Category> {
        self.categories.as_slice().find_by_name(name)
    }
}

impl TryFrom<Vec<Category>> for CategoryCatalog {
    type Error = EngineError;

    fn try_from(value: Vec<Category>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryCatalog> for Vec<Category> {
    fn from(value: CategoryCatalog) -> Self {
        value.categories
    }
}
