//! Configurations: one selected alternative per independent catalog
//!
//! A [`Configuration`] is immutable once built. It compares, hashes and
//! orders by its entries, and renders to a canonical string used as a lookup
//! key, e.g. `catalog_1:g1_first;catalog_2:g2_third`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SpecError};

/// Separates the entries of the canonical string
pub const SEPARATOR: char = ';';

/// Separates the catalog name from the selected alternative
pub const SELECTION_SEPARATOR: char = ':';

/// Assignment of an alternative name to each independent catalog name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    selections: BTreeMap<String, String>,
}

impl Configuration {
    /// The configuration with no selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from `(catalog, alternative)` pairs.
    ///
    /// A later pair for the same catalog replaces an earlier one.
    ///
    /// # Examples
    ///
    /// ```
    /// use choicespec_rs::catalog::Configuration;
    ///
    /// let config = Configuration::from_pairs([("catalog_2", "g2_first"), ("catalog_1", "g1_second")]);
    /// assert_eq!(config.to_string(), "catalog_1:g1_second;catalog_2:g2_first");
    /// assert_eq!(config.selection("catalog_2"), Some("g2_first"));
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            selections: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn from_map(selections: BTreeMap<String, String>) -> Self {
        Self { selections }
    }

    /// Copy of the entries as a map
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.selections.clone()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.selections
    }

    /// Alternative selected for a catalog, if the catalog appears
    pub fn selection(&self, catalog: &str) -> Option<&str> {
        self.selections.get(catalog).map(String::as_str)
    }

    /// Catalog names, sorted
    pub fn catalogs(&self) -> impl Iterator<Item = &str> {
        self.selections.keys().map(String::as_str)
    }

    /// Entries sorted by catalog name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Combine partial configurations into one.
    ///
    /// Fails if two of them select different alternatives for the same catalog.
    pub fn merge<'a, I>(configurations: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Configuration>,
    {
        let mut selections: BTreeMap<String, String> = BTreeMap::new();
        for configuration in configurations {
            for (catalog, alternative) in configuration.iter() {
                match selections.get(catalog) {
                    Some(existing) if existing != alternative => {
                        return Err(SpecError::InvalidConfiguration(format!(
                            "catalog '{}' is set to both '{}' and '{}'",
                            catalog, existing, alternative
                        )));
                    }
                    Some(_) => {}
                    None => {
                        selections.insert(catalog.to_string(), alternative.to_string());
                    }
                }
            }
        }
        Ok(Self { selections })
    }

    pub(crate) fn insert(&mut self, catalog: &str, alternative: &str) {
        self.selections
            .insert(catalog.to_string(), alternative.to_string());
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (catalog, alternative)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}{}{}", catalog, SELECTION_SEPARATOR, alternative)?;
        }
        Ok(())
    }
}

impl FromStr for Configuration {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self> {
        let mut configuration = Self::new();
        if s.trim().is_empty() {
            return Ok(configuration);
        }
        for term in s.split(SEPARATOR) {
            let (catalog, alternative) =
                term.split_once(SELECTION_SEPARATOR).ok_or_else(|| {
                    SpecError::InvalidConfiguration(format!(
                        "'{}' is not of the form catalog{}alternative",
                        term, SELECTION_SEPARATOR
                    ))
                })?;
            if catalog.is_empty() || alternative.is_empty() {
                return Err(SpecError::InvalidConfiguration(format!(
                    "empty name in '{}'",
                    term
                )));
            }
            if configuration.selections.contains_key(catalog) {
                return Err(SpecError::InvalidConfiguration(format!(
                    "catalog '{}' appears twice in '{}'",
                    catalog, s
                )));
            }
            configuration.insert(catalog, alternative);
        }
        Ok(configuration)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
