//! Catalogs of named alternatives
//!
//! A [`Catalog`] either stores its own selection pointer or, when
//! synchronized, reads it from a controller catalog. The pointer of a
//! synchronized catalog does not exist as data, so it cannot drift from its
//! controller.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::named::NamedAlternative;
use crate::error::{Result, SpecError};

/// Handle to a catalog stored in a [`Specification`](crate::specification::Specification).
///
/// Handles are issued by the specification when a catalog is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(usize);

impl CatalogId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the catalog in its specification
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the selection pointer of a catalog comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// The catalog owns its pointer
    Independent { current_index: usize },

    /// The pointer is the one of the controller catalog
    Synchronized {
        controller: CatalogId,
        controller_name: String,
    },
}

/// Ordered, non-empty set of named alternatives with one active selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    name: String,
    alternatives: Vec<NamedAlternative>,
    selection: Selection,
}

impl Catalog {
    pub(crate) fn new(name: &str, alternatives: Vec<NamedAlternative>) -> Result<Self> {
        let catalog = Self {
            name: name.to_string(),
            alternatives,
            selection: Selection::Independent { current_index: 0 },
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub(crate) fn synchronized(
        name: &str,
        alternatives: Vec<NamedAlternative>,
        controller: CatalogId,
        controller_name: &str,
    ) -> Result<Self> {
        let catalog = Self {
            name: name.to_string(),
            alternatives,
            selection: Selection::Synchronized {
                controller,
                controller_name: controller_name.to_string(),
            },
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks that do not need the rest of the specification
    pub(crate) fn validate(&self) -> Result<()> {
        if self.alternatives.is_empty() {
            return Err(SpecError::EmptyCatalog {
                name: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for alternative in &self.alternatives {
            if alternative.name.is_empty() {
                return Err(SpecError::InvalidAlternative {
                    catalog: self.name.clone(),
                    message: "alternative names cannot be empty".to_string(),
                });
            }
            if !seen.insert(alternative.name.as_str()) {
                return Err(SpecError::InvalidAlternative {
                    catalog: self.name.clone(),
                    message: format!("alternative '{}' appears twice", alternative.name),
                });
            }
        }

        if let Selection::Independent { current_index } = self.selection {
            if current_index >= self.alternatives.len() {
                return Err(SpecError::IndexOutOfRange {
                    name: self.name.clone(),
                    index: current_index,
                    size: self.alternatives.len(),
                });
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of alternatives
    pub fn size(&self) -> usize {
        self.alternatives.len()
    }

    pub fn alternatives(&self) -> &[NamedAlternative] {
        &self.alternatives
    }

    pub fn alternative(&self, index: usize) -> Option<&NamedAlternative> {
        self.alternatives.get(index)
    }

    /// Position of the alternative with the given name
    pub fn alternative_index(&self, name: &str) -> Option<usize> {
        self.alternatives.iter().position(|a| a.name == name)
    }

    pub fn alternative_names(&self) -> Vec<&str> {
        self.alternatives.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_synchronized(&self) -> bool {
        matches!(self.selection, Selection::Synchronized { .. })
    }

    /// Controller of a synchronized catalog
    pub fn controller(&self) -> Option<CatalogId> {
        match self.selection {
            Selection::Synchronized { controller, .. } => Some(controller),
            Selection::Independent { .. } => None,
        }
    }

    /// Pointer owned by an independent catalog
    pub fn stored_index(&self) -> Option<usize> {
        match self.selection {
            Selection::Independent { current_index } => Some(current_index),
            Selection::Synchronized { .. } => None,
        }
    }

    /// Move the selection pointer of an independent catalog.
    ///
    /// Fails for synchronized catalogs and for out-of-range indices; on
    /// failure the pointer is unchanged.
    pub(crate) fn set_index(&mut self, index: usize) -> Result<()> {
        let size = self.alternatives.len();
        match &mut self.selection {
            Selection::Synchronized {
                controller_name, ..
            } => Err(SpecError::SynchronizedSelection {
                name: self.name.clone(),
                controller: controller_name.clone(),
            }),
            Selection::Independent { .. } if index >= size => Err(SpecError::IndexOutOfRange {
                name: self.name.clone(),
                index,
                size,
            }),
            Selection::Independent { current_index } => {
                *current_index = index;
                Ok(())
            }
        }
    }

    /// Back to the first alternative; no effect on synchronized catalogs.
    pub(crate) fn reset(&mut self) {
        if let Selection::Independent { current_index } = &mut self.selection {
            *current_index = 0;
        }
    }
}
