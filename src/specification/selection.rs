//! In-place selection of alternatives

use tracing::debug;

use super::Specification;
use crate::catalog::{Configuration, Selection};
use crate::error::{Result, SpecError};

impl Specification {
    /// Point every discovered independent catalog at its first alternative.
    ///
    /// Synchronized catalogs follow their controllers, which are reset too.
    pub fn reset_expression_selection(&mut self) {
        let discovered = self.discover_independent();
        for id in &discovered {
            self.node_mut(*id).reset();
        }
        debug!(catalogs = discovered.len(), "reset expression selection");
    }

    /// Select alternative `index` in the catalog named `catalog_name`.
    ///
    /// Returns the number of catalogs modified: 1 when the catalog is part of
    /// the tree, 0 when no catalog of that name was discovered.
    pub fn select_expression(&mut self, catalog_name: &str, index: usize) -> Result<usize> {
        let Some(id) = self.selectable_catalogs().get(catalog_name).copied() else {
            debug!(catalog = catalog_name, "no catalog to select");
            return Ok(0);
        };
        self.node_mut(id).set_index(index)?;
        Ok(1)
    }

    /// Apply a whole configuration.
    ///
    /// The configuration is checked in full before any pointer moves, so a
    /// failed call leaves the tree untouched. Catalogs it does not mention
    /// keep their selection.
    ///
    /// # Errors
    ///
    /// `UnknownCatalog` or `UnknownAlternative` for names absent from the
    /// tree, `SynchronizedSelection` if it names a synchronized catalog.
    pub fn configure_catalogs(&mut self, configuration: &Configuration) -> Result<()> {
        let selectable = self.selectable_catalogs();
        let mut updates = Vec::with_capacity(configuration.len());
        for (catalog_name, alternative) in configuration.iter() {
            let id = selectable
                .get(catalog_name)
                .copied()
                .ok_or_else(|| SpecError::UnknownCatalog {
                    name: catalog_name.to_string(),
                })?;
            let catalog = self.node(id);
            if let Selection::Synchronized {
                controller_name, ..
            } = catalog.selection()
            {
                return Err(SpecError::SynchronizedSelection {
                    name: catalog_name.to_string(),
                    controller: controller_name.clone(),
                });
            }
            let index = catalog.alternative_index(alternative).ok_or_else(|| {
                SpecError::UnknownAlternative {
                    catalog: catalog_name.to_string(),
                    alternative: alternative.to_string(),
                }
            })?;
            updates.push((id, index));
        }

        for (id, index) in updates {
            self.node_mut(id).set_index(index)?;
        }
        debug!(configuration = %configuration, "configured catalogs");
        Ok(())
    }
}
