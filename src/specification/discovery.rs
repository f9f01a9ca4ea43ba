//! Static discovery and selection-dependent walks
//!
//! Discovery descends into every alternative of every catalog: it describes
//! the structure of the tree. The selected walk only follows the alternative
//! each catalog currently points at: it describes the current state. The two
//! are kept separate because nesting makes the set of catalogs that matter
//! depend on the selection.

use indexmap::IndexMap;
use std::collections::HashSet;

use super::Specification;
use crate::catalog::{Catalog, CatalogId, Configuration};
use crate::expression::Expression;

impl Specification {
    /// Every catalog reachable from the root, whatever the selection, in
    /// depth-first pre-order of first appearance.
    ///
    /// A catalog referenced several times is listed once.
    pub fn discover_catalogs(&self) -> IndexMap<String, CatalogId> {
        let mut found = IndexMap::new();
        if let Some(root) = &self.root {
            self.discover(root, &mut found);
        }
        found
    }

    fn discover(&self, expression: &Expression, found: &mut IndexMap<String, CatalogId>) {
        match expression {
            Expression::Catalog(id) => {
                let catalog = self.node(*id);
                if found.contains_key(catalog.name()) {
                    return;
                }
                found.insert(catalog.name().to_string(), *id);
                for alternative in catalog.alternatives() {
                    self.discover(&alternative.expression, found);
                }
            }
            other => {
                for child in other.children() {
                    self.discover(child, found);
                }
            }
        }
    }

    /// Discovered catalogs, followed by the controllers they read their
    /// pointer from when those are not discovered themselves.
    ///
    /// These are the catalogs a configuration may name.
    pub(crate) fn selectable_catalogs(&self) -> IndexMap<String, CatalogId> {
        let mut catalogs = self.discover_catalogs();
        let controllers: Vec<CatalogId> = catalogs
            .values()
            .map(|id| self.controlling(*id))
            .collect();
        for id in controllers {
            catalogs
                .entry(self.node(id).name().to_string())
                .or_insert(id);
        }
        catalogs
    }

    /// Independent catalogs holding the pointers of the discovered ones
    pub(crate) fn discover_independent(&self) -> Vec<CatalogId> {
        self.selectable_catalogs()
            .into_values()
            .filter(|id| !self.node(*id).is_synchronized())
            .collect()
    }

    /// Pre-order walk along the currently selected alternatives, calling
    /// `visit` on each catalog node met, synchronized ones included.
    pub(crate) fn walk_selected<'s, F>(&'s self, visit: &mut F)
    where
        F: FnMut(CatalogId, &'s Catalog),
    {
        if let Some(root) = &self.root {
            self.walk_expression(root, visit);
        }
    }

    fn walk_expression<'s, F>(&'s self, expression: &'s Expression, visit: &mut F)
    where
        F: FnMut(CatalogId, &'s Catalog),
    {
        match expression {
            Expression::Catalog(id) => {
                visit(*id, self.node(*id));
                self.walk_expression(&self.selected(*id).expression, visit);
            }
            other => {
                for child in other.children() {
                    self.walk_expression(child, visit);
                }
            }
        }
    }

    /// Selections of the independent catalogs met along the selected path.
    ///
    /// Synchronized catalogs are followed but never reported: their
    /// selection is implied by their controller. A controller that is not on
    /// the path itself is reported in their place.
    pub fn current_configuration(&self) -> Configuration {
        self.decision_order()
            .into_iter()
            .map(|id| (self.node(id).name(), self.selected(id).name.as_str()))
            .collect()
    }

    /// Independent catalogs whose pointer the selected path depends on, in
    /// the order the path first depends on them.
    ///
    /// A synchronized catalog met before its controller makes the controller
    /// a decision at that point.
    pub(crate) fn decision_order(&self) -> Vec<CatalogId> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        self.walk_selected(&mut |id, _| {
            let decision = self.controlling(id);
            if seen.insert(decision) {
                order.push(decision);
            }
        });
        order
    }
}
