//! Enumeration of configurations
//!
//! Both enumerators move the pointers of the specification they borrow and
//! yield the configuration the tree is in after each move. A consumer that
//! needs the tree itself (to evaluate or estimate it) reads it through
//! [`FullEnumerator::specification`] between two calls to `next`.
//!
//! The full enumerator is an odometer over the *decisions* of the selected
//! path: the independent catalogs the path depends on, in the order it first
//! depends on them. To advance, the last decision that still has an
//! alternative left moves forward and every catalog that is not an earlier
//! decision goes back to its first alternative. Earlier decisions are
//! untouched, so the path up to the moved decision is unchanged and the
//! decisions after it are the ones reachable under the new choice.

use std::collections::HashSet;
use tracing::{debug, trace};

use super::Specification;
use crate::catalog::{CatalogId, Configuration};
use crate::config::SearchConfig;
use crate::error::{Result, SpecError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    NotStarted,
    Running,
    Done,
}

/// Visits every configuration reachable from the root.
///
/// Created by [`Specification::iter_configurations`].
#[derive(Debug)]
pub struct FullEnumerator<'a> {
    spec: &'a mut Specification,
    independent: Vec<CatalogId>,
    progress: Progress,
    visited: usize,
}

impl<'a> FullEnumerator<'a> {
    fn new(spec: &'a mut Specification) -> Self {
        let independent = spec.discover_independent();
        Self {
            spec,
            independent,
            progress: Progress::NotStarted,
            visited: 0,
        }
    }

    /// The tree in the configuration last yielded
    pub fn specification(&self) -> &Specification {
        &*self.spec
    }

    /// Move to the next decision vector. Returns false when exhausted.
    fn advance(&mut self) -> bool {
        let order = self.spec.decision_order();
        for (position, &id) in order.iter().enumerate().rev() {
            let catalog = self.spec.node(id);
            let index = self.spec.index_of(id);
            if index + 1 >= catalog.size() {
                continue;
            }

            let keep = &order[..position];
            for &other in &self.independent {
                if other != id && !keep.contains(&other) {
                    self.spec.node_mut(other).reset();
                }
            }
            // Cannot fail: independent and in range
            if self.spec.node_mut(id).set_index(index + 1).is_err() {
                return false;
            }
            trace!(
                catalog = self.spec.node(id).name(),
                index = index + 1,
                "advanced decision"
            );
            return true;
        }
        false
    }
}

impl Iterator for FullEnumerator<'_> {
    type Item = Configuration;

    fn next(&mut self) -> Option<Configuration> {
        match self.progress {
            Progress::Done => return None,
            Progress::NotStarted => {
                self.spec.reset_expression_selection();
                self.progress = Progress::Running;
            }
            Progress::Running => {
                if !self.advance() {
                    self.progress = Progress::Done;
                    debug!(configurations = self.visited, "enumeration complete");
                    return None;
                }
            }
        }
        self.visited += 1;
        Some(self.spec.current_configuration())
    }
}

/// Applies a caller-supplied list of configurations, in order.
///
/// Created by [`Specification::select_configurations`]. Each item is the
/// result of [`Specification::configure_catalogs`] followed by a read of the
/// current configuration; nothing is sorted or deduplicated.
#[derive(Debug)]
pub struct SelectedEnumerator<'a> {
    spec: &'a mut Specification,
    targets: std::vec::IntoIter<Configuration>,
}

impl SelectedEnumerator<'_> {
    /// The tree in the configuration last yielded
    pub fn specification(&self) -> &Specification {
        &*self.spec
    }
}

impl Iterator for SelectedEnumerator<'_> {
    type Item = Result<Configuration>;

    fn next(&mut self) -> Option<Self::Item> {
        let target = self.targets.next()?;
        Some(
            self.spec
                .configure_catalogs(&target)
                .map(|_| self.spec.current_configuration()),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.targets.size_hint()
    }
}

impl ExactSizeIterator for SelectedEnumerator<'_> {}

impl Specification {
    /// Enumerate every reachable configuration, moving the pointers of this
    /// specification.
    ///
    /// The enumeration starts from the default selection, whatever the
    /// pointers were before.
    ///
    /// # Examples
    ///
    /// ```
    /// use choicespec_rs::catalog::NamedAlternative;
    /// use choicespec_rs::expression::Expression;
    /// use choicespec_rs::Specification;
    ///
    /// let mut spec = Specification::new();
    /// let cost = spec
    ///     .add_catalog(
    ///         "cost",
    ///         vec![
    ///             NamedAlternative::new("linear", Expression::variable("cost")),
    ///             NamedAlternative::new("log", Expression::parse("ln(cost)").unwrap()),
    ///         ],
    ///     )
    ///     .unwrap();
    /// spec.set_root(Expression::beta("b_cost", 0.0) * cost).unwrap();
    ///
    /// let mut labels = Vec::new();
    /// let mut configurations = spec.iter_configurations();
    /// while let Some(configuration) = configurations.next() {
    ///     let resolved = configurations.specification().resolved_expression().unwrap();
    ///     labels.push(format!("{} => {}", configuration, resolved));
    /// }
    /// assert_eq!(
    ///     labels,
    ///     vec![
    ///         "cost:linear => (b_cost(init=0) * cost)",
    ///         "cost:log => (b_cost(init=0) * ln(cost))",
    ///     ]
    /// );
    /// ```
    pub fn iter_configurations(&mut self) -> FullEnumerator<'_> {
        FullEnumerator::new(self)
    }

    /// Apply `configurations` one after the other, in the given order.
    pub fn select_configurations(
        &mut self,
        configurations: Vec<Configuration>,
    ) -> SelectedEnumerator<'_> {
        SelectedEnumerator {
            spec: self,
            targets: configurations.into_iter(),
        }
    }

    /// Distinct reachable configurations.
    ///
    /// Runs on a copy: the pointers of `self` do not move.
    pub fn set_of_configurations(&self) -> HashSet<Configuration> {
        let mut copy = self.clone();
        copy.iter_configurations().collect()
    }

    /// Number of distinct reachable configurations
    pub fn number_of_multiple_expressions(&self) -> usize {
        self.set_of_configurations().len()
    }

    /// Distinct reachable configurations in enumeration order, refusing to
    /// go beyond `config.maximum_number_catalog_expressions`.
    ///
    /// Runs on a copy: the pointers of `self` do not move.
    pub fn all_configurations(&self, config: &SearchConfig) -> Result<Vec<Configuration>> {
        let maximum = config.maximum_number_catalog_expressions;
        let mut copy = self.clone();
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for configuration in copy.iter_configurations() {
            if seen.insert(configuration.clone()) {
                if ordered.len() == maximum {
                    return Err(SpecError::TooManyConfigurations { maximum });
                }
                ordered.push(configuration);
            }
        }
        Ok(ordered)
    }
}
