//! # Specification arena
//!
//! A [`Specification`] owns every catalog of a modeling session together
//! with the root expression that uses them. All traversals (discovery,
//! current configuration, selection, enumeration) are methods on it, so the
//! shared mutable state is always explicit.
//!
//! Catalogs only reference catalogs registered before them, which keeps the
//! catalog graph acyclic and every traversal finite.
//!
//! Cloning a specification is a deep copy: the clone has its own selection
//! pointers. This is how independent workers explore configurations
//! concurrently (see [`Specification::par_map_configurations`]).

mod discovery;
mod enumerate;
mod parallel;
mod selection;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::catalog::{Catalog, CatalogId, NamedAlternative, Selection};
use crate::error::{Result, SpecError};
use crate::expression::{EvaluationContext, Expression};

pub use enumerate::{FullEnumerator, SelectedEnumerator};

/// Catalogs of a modeling session and the expression combining them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Specification {
    catalogs: Vec<Catalog>,

    root: Option<Expression>,

    /// Catalog name to handle
    #[serde(skip)]
    names: HashMap<String, CatalogId>,
}

impl Specification {
    /// Create an empty specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an independent catalog.
    ///
    /// # Errors
    ///
    /// Construction errors for an empty list of alternatives, empty or
    /// duplicated alternative names, a name already registered, or an
    /// alternative referring to a catalog this specification did not issue.
    ///
    /// # Examples
    ///
    /// ```
    /// use choicespec_rs::catalog::NamedAlternative;
    /// use choicespec_rs::expression::Expression;
    /// use choicespec_rs::Specification;
    ///
    /// let mut spec = Specification::new();
    /// let time = spec
    ///     .add_catalog(
    ///         "time",
    ///         vec![
    ///             NamedAlternative::new("linear", Expression::variable("tt")),
    ///             NamedAlternative::new("log", Expression::parse("ln(tt)").unwrap()),
    ///         ],
    ///     )
    ///     .unwrap();
    /// spec.set_root(Expression::beta("b_time", 0.0) * time).unwrap();
    /// assert_eq!(spec.number_of_multiple_expressions(), 2);
    /// ```
    pub fn add_catalog(
        &mut self,
        name: &str,
        alternatives: Vec<NamedAlternative>,
    ) -> Result<CatalogId> {
        let catalog = Catalog::new(name, alternatives)?;
        self.register(catalog)
    }

    /// Register a catalog whose selection follows `controller`.
    ///
    /// Both catalogs must have the same number of alternatives.
    pub fn add_synchronized_catalog(
        &mut self,
        name: &str,
        alternatives: Vec<NamedAlternative>,
        controller: CatalogId,
    ) -> Result<CatalogId> {
        let controller_name = self.catalog(controller)?.name().to_string();
        let catalog = Catalog::synchronized(name, alternatives, controller, &controller_name)?;
        self.register(catalog)
    }

    fn register(&mut self, catalog: Catalog) -> Result<CatalogId> {
        let id = CatalogId::new(self.catalogs.len());
        self.check_catalog(id, &catalog)?;
        debug!(
            catalog = catalog.name(),
            id = id.index(),
            size = catalog.size(),
            synchronized = catalog.is_synchronized(),
            "registered catalog"
        );
        self.names.insert(catalog.name().to_string(), id);
        self.catalogs.push(catalog);
        Ok(id)
    }

    /// Checks that need the catalogs already registered
    fn check_catalog(&self, id: CatalogId, catalog: &Catalog) -> Result<()> {
        catalog.validate()?;

        if self.names.contains_key(catalog.name()) {
            return Err(SpecError::DuplicateCatalog {
                name: catalog.name().to_string(),
            });
        }

        for alternative in catalog.alternatives() {
            if let Some(foreign) = alternative
                .expression
                .catalog_ids()
                .into_iter()
                .find(|other| other.index() >= id.index())
            {
                return Err(SpecError::InvalidAlternative {
                    catalog: catalog.name().to_string(),
                    message: format!(
                        "alternative '{}' refers to unknown catalog {}",
                        alternative.name, foreign
                    ),
                });
            }
        }

        if let Selection::Synchronized {
            controller,
            controller_name,
        } = catalog.selection()
        {
            if controller.index() >= id.index() {
                return Err(SpecError::UnknownCatalogId {
                    id: controller.index(),
                });
            }
            let leader = self.node(*controller);
            if leader.name() != controller_name {
                return Err(SpecError::UnknownCatalog {
                    name: controller_name.clone(),
                });
            }
            if leader.size() != catalog.size() {
                return Err(SpecError::SizeMismatch {
                    name: catalog.name().to_string(),
                    size: catalog.size(),
                    controller: leader.name().to_string(),
                    controller_size: leader.size(),
                });
            }
        }
        Ok(())
    }

    /// Set the expression whose configurations are explored
    pub fn set_root(&mut self, root: impl Into<Expression>) -> Result<()> {
        let root = root.into();
        if let Some(foreign) = root
            .catalog_ids()
            .into_iter()
            .find(|id| id.index() >= self.catalogs.len())
        {
            return Err(SpecError::UnknownCatalogId {
                id: foreign.index(),
            });
        }
        self.root = Some(root);
        Ok(())
    }

    pub fn root(&self) -> Option<&Expression> {
        self.root.as_ref()
    }

    pub fn catalog(&self, id: CatalogId) -> Result<&Catalog> {
        self.catalogs
            .get(id.index())
            .ok_or(SpecError::UnknownCatalogId { id: id.index() })
    }

    /// Handle of the catalog registered under `name`
    pub fn catalog_id(&self, name: &str) -> Option<CatalogId> {
        self.names.get(name).copied()
    }

    /// All registered catalogs, whether or not the root uses them
    pub fn catalogs(&self) -> impl Iterator<Item = (CatalogId, &Catalog)> {
        self.catalogs
            .iter()
            .enumerate()
            .map(|(i, c)| (CatalogId::new(i), c))
    }

    pub fn number_of_catalogs(&self) -> usize {
        self.catalogs.len()
    }

    /// Handles are validated on registration, so indexing cannot fail.
    fn node(&self, id: CatalogId) -> &Catalog {
        &self.catalogs[id.index()]
    }

    fn node_mut(&mut self, id: CatalogId) -> &mut Catalog {
        &mut self.catalogs[id.index()]
    }

    /// Independent catalog whose pointer `id` reads
    fn controlling(&self, mut id: CatalogId) -> CatalogId {
        while let Some(controller) = self.node(id).controller() {
            id = controller;
        }
        id
    }

    /// Effective index of the selected alternative, following controllers
    fn index_of(&self, id: CatalogId) -> usize {
        self.node(self.controlling(id)).stored_index().unwrap_or_default()
    }

    fn selected(&self, id: CatalogId) -> &NamedAlternative {
        &self.node(id).alternatives()[self.index_of(id)]
    }

    /// Independent catalog that determines the selection of `id`
    pub fn controlling_catalog(&self, id: CatalogId) -> Result<CatalogId> {
        self.catalog(id)?;
        Ok(self.controlling(id))
    }

    /// Index of the selected alternative of a catalog
    pub fn current_index(&self, id: CatalogId) -> Result<usize> {
        self.catalog(id)?;
        Ok(self.index_of(id))
    }

    /// Name of the selected alternative of a catalog
    pub fn selected_name(&self, id: CatalogId) -> Result<&str> {
        self.catalog(id)?;
        Ok(&self.selected(id).name)
    }

    /// Expression of the selected alternative of a catalog
    pub fn selected_expression(&self, id: CatalogId) -> Result<&Expression> {
        self.catalog(id)?;
        Ok(&self.selected(id).expression)
    }

    /// Move the pointer of an independent catalog.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index` is not below the catalog size,
    /// `SynchronizedSelection` if the catalog follows a controller.
    pub fn set_index(&mut self, id: CatalogId, index: usize) -> Result<()> {
        self.catalog(id)?;
        self.node_mut(id).set_index(index)
    }

    /// The root with every catalog replaced by its selected alternative.
    ///
    /// This is the expression an evaluator or estimator consumes for the
    /// current configuration.
    pub fn resolved_expression(&self) -> Option<Expression> {
        self.root.as_ref().map(|root| self.resolve(root))
    }

    fn resolve(&self, expression: &Expression) -> Expression {
        match expression {
            Expression::Catalog(id) => self.resolve(&self.selected(*id).expression),
            Expression::Unary(op, expr) => Expression::Unary(*op, Box::new(self.resolve(expr))),
            Expression::Binary(op, left, right) => Expression::Binary(
                *op,
                Box::new(self.resolve(left)),
                Box::new(self.resolve(right)),
            ),
            Expression::Function(name, args) => Expression::Function(
                name.clone(),
                args.iter().map(|arg| self.resolve(arg)).collect(),
            ),
            leaf => leaf.clone(),
        }
    }

    /// Evaluate the root for the current configuration
    pub fn evaluate<C: EvaluationContext>(&self, context: &C) -> Result<f64> {
        match self.resolved_expression() {
            Some(expression) => Ok(expression.evaluate(context)?),
            None => Ok(0.0),
        }
    }
}

impl Specification {
    /// Save the specification, selections included, to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a specification from a JSON file, validating it as if every
    /// catalog were registered again.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Specification = serde_json::from_str(json)?;
        let mut spec = Specification::new();
        for catalog in raw.catalogs {
            spec.register(catalog)?;
        }
        if let Some(root) = raw.root {
            spec.set_root(root)?;
        }
        Ok(spec)
    }
}
