//! Catalogs of segmented parameters
//!
//! A parameter can be segmented by discrete socio-economic variables: one
//! extra parameter per non-reference category. When several segmentations
//! are plausible, [`Specification::segmentation_catalog`] offers every subset
//! of them, up to a maximum size, as alternatives of one catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CatalogId, NamedAlternative};
use crate::error::{Result, SpecError};
use crate::expression::{Beta, Expression};
use crate::specification::Specification;

/// A discrete variable and the names of its categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteSegmentation {
    /// Name of the variable, also the name of the segmentation
    pub variable: String,

    /// Category name for each value of the variable
    pub mapping: BTreeMap<i64, String>,

    /// Category absorbed by the base parameter. Defaults to the first one.
    pub reference: Option<String>,
}

impl DiscreteSegmentation {
    pub fn new<I, S>(variable: &str, mapping: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            variable: variable.to_string(),
            mapping: mapping.into_iter().map(|(k, v)| (k, v.into())).collect(),
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: &str) -> Self {
        self.reference = Some(reference.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.variable
    }

    /// Category absorbed by the base parameter
    pub fn reference_category(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .or_else(|| self.mapping.values().next().map(String::as_str))
    }
}

/// Name of the catalog of segmentations of `beta`
pub fn segmentation_catalog_name(beta: &Beta) -> String {
    format!("segmented_{}", beta.name)
}

/// Name of the alternative where `beta` is not segmented
pub fn no_segmentation_name(beta: &Beta) -> String {
    format!("{} (no seg.)", beta.name)
}

/// Name of the alternative applying a set of segmentations
pub fn subset_name(beta: &Beta, segmentations: &[&DiscreteSegmentation]) -> String {
    if segmentations.is_empty() {
        return no_segmentation_name(beta);
    }
    let mut names: Vec<&str> = segmentations.iter().map(|s| s.name()).collect();
    names.sort_unstable();
    names.join("-")
}

/// Default segmented expression: the base parameter plus, for each
/// segmentation and each non-reference category, a parameter
/// `<beta>_<category>` active when the variable takes that value.
pub fn segmented_beta(beta: &Beta, segmentations: &[&DiscreteSegmentation]) -> Expression {
    let mut expression = Expression::from(beta.clone());
    for segmentation in segmentations {
        let reference = segmentation.reference_category();
        for (value, category) in &segmentation.mapping {
            if Some(category.as_str()) == reference {
                continue;
            }
            let shift = Expression::beta(&format!("{}_{}", beta.name, category), 0.0);
            let indicator = Expression::variable(&segmentation.variable).equals(*value as f64);
            expression = expression + shift * indicator;
        }
    }
    expression
}

/// Index subsets of `0..n` with `k` elements, in lexicographic order
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    if k > n {
        return result;
    }
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        result.push(current.clone());
        // Rightmost position that can still move
        let Some(i) = (0..k).rev().find(|&i| current[i] < n - k + i) else {
            return result;
        };
        current[i] += 1;
        for j in i + 1..k {
            current[j] = current[j - 1] + 1;
        }
    }
}

/// Alternatives for every subset of `segmentations` with at most
/// `maximum_number` elements, the empty subset first.
pub fn segmentation_alternatives<F>(
    beta: &Beta,
    segmentations: &[DiscreteSegmentation],
    maximum_number: usize,
    mut builder: F,
) -> Vec<NamedAlternative>
where
    F: FnMut(&Beta, &[&DiscreteSegmentation]) -> Expression,
{
    let largest = maximum_number.min(segmentations.len());
    let mut alternatives = Vec::new();
    for size in 0..=largest {
        for indices in combinations(segmentations.len(), size) {
            let subset: Vec<&DiscreteSegmentation> =
                indices.iter().map(|&i| &segmentations[i]).collect();
            alternatives.push(NamedAlternative::new(
                &subset_name(beta, &subset),
                builder(beta, &subset),
            ));
        }
    }
    alternatives
}

impl Specification {
    /// Register a catalog offering every subset of `segmentations` of size
    /// `0..=maximum_number` for the parameter `beta`.
    ///
    /// # Examples
    ///
    /// ```
    /// use choicespec_rs::catalog::DiscreteSegmentation;
    /// use choicespec_rs::expression::Beta;
    /// use choicespec_rs::Specification;
    ///
    /// let mut spec = Specification::new();
    /// let segmentations = vec![
    ///     DiscreteSegmentation::new("var1", [(0, "zero"), (1, "one")]),
    ///     DiscreteSegmentation::new("var2", [(0, "no"), (1, "yes")]),
    /// ];
    /// let id = spec
    ///     .segmentation_catalog(&Beta::new("beta", 0.0), &segmentations, 2)
    ///     .unwrap();
    /// let catalog = spec.catalog(id).unwrap();
    /// assert_eq!(catalog.name(), "segmented_beta");
    /// assert_eq!(
    ///     catalog.alternative_names(),
    ///     vec!["beta (no seg.)", "var1", "var2", "var1-var2"]
    /// );
    /// ```
    pub fn segmentation_catalog(
        &mut self,
        beta: &Beta,
        segmentations: &[DiscreteSegmentation],
        maximum_number: usize,
    ) -> Result<CatalogId> {
        self.segmentation_catalog_with(beta, segmentations, maximum_number, segmented_beta)
    }

    /// Same as [`Specification::segmentation_catalog`], with a caller-supplied
    /// expression for each subset.
    pub fn segmentation_catalog_with<F>(
        &mut self,
        beta: &Beta,
        segmentations: &[DiscreteSegmentation],
        maximum_number: usize,
        builder: F,
    ) -> Result<CatalogId>
    where
        F: FnMut(&Beta, &[&DiscreteSegmentation]) -> Expression,
    {
        let catalog_name = segmentation_catalog_name(beta);
        if let Some(segmentation) = segmentations.iter().find(|s| s.variable.is_empty()) {
            return Err(SpecError::InvalidAlternative {
                catalog: catalog_name,
                message: format!("segmentation with empty variable name: {:?}", segmentation),
            });
        }
        let alternatives = segmentation_alternatives(beta, segmentations, maximum_number, builder);
        self.add_catalog(&catalog_name, alternatives)
    }
}
