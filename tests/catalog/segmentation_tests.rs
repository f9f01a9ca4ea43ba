//! Tests for the segmentation catalog builder

use choicespec_rs::catalog::{segmented_beta, Configuration, DiscreteSegmentation};
use choicespec_rs::expression::{Beta, Expression, SimpleContext};
use choicespec_rs::Specification;
use std::collections::HashSet;

use crate::test_helpers::config;

fn segmentations() -> Vec<DiscreteSegmentation> {
    vec![
        DiscreteSegmentation::new("var1", [(0, "zero"), (1, "one")]),
        DiscreteSegmentation::new("var2", [(0, "no"), (1, "yes")]),
    ]
}

fn segmented_configurations(maximum_number: usize) -> HashSet<Configuration> {
    let beta = Beta::new("beta", 0.0);
    let mut spec = Specification::new();
    let the_catalog = spec
        .segmentation_catalog(&beta, &segmentations(), maximum_number)
        .unwrap();
    spec.set_root(the_catalog).unwrap();
    spec.iter_configurations().collect()
}

#[test]
fn test_segmentation() {
    let configurations = segmented_configurations(2);
    let correct_configurations: HashSet<Configuration> = [
        config(&[("segmented_beta", "beta (no seg.)")]),
        config(&[("segmented_beta", "var2")]),
        config(&[("segmented_beta", "var1")]),
        config(&[("segmented_beta", "var1-var2")]),
    ]
    .into_iter()
    .collect();
    assert_eq!(configurations, correct_configurations);

    let configurations = segmented_configurations(1);
    let correct_configurations: HashSet<Configuration> = [
        config(&[("segmented_beta", "beta (no seg.)")]),
        config(&[("segmented_beta", "var2")]),
        config(&[("segmented_beta", "var1")]),
    ]
    .into_iter()
    .collect();
    assert_eq!(configurations, correct_configurations);
}

#[test]
fn test_segmentation_count() {
    let beta = Beta::new("b_cost", 0.0);
    let segmentations: Vec<DiscreteSegmentation> = (0..4)
        .map(|i| DiscreteSegmentation::new(&format!("s{}", i), [(0, "a"), (1, "b")]))
        .collect();

    // C(4,0) + C(4,1) + C(4,2)
    let mut spec = Specification::new();
    let id = spec.segmentation_catalog(&beta, &segmentations, 2).unwrap();
    assert_eq!(spec.catalog(id).unwrap().size(), 1 + 4 + 6);
}

#[test]
fn test_segmented_expression_evaluates() {
    let beta = Beta::new("beta", 1.0);
    let mut spec = Specification::new();
    let the_catalog = spec
        .segmentation_catalog(&beta, &segmentations(), 2)
        .unwrap();
    spec.set_root(Expression::from(the_catalog) * Expression::variable("x"))
        .unwrap();
    spec.set_index(the_catalog, 3).unwrap();
    assert_eq!(spec.selected_name(the_catalog).unwrap(), "var1-var2");

    let mut context = SimpleContext::new();
    context.set_variable("x", 2.0);
    context.set_variable("var1", 1.0);
    context.set_variable("var2", 1.0);
    context.set_beta("beta_one", 0.5);
    context.set_beta("beta_yes", 0.25);
    // (1 + 0.5 + 0.25) * 2
    assert_eq!(spec.evaluate(&context).unwrap(), 3.5);

    context.set_variable("var1", 0.0);
    // (1 + 0.25) * 2
    assert_eq!(spec.evaluate(&context).unwrap(), 2.5);
}

#[test]
fn test_custom_builder() {
    let beta = Beta::new("beta", 0.0);
    let mut spec = Specification::new();
    let id = spec
        .segmentation_catalog_with(&beta, &segmentations(), 1, |beta, subset| {
            let base = Expression::from(beta.clone());
            subset.iter().fold(base, |acc, segmentation| {
                acc * Expression::variable(&segmentation.variable)
            })
        })
        .unwrap();

    let catalog = spec.catalog(id).unwrap();
    assert_eq!(
        catalog.alternative_names(),
        vec!["beta (no seg.)", "var1", "var2"]
    );
    assert_eq!(
        catalog.alternative(1).unwrap().expression.to_string(),
        "(beta(init=0) * var1)"
    );
}

#[test]
fn test_default_builder_with_reference() {
    let beta = Beta::new("beta", 0.0);
    let income = DiscreteSegmentation::new("income", [(1, "low"), (2, "medium"), (3, "high")])
        .with_reference("medium");
    let expression = segmented_beta(&beta, &[&income]);
    assert_eq!(
        expression.betas(),
        vec![
            "beta".to_string(),
            "beta_high".to_string(),
            "beta_low".to_string()
        ]
    );
    assert_eq!(expression.variables(), vec!["income".to_string()]);
}

#[test]
fn test_segmentation_catalog_name_must_be_free() {
    let beta = Beta::new("beta", 0.0);
    let mut spec = Specification::new();
    spec.segmentation_catalog(&beta, &segmentations(), 1).unwrap();
    assert!(spec.segmentation_catalog(&beta, &segmentations(), 2).is_err());
}
