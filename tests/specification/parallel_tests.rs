//! Tests for exploring configurations on per-worker copies

use choicespec_rs::expression::SimpleContext;
use choicespec_rs::{Configuration, SearchConfig};

use crate::test_helpers::{config, Fixtures};

#[test]
fn test_parallel_evaluation_of_every_configuration() {
    let fixtures = Fixtures::new();
    let root = fixtures.complex_expression.clone();
    let spec = fixtures.with_root(root);

    let configurations = spec.all_configurations(&SearchConfig::default()).unwrap();
    let context = SimpleContext::new();
    let values = spec
        .par_map_configurations(&configurations, |copy, configuration| {
            assert_eq!(&copy.current_configuration(), configuration);
            copy.evaluate(&context).unwrap()
        })
        .unwrap();

    // catalog_4 in {1, 2, 3} plus catalog_5 in {4, 5, 6}
    assert_eq!(values, vec![5.0, 6.0, 7.0, 6.0, 7.0, 8.0, 7.0, 8.0, 9.0]);
}

#[test]
fn test_parallel_copies_are_independent() {
    let fixtures = Fixtures::new();
    let catalog_40 = fixtures.catalog_40;
    let root = fixtures.synchronized_expression.clone();
    let spec = fixtures.with_root(root);

    let targets = vec![
        config(&[("catalog_40", "c60"), ("catalog_60", "three")]),
        config(&[("catalog_40", "one")]),
        config(&[("catalog_40", "c60"), ("catalog_60", "two")]),
    ];
    let labels: Vec<Configuration> = spec
        .par_map_configurations(&targets, |copy, _| copy.current_configuration())
        .unwrap();
    assert_eq!(labels, targets);

    // The caller's pointers never moved
    assert_eq!(spec.current_index(catalog_40).unwrap(), 0);
}

#[test]
fn test_parallel_reports_invalid_configuration() {
    let spec = Fixtures::new().first_plus_second();
    let targets = vec![
        config(&[("catalog_1", "g1_first")]),
        config(&[("catalog_9", "anything")]),
    ];
    assert!(spec
        .par_map_configurations(&targets, |copy, _| copy.current_configuration())
        .is_err());
}
