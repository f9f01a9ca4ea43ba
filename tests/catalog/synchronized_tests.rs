//! Tests for synchronized catalogs

use choicespec_rs::catalog::{Configuration, NamedAlternative};
use choicespec_rs::error::{ErrorKind, SpecError};
use choicespec_rs::expression::Expression;
use choicespec_rs::Specification;
use std::collections::HashSet;

use crate::test_helpers::{config, Fixtures};

#[test]
fn test_synchronized_expression() {
    let fixtures = Fixtures::new();
    let root = fixtures.synchronized_expression.clone();
    let spec = fixtures.with_root(root);

    let the_set = spec.set_of_configurations();
    let the_correct_set: HashSet<Configuration> = [
        config(&[("catalog_40", "one")]),
        config(&[("catalog_60", "two"), ("catalog_40", "c60")]),
        config(&[("catalog_60", "three"), ("catalog_40", "c60")]),
    ]
    .into_iter()
    .collect();
    assert_eq!(the_set, the_correct_set);
    assert_eq!(spec.number_of_multiple_expressions(), 3);
}

#[test]
fn test_synchronized_expression_with_independent_nested_catalog() {
    let fixtures = Fixtures::new();
    let root = fixtures.synchronized_expression_2.clone();
    let mut spec = fixtures.with_root(root);

    let configurations: HashSet<Configuration> = spec.iter_configurations().collect();
    let correct_configurations: HashSet<Configuration> = [
        config(&[("catalog_40", "one")]),
        config(&[
            ("catalog_60", "two"),
            ("catalog_40", "c60"),
            ("catalog_71", "five"),
        ]),
        config(&[
            ("catalog_60", "two"),
            ("catalog_40", "c60"),
            ("catalog_71", "six"),
        ]),
        config(&[
            ("catalog_60", "three"),
            ("catalog_40", "c60"),
            ("catalog_71", "five"),
        ]),
        config(&[
            ("catalog_60", "three"),
            ("catalog_40", "c60"),
            ("catalog_71", "six"),
        ]),
    ]
    .into_iter()
    .collect();
    assert_eq!(configurations, correct_configurations);
    assert_eq!(spec.number_of_multiple_expressions(), 5);
}

#[test]
fn test_synchronized_catalogs_are_never_keys() {
    let fixtures = Fixtures::new();
    let root = fixtures.synchronized_expression.clone();
    let mut spec = fixtures.with_root(root);

    for configuration in spec.iter_configurations() {
        assert!(configuration.selection("catalog_50").is_none());
        assert!(configuration.selection("catalog_70").is_none());
    }
}

#[test]
fn test_synchronized_follows_controller() {
    let fixtures = Fixtures::new();
    let (catalog_40, catalog_50) = (fixtures.catalog_40, fixtures.catalog_50);
    let (catalog_60, catalog_70) = (fixtures.catalog_60, fixtures.catalog_70);
    let root = fixtures.synchronized_expression.clone();
    let mut spec = fixtures.with_root(root);

    let err = spec.set_index(catalog_50, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Construction);
    assert!(matches!(err, SpecError::SynchronizedSelection { .. }));

    for k in 0..2 {
        spec.set_index(catalog_40, k).unwrap();
        assert_eq!(spec.current_index(catalog_50).unwrap(), k);
        spec.set_index(catalog_60, k).unwrap();
        assert_eq!(spec.current_index(catalog_70).unwrap(), k);
    }

    spec.set_index(catalog_40, 1).unwrap();
    spec.set_index(catalog_60, 0).unwrap();
    assert_eq!(spec.selected_name(catalog_50).unwrap(), "c70");
    assert_eq!(spec.selected_name(catalog_70).unwrap(), "five");
    assert_eq!(spec.resolved_expression().unwrap().to_string(), "(2 + 5)");
}

#[test]
fn test_configure_synchronized_is_rejected() {
    let fixtures = Fixtures::new();
    let catalog_40 = fixtures.catalog_40;
    let root = fixtures.synchronized_expression.clone();
    let mut spec = fixtures.with_root(root);

    let a_config = config(&[("catalog_40", "c60"), ("catalog_50", "c70")]);
    let err = spec.configure_catalogs(&a_config).unwrap_err();
    assert!(matches!(err, SpecError::SynchronizedSelection { .. }));
    // Nothing moved
    assert_eq!(spec.current_index(catalog_40).unwrap(), 0);

    let a_config = config(&[("catalog_40", "c60"), ("catalog_60", "three")]);
    spec.configure_catalogs(&a_config).unwrap();
    assert_eq!(spec.current_configuration(), a_config);
}

#[test]
fn test_size_mismatch() {
    let mut spec = Specification::new();
    let controller = spec
        .add_catalog(
            "controller",
            vec![
                NamedAlternative::new("a", 1.0),
                NamedAlternative::new("b", 2.0),
            ],
        )
        .unwrap();
    let err = spec
        .add_synchronized_catalog(
            "follower",
            vec![NamedAlternative::new("only", Expression::variable("x"))],
            controller,
        )
        .unwrap_err();
    match err {
        SpecError::SizeMismatch {
            size,
            controller_size,
            ..
        } => {
            assert_eq!(size, 1);
            assert_eq!(controller_size, 2);
        }
        other => panic!("Expected SizeMismatch error, got {:?}", other),
    }
}

#[test]
fn test_synchronized_before_its_controller() {
    let mut spec = Specification::new();
    let controller = spec
        .add_catalog(
            "controller",
            vec![
                NamedAlternative::new("a", 1.0),
                NamedAlternative::new("b", 2.0),
            ],
        )
        .unwrap();
    let follower = spec
        .add_synchronized_catalog(
            "follower",
            vec![
                NamedAlternative::new("x", 10.0),
                NamedAlternative::new("y", 20.0),
            ],
            controller,
        )
        .unwrap();
    // The follower is met first on every path
    spec.set_root(Expression::from(follower) * controller).unwrap();

    let labels: Vec<String> = spec.iter_configurations().map(|c| c.to_string()).collect();
    assert_eq!(labels, vec!["controller:a", "controller:b"]);
    assert_eq!(spec.resolved_expression().unwrap().to_string(), "(20 * 2)");
}
