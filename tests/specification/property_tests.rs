//! Property tests for enumeration on generated trees
//!
//! Trees are generated as plans: each catalog has one to three alternatives,
//! may be synchronized with an earlier catalog, and each alternative may nest
//! an earlier catalog. The root sums a few catalogs, possibly the same one
//! several times.

use choicespec_rs::catalog::{CatalogId, Configuration, NamedAlternative};
use choicespec_rs::expression::Expression;
use choicespec_rs::Specification;
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::HashSet;

#[derive(Debug, Clone)]
struct CatalogPlan {
    size: usize,
    controller: Option<Index>,
    nested: Vec<Option<Index>>,
}

fn catalog_plan() -> impl Strategy<Value = CatalogPlan> {
    (
        1usize..=3,
        prop::option::weighted(0.3, any::<Index>()),
        prop::collection::vec(prop::option::weighted(0.4, any::<Index>()), 3),
    )
        .prop_map(|(size, controller, nested)| CatalogPlan {
            size,
            controller,
            nested,
        })
}

fn tree_plan() -> impl Strategy<Value = (Vec<CatalogPlan>, Vec<Index>)> {
    (
        prop::collection::vec(catalog_plan(), 1..=5),
        prop::collection::vec(any::<Index>(), 1..=3),
    )
}

fn build(plans: &[CatalogPlan], roots: &[Index]) -> Specification {
    let mut spec = Specification::new();
    let mut ids: Vec<CatalogId> = Vec::new();

    for (i, plan) in plans.iter().enumerate() {
        let controller = match &plan.controller {
            Some(choice) if i > 0 => Some(ids[choice.index(i)]),
            _ => None,
        };
        let size = match controller {
            Some(id) => spec.catalog(id).unwrap().size(),
            None => plan.size,
        };
        let alternatives: Vec<NamedAlternative> = (0..size)
            .map(|j| {
                let name = format!("alt{}", j);
                match &plan.nested[j] {
                    Some(choice) if i > 0 => NamedAlternative::new(
                        &name,
                        Expression::from(j as f64) + ids[choice.index(i)],
                    ),
                    _ => NamedAlternative::new(&name, j as f64),
                }
            })
            .collect();

        let name = format!("catalog_{}", i);
        let id = match controller {
            Some(controller) => spec
                .add_synchronized_catalog(&name, alternatives, controller)
                .unwrap(),
            None => spec.add_catalog(&name, alternatives).unwrap(),
        };
        ids.push(id);
    }

    let root = roots.iter().fold(Expression::from(0.0), |acc, choice| {
        acc + ids[choice.index(ids.len())]
    });
    spec.set_root(root).unwrap();
    spec
}

/// Configurations observed over every pointer assignment of every
/// independent catalog
fn brute_force(spec: &Specification) -> HashSet<Configuration> {
    let mut copy = spec.clone();
    let independent: Vec<(CatalogId, usize)> = copy
        .catalogs()
        .filter(|(_, catalog)| !catalog.is_synchronized())
        .map(|(id, catalog)| (id, catalog.size()))
        .collect();

    let mut found = HashSet::new();
    let mut digits = vec![0; independent.len()];
    loop {
        for (&(id, _), &k) in independent.iter().zip(&digits) {
            copy.set_index(id, k).unwrap();
        }
        found.insert(copy.current_configuration());

        let mut position = 0;
        loop {
            if position == digits.len() {
                return found;
            }
            digits[position] += 1;
            if digits[position] < independent[position].1 {
                break;
            }
            digits[position] = 0;
            position += 1;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        failure_persistence: None,
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// Property: the enumerator reaches every configuration some pointer
    /// assignment produces, and nothing else
    #[test]
    fn prop_enumeration_is_complete((plans, roots) in tree_plan()) {
        let spec = build(&plans, &roots);
        let enumerated = spec.set_of_configurations();
        prop_assert_eq!(&enumerated, &brute_force(&spec));
        prop_assert_eq!(spec.number_of_multiple_expressions(), enumerated.len());
    }

    /// Property: applying a reachable configuration reads it back unchanged
    #[test]
    fn prop_configure_is_idempotent((plans, roots) in tree_plan()) {
        let mut spec = build(&plans, &roots);
        for configuration in spec.set_of_configurations() {
            spec.configure_catalogs(&configuration).unwrap();
            prop_assert_eq!(spec.current_configuration(), configuration.clone());
            spec.configure_catalogs(&configuration).unwrap();
            prop_assert_eq!(spec.current_configuration(), configuration);
        }
    }

    /// Property: synchronized catalogs never appear in a configuration
    #[test]
    fn prop_no_synchronized_keys((plans, roots) in tree_plan()) {
        let mut spec = build(&plans, &roots);
        let configurations: Vec<Configuration> = spec.iter_configurations().collect();
        for configuration in &configurations {
            for name in configuration.catalogs() {
                let id = spec.catalog_id(name).unwrap();
                prop_assert!(!spec.catalog(id).unwrap().is_synchronized());
            }
        }
    }

    /// Property: every pointer stays in range during and after enumeration
    #[test]
    fn prop_indices_in_range((plans, roots) in tree_plan()) {
        let mut spec = build(&plans, &roots);
        let mut configurations = spec.iter_configurations();
        while configurations.next().is_some() {
            let current = configurations.specification();
            for (id, catalog) in current.catalogs() {
                prop_assert!(current.current_index(id).unwrap() < catalog.size());
            }
        }
        drop(configurations);
        for (id, catalog) in spec.catalogs() {
            prop_assert!(spec.current_index(id).unwrap() < catalog.size());
        }
    }

    /// Property: the filtered enumerator yields its targets in list order
    #[test]
    fn prop_filtered_order((plans, roots) in tree_plan()) {
        let mut spec = build(&plans, &roots);
        let mut targets: Vec<Configuration> = spec.set_of_configurations().into_iter().collect();
        targets.sort();
        targets.reverse();
        let yielded: Vec<Configuration> = spec
            .select_configurations(targets.clone())
            .map(|c| c.unwrap())
            .collect();
        prop_assert_eq!(yielded, targets);
    }
}
