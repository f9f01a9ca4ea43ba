//! # Catalogs and configurations
//!
//! A catalog is a choice point in a model specification: an ordered,
//! non-empty list of named alternative sub-expressions with exactly one of
//! them selected at any time.
//!
//! ## Core Components
//!
//! - [`NamedAlternative`]: a name paired with an expression
//! - [`Catalog`]: the alternatives plus a [`Selection`], either an owned
//!   pointer (independent catalog) or a reference to a controller catalog
//!   (synchronized catalog)
//! - [`Configuration`]: immutable assignment of alternative names to
//!   independent catalog names
//! - [`DiscreteSegmentation`]: input of the segmentation catalog builder
//!
//! Catalogs are stored in, and mutated through, a
//! [`Specification`](crate::specification::Specification).

#[allow(clippy::module_inception)]
pub mod catalog;
pub mod configuration;
pub mod named;
pub mod segmentation;

// Re-export key types
pub use catalog::{Catalog, CatalogId, Selection};
pub use configuration::Configuration;
pub use named::NamedAlternative;
pub use segmentation::{segmented_beta, DiscreteSegmentation};
