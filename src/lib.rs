//! # choicespec-rs
//!
//! `choicespec-rs` represents the space of candidate specifications of a
//! model written as a single expression tree. At chosen points of the tree,
//! a catalog offers several named alternative sub-expressions; assigning one
//! alternative to every independent catalog gives a configuration.
//!
//! The library provides:
//! - Catalogs, including catalogs nested in the alternatives of others and
//!   synchronized catalogs that mirror a controller
//! - Configurations: immutable, hashable, with a canonical string form
//! - Full and filtered enumeration of configurations, moving the selection
//!   pointers of the tree in place
//! - A builder of catalogs of segmented parameters
//! - Parallel exploration on per-worker copies of the tree
//!
//! ## Basic Usage
//!
//! ```
//! use choicespec_rs::catalog::{Configuration, NamedAlternative};
//! use choicespec_rs::expression::Expression;
//! use choicespec_rs::Specification;
//!
//! let mut spec = Specification::new();
//! let time = spec
//!     .add_catalog(
//!         "time",
//!         vec![
//!             NamedAlternative::new("linear", Expression::variable("tt")),
//!             NamedAlternative::new("log", Expression::parse("ln(tt)").unwrap()),
//!         ],
//!     )
//!     .unwrap();
//! let asc = spec
//!     .add_catalog(
//!         "asc",
//!         vec![
//!             NamedAlternative::new("none", Expression::from(0.0)),
//!             NamedAlternative::new("estimated", Expression::beta("asc_car", 0.0)),
//!         ],
//!     )
//!     .unwrap();
//! spec.set_root(Expression::from(asc) + Expression::beta("b_time", 0.0) * time)
//!     .unwrap();
//!
//! assert_eq!(spec.number_of_multiple_expressions(), 4);
//!
//! let target = Configuration::from_pairs([("asc", "estimated"), ("time", "log")]);
//! spec.configure_catalogs(&target).unwrap();
//! assert_eq!(spec.current_configuration(), target);
//! ```

// Public modules
pub mod catalog;
pub mod config;
pub mod error;
pub mod expression;
pub mod specification;

// Re-exports for convenience
pub use catalog::{Catalog, CatalogId, Configuration, NamedAlternative};
pub use config::SearchConfig;
pub use error::{ErrorKind, Result, SpecError};
pub use expression::Expression;
pub use specification::Specification;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
