//! Parallel exploration of configurations.
//!
//! The pointers of a specification are shared mutable state, so two
//! configurations can never be live in the same tree. Each rayon worker
//! therefore takes its own deep copy before applying a configuration.

use rayon::prelude::*;
use tracing::info;

use super::Specification;
use crate::catalog::Configuration;
use crate::error::Result;

impl Specification {
    /// Run `f` on a copy of the tree configured with each of `configurations`,
    /// in parallel. Results come back in input order.
    ///
    /// The pointers of `self` never move.
    ///
    /// # Errors
    ///
    /// The first configuration that cannot be applied (see
    /// [`Specification::configure_catalogs`]).
    pub fn par_map_configurations<F, R>(
        &self,
        configurations: &[Configuration],
        f: F,
    ) -> Result<Vec<R>>
    where
        F: Fn(&Specification, &Configuration) -> R + Sync,
        R: Send,
    {
        info!(
            configurations = configurations.len(),
            threads = rayon::current_num_threads(),
            "exploring configurations in parallel"
        );
        configurations
            .par_iter()
            .map_init(
                || self.clone(),
                |copy, configuration| -> Result<R> {
                    copy.configure_catalogs(configuration)?;
                    Ok(f(copy, configuration))
                },
            )
            .collect()
    }
}
