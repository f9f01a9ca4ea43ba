//! Configuration options for specification search.
//!
//! These settings bound how much of the configuration space a caller may
//! materialise at once. They can be built in code or loaded from JSON:
//!
//! ```
//! use choicespec_rs::config::SearchConfig;
//!
//! let config = SearchConfig::from_json(r#"{ "maximum_number_catalog_expressions": 20 }"#).unwrap();
//! assert_eq!(config.maximum_number_catalog_expressions, 20);
//!
//! let config = SearchConfig::from_json("{}").unwrap();
//! assert_eq!(config, SearchConfig::default());
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// Settings for enumerating catalog configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest number of configurations
    /// [`Specification::all_configurations`](crate::Specification::all_configurations)
    /// returns. Default: 100
    pub maximum_number_catalog_expressions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            maximum_number_catalog_expressions: 100,
        }
    }
}

impl SearchConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the settings from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }
}
