use thiserror::Error;

use crate::expression::ExpressionError;

/// Broad classification of [`SpecError`] values.
///
/// Construction, index and lookup errors are programming errors in the model
/// specification; they are never retried by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A catalog, alternative or tree could not be built.
    Construction,
    /// An alternative index is out of range.
    Index,
    /// A catalog or alternative name is unknown.
    Lookup,
    /// The expression layer failed (parse or evaluation).
    Expression,
    /// Reading or writing a file failed.
    Io,
    /// JSON serialization/deserialization failed.
    Serialization,
    /// A configured limit was exceeded.
    Limit,
}

/// Error types for the choicespec-rs library.
#[derive(Error, Debug)]
pub enum SpecError {
    /// A catalog must offer at least one alternative.
    #[error("Catalog '{name}' must contain at least one alternative")]
    EmptyCatalog { name: String },

    /// An alternative is malformed (empty or duplicated name, foreign catalog handle).
    #[error("Invalid alternative in catalog '{catalog}': {message}")]
    InvalidAlternative { catalog: String, message: String },

    /// Two distinct catalogs were registered under the same name.
    #[error("A catalog named '{name}' is already registered")]
    DuplicateCatalog { name: String },

    /// A synchronized catalog must have as many alternatives as its controller.
    #[error(
        "Synchronized catalog '{name}' has {size} alternatives, \
         its controller '{controller}' has {controller_size}"
    )]
    SizeMismatch {
        name: String,
        size: usize,
        controller: String,
        controller_size: usize,
    },

    /// The index of a synchronized catalog is derived from its controller.
    #[error("Index of synchronized catalog '{name}' cannot be set, it follows '{controller}'")]
    SynchronizedSelection { name: String, controller: String },

    /// A handle that was not issued by this specification.
    #[error("Unknown catalog handle #{id}")]
    UnknownCatalogId { id: usize },

    /// Index out of range for a catalog.
    #[error("Index {index} out of range for catalog '{name}' of size {size}")]
    IndexOutOfRange {
        name: String,
        index: usize,
        size: usize,
    },

    /// No catalog of that name in the tree.
    #[error("Unknown catalog: {name}")]
    UnknownCatalog { name: String },

    /// No alternative of that name in the catalog.
    #[error("Unknown alternative '{alternative}' in catalog '{catalog}'")]
    UnknownAlternative { catalog: String, alternative: String },

    /// A configuration could not be parsed or merged.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The configuration space is larger than allowed.
    #[error("There are more than {maximum} different specifications")]
    TooManyConfigurations { maximum: usize },

    /// Error raised by the expression layer.
    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SpecError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpecError::EmptyCatalog { .. }
            | SpecError::InvalidAlternative { .. }
            | SpecError::DuplicateCatalog { .. }
            | SpecError::SizeMismatch { .. }
            | SpecError::SynchronizedSelection { .. }
            | SpecError::UnknownCatalogId { .. } => ErrorKind::Construction,
            SpecError::IndexOutOfRange { .. } => ErrorKind::Index,
            SpecError::UnknownCatalog { .. }
            | SpecError::UnknownAlternative { .. }
            | SpecError::InvalidConfiguration(_) => ErrorKind::Lookup,
            SpecError::TooManyConfigurations { .. } => ErrorKind::Limit,
            SpecError::Expression(_) => ErrorKind::Expression,
            SpecError::IoError(_) => ErrorKind::Io,
            SpecError::JsonError(_) => ErrorKind::Serialization,
        }
    }
}

/// Result type alias for choicespec-rs operations.
pub type Result<T> = std::result::Result<T, SpecError>;
