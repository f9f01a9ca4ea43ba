use serde::{Deserialize, Serialize};

use crate::expression::Expression;

/// An alternative sub-expression offered by a catalog, with a human-readable name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedAlternative {
    /// Name reported in configurations
    pub name: String,

    /// Expression used when the alternative is selected
    pub expression: Expression,
}

impl NamedAlternative {
    /// Create a named alternative
    ///
    /// # Examples
    ///
    /// ```
    /// use choicespec_rs::catalog::NamedAlternative;
    /// use choicespec_rs::expression::Expression;
    ///
    /// let linear = NamedAlternative::new("linear", Expression::variable("tt"));
    /// assert_eq!(linear.name, "linear");
    /// ```
    pub fn new(name: &str, expression: impl Into<Expression>) -> Self {
        Self {
            name: name.to_string(),
            expression: expression.into(),
        }
    }
}
