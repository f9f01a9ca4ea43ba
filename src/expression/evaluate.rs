//! Numeric evaluation of resolved expressions
//!
//! Evaluation is a consumer-side convenience: catalogs must first be replaced
//! by their selected alternatives (see
//! [`Specification::resolved_expression`](crate::specification::Specification::resolved_expression)).

use std::collections::HashMap;

use super::{BinaryOp, ExprResult, Expression, ExpressionError, UnaryOp};

/// Context for expression evaluation, providing variable and parameter values
pub trait EvaluationContext {
    /// Get the value of a variable
    fn get_variable(&self, name: &str) -> ExprResult<f64>;

    /// Value of a parameter, if the context overrides its initial value
    fn get_beta(&self, _name: &str) -> Option<f64> {
        None
    }
}

/// Simple implementation of EvaluationContext using hash maps
#[derive(Debug, Clone, Default)]
pub struct SimpleContext {
    variables: HashMap<String, f64>,
    betas: HashMap<String, f64>,
}

impl SimpleContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value
    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_string(), value);
    }

    /// Set a parameter value
    pub fn set_beta(&mut self, name: &str, value: f64) {
        self.betas.insert(name.to_string(), value);
    }
}

impl EvaluationContext for SimpleContext {
    fn get_variable(&self, name: &str) -> ExprResult<f64> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| ExpressionError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    fn get_beta(&self, name: &str) -> Option<f64> {
        self.betas.get(name).copied()
    }
}

impl EvaluationContext for HashMap<String, f64> {
    fn get_variable(&self, name: &str) -> ExprResult<f64> {
        self.get(name)
            .copied()
            .ok_or_else(|| ExpressionError::UndefinedVariable {
                name: name.to_string(),
            })
    }
}

fn expect_arity(name: &str, args: &[f64], arity: usize) -> ExprResult<()> {
    if args.len() != arity {
        return Err(ExpressionError::InvalidOperation {
            message: format!(
                "{}() requires {} argument(s), got {}",
                name,
                arity,
                args.len()
            ),
        });
    }
    Ok(())
}

impl Expression {
    /// Evaluate a catalog-free expression with the given context
    pub fn evaluate<C: EvaluationContext>(&self, context: &C) -> ExprResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),

            Self::Variable(name) => context.get_variable(name),

            Self::Beta(beta) => Ok(context.get_beta(&beta.name).unwrap_or(beta.init)),

            Self::Unary(UnaryOp::Neg, expr) => Ok(-expr.evaluate(context)?),

            Self::Binary(op, left, right) => {
                let lhs = left.evaluate(context)?;
                let rhs = right.evaluate(context)?;

                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div if rhs == 0.0 => Err(ExpressionError::DivisionByZero),
                    BinaryOp::Div => Ok(lhs / rhs),
                    BinaryOp::Pow => Ok(lhs.powf(rhs)),
                    BinaryOp::Equal => Ok(if lhs == rhs { 1.0 } else { 0.0 }),
                }
            }

            Self::Function(name, args) => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate(context))
                    .collect::<ExprResult<Vec<f64>>>()?;

                match name.as_str() {
                    "exp" => expect_arity(name, &values, 1).map(|_| values[0].exp()),
                    "log" | "ln" => expect_arity(name, &values, 1).map(|_| values[0].ln()),
                    "sqrt" => expect_arity(name, &values, 1).map(|_| values[0].sqrt()),
                    "abs" => expect_arity(name, &values, 1).map(|_| values[0].abs()),
                    "max" | "min" if values.len() < 2 => Err(ExpressionError::InvalidOperation {
                        message: format!(
                            "{}() requires at least 2 arguments, got {}",
                            name,
                            values.len()
                        ),
                    }),
                    "max" => Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
                    "min" => Ok(values.iter().copied().fold(f64::INFINITY, f64::min)),
                    _ => Err(ExpressionError::UndefinedFunction { name: name.clone() }),
                }
            }

            Self::Catalog(id) => Err(ExpressionError::UnresolvedCatalog { id: id.index() }),
        }
    }
}
