//! Expression trees for model specifications
//!
//! An [`Expression`] is the utility (or any other model component) that a
//! modeler writes once. Wherever several formulations are plausible, the tree
//! holds an [`Expression::Catalog`] handle pointing at a catalog of named
//! alternatives stored in a [`Specification`](crate::specification::Specification).
//!
//! Expressions are composed with the usual arithmetic operators:
//!
//! ```
//! use choicespec_rs::expression::{Beta, Expression};
//!
//! let utility = Expression::from(Beta::new("asc_car", 0.0))
//!     + Expression::from(Beta::new("b_time", 0.0)) * Expression::variable("car_tt");
//! assert_eq!(utility.to_string(), "(asc_car(init=0) + (b_time(init=0) * car_tt))");
//! ```

mod evaluate;
mod parser;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use thiserror::Error;

use crate::catalog::CatalogId;

pub use evaluate::{EvaluationContext, SimpleContext};

/// Error that can occur during expression parsing or evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Failed to parse expression: {message}")]
    ParseError { message: String },

    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String },

    #[error("Catalog #{id} must be resolved to its selected alternative before evaluation")]
    UnresolvedCatalog { id: usize },
}

/// Result type for expression parsing and evaluation
pub type ExprResult<T> = Result<T, ExpressionError>;

/// A parameter to be estimated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beta {
    /// Name of the parameter
    pub name: String,

    /// Starting value used when the context does not provide one
    pub init: f64,
}

impl Beta {
    pub fn new(name: &str, init: f64) -> Self {
        Self {
            name: name.to_string(),
            init,
        }
    }
}

impl fmt::Display for Beta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(init={})", self.name, self.init)
    }
}

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Constant number
    Number(f64),

    /// Data column
    Variable(String),

    /// Parameter to be estimated
    Beta(Beta),

    /// Unary operations
    Unary(UnaryOp, Box<Expression>),

    /// Binary operations
    Binary(BinaryOp, Box<Expression>, Box<Expression>),

    /// Function call
    Function(String, Vec<Expression>),

    /// Choice point: the selected alternative of a catalog
    Catalog(CatalogId),
}

/// Unary operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
}

/// Binary operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    /// Equality test (==), 1.0 when both sides are equal, 0.0 otherwise
    Equal,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
            BinaryOp::Equal => "==",
        }
    }
}

impl Expression {
    /// Parse a catalog-free expression from a string
    ///
    /// Identifiers are read as variables. Betas and catalogs are attached
    /// programmatically.
    pub fn parse(input: &str) -> ExprResult<Self> {
        parser::parse(input)
    }

    /// Data column reference
    pub fn variable(name: &str) -> Self {
        Self::Variable(name.to_string())
    }

    /// Parameter reference
    pub fn beta(name: &str, init: f64) -> Self {
        Self::Beta(Beta::new(name, init))
    }

    /// Build `self == other`
    pub fn equals(self, other: impl Into<Expression>) -> Self {
        Self::Binary(BinaryOp::Equal, Box::new(self), Box::new(other.into()))
    }

    /// Build `self ^ exponent`
    pub fn pow(self, exponent: impl Into<Expression>) -> Self {
        Self::Binary(BinaryOp::Pow, Box::new(self), Box::new(exponent.into()))
    }

    /// Direct child expressions, left to right
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Self::Number(_) | Self::Variable(_) | Self::Beta(_) | Self::Catalog(_) => Vec::new(),
            Self::Unary(_, expr) => vec![expr.as_ref()],
            Self::Binary(_, left, right) => vec![left.as_ref(), right.as_ref()],
            Self::Function(_, args) => args.iter().collect(),
        }
    }

    /// Catalog handles appearing directly in this tree, in pre-order, without
    /// duplicates.
    ///
    /// This does not look inside the alternatives of the catalogs: those live
    /// in the specification arena.
    pub fn catalog_ids(&self) -> Vec<CatalogId> {
        let mut ids = Vec::new();
        self.collect_catalog_ids(&mut ids);
        ids
    }

    fn collect_catalog_ids(&self, ids: &mut Vec<CatalogId>) {
        if let Self::Catalog(id) = self {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        for child in self.children() {
            child.collect_catalog_ids(ids);
        }
    }

    /// Whether any catalog handle appears in this tree
    pub fn contains_catalog(&self) -> bool {
        match self {
            Self::Catalog(_) => true,
            _ => self.children().into_iter().any(Expression::contains_catalog),
        }
    }

    /// Find all variable names used in the expression
    pub fn variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.visit(&mut |expr| {
            if let Self::Variable(name) = expr {
                vars.push(name.clone());
            }
        });
        vars.sort();
        vars.dedup();
        vars
    }

    /// Find all beta names used in the expression
    pub fn betas(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.visit(&mut |expr| {
            if let Self::Beta(beta) = expr {
                names.push(beta.name.clone());
            }
        });
        names.sort();
        names.dedup();
        names
    }

    fn visit<F: FnMut(&Expression)>(&self, f: &mut F) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Variable(name) => write!(f, "{}", name),
            Self::Beta(beta) => write!(f, "{}", beta),
            Self::Unary(UnaryOp::Neg, expr) => write!(f, "(-{})", expr),
            Self::Binary(op, left, right) => write!(f, "({} {} {})", left, op.symbol(), right),
            Self::Function(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Self::Catalog(id) => write!(f, "[catalog #{}]", id.index()),
        }
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Beta> for Expression {
    fn from(beta: Beta) -> Self {
        Self::Beta(beta)
    }
}

impl From<CatalogId> for Expression {
    fn from(id: CatalogId) -> Self {
        Self::Catalog(id)
    }
}

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<Expression>> $trait<T> for Expression {
            type Output = Expression;

            fn $method(self, rhs: T) -> Expression {
                Expression::Binary($op, Box::new(self), Box::new(rhs.into()))
            }
        }
    };
}

binary_operator!(Add, add, BinaryOp::Add);
binary_operator!(Sub, sub, BinaryOp::Sub);
binary_operator!(Mul, mul, BinaryOp::Mul);
binary_operator!(Div, div, BinaryOp::Div);

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression::Unary(UnaryOp::Neg, Box::new(self))
    }
}
