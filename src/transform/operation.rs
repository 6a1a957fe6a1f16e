//! The closed set of numeric operations.
//!
//! Names are resolved with [`str::parse`] and dispatched through a `match`, so
//! the compiler checks that every supported operation has an implementation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::OperationError;

/// Elementwise numeric operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// `x -> x²`
    Square,
    /// `x -> 2x`
    Double,
    /// `x -> x³`
    Cube,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Square, Operation::Double, Operation::Cube];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Square => "square",
            Operation::Double => "double",
            Operation::Cube => "cube",
        }
    }

    pub fn apply(self, x: f64) -> f64 {
        match self {
            Operation::Square => x * x,
            Operation::Double => x * 2.0,
            Operation::Cube => x * x * x,
        }
    }

    /// Applies the operation to every number, keeping order and length.
    pub fn apply_all(self, numbers: &[f64]) -> Vec<f64> {
        super::apply_operation(numbers, |&x| self.apply(x))
    }

    /// `"square, double, cube"`
    pub fn available() -> String {
        Self::ALL.iter().map(|op| op.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| OperationError::UnknownOperation(s.to_string()))
    }
}
