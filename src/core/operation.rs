//! Binary operations understood by the calculator.
//!
//! The symbols are the literal tokens written into expression text and
//! persisted history, so they must never change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A binary operation applied between the accumulator and the entry buffer.
///
/// "No pending operation" is expressed as `Option<Operation>::None` rather
/// than as a variant.
///
/// # Example
///
/// ```rust
/// use reckon::core::Operation;
///
/// assert_eq!(Operation::Multiply.symbol(), "×");
/// assert_eq!("÷".parse::<Operation>().unwrap(), Operation::Divide);
/// assert_eq!("*".parse::<Operation>().unwrap(), Operation::Multiply);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "×")]
    Multiply,
    #[serde(rename = "÷")]
    Divide,
    /// Remainder after division. Shown on the keypad as `%` when chained.
    #[serde(rename = "%")]
    Modulo,
}

impl Operation {
    /// All operations in keypad order.
    pub const ALL: [Operation; 5] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Modulo,
    ];

    /// Literal symbol used in expression text and history.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Modulo => "%",
        }
    }

    /// Look up an operation by its symbol or a common ASCII alias.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" | "−" => Some(Self::Subtract),
            "×" | "*" | "x" | "X" => Some(Self::Multiply),
            "÷" | "/" => Some(Self::Divide),
            "%" | "mod" => Some(Self::Modulo),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a string is not an operation symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation symbol: '{0}'")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s.trim()).ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip_through_parsing() {
        for op in Operation::ALL {
            assert_eq!(op.symbol().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn ascii_aliases_are_accepted() {
        assert_eq!(Operation::from_symbol("*"), Some(Operation::Multiply));
        assert_eq!(Operation::from_symbol("x"), Some(Operation::Multiply));
        assert_eq!(Operation::from_symbol("/"), Some(Operation::Divide));
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = "^".parse::<Operation>().unwrap_err();
        assert_eq!(err, UnknownOperation("^".to_string()));
    }

    #[test]
    fn serializes_as_literal_symbol() {
        let json = serde_json::to_string(&Operation::Divide).unwrap();
        assert_eq!(json, "\"÷\"");
        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Operation::Divide);
    }

    #[test]
    fn display_uses_symbol() {
        assert_eq!(Operation::Subtract.to_string(), "-");
        assert_eq!(Operation::Modulo.to_string(), "%");
    }
}
