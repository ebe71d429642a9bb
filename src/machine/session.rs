//! Mutable session state of one calculator.

use crate::core::arithmetic::format_display;
use crate::core::{Operation, Phase};
use serde::Serialize;

/// First operand and operation of a calculation in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chain {
    /// Left-hand value. May be non-finite after a singular intermediate
    /// result, which keeps the rest of the chain `Undefined`.
    pub accumulator: f64,
    pub operation: Operation,
}

/// Entry buffer, pending chain, waiting flag and expression text.
///
/// Only [`Clear`](crate::machine::Key::Clear) returns every field to its
/// initial value.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub(crate) buffer: String,
    pub(crate) chain: Option<Chain>,
    pub(crate) waiting_for_operand: bool,
    pub(crate) expression: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            buffer: "0".to_string(),
            chain: None,
            waiting_for_operand: false,
            expression: String::new(),
        }
    }
}

impl Session {
    /// Raw text of the number being typed (no separators).
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// First operand of the pending calculation.
    pub fn accumulator(&self) -> Option<f64> {
        self.chain.map(|c| c.accumulator)
    }

    pub fn pending_operation(&self) -> Option<Operation> {
        self.chain.map(|c| c.operation)
    }

    pub fn chain(&self) -> Option<Chain> {
        self.chain
    }

    /// Whether the next digit starts a new number.
    pub fn is_waiting_for_operand(&self) -> bool {
        self.waiting_for_operand
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn phase(&self) -> Phase {
        Phase::derive(self.chain.is_some(), self.waiting_for_operand)
    }

    /// Fields a renderer needs.
    pub fn display(&self) -> DisplayState {
        DisplayState {
            current_value: format_display(&self.buffer),
            expression_text: self.expression.clone(),
            pending_operation: self.pending_operation(),
        }
    }
}

/// Derived view handed to whatever draws the calculator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    /// Buffer with thousands separators.
    pub current_value: String,
    pub expression_text: String,
    pub pending_operation: Option<Operation>,
}

impl DisplayState {
    /// Symbol of the highlighted operation key, if any.
    pub fn pending_symbol(&self) -> Option<&'static str> {
        self.pending_operation.map(|op| op.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_is_idle_zero() {
        let session = Session::default();
        assert_eq!(session.buffer(), "0");
        assert_eq!(session.accumulator(), None);
        assert_eq!(session.pending_operation(), None);
        assert!(!session.is_waiting_for_operand());
        assert_eq!(session.expression(), "");
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn display_formats_buffer() {
        let session = Session {
            buffer: "1234567.5".to_string(),
            chain: Some(Chain {
                accumulator: 3.0,
                operation: Operation::Add,
            }),
            waiting_for_operand: false,
            expression: "3 +".to_string(),
        };

        let display = session.display();
        assert_eq!(display.current_value, "1,234,567.5");
        assert_eq!(display.expression_text, "3 +");
        assert_eq!(display.pending_symbol(), Some("+"));
        assert_eq!(session.phase(), Phase::Accumulating);
    }

    #[test]
    fn display_serializes_symbol() {
        let display = DisplayState {
            current_value: "5".to_string(),
            expression_text: "5 ×".to_string(),
            pending_operation: Some(Operation::Multiply),
        };
        let json = serde_json::to_value(&display).unwrap();
        assert_eq!(json["pending_operation"], "×");
    }
}
