//! Core calculator types and logic.
//!
//! This module contains the pure core of the calculator:
//! - Binary operations and their literal symbols
//! - Arithmetic and display formatting
//! - Guard predicates and the derived phase
//! - Immutable calculation history
//!
//! Nothing in this module performs I/O.

pub mod arithmetic;
mod guard;
mod history;
mod operation;
mod state;

pub use arithmetic::UNDEFINED;
pub use guard::Guard;
pub use history::{History, HistoryEntry};
pub use operation::{Operation, UnknownOperation};
pub use state::Phase;
