//! Reckon: a keypad calculator with persisted history
//!
//! Reckon follows a "pure core, imperative shell" layout. The keystroke
//! state machine and the arithmetic are plain synchronous functions with
//! no I/O, while loading and saving history and the theme happen in the
//! store layer as effects run against a key-value backend.
//!
//! # Core Concepts
//!
//! - **Keys**: Every keypad button is a [`Key`]; text like `"12 + 3 ="` parses into them
//! - **Session**: Entry buffer, pending chain, waiting flag and expression text
//! - **Guards**: Named predicates that turn invalid keystrokes into no-ops
//! - **History**: Immutable, most-recent-first record of completed calculations
//! - **Store**: Debounced persistence of history plus the light/dark preference
//!
//! # Example
//!
//! ```rust
//! use reckon::{Calculator, Key};
//!
//! let mut calc = Calculator::new();
//! calc.press_all(Key::sequence("2 + 3 × 4 =").unwrap());
//!
//! let display = calc.display();
//! assert_eq!(display.current_value, "20");
//! assert_eq!(display.expression_text, "5 × 4 =");
//! assert_eq!(calc.history().latest().unwrap().result, "20");
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod machine;
pub mod store;

// Re-export commonly used types
pub use app::CalculatorApp;
pub use config::{CalculatorConfig, ConfigError};
pub use core::{History, HistoryEntry, Operation, Phase};
pub use machine::{Calculator, DisplayState, Key, Step};
pub use store::{FileStore, HistoryStore, KeyValueStore, MemoryStore, Theme};
