//! The calculator state machine.
//!
//! Keystrokes are reduced, one at a time, into the session fields:
//! - `key`: keystrokes and their text form
//! - `session`: entry buffer, pending chain, waiting flag, expression text
//! - `calculator`: the transitions, guarded by pure predicates
//!
//! Everything here is synchronous and free of I/O. Persisting the history
//! produced by an evaluation belongs to [`crate::store`].

mod calculator;
mod key;
mod session;

pub use calculator::{Calculator, Step, ACCEPTS_DECIMAL, CAN_EVALUATE, HAS_NUMERIC_ENTRY};
pub use key::{Key, KeyError};
pub use session::{Chain, DisplayState, Session};
