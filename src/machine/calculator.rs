//! The keystroke state machine.

use crate::core::arithmetic::{
    compute, display_number, format_display, format_number, format_result, is_numeric,
    parse_operand, strip_separators,
};
use crate::core::{Guard, History, HistoryEntry, Operation, Phase};
use crate::machine::key::Key;
use crate::machine::session::{Chain, DisplayState, Session};
use tracing::debug;

/// Equals only acts while a chain is pending.
pub const CAN_EVALUATE: Guard<Session> = Guard::new("can_evaluate", |s| s.chain.is_some());

/// At most one decimal point per entry.
pub const ACCEPTS_DECIMAL: Guard<Session> = Guard::new("accepts_decimal", |s| {
    s.waiting_for_operand || !s.buffer.contains('.')
});

/// Sign toggle and percent need a number to work on.
pub const HAS_NUMERIC_ENTRY: Guard<Session> =
    Guard::new("has_numeric_entry", |s| is_numeric(&s.buffer));

/// Outcome of a single keystroke.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Session fields changed (or were rewritten to the same values).
    Updated,

    /// Equals completed a calculation; the entry was recorded in history.
    Evaluated(HistoryEntry),

    /// A guard turned the keystroke into a no-op.
    Ignored { guard: &'static str },
}

impl Step {
    pub fn entry(&self) -> Option<&HistoryEntry> {
        match self {
            Step::Evaluated(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Calculator session plus its in-memory history.
///
/// Every keystroke is fully applied before `press` returns. The history
/// here is the synchronous copy; persisting it is the caller's concern.
///
/// # Example
///
/// ```rust
/// use reckon::machine::{Calculator, Key};
///
/// let mut calc = Calculator::new();
/// calc.press_all(Key::sequence("72 + 18 =").unwrap());
///
/// assert_eq!(calc.display().current_value, "90");
/// assert_eq!(calc.display().expression_text, "72 + 18 =");
/// assert_eq!(calc.history().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    session: Session,
    history: History,
    history_limit: Option<usize>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of retained history entries.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self.history = self.limited(self.history.clone());
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn display(&self) -> DisplayState {
        self.session.display()
    }

    /// Replace the in-memory history, for example with what was loaded at
    /// session start.
    pub fn replace_history(&mut self, history: History) {
        self.history = self.limited(history);
    }

    pub fn clear_history(&mut self) {
        self.history = History::new();
    }

    /// Put a past result into the entry buffer.
    ///
    /// Only the buffer changes. The waiting flag, any pending chain and the
    /// expression text are left as they are.
    pub fn recall(&mut self, entry: &HistoryEntry) {
        debug!(id = %entry.id, result = %entry.result, "Recalling history entry");
        self.session.buffer = strip_separators(&entry.result);
    }

    /// Feed a run of keystrokes, returning each outcome.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) -> Vec<Step> {
        keys.into_iter().map(|key| self.press(key)).collect()
    }

    /// Apply one keystroke.
    pub fn press(&mut self, key: Key) -> Step {
        let before = self.session.phase();
        let step = match key {
            Key::Digit(d) => self.digit(d),
            Key::Decimal => self.decimal(),
            Key::Operation(op) => self.operation(op),
            Key::Equals => self.equals(),
            Key::Clear => self.clear(),
            Key::Delete => self.delete(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Percent => self.percent(),
        };

        match &step {
            Step::Ignored { guard } => {
                debug!(%key, %guard, phase = %before, "Keystroke blocked by guard");
            }
            _ => debug!(
                %key,
                from = %before,
                to = %self.session.phase(),
                buffer = %self.session.buffer,
                "Keystroke applied"
            ),
        }
        step
    }

    fn check(&self, guard: &Guard<Session>) -> Result<(), Step> {
        if guard.check(&self.session) {
            Ok(())
        } else {
            Err(Step::Ignored {
                guard: guard.name(),
            })
        }
    }

    fn digit(&mut self, d: u8) -> Step {
        let Some(digit) = char::from_digit(u32::from(d), 10) else {
            return Step::Ignored {
                guard: "valid_digit",
            };
        };

        let s = &mut self.session;
        if s.waiting_for_operand {
            s.buffer = digit.to_string();
            s.waiting_for_operand = false;
        } else if s.buffer == "0" || !is_numeric(&s.buffer) {
            s.buffer = digit.to_string();
        } else {
            s.buffer.push(digit);
        }
        Step::Updated
    }

    fn decimal(&mut self) -> Step {
        if let Err(ignored) = self.check(&ACCEPTS_DECIMAL) {
            return ignored;
        }

        let s = &mut self.session;
        if s.waiting_for_operand || !is_numeric(&s.buffer) {
            s.buffer = "0.".to_string();
            s.waiting_for_operand = false;
        } else {
            s.buffer.push('.');
        }
        Step::Updated
    }

    fn operation(&mut self, op: Operation) -> Step {
        let s = &mut self.session;
        match (s.chain, s.waiting_for_operand) {
            (None, _) => {
                if !is_numeric(&s.buffer) {
                    s.buffer = "0".to_string();
                }
                s.chain = Some(Chain {
                    accumulator: parse_operand(&s.buffer),
                    operation: op,
                });
                s.waiting_for_operand = true;
                s.expression = format!("{} {}", format_display(&s.buffer), op);
            }
            (Some(chain), true) => {
                s.chain = Some(Chain {
                    operation: op,
                    ..chain
                });
                s.expression = match s.expression.strip_suffix(chain.operation.symbol()) {
                    Some(head) => format!("{head}{op}"),
                    None => format!("{} {}", display_number(chain.accumulator), op),
                };
            }
            (Some(chain), false) => {
                let value = compute(
                    chain.accumulator,
                    parse_operand(&s.buffer),
                    Some(chain.operation),
                );
                let result = format_number(value);
                s.chain = Some(Chain {
                    accumulator: value,
                    operation: op,
                });
                s.expression = format!("{} {}", format_display(&result), op);
                s.buffer = result;
                s.waiting_for_operand = true;
            }
        }
        Step::Updated
    }

    fn equals(&mut self) -> Step {
        if let Err(ignored) = self.check(&CAN_EVALUATE) {
            return ignored;
        }
        let Some(chain) = self.session.chain.take() else {
            return Step::Ignored {
                guard: CAN_EVALUATE.name(),
            };
        };

        let operand = parse_operand(&self.session.buffer);
        let result = format_result(chain.accumulator, operand, Some(chain.operation));
        let expression = format!(
            "{} {} {} =",
            display_number(chain.accumulator),
            chain.operation,
            display_number(operand)
        );

        let entry = HistoryEntry::new(expression.clone(), format_display(&result));
        self.history = self.limited(self.history.record(entry.clone()));

        let s = &mut self.session;
        s.buffer = result;
        s.expression = expression;
        s.waiting_for_operand = true;

        Step::Evaluated(entry)
    }

    fn clear(&mut self) -> Step {
        self.session = Session::default();
        Step::Updated
    }

    fn delete(&mut self) -> Step {
        let s = &mut self.session;
        s.buffer.pop();
        if !is_numeric(&s.buffer) {
            s.buffer = "0".to_string();
        }
        Step::Updated
    }

    fn toggle_sign(&mut self) -> Step {
        if let Err(ignored) = self.check(&HAS_NUMERIC_ENTRY) {
            return ignored;
        }
        let s = &mut self.session;
        s.buffer = format_number(-parse_operand(&s.buffer));
        Step::Updated
    }

    fn percent(&mut self) -> Step {
        if let Err(ignored) = self.check(&HAS_NUMERIC_ENTRY) {
            return ignored;
        }
        let s = &mut self.session;
        s.buffer = format_number(parse_operand(&s.buffer) / 100.0);
        Step::Updated
    }

    fn limited(&self, history: History) -> History {
        match self.history_limit {
            Some(limit) if history.len() > limit => history.truncated(limit),
            _ => history,
        }
    }
}
