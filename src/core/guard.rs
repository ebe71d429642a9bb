//! Guard predicates for keystroke handling.
//!
//! Guards are pure, named boolean checks evaluated before a keystroke is
//! allowed to change anything. A guard that fails turns the keystroke into
//! a no-op; it is never an error.

/// Named pure predicate over some state `T`.
///
/// Guards hold plain function pointers, so they can live in `const` items
/// and be compared in tests.
///
/// # Example
///
/// ```rust
/// use reckon::core::Guard;
///
/// const NON_EMPTY: Guard<String> = Guard::new("non_empty", |s| !s.is_empty());
///
/// assert!(NON_EMPTY.check(&"12".to_string()));
/// assert!(!NON_EMPTY.check(&String::new()));
/// assert_eq!(NON_EMPTY.name(), "non_empty");
/// ```
pub struct Guard<T> {
    name: &'static str,
    predicate: fn(&T) -> bool,
}

impl<T> Guard<T> {
    /// Create a guard from a name and a pure predicate.
    pub const fn new(name: &'static str, predicate: fn(&T) -> bool) -> Self {
        Guard { name, predicate }
    }

    /// Check if the guard allows the action on this state.
    pub fn check(&self, state: &T) -> bool {
        (self.predicate)(state)
    }

    /// Name reported when the guard blocks an action.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Guard<T> {}

impl<T> std::fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}
