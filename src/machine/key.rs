//! Keystrokes accepted by the calculator.

use crate::core::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading keystrokes from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),

    #[error("Digit out of range: {0} (expected 0-9)")]
    InvalidDigit(u8),
}

/// One keypad press.
///
/// `Percent` (`%` or `pct`) is the standalone key that divides the entry
/// by 100. The chained remainder operation is `Operation(Operation::Modulo)`,
/// typed as `mod`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Key {
    Digit(u8),
    Decimal,
    Operation(Operation),
    Equals,
    Clear,
    Delete,
    ToggleSign,
    Percent,
}

impl Key {
    /// Checked digit constructor.
    pub fn digit(value: u8) -> Result<Self, KeyError> {
        if value <= 9 {
            Ok(Self::Digit(value))
        } else {
            Err(KeyError::InvalidDigit(value))
        }
    }

    /// Read a run of keystrokes.
    ///
    /// Whitespace separates tokens. A token that is not itself a key name
    /// is read left to right, taking the longest key name at each point,
    /// so `"72+18="` and `"7 2 + 1 8 ="` are equivalent and `"5+/-"` is
    /// `5` then `+/-`. Write `"5 + / -"` with spaces to mean the three
    /// separate operation keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reckon::core::Operation;
    /// use reckon::machine::Key;
    ///
    /// let keys = Key::sequence("12 × 3 =").unwrap();
    /// assert_eq!(
    ///     keys,
    ///     vec![
    ///         Key::Digit(1),
    ///         Key::Digit(2),
    ///         Key::Operation(Operation::Multiply),
    ///         Key::Digit(3),
    ///         Key::Equals,
    ///     ]
    /// );
    /// ```
    pub fn sequence(input: &str) -> Result<Vec<Key>, KeyError> {
        let mut keys = Vec::new();
        for token in input.split_whitespace() {
            if let Ok(key) = token.parse() {
                keys.push(key);
                continue;
            }
            let mut rest = token;
            while !rest.is_empty() {
                let (key, len) = longest_key_prefix(rest)
                    .ok_or_else(|| KeyError::UnknownKey(token.to_string()))?;
                keys.push(key);
                rest = &rest[len..];
            }
        }
        Ok(keys)
    }

    /// Label printed on the keypad.
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operation(Operation::Modulo) => "mod".to_string(),
            Self::Operation(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Delete => "⌫".to_string(),
            Self::ToggleSign => "+/-".to_string(),
            Self::Percent => "%".to_string(),
        }
    }
}

/// Longest leading key name in `text` and its byte length.
fn longest_key_prefix(text: &str) -> Option<(Key, usize)> {
    text.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| text[..end].parse().ok().map(|key| (key, end)))
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let key = match token {
            "." => Self::Decimal,
            "=" | "enter" => Self::Equals,
            "AC" | "C" | "ac" | "c" | "clear" => Self::Clear,
            "DEL" | "del" | "⌫" | "backspace" => Self::Delete,
            "+/-" | "±" | "neg" => Self::ToggleSign,
            "%" | "pct" => Self::Percent,
            _ => match token.parse::<u8>() {
                Ok(d) if token.len() == 1 => Self::digit(d)?,
                _ => Operation::from_symbol(token)
                    .map(Self::Operation)
                    .ok_or_else(|| KeyError::UnknownKey(token.to_string()))?,
            },
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_keys() {
        assert_eq!("7".parse::<Key>().unwrap(), Key::Digit(7));
        assert_eq!(".".parse::<Key>().unwrap(), Key::Decimal);
        assert_eq!("=".parse::<Key>().unwrap(), Key::Equals);
        assert_eq!("AC".parse::<Key>().unwrap(), Key::Clear);
        assert_eq!("⌫".parse::<Key>().unwrap(), Key::Delete);
        assert_eq!("+/-".parse::<Key>().unwrap(), Key::ToggleSign);
        assert_eq!("%".parse::<Key>().unwrap(), Key::Percent);
        assert_eq!(
            "mod".parse::<Key>().unwrap(),
            Key::Operation(Operation::Modulo)
        );
        assert_eq!(
            "÷".parse::<Key>().unwrap(),
            Key::Operation(Operation::Divide)
        );
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert_eq!(
            "sqrt".parse::<Key>(),
            Err(KeyError::UnknownKey("sqrt".to_string()))
        );
        assert!(Key::sequence("2 ^ 3").is_err());
    }

    #[test]
    fn digit_constructor_checks_range() {
        assert_eq!(Key::digit(9), Ok(Key::Digit(9)));
        assert_eq!(Key::digit(10), Err(KeyError::InvalidDigit(10)));
    }

    #[test]
    fn compact_and_spaced_sequences_agree() {
        let compact = Key::sequence("72+18=").unwrap();
        let spaced = Key::sequence("7 2 + 1 8 =").unwrap();
        assert_eq!(compact, spaced);
        assert_eq!(compact.len(), 6);
    }

    #[test]
    fn named_tokens_are_kept_whole() {
        let keys = Key::sequence("5 +/- AC DEL").unwrap();
        assert_eq!(
            keys,
            vec![Key::Digit(5), Key::ToggleSign, Key::Clear, Key::Delete]
        );
    }

    #[test]
    fn labels_match_keypad() {
        assert_eq!(Key::Operation(Operation::Multiply).label(), "×");
        assert_eq!(Key::Operation(Operation::Modulo).label(), "mod");
        assert_eq!(Key::Percent.label(), "%");
        assert_eq!(Key::Clear.to_string(), "AC");
    }

    #[test]
    fn every_key_parses_back_from_its_label() {
        let keys = (0..=9)
            .map(Key::Digit)
            .chain(Operation::ALL.iter().copied().map(Key::Operation))
            .chain([
                Key::Decimal,
                Key::Equals,
                Key::Clear,
                Key::Delete,
                Key::ToggleSign,
                Key::Percent,
            ]);
        for key in keys {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key), "label {key}");
        }
    }

    #[test]
    fn percent_sign_is_the_percent_key() {
        let keys = Key::sequence("1 7 % 5 mod 3").unwrap();
        assert_eq!(keys[2], Key::Percent);
        assert_eq!(keys[4], Key::Operation(Operation::Modulo));
    }

    #[test]
    fn compact_tokens_keep_named_keys_whole() {
        assert_eq!(
            Key::sequence("5+/-").unwrap(),
            vec![Key::Digit(5), Key::ToggleSign]
        );
        assert_eq!(
            Key::sequence("17mod5=").unwrap(),
            vec![
                Key::Digit(1),
                Key::Digit(7),
                Key::Operation(Operation::Modulo),
                Key::Digit(5),
                Key::Equals,
            ]
        );
        assert_eq!(
            Key::sequence("9DEL").unwrap(),
            vec![Key::Digit(9), Key::Delete]
        );
        assert_eq!(
            Key::sequence("5 + / -").unwrap(),
            vec![
                Key::Digit(5),
                Key::Operation(Operation::Add),
                Key::Operation(Operation::Divide),
                Key::Operation(Operation::Subtract),
            ]
        );
    }

    #[test]
    fn compact_token_with_unknown_part_is_rejected() {
        assert_eq!(
            Key::sequence("5^2"),
            Err(KeyError::UnknownKey("5^2".to_string()))
        );
    }
}
