//! Path converters.
//!
//! # Responsibilities
//! - Decide which characters a placeholder may consume
//! - Turn matched text into a typed value
//! - Render typed values back into path text for reversal
//!
//! # Design Decisions
//! - Character classes only, no regex
//! - `int` binds to `u64`; digit strings that overflow, or are longer than
//!   20 digits, do not match
//! - `uuid` only accepts the lowercase hyphenated form

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Type of a path placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Converter {
    /// `[0-9]+`, bound as an unsigned integer.
    Int,
    /// `[^/]+`. Used when a placeholder names no converter.
    Str,
    /// `[-a-zA-Z0-9_]+`.
    Slug,
    /// Lowercase hyphenated UUID.
    Uuid,
    /// `.+`, slashes included.
    Path,
}

/// Digits in `u64::MAX`; longer runs cannot fit.
const MAX_INT_DIGITS: usize = 20;
const UUID_LEN: usize = 36;
const UUID_HYPHENS: [usize; 4] = [8, 13, 18, 23];

impl Converter {
    /// Returns true if `c` may appear inside text matched by this converter.
    pub fn accepts_char(self, c: char) -> bool {
        match self {
            Converter::Int => c.is_ascii_digit(),
            Converter::Str => c != '/',
            Converter::Slug => c.is_ascii_alphanumeric() || c == '-' || c == '_',
            Converter::Uuid => c.is_ascii_digit() || ('a'..='f').contains(&c) || c == '-',
            Converter::Path => true,
        }
    }

    /// Convert matched text into a value, or `None` if the text does not fit.
    pub fn to_value(self, text: &str) -> Option<ParamValue> {
        if !text.chars().all(|c| self.accepts_char(c)) {
            return None;
        }
        self.convert_accepted(text)
    }

    /// Convert text whose characters are already known to pass
    /// `accepts_char`. Runs in time linear in `text` (constant for `int`).
    pub(crate) fn convert_accepted(self, text: &str) -> Option<ParamValue> {
        if text.is_empty() {
            return None;
        }
        match self {
            Converter::Int => {
                if text.len() > MAX_INT_DIGITS {
                    return None;
                }
                text.parse::<u64>().ok().map(ParamValue::Int)
            }
            Converter::Uuid => {
                if !is_canonical_uuid(text) {
                    return None;
                }
                Uuid::parse_str(text).ok().map(ParamValue::Uuid)
            }
            Converter::Str | Converter::Slug | Converter::Path => {
                Some(ParamValue::Str(text.to_string()))
            }
        }
    }

    /// Render a value for use in a reversed URL.
    ///
    /// The rendered text must itself be accepted by the converter, so a
    /// string `"7"` is fine for `int` but `"seven"` is not.
    pub fn to_url(self, value: &ParamValue) -> Option<String> {
        let text = value.to_string();
        self.to_value(&text).map(|_| text)
    }

    /// Name as written inside a placeholder.
    pub fn name(self) -> &'static str {
        match self {
            Converter::Int => "int",
            Converter::Str => "str",
            Converter::Slug => "slug",
            Converter::Uuid => "uuid",
            Converter::Path => "path",
        }
    }
}

impl FromStr for Converter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Converter::Int),
            "str" => Ok(Converter::Str),
            "slug" => Ok(Converter::Slug),
            "uuid" => Ok(Converter::Uuid),
            "path" => Ok(Converter::Path),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_canonical_uuid(text: &str) -> bool {
    text.len() == UUID_LEN
        && text.char_indices().all(|(i, c)| {
            if UUID_HYPHENS.contains(&i) {
                c == '-'
            } else {
                c.is_ascii_digit() || ('a'..='f').contains(&c)
            }
        })
}

/// A typed value bound to a path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(u64),
    Str(String),
    Uuid(Uuid),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Uuid(u) => write!(f, "{}", u.hyphenated()),
        }
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(u64::from(n))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<Uuid> for ParamValue {
    fn from(u: Uuid) -> Self {
        ParamValue::Uuid(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_converter() {
        assert_eq!(Converter::Int.to_value("42"), Some(ParamValue::Int(42)));
        assert_eq!(Converter::Int.to_value("007"), Some(ParamValue::Int(7)));
        assert_eq!(Converter::Int.to_value("abc"), None);
        assert_eq!(Converter::Int.to_value("-1"), None);
        assert_eq!(Converter::Int.to_value(""), None);
        // u64::MAX + 1
        assert_eq!(Converter::Int.to_value("18446744073709551616"), None);
        assert_eq!(
            Converter::Int.to_value("18446744073709551615"),
            Some(ParamValue::Int(u64::MAX))
        );
        assert_eq!(Converter::Int.to_value(&"0".repeat(21)), None);
    }

    #[test]
    fn test_str_and_path_converters() {
        assert_eq!(
            Converter::Str.to_value("hello"),
            Some(ParamValue::Str("hello".into()))
        );
        assert_eq!(Converter::Str.to_value("a/b"), None);
        assert_eq!(
            Converter::Path.to_value("a/b/c"),
            Some(ParamValue::Str("a/b/c".into()))
        );
    }

    #[test]
    fn test_slug_converter() {
        assert!(Converter::Slug.to_value("my-first_poll2").is_some());
        assert!(Converter::Slug.to_value("no spaces").is_none());
    }

    #[test]
    fn test_uuid_converter() {
        let text = "6f1c3a52-0d5e-4a8e-9b7c-2f3e4d5c6b7a";
        let value = Converter::Uuid.to_value(text).unwrap();
        assert_eq!(value.to_string(), text);

        assert!(Converter::Uuid
            .to_value("6F1C3A52-0D5E-4A8E-9B7C-2F3E4D5C6B7A")
            .is_none());
        assert!(Converter::Uuid
            .to_value("6f1c3a520d5e4a8e9b7c2f3e4d5c6b7a")
            .is_none());
    }

    #[test]
    fn test_to_url_checks_converter() {
        assert_eq!(Converter::Int.to_url(&ParamValue::Int(7)), Some("7".into()));
        assert_eq!(Converter::Int.to_url(&"7".into()), Some("7".into()));
        assert_eq!(Converter::Int.to_url(&"seven".into()), None);
        assert_eq!(Converter::Str.to_url(&"a/b".into()), None);
    }

    #[test]
    fn test_parse_converter_name() {
        assert_eq!("int".parse::<Converter>(), Ok(Converter::Int));
        assert_eq!("path".parse::<Converter>(), Ok(Converter::Path));
        assert!("float".parse::<Converter>().is_err());
    }
}
