//! Comparison modes for filters.
//!
//! The [`Mode`] enum names how a filter compares a field against its value.
//! Which modes apply depends on the filter's [`DataType`](crate::DataType).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Comparison mode of a filter.
///
/// Modes are read case-insensitively and with `-`/`_` ignored, so
/// `"not-equal"`, `"notEqual"` and `"NOT_EQUAL"` are the same mode. Unknown
/// spellings are kept as [`Mode::Other`] and never match anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Equal.
    Equal,
    /// Not equal.
    NotEqual,
    /// String contains substring.
    Contains,
    /// String does not contain substring.
    NotContains,
    /// String starts with prefix.
    StartsWith,
    /// String ends with suffix.
    EndsWith,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Earlier than.
    Before,
    /// Later than.
    After,
    /// Inclusive `[min, max]` interval.
    Range,
    /// Field holds its zero value.
    IsEmpty,
    /// Field holds a non-zero value.
    IsNotEmpty,
    /// Unrecognised mode, kept verbatim.
    Other(String),
}

impl Mode {
    /// Parses a mode name.
    pub fn parse(name: &str) -> Mode {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "equal" => Mode::Equal,
            "notequal" => Mode::NotEqual,
            "contains" => Mode::Contains,
            "notcontains" => Mode::NotContains,
            "startswith" => Mode::StartsWith,
            "endswith" => Mode::EndsWith,
            "gt" => Mode::Gt,
            "gte" => Mode::Gte,
            "lt" => Mode::Lt,
            "lte" => Mode::Lte,
            "before" => Mode::Before,
            "after" => Mode::After,
            "range" => Mode::Range,
            "isempty" => Mode::IsEmpty,
            "isnotempty" => Mode::IsNotEmpty,
            _ => Mode::Other(name.to_string()),
        }
    }

    /// Returns `true` for the string matching modes.
    pub fn is_text_mode(&self) -> bool {
        matches!(
            self,
            Mode::Equal
                | Mode::NotEqual
                | Mode::Contains
                | Mode::NotContains
                | Mode::StartsWith
                | Mode::EndsWith
        )
    }

    /// Returns `true` for the modes a `date` filter accepts.
    pub fn is_date_mode(&self) -> bool {
        matches!(
            self,
            Mode::Equal
                | Mode::NotEqual
                | Mode::Gt
                | Mode::Gte
                | Mode::Lt
                | Mode::Lte
                | Mode::Before
                | Mode::After
        )
    }

    /// Returns `true` for `gt`, `gte`, `lt` and `lte`.
    pub fn is_numeric_mode(&self) -> bool {
        matches!(self, Mode::Gt | Mode::Gte | Mode::Lt | Mode::Lte)
    }

    /// Evaluates the mode against the ordering of field versus operand.
    ///
    /// `Before` reads as `Lt` and `After` as `Gt`; non-ordering modes are false.
    pub fn eval_ordering(&self, ordering: Ordering) -> bool {
        match self {
            Mode::Equal => ordering == Ordering::Equal,
            Mode::NotEqual => ordering != Ordering::Equal,
            Mode::Gt | Mode::After => ordering == Ordering::Greater,
            Mode::Gte => ordering != Ordering::Less,
            Mode::Lt | Mode::Before => ordering == Ordering::Less,
            Mode::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the wire name of this mode.
    pub fn as_str(&self) -> &str {
        match self {
            Mode::Equal => "equal",
            Mode::NotEqual => "not-equal",
            Mode::Contains => "contains",
            Mode::NotContains => "not-contains",
            Mode::StartsWith => "starts-with",
            Mode::EndsWith => "ends-with",
            Mode::Gt => "gt",
            Mode::Gte => "gte",
            Mode::Lt => "lt",
            Mode::Lte => "lte",
            Mode::Before => "before",
            Mode::After => "after",
            Mode::Range => "range",
            Mode::IsEmpty => "isempty",
            Mode::IsNotEmpty => "isnotempty",
            Mode::Other(name) => name,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Other(String::new())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Mode::parse(&name))
    }
}
