//! Filters as they arrive over the wire.
//!
//! A [`FilterRoot`] holds an ordered list of [`Filter`]s and the [`Logic`]
//! that combines them. All types here deserialize from the JSON shape
//! clients send:
//!
//! ```text
//! { "filters": [ { "dataType": "text", "field": "name", "mode": "contains", "value": "ada" } ],
//!   "logic": "AND" }
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::mode::Mode;

/// Declared data type of a filter.
///
/// Anything other than `text`, `date` or `boolean` (including a missing or
/// empty `dataType`) is [`DataType::Untyped`], which dispatches on the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// No declared type.
    #[default]
    Untyped,
    /// Case-insensitive string matching.
    Text,
    /// Date/time comparison with whole-day semantics.
    Date,
    /// Boolean equality.
    Boolean,
}

impl DataType {
    /// Parses a data type name, case-insensitively.
    pub fn parse(name: &str) -> DataType {
        match name.to_ascii_lowercase().as_str() {
            "text" => DataType::Text,
            "date" => DataType::Date,
            "boolean" => DataType::Boolean,
            _ => DataType::Untyped,
        }
    }

    /// Returns the wire name of this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Untyped => "",
            DataType::Text => "text",
            DataType::Date => "date",
            DataType::Boolean => "boolean",
        }
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(DataType::parse(&name))
    }
}

/// How the verdicts of several filters combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Logic {
    /// Every filter must match.
    #[default]
    And,
    /// At least one filter must match.
    Or,
}

impl Logic {
    /// Parses `"AND"`/`"OR"` case-insensitively; anything else is `And`.
    pub fn parse(name: &str) -> Logic {
        if name.eq_ignore_ascii_case("or") {
            Logic::Or
        } else {
            Logic::And
        }
    }

    /// Returns the wire name of this logic.
    pub fn as_str(self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Logic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Logic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Logic::parse(&name))
    }
}

/// A single filter predicate.
///
/// # Example
///
/// ```
/// use listquery::{DataType, Filter, Mode};
///
/// let filter = Filter::new("createdAt", Mode::Equal, "2024-01-01").typed(DataType::Date);
/// assert_eq!(filter.data_type, DataType::Date);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Declared data type.
    #[serde(default)]
    pub data_type: DataType,
    /// Dotted path of the field to test.
    #[serde(default, deserialize_with = "null_as_default")]
    pub field: String,
    /// Comparison mode.
    #[serde(default)]
    pub mode: Mode,
    /// Operand: a scalar, or a `[min, max]` pair for `range`.
    #[serde(default)]
    pub value: serde_json::Value,
}

impl Filter {
    /// Creates an untyped filter.
    pub fn new(field: impl Into<String>, mode: Mode, value: impl Into<serde_json::Value>) -> Self {
        Filter {
            data_type: DataType::Untyped,
            field: field.into(),
            mode,
            value: value.into(),
        }
    }

    /// Sets the declared data type.
    pub fn typed(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }
}

/// Filters plus the logic combining them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterRoot {
    /// Filters in evaluation order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub filters: Vec<Filter>,
    /// Combination logic.
    #[serde(default)]
    pub logic: Logic,
}

impl FilterRoot {
    /// Creates an empty root with the given logic.
    pub fn new(logic: Logic) -> Self {
        FilterRoot {
            filters: Vec::new(),
            logic,
        }
    }

    /// Creates a root requiring every filter to match.
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        FilterRoot {
            filters: filters.into_iter().collect(),
            logic: Logic::And,
        }
    }

    /// Creates a root requiring any filter to match.
    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        FilterRoot {
            filters: filters.into_iter().collect(),
            logic: Logic::Or,
        }
    }

    /// Appends a filter.
    pub fn with(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Returns `true` if there are no filters (everything passes).
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
