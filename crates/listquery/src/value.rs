//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is what a [`Record`] hands back for one of its fields.
//! It borrows from the record wherever it can, so resolving a field never
//! allocates. [`AsValue`] converts Rust field types into a [`Value`] and is
//! what the `#[derive(Record)]` macro calls for every field.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use crate::record::Record;

/// Runtime value of a resolved field, borrowed from the source record.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// Present but empty: an `Option` holding `None`.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value (borrowed).
    String(&'a str),
    /// Point in time.
    Time(DateTime<Utc>),
    /// A collection; only its length is visible to queries.
    List(usize),
    /// A nested record that dotted paths can descend into.
    Record(&'a dyn Record),
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(*s),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the time value, if present.
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the nested record, if present.
    pub fn as_record(&self) -> Option<&'a dyn Record> {
        match self {
            Value::Record(r) => Some(*r),
            _ => None,
        }
    }

    /// Coerces the value to a float.
    ///
    /// Numbers convert directly and strings are parsed; every other kind
    /// is not numeric.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.to_f64()),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Formats the value the way text comparisons and the sort fallback see it.
    ///
    /// Lists and records have no textual form and return `None`.
    pub fn to_text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::Null => Some(Cow::Borrowed("")),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::String(s) => Some(Cow::Borrowed(*s)),
            Value::Time(t) => Some(Cow::Owned(t.to_rfc3339_opts(SecondsFormat::AutoSi, true))),
            Value::List(_) | Value::Record(_) => None,
        }
    }

    /// Returns `true` if the value is the zero value of its kind.
    ///
    /// Zero means: `Null`, `false`, numeric zero, the empty string, an empty
    /// collection, the default timestamp (Unix epoch), or a record whose
    /// fields are all zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.is_zero(),
            Value::String(s) => s.is_empty(),
            Value::Time(t) => *t == DateTime::<Utc>::default(),
            Value::List(len) => *len == 0,
            Value::Record(r) => r.is_zero(),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Time(t) => f.debug_tuple("Time").field(t).finish(),
            Value::List(len) => f.debug_tuple("List").field(len).finish(),
            Value::Record(r) => f
                .debug_tuple("Record")
                .field(&format_args!("{} fields", r.fields().len()))
                .finish(),
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => std::ptr::addr_eq(*a, *b),
            _ => false,
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Integers keep their precision; mixed comparisons go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` for zero of any representation.
    pub fn is_zero(self) -> bool {
        match self {
            Number::I64(n) => n == 0,
            Number::U64(n) => n == 0,
            Number::F64(n) => n == 0.0,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $wide)
                }
            }

            impl AsValue for $ty {
                fn as_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Conversion of a field into a queryable [`Value`].
///
/// Implemented for strings, primitive numbers, `bool`, chrono date/time
/// types, `Option`, `Box`, common collections and `serde_json::Value`.
/// `#[derive(Record)]` implements it for the deriving struct, which makes
/// records nestable.
///
/// # Example
///
/// ```
/// use listquery::{AsValue, Value};
///
/// enum Status {
///     Open,
///     Closed,
/// }
///
/// impl AsValue for Status {
///     fn as_value(&self) -> Value<'_> {
///         match self {
///             Status::Open => Value::String("open"),
///             Status::Closed => Value::String("closed"),
///         }
///     }
/// }
///
/// assert_eq!(Status::Closed.as_value(), Value::String("closed"));
/// ```
pub trait AsValue {
    /// Returns the queryable view of `self`.
    fn as_value(&self) -> Value<'_>;
}

impl<T: AsValue + ?Sized> AsValue for &T {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue + ?Sized> AsValue for Box<T> {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

/// One level of optionality is dereferenced; `None` is `Null`.
impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.as_value(),
            None => Value::Null,
        }
    }
}

impl AsValue for str {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for Cow<'_, str> {
    fn as_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl AsValue for DateTime<Utc> {
    fn as_value(&self) -> Value<'_> {
        Value::Time(*self)
    }
}

impl AsValue for DateTime<FixedOffset> {
    fn as_value(&self) -> Value<'_> {
        Value::Time(self.with_timezone(&Utc))
    }
}

/// Naive timestamps are taken to be UTC.
impl AsValue for NaiveDateTime {
    fn as_value(&self) -> Value<'_> {
        Value::Time(self.and_utc())
    }
}

/// A date is its midnight in UTC.
impl AsValue for NaiveDate {
    fn as_value(&self) -> Value<'_> {
        Value::Time(self.and_time(NaiveTime::MIN).and_utc())
    }
}

impl<T> AsValue for [T] {
    fn as_value(&self) -> Value<'_> {
        Value::List(self.len())
    }
}

impl<T> AsValue for Vec<T> {
    fn as_value(&self) -> Value<'_> {
        Value::List(self.len())
    }
}

impl<T> AsValue for VecDeque<T> {
    fn as_value(&self) -> Value<'_> {
        Value::List(self.len())
    }
}

impl<T, S> AsValue for HashSet<T, S> {
    fn as_value(&self) -> Value<'_> {
        Value::List(self.len())
    }
}

impl<T> AsValue for BTreeSet<T> {
    fn as_value(&self) -> Value<'_> {
        Value::List(self.len())
    }
}

impl<K, V, S> AsValue for HashMap<K, V, S> {
    fn as_value(&self) -> Value<'_> {
        Value::List(self.len())
    }
}

impl<K, V> AsValue for BTreeMap<K, V> {
    fn as_value(&self) -> Value<'_> {
        Value::List(self.len())
    }
}

impl AsValue for serde_json::Value {
    fn as_value(&self) -> Value<'_> {
        match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Number(Number::I64(i)),
                (None, Some(u)) => Value::Number(Number::U64(u)),
                _ => Value::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(items.len()),
            serde_json::Value::Object(map) => Value::List(map.len()),
        }
    }
}
