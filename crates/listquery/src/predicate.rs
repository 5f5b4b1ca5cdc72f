//! Predicate evaluation.
//!
//! A [`Predicate`] is a [`Filter`] prepared for evaluation: its operand is
//! parsed once (lowercased for text, run through the time layouts for dates,
//! coerced to a float for numeric modes) and then tested against the resolved
//! field value of every record.
//!
//! Dispatch goes by the declared [`DataType`] first and by [`Mode`] for
//! untyped filters. A mode that does not apply to the data type, or an
//! operand that cannot be coerced, yields a predicate that never matches.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde_json::Value as Json;

use crate::filter::{DataType, Filter};
use crate::layout::{from_unix, is_midnight, parse_json_time, parse_time};
use crate::mode::Mode;
use crate::record::Record;
use crate::resolve::resolve;
use crate::value::{Number, Value};

/// A filter compiled for repeated evaluation.
#[derive(Debug, Clone)]
pub struct Predicate {
    field: String,
    test: Test,
}

#[derive(Debug, Clone)]
enum Test {
    Text { mode: Mode, needle: String },
    Date { mode: Mode, operand: DateOperand },
    Boolean { mode: Mode, expected: bool },
    Numeric { mode: Mode, operand: f64 },
    Range { numeric: Option<(f64, f64)>, time: Option<(DateTime<Utc>, DateTime<Utc>)> },
    Moment { mode: Mode, operand: DateTime<Utc> },
    Empty { expected: bool },
    Never,
}

/// A date operand and the interval it denotes.
#[derive(Debug, Clone, Copy)]
struct DateOperand {
    start: DateTime<Utc>,
    /// End of the calendar day when the operand is exactly midnight.
    day_end: Option<DateTime<Utc>>,
}

impl Predicate {
    /// Prepares a filter for evaluation.
    pub fn new(filter: &Filter) -> Self {
        Predicate {
            field: filter.field.clone(),
            test: Test::compile(filter),
        }
    }

    /// The dotted field path this predicate tests.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Evaluates the predicate against a record.
    ///
    /// Returns `None` when the field cannot be resolved; the combinator
    /// decides what that means.
    pub fn evaluate(&self, record: &dyn Record) -> Option<bool> {
        resolve(record, &self.field).map(|value| self.matches(&value))
    }

    /// Tests an already-resolved field value.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        self.test.matches(value)
    }
}

impl From<&Filter> for Predicate {
    fn from(filter: &Filter) -> Self {
        Predicate::new(filter)
    }
}

impl Test {
    fn compile(filter: &Filter) -> Test {
        let mode = filter.mode.clone();
        let value = &filter.value;

        match filter.data_type {
            DataType::Text => Test::text(mode, value),
            DataType::Date if mode.is_date_mode() => match parse_json_time(value) {
                Some(t) => Test::Date {
                    mode,
                    operand: DateOperand::new(t),
                },
                None => Test::Never,
            },
            DataType::Date => Test::Never,
            DataType::Boolean if matches!(mode, Mode::Equal | Mode::NotEqual) => Test::Boolean {
                mode,
                expected: json_truthy(value),
            },
            DataType::Boolean => Test::Never,
            DataType::Untyped => Test::untyped(mode, value),
        }
    }

    fn text(mode: Mode, value: &Json) -> Test {
        if !mode.is_text_mode() {
            return Test::Never;
        }
        match json_text(value) {
            Some(needle) => Test::Text {
                mode,
                needle: needle.to_lowercase(),
            },
            None => Test::Never,
        }
    }

    fn untyped(mode: Mode, value: &Json) -> Test {
        match mode {
            mode if mode.is_numeric_mode() => match json_f64(value) {
                Some(operand) => Test::Numeric { mode, operand },
                None => Test::Never,
            },
            Mode::Range => match value.as_array().map(Vec::as_slice) {
                Some([min, max]) => Test::Range {
                    numeric: json_f64(min).zip(json_f64(max)),
                    time: parse_json_time(min)
                        .zip(parse_json_time(max))
                        .map(|(lo, hi)| (lo.with_timezone(&Utc), hi.with_timezone(&Utc))),
                },
                _ => Test::Never,
            },
            Mode::Before | Mode::After => match parse_json_time(value) {
                Some(t) => Test::Moment {
                    mode,
                    operand: t.with_timezone(&Utc),
                },
                None => Test::Never,
            },
            Mode::IsEmpty => Test::Empty { expected: true },
            Mode::IsNotEmpty => Test::Empty { expected: false },
            mode if mode.is_text_mode() => Test::text(mode, value),
            _ => Test::Never,
        }
    }

    fn matches(&self, value: &Value<'_>) -> bool {
        match self {
            Test::Text { mode, needle } => match value.to_text() {
                Some(text) => text_matches(mode, &text.to_lowercase(), needle),
                None => false,
            },
            Test::Date { mode, operand } => match value_date(value) {
                Some(t) => operand.matches(mode, t),
                None => false,
            },
            Test::Boolean { mode, expected } => {
                let actual = value_truthy(value);
                match mode {
                    Mode::Equal => actual == *expected,
                    Mode::NotEqual => actual != *expected,
                    _ => false,
                }
            }
            Test::Numeric { mode, operand } => match value.to_f64() {
                Some(actual) => actual
                    .partial_cmp(operand)
                    .is_some_and(|ordering| mode.eval_ordering(ordering)),
                None => false,
            },
            Test::Range { numeric, time } => match value {
                Value::Number(n) => {
                    let actual = n.to_f64();
                    numeric.is_some_and(|(lo, hi)| lo <= actual && actual <= hi)
                }
                Value::String(_) | Value::Time(_) => {
                    let within_time = match (value_moment(value), time) {
                        (Some(actual), Some((lo, hi))) => *lo <= actual && actual <= *hi,
                        _ => false,
                    };
                    // numeric strings fall back to the numeric bounds
                    within_time
                        || value
                            .to_f64()
                            .zip(*numeric)
                            .is_some_and(|(actual, (lo, hi))| lo <= actual && actual <= hi)
                }
                _ => false,
            },
            Test::Moment { mode, operand } => match value_moment(value) {
                Some(actual) => mode.eval_ordering(actual.cmp(operand)),
                None => false,
            },
            Test::Empty { expected } => value.is_zero() == *expected,
            Test::Never => false,
        }
    }
}

impl DateOperand {
    fn new(t: DateTime<FixedOffset>) -> Self {
        let start = t.with_timezone(&Utc);
        let day_end = is_midnight(&t).then(|| {
            start
                .checked_add_signed(Duration::hours(24))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        });
        DateOperand { start, day_end }
    }

    fn matches(&self, mode: &Mode, actual: DateTime<Utc>) -> bool {
        let start = self.start;
        let Some(end) = self.day_end else {
            return mode.eval_ordering(actual.cmp(&start));
        };

        match mode {
            Mode::Equal => start <= actual && actual < end,
            Mode::NotEqual => actual < start || actual >= end,
            Mode::Gt | Mode::After => actual >= end,
            Mode::Gte => actual >= start,
            Mode::Lt | Mode::Before => actual < start,
            Mode::Lte => actual < end,
            _ => false,
        }
    }
}

fn text_matches(mode: &Mode, haystack: &str, needle: &str) -> bool {
    match mode {
        Mode::Equal => haystack == needle,
        Mode::NotEqual => haystack != needle,
        Mode::Contains => haystack.contains(needle),
        Mode::NotContains => !haystack.contains(needle),
        Mode::StartsWith => haystack.starts_with(needle),
        Mode::EndsWith => haystack.ends_with(needle),
        _ => false,
    }
}

/// Date-typed field coercion: native times, parseable strings, integer Unix seconds.
fn value_date(value: &Value<'_>) -> Option<DateTime<Utc>> {
    match value {
        Value::Time(t) => Some(*t),
        Value::String(s) => parse_time(s).map(|t| t.with_timezone(&Utc)),
        Value::Number(Number::I64(secs)) => from_unix(*secs).map(|t| t.with_timezone(&Utc)),
        Value::Number(Number::U64(secs)) => i64::try_from(*secs)
            .ok()
            .and_then(from_unix)
            .map(|t| t.with_timezone(&Utc)),
        _ => None,
    }
}

/// Untyped time coercion: native times and parseable strings only.
fn value_moment(value: &Value<'_>) -> Option<DateTime<Utc>> {
    match value {
        Value::Time(t) => Some(*t),
        Value::String(s) => parse_time(s).map(|t| t.with_timezone(&Utc)),
        _ => None,
    }
}

fn value_truthy(value: &Value<'_>) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => *s == "true" || *s == "1",
        Value::Number(n) => !n.is_zero(),
        _ => false,
    }
}

fn json_truthy(value: &Json) -> bool {
    match value {
        Json::Bool(b) => *b,
        Json::String(s) => s == "true" || s == "1",
        Json::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

fn json_f64(value: &Json) -> Option<f64> {
    match value {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn json_text(value: &Json) -> Option<String> {
    match value {
        Json::Null => Some(String::new()),
        Json::Bool(b) => Some(b.to_string()),
        Json::Number(n) => Some(n.to_string()),
        Json::String(s) => Some(s.clone()),
        Json::Array(_) | Json::Object(_) => None,
    }
}
