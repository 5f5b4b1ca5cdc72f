//! Ordering types for query result sorting.
//!
//! Provides [`SortOrder`] for direction and [`SortField`] for field-based
//! ordering, plus the type-aware comparison the stable sorter uses.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::Record;
use crate::resolve::resolve;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl SortOrder {
    /// Parses `"asc"`/`"desc"` case-insensitively; anything else is `Asc`.
    pub fn parse(name: &str) -> SortOrder {
        if name.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Returns the wire name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SortOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(SortOrder::parse(&name))
    }
}

/// A single sort key: a dotted field path and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub order: SortOrder,
}

impl SortField {
    /// Creates an ascending key.
    pub fn asc(field: impl Into<String>) -> Self {
        SortField::new(field, SortOrder::Asc)
    }

    /// Creates a descending key.
    pub fn desc(field: impl Into<String>) -> Self {
        SortField::new(field, SortOrder::Desc)
    }

    /// Creates a key with the given direction.
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        SortField {
            field: field.into(),
            order,
        }
    }
}

/// Compares two field values.
///
/// Booleans compare directly (`false < true`) and times chronologically.
/// Otherwise both sides are compared as floats when both coerce to one,
/// falling back to a case-insensitive comparison of their text form.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Time(a), Value::Time(b)) => a.cmp(b),
        _ => match (a.to_f64(), b.to_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => {
                let x = a.to_text().unwrap_or_default().to_lowercase();
                let y = b.to_text().unwrap_or_default().to_lowercase();
                x.cmp(&y)
            }
        },
    }
}

/// Compares two records key by key.
///
/// The first key with a non-equal comparison decides. A key that does not
/// resolve on either side is skipped.
pub fn compare_records(a: &dyn Record, b: &dyn Record, fields: &[SortField]) -> Ordering {
    for key in fields {
        let (Some(val_a), Some(val_b)) = (resolve(a, &key.field), resolve(b, &key.field)) else {
            continue;
        };

        let ordering = key.order.apply(compare_values(&val_a, &val_b));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Stable merge sort by a comparator.
///
/// Mixed-type keys make [`compare_values`] non-transitive, so the comparator
/// is not guaranteed to be a total order. This sort still terminates with a
/// permutation of the input and never panics on such comparators.
pub fn stable_sort_by<T, F>(items: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut merged = order.clone();

    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right, mut out) = (start, mid, start);

            while left < mid && right < end {
                // take from the right only when strictly smaller
                if compare(&items[order[right]], &items[order[left]]) == Ordering::Less {
                    merged[out] = order[right];
                    right += 1;
                } else {
                    merged[out] = order[left];
                    left += 1;
                }
                out += 1;
            }
            merged[out..out + (mid - left)].copy_from_slice(&order[left..mid]);
            merged[right..end].copy_from_slice(&order[right..end]);

            start = end;
        }
        std::mem::swap(&mut order, &mut merged);
        width *= 2;
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order.into_iter().filter_map(|i| slots[i].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldDef;
    use crate::value::{AsValue, Number};
    use chrono::{TimeZone, Utc};

    #[test]
    fn sort_order_parse_and_apply() {
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Asc);

        assert_eq!(SortOrder::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortOrder::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn sort_field_serde() {
        let key: SortField = serde_json::from_str(r#"{"field": "name"}"#).unwrap();
        assert_eq!(key, SortField::asc("name"));

        let key: SortField = serde_json::from_str(r#"{"field": "age", "order": "Desc"}"#).unwrap();
        assert_eq!(key, SortField::desc("age"));

        assert_eq!(
            serde_json::to_string(&SortField::desc("age")).unwrap(),
            r#"{"field":"age","order":"desc"}"#
        );
    }

    #[test]
    fn compare_bools_and_times() {
        assert_eq!(
            compare_values(&Value::Bool(false), &Value::Bool(true)),
            Ordering::Less
        );

        let early = Value::Time(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let late = Value::Time(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(compare_values(&early, &late), Ordering::Less);
    }

    #[test]
    fn compare_numbers_and_numeric_strings() {
        let nine = Value::Number(Number::I64(9));
        let ten = Value::String("10");
        // numeric, not lexical
        assert_eq!(compare_values(&nine, &ten), Ordering::Less);
        assert_eq!(
            compare_values(&Value::Number(Number::F64(f64::NAN)), &nine),
            Ordering::Equal
        );
    }

    #[test]
    fn compare_strings_case_insensitively() {
        assert_eq!(
            compare_values(&Value::String("apple"), &Value::String("Banana")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::String("ABC"), &Value::String("abc")),
            Ordering::Equal
        );
    }

    struct Item {
        name: String,
        priority: i64,
    }

    impl Record for Item {
        fn fields(&self) -> &'static [FieldDef] {
            const FIELDS: &[FieldDef] = &[
                FieldDef::new("name", None, false),
                FieldDef::new("priority", None, false),
            ];
            FIELDS
        }

        fn field_value(&self, index: usize) -> Option<Value<'_>> {
            match index {
                0 => Some(self.name.as_value()),
                1 => Some(self.priority.as_value()),
                _ => None,
            }
        }
    }

    fn item(name: &str, priority: i64) -> Item {
        Item {
            name: name.to_string(),
            priority,
        }
    }

    #[test]
    fn stable_sort_keeps_ties_in_order() {
        let input = vec![(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e')];
        let sorted = stable_sort_by(input, |a, b| a.0.cmp(&b.0));
        assert_eq!(sorted, vec![(1, 'b'), (1, 'e'), (2, 'd'), (3, 'a'), (3, 'c')]);

        assert!(stable_sort_by(Vec::<i32>::new(), |a, b| a.cmp(b)).is_empty());
        assert_eq!(stable_sort_by(vec![7], |a, b| a.cmp(b)), vec![7]);
    }

    #[test]
    fn stable_sort_survives_inconsistent_comparator() {
        let input: Vec<u32> = (0..50).collect();
        let mut flip = false;
        let sorted = stable_sort_by(input, |_, _| {
            flip = !flip;
            if flip {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        });

        let mut seen = sorted.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn multiple_keys_fall_through_ties() {
        let keys = vec![SortField::asc("priority"), SortField::asc("name")];

        assert_eq!(
            compare_records(&item("a", 1), &item("b", 1), &keys),
            Ordering::Less
        );
        assert_eq!(
            compare_records(&item("b", 1), &item("a", 2), &keys),
            Ordering::Less
        );
    }

    #[test]
    fn unresolvable_key_is_skipped() {
        let keys = vec![SortField::asc("missing"), SortField::desc("priority")];

        assert_eq!(
            compare_records(&item("a", 1), &item("a", 2), &keys),
            Ordering::Greater
        );
        assert_eq!(
            compare_records(&item("a", 1), &item("b", 1), &[SortField::asc("missing")]),
            Ordering::Equal
        );
    }
}
