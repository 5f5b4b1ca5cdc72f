//! The field table a record exposes to the query engine.
//!
//! This module provides the [`Record`] trait, which is implemented by the
//! `#[derive(Record)]` macro to give the engine indexed access to a struct's
//! fields without any runtime type inspection.

use crate::value::Value;

/// Static description of one field in a record's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    ident: &'static str,
    alias: Option<&'static str>,
    flatten: bool,
}

impl FieldDef {
    /// Creates a field description.
    ///
    /// `ident` is the Rust field name, `alias` the external (wire) name if one
    /// was declared, and `flatten` marks an embedded record whose fields are
    /// promoted into the parent.
    pub const fn new(ident: &'static str, alias: Option<&'static str>, flatten: bool) -> Self {
        FieldDef {
            ident,
            alias,
            flatten,
        }
    }

    /// The Rust identifier of the field.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// The declared external name, if any.
    pub fn alias(&self) -> Option<&'static str> {
        self.alias
    }

    /// Returns `true` if the field's own fields are promoted into the parent.
    pub fn is_flattened(&self) -> bool {
        self.flatten
    }
}

/// Trait for types that can be queried.
///
/// Normally derived with `#[derive(Record)]`, which builds the field table at
/// compile time and also implements [`AsValue`](crate::AsValue) so the type
/// can be nested inside other records.
///
/// # Manual Implementation
///
/// ```
/// use listquery::{AsValue, FieldDef, Record, Value};
///
/// struct Task {
///     name: String,
///     priority: u8,
/// }
///
/// impl Record for Task {
///     fn fields(&self) -> &'static [FieldDef] {
///         const FIELDS: &[FieldDef] = &[
///             FieldDef::new("name", None, false),
///             FieldDef::new("priority", None, false),
///         ];
///         FIELDS
///     }
///
///     fn field_value(&self, index: usize) -> Option<Value<'_>> {
///         match index {
///             0 => Some(self.name.as_value()),
///             1 => Some(self.priority.as_value()),
///             _ => None,
///         }
///     }
/// }
///
/// let task = Task { name: "Fix bug".into(), priority: 5 };
/// assert_eq!(listquery::resolve(&task, "NAME"), Some(Value::String("Fix bug")));
/// ```
pub trait Record {
    /// The field table, in declaration order.
    fn fields(&self) -> &'static [FieldDef];

    /// Returns the value of the field at `index` in [`fields`](Record::fields).
    fn field_value(&self, index: usize) -> Option<Value<'_>>;

    /// Returns `true` if every field holds its zero value.
    fn is_zero(&self) -> bool {
        (0..self.fields().len()).all(|index| self.field_value(index).map_or(true, |v| v.is_zero()))
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn fields(&self) -> &'static [FieldDef] {
        (**self).fields()
    }

    fn field_value(&self, index: usize) -> Option<Value<'_>> {
        (**self).field_value(index)
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn fields(&self) -> &'static [FieldDef] {
        (**self).fields()
    }

    fn field_value(&self, index: usize) -> Option<Value<'_>> {
        (**self).field_value(index)
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{AsValue, Number};

    struct TestItem {
        name: String,
        count: i32,
    }

    impl Record for TestItem {
        fn fields(&self) -> &'static [FieldDef] {
            const FIELDS: &[FieldDef] = &[
                FieldDef::new("name", Some("displayName"), false),
                FieldDef::new("count", None, false),
            ];
            FIELDS
        }

        fn field_value(&self, index: usize) -> Option<Value<'_>> {
            match index {
                0 => Some(self.name.as_value()),
                1 => Some(self.count.as_value()),
                _ => None,
            }
        }
    }

    #[test]
    fn field_table_is_indexed() {
        let item = TestItem {
            name: "test".to_string(),
            count: 42,
        };

        assert_eq!(item.fields()[0].alias(), Some("displayName"));
        assert_eq!(item.field_value(0), Some(Value::String("test")));
        assert_eq!(item.field_value(1), Some(Value::Number(Number::I64(42))));
        assert_eq!(item.field_value(2), None);
    }

    #[test]
    fn zero_record() {
        let zero = TestItem {
            name: String::new(),
            count: 0,
        };
        let non_zero = TestItem {
            name: String::new(),
            count: 1,
        };

        assert!(zero.is_zero());
        assert!(!non_zero.is_zero());
    }

    #[test]
    fn references_delegate() {
        let item = TestItem {
            name: "x".to_string(),
            count: 0,
        };
        let by_ref = &item;

        assert_eq!(by_ref.fields().len(), 2);
        assert_eq!(by_ref.field_value(0), Some(Value::String("x")));
    }
}
