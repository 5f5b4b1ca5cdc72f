//! Dotted-path field resolution.
//!
//! A path such as `"address.city"` is resolved one segment at a time. Each
//! segment is matched case-insensitively, first against the declared aliases
//! of the record's fields and then against their identifiers. Segments that
//! miss are looked up inside flattened fields, so promoted fields resolve as
//! if they were declared on the parent.

use crate::record::Record;
use crate::value::Value;

/// Resolves a dotted path against a record.
///
/// Returns `None` when any segment is unknown, or when an intermediate value
/// is not a record (including an absent `Option`). Never panics.
pub fn resolve<'a>(record: &'a dyn Record, path: &str) -> Option<Value<'a>> {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };

    let Some(value) = lookup(record, head) else {
        return resolve_flattened(record, path);
    };

    match rest {
        None => Some(value),
        Some(rest) => value.as_record().and_then(|inner| resolve(inner, rest)),
    }
}

/// Finds a direct field by alias, then by identifier.
fn lookup<'a>(record: &'a dyn Record, segment: &str) -> Option<Value<'a>> {
    let fields = record.fields();

    let index = fields
        .iter()
        .position(|def| def.alias().is_some_and(|alias| eq_fold(alias, segment)))
        .or_else(|| {
            fields
                .iter()
                .position(|def| eq_fold(def.ident(), segment))
        })?;

    record.field_value(index)
}

fn resolve_flattened<'a>(record: &'a dyn Record, path: &str) -> Option<Value<'a>> {
    record
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, def)| def.is_flattened())
        .find_map(|(index, _)| {
            let inner = record.field_value(index)?.as_record()?;
            resolve(inner, path)
        })
}

fn eq_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
