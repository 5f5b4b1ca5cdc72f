//! Folding per-filter verdicts into a per-record verdict.
//!
//! Under [`Logic::And`] the first failing filter rejects the record and a
//! filter whose field does not resolve counts as failing. Under
//! [`Logic::Or`] the first matching filter admits the record and a filter
//! whose field does not resolve is skipped. Both stop at the first decisive
//! filter.

use crate::cancel::Cancellation;
use crate::filter::{FilterRoot, Logic};
use crate::predicate::Predicate;
use crate::record::Record;

/// Filters prepared for evaluation, with their combining logic.
#[derive(Debug, Clone)]
pub struct Matcher {
    predicates: Vec<Predicate>,
    logic: Logic,
}

impl Matcher {
    /// Prepares every filter of a root.
    pub fn new(root: &FilterRoot) -> Self {
        Matcher {
            predicates: root.filters.iter().map(Predicate::new).collect(),
            logic: root.logic,
        }
    }

    /// Returns `true` if there is nothing to evaluate.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Computes the verdict for one record.
    pub fn matches(&self, record: &dyn Record) -> bool {
        match self.logic {
            Logic::And => self
                .predicates
                .iter()
                .all(|p| p.evaluate(record).unwrap_or(false)),
            Logic::Or => self
                .predicates
                .iter()
                .any(|p| p.evaluate(record) == Some(true)),
        }
    }
}

/// Keeps the records that match, in order.
///
/// An empty filter list returns the input untouched. Cancellation is polled
/// before each record; once observed, the records matched so far are
/// returned.
pub fn filter_records<T, C>(items: Vec<T>, root: &FilterRoot, cancel: &C) -> Vec<T>
where
    T: Record,
    C: Cancellation + ?Sized,
{
    let matcher = Matcher::new(root);
    if matcher.is_empty() {
        return items;
    }

    let mut kept = Vec::new();
    for (evaluated, item) in items.into_iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::debug!(evaluated, kept = kept.len(), "list query cancelled while filtering");
            break;
        }
        if matcher.matches(&item) {
            kept.push(item);
        }
    }
    kept
}
