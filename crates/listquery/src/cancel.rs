//! Cooperative cancellation.
//!
//! The engine polls a [`Cancellation`] before evaluating each record and
//! inside the sort comparator. Once cancelled, filtering stops with the
//! records matched so far and the sort comparator reports every pair as equal.

use std::sync::atomic::{AtomicBool, Ordering};

/// A signal the engine polls to stop work early.
///
/// Implemented for `()` (never cancelled), [`AtomicBool`] and any
/// `Fn() -> bool`, so an async runtime's token can be passed as
/// `|| token.is_cancelled()`.
pub trait Cancellation {
    /// Returns `true` once work should stop.
    fn is_cancelled(&self) -> bool;
}

impl Cancellation for () {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Cancellation for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<F> Cancellation for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}
