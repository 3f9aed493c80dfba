//! Keeping the fixture graph alive across the capture call.
//!
//! Nothing in the graph is read after it is built, so without an explicit anchor an optimizing
//! compiler is free to drop it, or never materialize parts of it, before the operating system
//! walks process memory. [`RetentionGuard`] owns the graph and pins it with
//! [`std::hint::black_box`] after the guarded call returns.

use std::{hint::black_box, ops::Deref};

/// Owns a value and keeps it reachable until a guarded call has returned.
///
/// # Examples
///
/// ```rust
/// use dumpfixture::fixture::RetentionGuard;
///
/// let guard = RetentionGuard::new(vec![1, 2, 3]);
/// let len = guard.hold_across(|| 3);
/// assert_eq!(len, guard.len());
/// ```
#[derive(Debug)]
pub struct RetentionGuard<T> {
    retained: T,
}

impl<T> RetentionGuard<T> {
    /// Take ownership of `value`
    pub fn new(value: T) -> Self {
        RetentionGuard { retained: value }
    }

    /// Run `f` while the guarded value is guaranteed to be live.
    ///
    /// The value is observed through [`black_box`] both before and after `f`, so it exists in
    /// memory for the whole call.
    pub fn hold_across<R>(&self, f: impl FnOnce() -> R) -> R {
        black_box(&self.retained);
        let result = f();
        black_box(&self.retained);
        result
    }
}

impl<T> Deref for RetentionGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.retained
    }
}

impl<T> Drop for RetentionGuard<T> {
    fn drop(&mut self) {
        log::debug!("Releasing retained fixture graph");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use super::*;

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn value_outlives_guarded_call() {
        let dropped = Arc::new(AtomicBool::new(false));
        let guard = RetentionGuard::new(DropFlag(dropped.clone()));

        let seen = guard.hold_across(|| dropped.load(Ordering::SeqCst));

        assert!(!seen);
        assert!(!dropped.load(Ordering::SeqCst));
        drop(guard);
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[test]
    fn returns_call_result() {
        let guard = RetentionGuard::new(String::from("graph"));
        assert_eq!(guard.hold_across(|| 42), 42);
        assert_eq!(guard.as_str(), "graph");
    }
}
