//! Cooperative cancellation shared between a signal handler and the scanner.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A cloneable flag that requests a running scan to stop dispatching work.
///
/// Every clone observes the same flag. Raising it never interrupts a walk
/// that is already running; the scanner only checks it before starting the
/// next top-level directory.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Create a flag that has not been raised.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_flag_is_not_cancelled() {
        assert!(!CancellationFlag::new().is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = CancellationFlag::new();
        let handler_side = flag.clone();

        handler_side.cancel();

        assert!(flag.is_cancelled());
        assert!(handler_side.is_cancelled());
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let flag = CancellationFlag::new();
        let remote = flag.clone();

        std::thread::spawn(move || remote.cancel())
            .join()
            .unwrap();

        assert!(flag.is_cancelled());
    }
}
