//! Cancellation signal shared between a running check and its caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable flag; every clone observes the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask any check holding this flag to stop at its next iteration.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let flag = CancelFlag::new();
        let handle = flag.clone();
        assert!(!flag.is_cancelled());

        handle.cancel();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_new_flags_are_independent() {
        let first = CancelFlag::new();
        let second = CancelFlag::new();

        first.cancel();
        assert!(!second.is_cancelled());
    }
}
