//! One-shot bypass flag
//!
//! Armed right before the interceptor's own corrective navigation (resume,
//! push, replace) so that exactly the next interception lets it through.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct BypassFlag {
    armed: AtomicBool,
}

impl BypassFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the next interception
    pub fn arm_once(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Disarm and report whether the flag was armed
    pub fn consume_if_armed(&self) -> bool {
        self.armed.swap(false, Ordering::SeqCst)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumed_once() {
        let flag = BypassFlag::new();
        assert!(!flag.consume_if_armed());

        flag.arm_once();
        flag.arm_once();
        assert!(flag.is_armed());
        assert!(flag.consume_if_armed());
        assert!(!flag.consume_if_armed());
        assert!(!flag.is_armed());
    }
}
