//! # Cancellation Token
//!
//! A small shared flag for cooperatively stopping long-running loops. The
//! monitor checks its token at every iteration boundary; the binary trips
//! it from the Ctrl-C handler. Clones share the same underlying flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag checked at loop iteration boundaries
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, untripped token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; all clones observe it
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once any clone has requested cancellation
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_untripped() {
        assert!(!CancelToken::new().is_cancelled());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }
}
