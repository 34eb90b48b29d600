//! Cooperative cancellation.
//!
//! The core never spawns its own cancellation — a host that wants to abandon
//! an in-flight invocation creates a [`CancellationSource`], hands the
//! matching [`CancellationToken`] to [`crate::generate`], and calls
//! [`CancellationSource::cancel`] from wherever it observes the cancel
//! request (a UI close button, a request timeout, …).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Checked at feature-level boundaries: before processing each scenario and
/// before rendering.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// The cancel-side handle paired with a [`CancellationToken`].
#[derive(Debug, Clone, Default)]
pub struct CancellationSource {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_observes_cancel_through_shared_state() {
        let source = CancellationSource::new();
        let token = source.token();
        assert!(!token.is_cancelled());
        source.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn default_token_is_not_cancelled() {
        assert!(!CancellationToken::default().is_cancelled());
    }
}
