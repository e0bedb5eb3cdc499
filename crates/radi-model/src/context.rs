use std::{fmt, time::Duration};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellable execution context with an optional deadline.
///
/// A context is either *background* (never expires, only explicit cancellation ends it) or
/// bound to a deadline. Expiry is evaluated lazily: creating a context spawns no timer, the
/// deadline is checked by [`OperationContext::is_cancelled`] and awaited by
/// [`OperationContext::cancelled`].
///
/// Clones share cancellation state.
#[derive(Clone)]
pub struct OperationContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl OperationContext {
    /// Fresh top-level context without a deadline.
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Fresh top-level context that expires `timeout` from now.
    ///
    /// A timeout too large to represent as an instant yields a context without a deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Deadline of this context, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline; `None` for background contexts.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Cancel this context and every child derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once the context was cancelled or its deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Completes when the context is cancelled or its deadline passes.
    pub async fn cancelled(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.token.cancelled().await,
        }
    }

    /// Derive a child context: cancelled with its parent, same deadline.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Underlying cancellation token (explicit cancellation only, ignores the deadline).
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::background()
    }
}

impl fmt::Debug for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationContext")
            .field("cancelled", &self.token.is_cancelled())
            .field("remaining", &self.remaining())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_has_no_deadline() {
        let ctx = OperationContext::background();
        assert!(ctx.deadline().is_none());
        assert!(ctx.remaining().is_none());
        assert!(!ctx.is_cancelled());
    }

    #[test]
    fn explicit_cancel_propagates_to_clones_and_children() {
        let ctx = OperationContext::background();
        let clone = ctx.clone();
        let child = ctx.child();

        ctx.cancel();

        assert!(clone.is_cancelled());
        assert!(child.is_cancelled());
    }

    #[test]
    fn cancelling_child_leaves_parent_running() {
        let parent = OperationContext::background();
        let child = parent.child();

        child.cancel();

        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_expires_at_deadline() {
        let ctx = OperationContext::with_timeout(Duration::from_secs(5));
        let started = Instant::now();

        assert!(!ctx.is_cancelled());
        assert_eq!(ctx.remaining(), Some(Duration::from_secs(5)));

        ctx.cancelled().await;

        assert!(ctx.is_cancelled());
        assert!(started.elapsed() <= Duration::from_secs(5));
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_cancel_beats_deadline() {
        let ctx = OperationContext::with_timeout(Duration::from_secs(60));
        let started = Instant::now();

        let handle = ctx.clone();
        handle.cancel();
        ctx.cancelled().await;

        assert!(started.elapsed() < Duration::from_secs(60));
    }

    #[test]
    fn huge_timeout_degrades_to_no_deadline() {
        let ctx = OperationContext::with_timeout(Duration::MAX);
        assert!(ctx.deadline().is_none());
        assert!(!ctx.is_cancelled());
    }
}
