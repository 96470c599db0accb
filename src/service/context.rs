//! Execution context passed to every fetch.
//!
//! A [`Context`] carries an optional deadline and an optional cancellation
//! signal. Derived contexts inherit both from their parent: a child expires
//! no later than its parent and is canceled when its parent is.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::fact::FactError;

/// Deadline and cancellation carrier.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<CancellationToken>,
}

/// Cancels the context returned alongside it by [`Context::with_cancel`].
#[derive(Debug)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Context {
    /// A context that is never canceled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context that expires after `timeout`.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derive a context that expires at `deadline`, or earlier if the parent does.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(parent) => parent.min(deadline),
            None => deadline,
        };
        Self {
            deadline: Some(deadline),
            cancel: self.cancel.clone(),
        }
    }

    /// Derive a cancelable context.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let token = match &self.cancel {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        let ctx = Self {
            deadline: self.deadline,
            cancel: Some(token.clone()),
        };
        (ctx, CancelHandle { token })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The reason this context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<FactError> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Some(FactError::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(FactError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is canceled or its deadline passes.
    /// Never resolves for [`Context::background`].
    pub async fn done(&self) -> FactError {
        let canceled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = canceled => FactError::Canceled,
            _ = expired => FactError::DeadlineExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn background_never_expires() {
        let ctx = Context::background();
        assert!(ctx.err().is_none());
        assert!(ctx.deadline().is_none());
        let res = tokio::time::timeout(Duration::from_millis(20), ctx.done()).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn timeout_expires() {
        let ctx = Context::background().with_timeout(Duration::from_millis(10));
        assert!(matches!(ctx.done().await, FactError::DeadlineExceeded));
        assert!(matches!(ctx.err(), Some(FactError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn child_deadline_never_exceeds_parent() {
        let parent = Context::background().with_timeout(Duration::from_millis(50));
        let child = parent.with_timeout(Duration::from_secs(60));
        assert_eq!(child.deadline(), parent.deadline());
    }

    #[tokio::test]
    async fn cancel_wakes_waiter() {
        let (ctx, handle) = Context::background().with_cancel();
        let waiter = tokio::spawn(async move { ctx.done().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();
        assert!(matches!(waiter.await.unwrap(), FactError::Canceled));
    }

    #[tokio::test]
    async fn cancel_propagates_to_children() {
        let (parent, handle) = Context::background().with_cancel();
        let (child, _child_handle) = parent.with_cancel();
        handle.cancel();
        assert!(matches!(child.err(), Some(FactError::Canceled)));
        assert!(matches!(child.done().await, FactError::Canceled));
    }

    #[tokio::test]
    async fn child_cancel_leaves_parent_alone() {
        let (parent, _handle) = Context::background().with_cancel();
        let (child, child_handle) = parent.with_cancel();
        child_handle.cancel();
        assert!(child.err().is_some());
        assert!(parent.err().is_none());
    }

    #[tokio::test]
    async fn timeout_child_keeps_parent_cancellation() {
        let (parent, handle) = Context::background().with_cancel();
        let child = parent.with_timeout(Duration::from_secs(60));
        handle.cancel();
        assert!(matches!(child.done().await, FactError::Canceled));
    }

    #[tokio::test]
    async fn child_of_canceled_parent_starts_canceled() {
        let (parent, handle) = Context::background().with_cancel();
        handle.cancel();
        let (child, _) = parent.with_cancel();
        assert!(matches!(child.err(), Some(FactError::Canceled)));
    }
}
