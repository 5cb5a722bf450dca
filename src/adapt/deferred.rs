//! The deferred result produced by promisified wrappers.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::value::Value;

/// A value or error to be known at a future point. Resolves to `Ok` with
/// the callback's result, rejects to `Err` with its error argument.
///
/// A completion that is dropped without firing leaves the deferred pending
/// forever — the same caller-managed risk as a callback that never fires.
/// There is no timeout and no cancellation.
pub struct Deferred {
    rx: oneshot::Receiver<Result<Value, Value>>,
}

impl Deferred {
    pub(crate) fn new(rx: oneshot::Receiver<Result<Value, Value>>) -> Self {
        Deferred { rx }
    }

    /// A deferred already settled with a value.
    pub fn resolved(value: Value) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Ok(value));
        Deferred { rx }
    }

    /// A deferred already settled with an error.
    pub fn rejected(error: Value) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Err(error));
        Deferred { rx }
    }
}

impl Future for Deferred {
    type Output = Result<Value, Value>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // Sender dropped unfired: the result is unknowable, so the
            // deferred stays pending.
            Poll::Ready(Err(_)) => Poll::Pending,
            Poll::Pending => Poll::Pending,
        }
    }
}
