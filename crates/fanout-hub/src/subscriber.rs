//! # Hub Subscriptions
//!
//! The consuming side: replay prefix plus live mailbox, with deregistration
//! on every exit path.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::Stream;
use tracing::debug;

use crate::hub::HubShared;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The mailbox was closed: the subscriber was evicted under
    /// backpressure, or the hub was dropped.
    #[error("Subscriber disconnected from hub")]
    Disconnected,
}

/// A live subscription to a [`crate::FanoutHub`].
///
/// Yields the history snapshot taken at subscribe time first, then live
/// items in publish order, until the subscription is dropped or the
/// subscriber is evicted. The sequence is lazy, infinite, and
/// non-restartable; a new call to `subscribe` establishes a new starting
/// point.
///
/// Dropping the subscription deregisters its mailbox, so cleanup happens
/// even when the consumer stops abnormally.
pub struct HubSubscription<T> {
    /// Registry id, used for deregistration.
    id: u64,

    /// History snapshot still to be yielded.
    replay: VecDeque<T>,

    /// Live mailbox.
    receiver: mpsc::Receiver<T>,

    /// Back-reference to the hub registry (for cleanup).
    shared: Arc<HubShared<T>>,
}

impl<T> HubSubscription<T> {
    pub(crate) fn new(
        id: u64,
        replay: VecDeque<T>,
        receiver: mpsc::Receiver<T>,
        shared: Arc<HubShared<T>>,
    ) -> Self {
        Self {
            id,
            replay,
            receiver,
            shared,
        }
    }

    /// Receive the next item.
    ///
    /// # Returns
    ///
    /// - `Some(item)` - The next replayed or live item
    /// - `None` - The subscription ended (evicted, or hub dropped)
    pub async fn recv(&mut self) -> Option<T> {
        if let Some(item) = self.replay.pop_front() {
            return Some(item);
        }
        self.receiver.recv().await
    }

    /// Try to receive the next item without waiting.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item))` - An item was ready
    /// - `Ok(None)` - Nothing ready right now (would wait)
    /// - `Err(SubscriptionError::Disconnected)` - The subscription ended
    pub fn try_recv(&mut self) -> Result<Option<T>, SubscriptionError> {
        if let Some(item) = self.replay.pop_front() {
            return Ok(Some(item));
        }
        match self.receiver.try_recv() {
            Ok(item) => Ok(Some(item)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(SubscriptionError::Disconnected),
        }
    }

    /// How many replayed items have not been consumed yet.
    #[must_use]
    pub fn pending_replay(&self) -> usize {
        self.replay.len()
    }
}

impl<T> Drop for HubSubscription<T> {
    fn drop(&mut self) {
        self.shared.deregister(self.id);
        debug!(subscriber_id = self.id, "Subscription dropped");
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct HubStream<T> {
    subscription: HubSubscription<T>,
}

impl<T> HubStream<T> {
    /// Wrap a subscription as a stream.
    #[must_use]
    pub fn new(subscription: HubSubscription<T>) -> Self {
        Self { subscription }
    }
}

impl<T> From<HubSubscription<T>> for HubStream<T> {
    fn from(subscription: HubSubscription<T>) -> Self {
        Self::new(subscription)
    }
}

impl<T: Unpin> Stream for HubStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(item) = this.subscription.replay.pop_front() {
            return Poll::Ready(Some(item));
        }
        this.subscription.receiver.poll_recv(cx)
    }
}
