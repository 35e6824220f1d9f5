//! # Hub Core
//!
//! The publishing side: bounded history plus the subscriber registry.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::subscriber::HubSubscription;
use crate::{DEFAULT_HISTORY_CAPACITY, DEFAULT_MAILBOX_CAPACITY};

/// One registered subscriber: an id for deregistration plus the sending half
/// of its bounded mailbox.
pub(crate) struct Mailbox<T> {
    pub(crate) id: u64,
    pub(crate) sender: mpsc::Sender<T>,
}

/// The two collections a publish must update together. One lock guards both:
/// a subscriber must never be handed a history snapshot that is concurrently
/// being evicted from under it.
pub(crate) struct HubState<T> {
    pub(crate) history: VecDeque<T>,
    pub(crate) subscribers: Vec<Mailbox<T>>,
}

pub(crate) struct HubShared<T> {
    pub(crate) state: Mutex<HubState<T>>,
    history_capacity: usize,
    mailbox_capacity: usize,
    next_subscriber_id: AtomicU64,
    published: AtomicU64,
}

/// In-process live broadcast hub.
///
/// Cloning yields another handle to the same hub, so producers and the
/// subscription entry point can be handed around freely. All state is
/// process-lifetime only; nothing survives a restart.
pub struct FanoutHub<T> {
    shared: Arc<HubShared<T>>,
}

impl<T> Clone for FanoutHub<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone> FanoutHub<T> {
    /// Create a hub with the default history and mailbox capacities.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacities(DEFAULT_HISTORY_CAPACITY, DEFAULT_MAILBOX_CAPACITY)
    }

    /// Create a hub with explicit capacities.
    ///
    /// `history_capacity` bounds the replay window for late joiners;
    /// `mailbox_capacity` bounds how far a subscriber may fall behind before
    /// eviction. The two are independent.
    #[must_use]
    pub fn with_capacities(history_capacity: usize, mailbox_capacity: usize) -> Self {
        Self {
            shared: Arc::new(HubShared {
                state: Mutex::new(HubState {
                    history: VecDeque::with_capacity(history_capacity),
                    subscribers: Vec::new(),
                }),
                history_capacity,
                // A zero-depth channel cannot exist; clamp to 1.
                mailbox_capacity: mailbox_capacity.max(1),
                next_subscriber_id: AtomicU64::new(0),
                published: AtomicU64::new(0),
            }),
        }
    }

    /// Publish one item to every current subscriber.
    ///
    /// Appends to history (evicting the oldest entry at capacity), then
    /// attempts a non-blocking enqueue into each mailbox. A subscriber whose
    /// mailbox is full is immediately evicted. Never blocks, never fails.
    ///
    /// # Returns
    ///
    /// The number of subscribers the item was delivered to.
    pub fn publish(&self, item: T) -> usize {
        let mut delivered = 0;

        {
            let mut state = self.shared.state.lock();

            if self.shared.history_capacity > 0 {
                if state.history.len() == self.shared.history_capacity {
                    state.history.pop_front();
                }
                state.history.push_back(item.clone());
            }

            state.subscribers.retain(|mailbox| {
                match mailbox.sender.try_send(item.clone()) {
                    Ok(()) => {
                        delivered += 1;
                        true
                    }
                    Err(TrySendError::Full(_)) => {
                        warn!(
                            subscriber_id = mailbox.id,
                            "Mailbox full, evicting slow subscriber"
                        );
                        false
                    }
                    Err(TrySendError::Closed(_)) => {
                        debug!(subscriber_id = mailbox.id, "Subscriber gone, removing");
                        false
                    }
                }
            });
        }

        self.shared.published.fetch_add(1, Ordering::Relaxed);
        delivered
    }

    /// Register a new subscriber.
    ///
    /// The subscription first yields every item currently in history, in
    /// publish order, then live items as they arrive. Each subscription is
    /// independent and establishes its own starting point; dropping it
    /// deregisters the mailbox.
    #[must_use]
    pub fn subscribe(&self) -> HubSubscription<T> {
        let (sender, receiver) = mpsc::channel(self.shared.mailbox_capacity);
        let id = self.shared.next_subscriber_id.fetch_add(1, Ordering::Relaxed);

        let replay: VecDeque<T> = {
            let mut state = self.shared.state.lock();
            let snapshot = state.history.iter().cloned().collect();
            state.subscribers.push(Mailbox { id, sender });
            snapshot
        };

        debug!(subscriber_id = id, replay = replay.len(), "New subscription");
        HubSubscription::new(id, replay, receiver, Arc::clone(&self.shared))
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.state.lock().subscribers.len()
    }

    /// Number of items currently held in the replay history.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.shared.state.lock().history.len()
    }

    /// Replay window capacity.
    #[must_use]
    pub fn history_capacity(&self) -> usize {
        self.shared.history_capacity
    }

    /// Per-subscriber mailbox depth.
    #[must_use]
    pub fn mailbox_capacity(&self) -> usize {
        self.shared.mailbox_capacity
    }

    /// Total items published over the hub's lifetime.
    #[must_use]
    pub fn items_published(&self) -> u64 {
        self.shared.published.load(Ordering::Relaxed)
    }
}

impl<T: Clone> Default for FanoutHub<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HubShared<T> {
    /// Remove a subscriber's mailbox from the registry, if still present.
    pub(crate) fn deregister(&self, id: u64) {
        let mut state = self.state.lock();
        state.subscribers.retain(|mailbox| mailbox.id != id);
    }
}
