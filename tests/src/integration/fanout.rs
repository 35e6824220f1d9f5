//! # Fanout Hub Under Concurrency
//!
//! The hub is the one component with genuinely shared mutable state.
//! These tests exercise the properties the stage layer never needs:
//! concurrent producers, replay windows, backpressure eviction, and
//! cleanup on every exit path.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use fanout_hub::{FanoutHub, SubscriptionError};

    // =========================================================================
    // REPLAY WINDOW
    // =========================================================================

    #[test]
    fn test_replay_is_last_min_n_h_items() {
        let hub: FanoutHub<usize> = FanoutHub::with_capacities(200, 20);

        // Fewer than H published: replay everything.
        for n in 0..50 {
            hub.publish(n);
        }
        let mut sub = hub.subscribe();
        let mut replayed = Vec::new();
        while let Ok(Some(item)) = sub.try_recv() {
            replayed.push(item);
        }
        assert_eq!(replayed, (0..50).collect::<Vec<_>>());
        drop(sub);

        // More than H published: replay exactly the last H, in order.
        for n in 50..300 {
            hub.publish(n);
        }
        let mut sub = hub.subscribe();
        let mut replayed = Vec::new();
        while let Ok(Some(item)) = sub.try_recv() {
            replayed.push(item);
        }
        assert_eq!(replayed, (100..300).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_replay_plus_live_is_gap_free() {
        let hub: FanoutHub<usize> = FanoutHub::with_capacities(200, 50);
        for n in 0..10 {
            hub.publish(n);
        }

        let mut sub = hub.subscribe();
        for n in 10..20 {
            hub.publish(n);
        }

        let mut seen = Vec::new();
        for _ in 0..20 {
            seen.push(sub.recv().await.expect("item"));
        }
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    // =========================================================================
    // BACKPRESSURE EVICTION
    // =========================================================================

    #[test]
    fn test_undrained_subscriber_evicted_and_cut_off() {
        let hub: FanoutHub<usize> = FanoutHub::with_capacities(200, 5);
        let mut lazy = hub.subscribe();
        let mut diligent = hub.subscribe();

        for n in 0..20 {
            hub.publish(n);
            // The diligent subscriber keeps up; the lazy one never drains.
            assert_eq!(diligent.try_recv(), Ok(Some(n)));
        }

        // The lazy subscriber fell more than Q behind: evicted.
        assert_eq!(hub.subscriber_count(), 1);
        // It still sees what was buffered before eviction, then the end.
        for n in 0..5 {
            assert_eq!(lazy.try_recv(), Ok(Some(n)));
        }
        assert_eq!(lazy.try_recv(), Err(SubscriptionError::Disconnected));
    }

    #[test]
    fn test_eviction_never_blocks_or_fails_publish() {
        let hub: FanoutHub<usize> = FanoutHub::with_capacities(8, 1);
        let _stalled = hub.subscribe();

        // Far more publishes than the mailbox will ever hold; each call
        // returns immediately.
        for n in 0..100 {
            hub.publish(n);
        }
        assert_eq!(hub.items_published(), 100);
        assert_eq!(hub.subscriber_count(), 0);
    }

    // =========================================================================
    // CONCURRENT PRODUCERS AND CONSUMERS
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_producers_deliver_everything_in_per_producer_order() {
        const PRODUCERS: usize = 4;
        const PER_PRODUCER: usize = 50;

        let hub: FanoutHub<(usize, usize)> =
            FanoutHub::with_capacities(PRODUCERS * PER_PRODUCER, PRODUCERS * PER_PRODUCER);
        let mut sub = hub.subscribe();

        let mut producers = Vec::new();
        for producer in 0..PRODUCERS {
            let handle = hub.clone();
            producers.push(tokio::spawn(async move {
                for sequence in 0..PER_PRODUCER {
                    handle.publish((producer, sequence));
                    tokio::task::yield_now().await;
                }
            }));
        }
        for producer in producers {
            producer.await.expect("producer task");
        }

        let mut received = Vec::new();
        for _ in 0..PRODUCERS * PER_PRODUCER {
            let item = timeout(Duration::from_secs(1), sub.recv())
                .await
                .expect("timeout")
                .expect("item");
            received.push(item);
        }

        // Everything arrived exactly once.
        assert_eq!(received.len(), PRODUCERS * PER_PRODUCER);

        // And each producer's items arrived in its publish order.
        for producer in 0..PRODUCERS {
            let sequence: Vec<usize> = received
                .iter()
                .filter(|(p, _)| *p == producer)
                .map(|(_, s)| *s)
                .collect();
            assert_eq!(sequence, (0..PER_PRODUCER).collect::<Vec<_>>());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_all_registered_subscribers_see_same_live_order() {
        const ITEMS: usize = 100;

        let hub: FanoutHub<usize> = FanoutHub::with_capacities(ITEMS, ITEMS);
        let mut subs: Vec<_> = (0..3).map(|_| hub.subscribe()).collect();

        let producer = hub.clone();
        let publisher = tokio::spawn(async move {
            for n in 0..ITEMS {
                producer.publish(n);
            }
        });
        publisher.await.expect("publisher task");

        for sub in &mut subs {
            let mut seen = Vec::new();
            for _ in 0..ITEMS {
                seen.push(sub.recv().await.expect("item"));
            }
            assert_eq!(seen, (0..ITEMS).collect::<Vec<_>>());
        }
    }

    // =========================================================================
    // CLEANUP
    // =========================================================================

    #[tokio::test]
    async fn test_abandoned_subscriber_cleaned_up_promptly() {
        let hub: FanoutHub<usize> = FanoutHub::new();

        // A consumer task that dies mid-stream still releases its mailbox.
        let mut sub = hub.subscribe();
        let consumer = tokio::spawn(async move {
            let _first = sub.recv().await;
            // Task ends here; the subscription drops with it.
        });

        hub.publish(1);
        consumer.await.expect("consumer task");
        assert_eq!(hub.subscriber_count(), 0);

        // Publishing afterwards is a no-op delivery, not an error.
        assert_eq!(hub.publish(2), 0);
    }

    #[test]
    fn test_independent_capacities() {
        // H and Q are independent knobs.
        let hub: FanoutHub<usize> = FanoutHub::with_capacities(3, 100);
        for n in 0..10 {
            hub.publish(n);
        }
        let mut sub = hub.subscribe();
        let mut replayed = Vec::new();
        while let Ok(Some(item)) = sub.try_recv() {
            replayed.push(item);
        }
        // History window of 3, even though mailboxes hold 100.
        assert_eq!(replayed, vec![7, 8, 9]);
    }
}
