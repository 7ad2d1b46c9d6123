//! Connection-reachability tracking.
//!
//! The client maintains one shared reachable/unreachable flag, updated from
//! the outcome of each HTTP call and from explicit platform online/offline
//! notifications. Subscribers are notified synchronously whenever the flag
//! flips; re-asserting the current state notifies nobody.

use std::sync::{Arc, Mutex, Weak};

type Callback = Arc<dyn Fn(bool) + Send + Sync>;

struct TrackerState {
    reachable: bool,
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

/// Shared reachability flag with subscriber fan-out.
///
/// Clones of the owning client share one tracker. The internal mutex is held
/// only for state manipulation; callbacks run after it is released, so a
/// callback may freely subscribe or query the tracker.
pub struct ConnectionTracker {
    state: Mutex<TrackerState>,
}

impl ConnectionTracker {
    /// Creates a tracker that starts out reachable.
    ///
    /// Optimistic start: the first failed request corrects the assumption,
    /// and starting unreachable would gate UI input before any call is made.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TrackerState {
                reachable: true,
                next_id: 0,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Returns the current reachability state.
    pub fn is_reachable(&self) -> bool {
        self.state.lock().expect("tracker mutex poisoned").reachable
    }

    /// Asserts a reachability state.
    ///
    /// Idempotent: if the state is unchanged, no subscriber is invoked.
    /// Returns true if the state flipped.
    pub fn set_reachable(&self, reachable: bool) -> bool {
        let callbacks: Vec<Callback> = {
            let mut state = self.state.lock().expect("tracker mutex poisoned");
            if state.reachable == reachable {
                return false;
            }
            state.reachable = reachable;
            state.subscribers.iter().map(|(_, cb)| cb.clone()).collect()
        };
        crate::observability::CONNECTION_FLIPS.click();
        for callback in callbacks {
            callback(reachable);
        }
        true
    }

    /// Registers a callback invoked on every state flip.
    ///
    /// The returned handle de-registers the callback when dropped or when
    /// [`ConnectionSubscription::unsubscribe`] is called, so it must be kept
    /// alive for as long as notifications are wanted. No ordering guarantee
    /// exists between subscribers.
    pub fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn(bool) + Send + Sync + 'static,
    ) -> ConnectionSubscription {
        let id = {
            let mut state = self.state.lock().expect("tracker mutex poisoned");
            let id = state.next_id;
            state.next_id += 1;
            state.subscribers.push((id, Arc::new(callback)));
            id
        };
        ConnectionSubscription {
            id,
            tracker: Arc::downgrade(self),
        }
    }

    fn remove(&self, id: u64) {
        let mut state = self.state.lock().expect("tracker mutex poisoned");
        state.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.state
            .lock()
            .expect("tracker mutex poisoned")
            .subscribers
            .len()
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().expect("tracker mutex poisoned");
        f.debug_struct("ConnectionTracker")
            .field("reachable", &state.reachable)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

/// De-registration handle for a connection-change callback.
pub struct ConnectionSubscription {
    id: u64,
    tracker: Weak<ConnectionTracker>,
}

impl ConnectionSubscription {
    /// Removes the callback from the tracker.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for ConnectionSubscription {
    fn drop(&mut self) {
        if let Some(tracker) = self.tracker.upgrade() {
            tracker.remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn starts_reachable() {
        let tracker = ConnectionTracker::new();
        assert!(tracker.is_reachable());
    }

    #[test]
    fn redundant_transitions_notify_nobody() {
        let tracker = Arc::new(ConnectionTracker::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let _sub = tracker.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!tracker.set_reachable(true));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(tracker.set_reachable(false));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(!tracker.set_reachable(false));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(tracker.set_reachable(true));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn multiple_subscribers_each_invoked_once_per_flip() {
        let tracker = Arc::new(ConnectionTracker::new());
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let first_clone = first.clone();
        let _a = tracker.subscribe(move |reachable| {
            assert!(!reachable);
            first_clone.fetch_add(1, Ordering::SeqCst);
        });
        let second_clone = second.clone();
        let _b = tracker.subscribe(move |reachable| {
            assert!(!reachable);
            second_clone.fetch_add(1, Ordering::SeqCst);
        });

        tracker.set_reachable(false);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let tracker = Arc::new(ConnectionTracker::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let sub = tracker.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(tracker.subscriber_count(), 1);

        sub.unsubscribe();
        assert_eq!(tracker.subscriber_count(), 0);

        tracker.set_reachable(false);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn subscriber_can_query_tracker_reentrantly() {
        let tracker = Arc::new(ConnectionTracker::new());
        let observed = Arc::new(AtomicUsize::new(usize::MAX));
        let tracker_clone = tracker.clone();
        let observed_clone = observed.clone();
        let _sub = tracker.subscribe(move |_| {
            observed_clone.store(tracker_clone.is_reachable() as usize, Ordering::SeqCst);
        });

        tracker.set_reachable(false);
        assert_eq!(observed.load(Ordering::SeqCst), 0);
    }
}
