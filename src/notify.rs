//! Score change notifications: an in-process, synchronous fan-out.
//!
//! Create one [`ScoreNotifier`] at startup, hand it (by reference or `Arc`) to whatever records
//! scores and whatever wants to hear about it, and call [`ScoreNotifier::shutdown`] on the way
//! out. Delivery is best effort and at most once: nothing is queued, retried or kept for
//! subscribers that register later. Listeners should re-fetch the scores they care about rather
//! than trust the event as a record.

use crate::models::{AthleteId, CompetitionGroupId, Discipline};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// "Scores for these athletes changed."
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreChangeEvent {
    pub competition_group_id: CompetitionGroupId,
    pub discipline: Discipline,
    pub athlete_ids: BTreeSet<AthleteId>,
    pub timestamp: DateTime<Utc>,
}

impl ScoreChangeEvent {
    /// Event stamped with the current time.
    pub fn new(
        competition_group_id: CompetitionGroupId,
        discipline: Discipline,
        athlete_ids: impl IntoIterator<Item = AthleteId>,
    ) -> Self {
        Self {
            competition_group_id,
            discipline,
            athlete_ids: athlete_ids.into_iter().collect(),
            timestamp: Utc::now(),
        }
    }
}

/// Handle returned by [`ScoreNotifier::subscribe`].
pub type SubscriberId = u64;

type Subscriber = Arc<dyn Fn(&ScoreChangeEvent) + Send + Sync>;

pub struct ScoreNotifier {
    /// Registration order is delivery order.
    subscribers: RwLock<Vec<(SubscriberId, Subscriber)>>,
    next_id: AtomicU64,
    shut_down: AtomicBool,
}

impl Default for ScoreNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreNotifier {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            shut_down: AtomicBool::new(false),
        }
    }

    // Subscribers never run under the lock, so a poisoned lock still holds a consistent list.
    fn read(&self) -> RwLockReadGuard<'_, Vec<(SubscriberId, Subscriber)>> {
        self.subscribers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<(SubscriberId, Subscriber)>> {
        self.subscribers.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a listener. After shutdown the listener is dropped and never called.
    pub fn subscribe<F>(&self, f: F) -> SubscriberId
    where
        F: Fn(&ScoreChangeEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut subs = self.write();
        // Checked under the lock so a concurrent shutdown cannot miss this entry.
        if self.is_shut_down() {
            log::warn!("Subscriber {} registered after shutdown; ignoring", id);
            return id;
        }
        subs.push((id, Arc::new(f)));
        id
    }

    fn is_registered(&self, id: SubscriberId) -> bool {
        self.read().iter().any(|(sid, _)| *sid == id)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subs = self.write();
        let before = subs.len();
        subs.retain(|(sid, _)| *sid != id);
        subs.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.read().len()
    }

    /// Deliver to every current subscriber, in registration order, on the calling thread.
    ///
    /// A subscriber that panics is logged and skipped; the rest still get the event. Subscribers
    /// may subscribe or unsubscribe from inside the callback: one removed mid-emit is not called
    /// for the rest of it, and one added mid-emit first hears the next event. Returns how many
    /// subscribers handled the event without panicking.
    pub fn emit(&self, event: &ScoreChangeEvent) -> usize {
        if self.is_shut_down() {
            return 0;
        }
        let snapshot: Vec<(SubscriberId, Subscriber)> = self.read().clone();
        let mut delivered = 0;
        for (id, sub) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            match panic::catch_unwind(AssertUnwindSafe(|| sub(event))) {
                Ok(()) => delivered += 1,
                Err(_) => log::warn!(
                    "Score change subscriber {} panicked on {} event for group {}",
                    id,
                    event.discipline,
                    event.competition_group_id
                ),
            }
        }
        delivered
    }

    /// Drop all subscribers and stop delivering. Idempotent.
    pub fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }
        let dropped = {
            let mut subs = self.write();
            let n = subs.len();
            subs.clear();
            n
        };
        log::info!("Score notifier shut down ({} subscriber(s) dropped)", dropped);
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsubscribe_unknown_id_is_false() {
        let n = ScoreNotifier::new();
        let id = n.subscribe(|_| {});
        assert!(n.unsubscribe(id));
        assert!(!n.unsubscribe(id));
        assert_eq!(n.subscriber_count(), 0);
    }
}
