//! Synchronous fan-out of session changes to registered observers.
//!
//! Observers run in registration order on the thread that changed the
//! session. `notify` iterates over a snapshot of the list taken before the
//! first observer runs, so an observer that unsubscribes itself (or a
//! sibling) mid-broadcast does not disturb the broadcast in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entries<T> {
    next_id: u64,
    observers: Vec<(u64, Observer<T>)>,
}

/// Removes an observer by id. Lets `Subscription` stay non-generic.
trait Detach: Send + Sync {
    fn detach(&self, id: u64) -> bool;
}

impl<T> Detach for Mutex<Entries<T>> {
    fn detach(&self, id: u64) -> bool {
        let mut entries = self.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.observers.len();
        entries.observers.retain(|(entry_id, _)| *entry_id != id);
        entries.observers.len() != before
    }
}

pub struct ObserverList<T> {
    entries: Arc<Mutex<Entries<T>>>,
}

impl<T: 'static> ObserverList<T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Entries {
                next_id: 0,
                observers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries<T>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut entries = self.lock();
            let id = entries.next_id;
            entries.next_id += 1;
            entries.observers.push((id, Arc::new(observer)));
            id
        };

        let list: Arc<dyn Detach> = self.entries.clone();
        Subscription {
            id,
            list: Arc::downgrade(&list),
        }
    }

    /// Invoke every observer registered at the time of the call.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Observer<T>> = self
            .lock()
            .observers
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        for observer in snapshot {
            observer(value);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping it does NOT unsubscribe; call `unsubscribe` to detach.
#[must_use = "dropping a Subscription leaves the observer registered; keep it to unsubscribe later"]
pub struct Subscription {
    id: u64,
    list: Weak<dyn Detach>,
}

impl Subscription {
    /// Detach the observer. Returns false if it was already gone.
    pub fn unsubscribe(self) -> bool {
        match self.list.upgrade() {
            Some(list) => list.detach(self.id),
            None => false,
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
