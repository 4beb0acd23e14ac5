//! Per-instance listener lists
//!
//! Raising an event snapshots the registered listeners and calls each one
//! synchronously, in registration order, with no lock held. A listener may
//! therefore subscribe or unsubscribe from inside a callback; the change takes
//! effect on the next raise.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Handle returned by a subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Ordered list of listeners of one callback type
pub(crate) struct Listeners<F: ?Sized> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(ListenerId, Arc<F>)>>,
}

impl<F: ?Sized> Listeners<F> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Append listener; it runs after every listener added before it
    pub(crate) fn add(&self, listener: Arc<F>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries.lock().push((id, listener));
        id
    }

    /// Remove listener; returns false if `id` was not registered
    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(existing, _)| *existing != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Current listeners in registration order
    pub(crate) fn snapshot(&self) -> Vec<Arc<F>> {
        self.entries
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

impl<F: ?Sized> fmt::Debug for Listeners<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Callback = dyn Fn(&mut Vec<u32>) + Send + Sync;

    #[test]
    fn snapshot_keeps_registration_order() {
        let listeners: Listeners<Callback> = Listeners::new();
        listeners.add(Arc::new(|log: &mut Vec<u32>| log.push(1)));
        listeners.add(Arc::new(|log: &mut Vec<u32>| log.push(2)));
        listeners.add(Arc::new(|log: &mut Vec<u32>| log.push(3)));

        let mut log = Vec::new();
        for listener in listeners.snapshot() {
            listener(&mut log);
        }
        assert_eq!(log, vec![1, 2, 3]);
    }

    #[test]
    fn remove_by_id() {
        let listeners: Listeners<Callback> = Listeners::new();
        let first = listeners.add(Arc::new(|log: &mut Vec<u32>| log.push(1)));
        let second = listeners.add(Arc::new(|log: &mut Vec<u32>| log.push(2)));
        assert_ne!(first, second);

        assert!(listeners.remove(first));
        assert!(!listeners.remove(first));
        assert_eq!(listeners.len(), 1);

        let mut log = Vec::new();
        for listener in listeners.snapshot() {
            listener(&mut log);
        }
        assert_eq!(log, vec![2]);
    }

    #[test]
    fn debug_shows_count() {
        let listeners: Listeners<Callback> = Listeners::new();
        listeners.add(Arc::new(|_: &mut Vec<u32>| {}));
        assert!(format!("{listeners:?}").contains("count: 1"));
    }
}
