//! Single-owner, in-memory state container.
//!
//! A `Store` owns one value. Every mutation runs under the watch channel's
//! write lock, so readers only ever see whole states; each effective mutation
//! publishes a new immutable `Snapshot` stamped with the next `Revision`.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use log::*;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Revision(u64);

pub struct Snapshot<S> {
    revision: Revision,
    state: Arc<S>,
}

pub struct Store<S> {
    tx: Arc<watch::Sender<Snapshot<S>>>,
}

/// Receives a fresh `Snapshot` after each published mutation. Ends once
/// every handle to the originating `Store` has been dropped.
pub struct Subscription<S> {
    rx: watch::Receiver<Snapshot<S>>,
}

impl Revision {
    pub fn number(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Revision(self.0 + 1)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "r{}", self.0)
    }
}

impl<S> Snapshot<S> {
    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<S> Deref for Snapshot<S> {
    type Target = S;
    fn deref(&self) -> &S {
        &self.state
    }
}

impl<S> Clone for Snapshot<S> {
    fn clone(&self) -> Self {
        Snapshot {
            revision: self.revision,
            state: self.state.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Snapshot<S> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Snapshot")
            .field("revision", &self.revision)
            .field("state", &self.state)
            .finish()
    }
}

impl<S: Clone + fmt::Debug> Store<S> {
    pub fn new(initial: S) -> Self {
        let snapshot = Snapshot {
            revision: Revision::default(),
            state: Arc::new(initial),
        };
        let (tx, _) = watch::channel(snapshot);
        Store { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> Snapshot<S> {
        self.tx.borrow().clone()
    }

    pub fn read<R, F: FnOnce(&S) -> R>(&self, f: F) -> R {
        f(&self.tx.borrow().state)
    }

    /// Applies `f` to the current state. `f` reports whether it changed
    /// anything; only then is a new revision published to subscribers.
    pub fn update<F: FnOnce(&mut S) -> bool>(&self, f: F) -> bool {
        self.tx.send_if_modified(|snap| {
            let state = Arc::make_mut(&mut snap.state);
            if !f(state) {
                return false;
            }
            snap.revision = snap.revision.next();
            trace!("Published {}: {:?}", snap.revision, snap.state);
            true
        })
    }

    pub fn subscribe(&self) -> Subscription<S> {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        let tx = self.tx.clone();
        Store { tx }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Store")
            .field("current", &*self.tx.borrow())
            .finish()
    }
}

impl<S> Subscription<S> {
    pub fn current(&self) -> Snapshot<S> {
        self.rx.borrow().clone()
    }

    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Waits for the next published snapshot; `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<S>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct Tally {
        count: u32,
    }

    fn bump(store: &Store<Tally>) -> bool {
        store.update(|t| {
            t.count += 1;
            true
        })
    }

    #[test]
    fn starts_at_initial_revision() {
        let store = Store::new(Tally::default());

        let snap = store.snapshot();

        assert_eq!(snap.revision(), Revision::default());
        assert_eq!(snap.count, 0);
    }

    #[test]
    fn effective_update_bumps_revision() {
        let store = Store::new(Tally::default());

        assert!(bump(&store));
        assert!(bump(&store));

        let snap = store.snapshot();
        assert_eq!(snap.revision().number(), 2);
        assert_eq!(snap.count, 2);
    }

    #[test]
    fn declined_update_keeps_revision() {
        let store = Store::new(Tally::default());
        bump(&store);

        let changed = store.update(|_| false);

        assert!(!changed);
        assert_eq!(store.snapshot().revision().number(), 1);
    }

    #[test]
    fn snapshots_are_unaffected_by_later_updates() {
        let store = Store::new(Tally::default());
        bump(&store);
        let before = store.snapshot();

        bump(&store);

        assert_eq!(before.count, 1);
        assert_eq!(store.read(|t| t.count), 2);
    }

    #[test]
    fn clones_share_one_state() {
        let store = Store::new(Tally::default());
        let other = store.clone();

        bump(&other);

        assert_eq!(store.read(|t| t.count), 1);
    }

    #[tokio::test]
    async fn subscribers_see_published_snapshots() {
        let store = Store::new(Tally::default());
        let mut sub = store.subscribe();
        assert!(!sub.has_changed());

        bump(&store);
        assert!(sub.has_changed());

        let snap = sub.changed().await.expect("store still open");
        assert_eq!(snap.count, 1);
        assert_eq!(snap.revision().number(), 1);
        assert!(!sub.has_changed());
    }

    #[tokio::test]
    async fn declined_updates_are_not_published() {
        let store = Store::new(Tally::default());
        let sub = store.subscribe();

        store.update(|_| false);

        assert!(!sub.has_changed());
    }

    #[tokio::test]
    async fn subscription_ends_with_the_store() {
        let store = Store::new(Tally::default());
        let mut sub = store.subscribe();

        drop(store);

        assert!(sub.changed().await.is_none());
    }
}
