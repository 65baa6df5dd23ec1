//! Explicitly-constructed state containers.
//!
//! A [`Store`] holds an immutable snapshot behind an `ArcSwap`. Actions compute
//! a new snapshot from the old one; readers never block and never observe a
//! half-applied action. Subscribers are woken through a `watch` revision
//! counter after every committed action.

pub mod auth;
pub mod lgpd;
pub mod ui;

pub use auth::{AuthState, AuthStore};
pub use lgpd::{LgpdState, LgpdStore};
pub use ui::{AlertId, AlertMessage, ModalState, Theme, UiState, UiStore};

use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

pub struct Store<S> {
    state: Arc<ArcSwap<S>>,
    revision: Arc<watch::Sender<u64>>,
    write_lock: Arc<Mutex<()>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            revision: Arc::clone(&self.revision),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<S> Store<S> {
    pub fn new(initial: S) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Arc::new(ArcSwap::from_pointee(initial)),
            revision: Arc::new(revision),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current snapshot. Lock-free.
    pub fn snapshot(&self) -> Arc<S> {
        self.state.load_full()
    }

    /// Applies `action` to the current snapshot and commits the result.
    ///
    /// `action` may run more than once under contention, so it must be pure.
    /// Returns the snapshot that was committed.
    pub fn update<F>(&self, action: F) -> Arc<S>
    where
        F: Fn(&S) -> S,
    {
        self.commit(action).1
    }

    /// Like [`Store::update`], then calls `persist(previous, committed)`.
    ///
    /// Calls through `update_then` are serialized on one lock that covers both
    /// the commit and `persist`, so side effects (storage writes) happen in
    /// commit order and the last write always matches the live snapshot.
    pub fn update_then<F, P>(&self, action: F, persist: P) -> Arc<S>
    where
        F: Fn(&S) -> S,
        P: FnOnce(&S, &S),
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (previous, committed) = self.commit(action);
        persist(&previous, &committed);
        committed
    }

    fn commit<F>(&self, action: F) -> (Arc<S>, Arc<S>)
    where
        F: Fn(&S) -> S,
    {
        let mut attempt = None;
        let previous = self.state.rcu(|current| {
            let next = Arc::new(action(current));
            attempt = Some(Arc::clone(&next));
            next
        });
        self.bump();
        let committed = attempt.unwrap_or_else(|| self.snapshot());
        (previous, committed)
    }

    /// Replaces the whole snapshot.
    pub fn replace(&self, next: S) {
        self.state.store(Arc::new(next));
        self.bump();
    }

    /// Receiver whose value is the revision of the latest committed action.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}
