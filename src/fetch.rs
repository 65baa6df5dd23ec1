//! Dependency-driven data fetching.
//!
//! [`DataFetch`] runs a fetch closure whenever its dependency value changes and
//! publishes `{data, error, loading}` on a `watch` channel. Every run gets a
//! sequence number; starting a run aborts the previous one, and a result whose
//! sequence number is no longer the latest is dropped. The last request
//! *issued* therefore always wins, whatever order responses arrive in.
//! A run that panics settles with [`ApiError::Panicked`].

use crate::error::ApiError;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub error: Option<Arc<ApiError>>,
    pub loading: bool,
}

impl<T: Clone> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            loading: self.loading,
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: true,
        }
    }
}

type FetchFn<T, D> = Arc<dyn Fn(D) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// Must be created inside a tokio runtime; runs are spawned as tasks.
pub struct DataFetch<T, D> {
    fetch: FetchFn<T, D>,
    deps: D,
    state: Arc<watch::Sender<FetchState<T>>>,
    latest: Arc<AtomicU64>,
    in_flight: Option<JoinHandle<()>>,
}

impl<T, D> DataFetch<T, D>
where
    T: Clone + Send + Sync + 'static,
    D: Clone + PartialEq + Send + 'static,
{
    /// Creates the subscription and immediately starts the first run.
    pub fn start<F, Fut>(deps: D, fetch: F) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (state, _) = watch::channel(FetchState::default());
        let mut this = Self {
            fetch: Arc::new(move |deps| fetch(deps).boxed()),
            deps,
            state: Arc::new(state),
            latest: Arc::new(AtomicU64::new(0)),
            in_flight: None,
        };
        this.run();
        this
    }

    /// Re-runs the fetch if `deps` differs from the current value.
    /// Returns whether a run was started.
    pub fn set_deps(&mut self, deps: D) -> bool {
        if deps == self.deps {
            return false;
        }
        self.deps = deps;
        self.run();
        true
    }

    pub fn refetch(&mut self) {
        self.run();
    }

    pub fn deps(&self) -> &D {
        &self.deps
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// Waits until the latest run has settled and returns its state.
    pub async fn settled(&self) -> FetchState<T> {
        let mut rx = self.subscribe();
        match rx.wait_for(|s| !s.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    fn run(&mut self) {
        let seq = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        self.state.send_modify(|s| s.loading = true);

        let request = (self.fetch)(self.deps.clone());
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.latest);

        self.in_flight = Some(tokio::spawn(async move {
            let result = match AssertUnwindSafe(request).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => Err(ApiError::Panicked(panic_message(payload.as_ref()))),
            };
            state.send_if_modified(|current| {
                if latest.load(Ordering::Acquire) != seq {
                    tracing::debug!(seq, "discarding stale fetch result");
                    return false;
                }
                *current = match result {
                    Ok(data) => FetchState {
                        data: Some(data),
                        error: None,
                        loading: false,
                    },
                    Err(err) => FetchState {
                        data: None,
                        error: Some(Arc::new(err)),
                        loading: false,
                    },
                };
                true
            });
        }));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl<T, D> Drop for DataFetch<T, D> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
