use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use tokio::sync::watch;

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// One-shot delayed callback that can be cancelled.
///
/// The callback runs at most once, and never once [`DismissTimer::cancel`]
/// has returned `true`. Dropping the timer cancels it.
pub struct DismissTimer {
    phase: Arc<AtomicU8>,
    cancel: watch::Sender<bool>,
}

impl DismissTimer {
    /// Arms the timer on the current tokio runtime. The deadline is fixed now,
    /// not when the background task is first polled.
    pub fn schedule<F>(delay: Duration, on_fire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let phase = Arc::new(AtomicU8::new(PENDING));
        let (cancel, mut cancelled) = watch::channel(false);
        let deadline = tokio::time::sleep(delay);
        let task_phase = Arc::clone(&phase);

        tokio::spawn(async move {
            tokio::select! {
                () = deadline => {
                    if task_phase
                        .compare_exchange(PENDING, FIRED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        on_fire();
                    }
                }
                _ = cancelled.changed() => {}
            }
        });

        Self { phase, cancel }
    }

    /// Returns `true` if this call prevented the callback from running.
    pub fn cancel(&self) -> bool {
        let prevented = self
            .phase
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        let _ = self.cancel.send(true);
        prevented
    }

    pub fn is_pending(&self) -> bool {
        self.phase.load(Ordering::Acquire) == PENDING
    }

    pub fn has_fired(&self) -> bool {
        self.phase.load(Ordering::Acquire) == FIRED
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
