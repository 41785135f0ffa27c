use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::debug;

use crate::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Idle,
    Transitioning,
}

/// At most one transition at a time, released by a single-slot cooldown timer.
pub struct TransitionGuard {
    runtime: Handle,
    cooldown: Duration,
    transitioning: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl TransitionGuard {
    pub fn new(cooldown: Duration) -> Result<Self, NavigationError> {
        let runtime = Handle::try_current().map_err(|_| NavigationError::NoRuntime)?;
        Ok(Self {
            runtime,
            cooldown,
            transitioning: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        })
    }

    pub fn state(&self) -> GuardState {
        if self.transitioning.load(Ordering::Acquire) {
            GuardState::Transitioning
        } else {
            GuardState::Idle
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.state() == GuardState::Transitioning
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn has_pending_cooldown(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Enters `Transitioning` and (re)arms the cooldown. Returns `false` when
    /// a transition is already in flight.
    pub fn try_begin(&mut self) -> bool {
        if self
            .transitioning
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        self.cancel();
        let generation = self.generation.load(Ordering::Acquire);
        let transitioning = Arc::clone(&self.transitioning);
        let current_generation = Arc::clone(&self.generation);
        let cooldown = self.cooldown;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(cooldown).await;
            // Stale once cancelled or superseded.
            if current_generation.load(Ordering::Acquire) == generation {
                transitioning.store(false, Ordering::Release);
                debug!(generation, "navigation cooldown elapsed");
            }
        }));
        true
    }

    /// Drops the pending cooldown without touching the guard state. A timer
    /// already past its sleep sees the bumped generation and does nothing.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for TransitionGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}
