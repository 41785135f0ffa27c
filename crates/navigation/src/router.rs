use std::sync::{Arc, Mutex, MutexGuard};

/// The path-switching collaborator the controller drives.
pub trait Router: Send + Sync {
    fn active_path(&self) -> String;

    /// Fire-and-forget; the active path is expected to reflect `path` by the
    /// time the next event is handled.
    fn navigate(&self, path: &str);
}

#[derive(Debug, Default)]
struct RouterState {
    active: String,
    history: Vec<String>,
}

/// Shared in-process router; clones observe the same active path.
#[derive(Debug, Clone, Default)]
pub struct MemoryRouter {
    state: Arc<Mutex<RouterState>>,
}

impl MemoryRouter {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(RouterState {
                active: initial_path.into(),
                history: Vec::new(),
            })),
        }
    }

    /// Every path passed to `navigate`, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, RouterState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Router for MemoryRouter {
    fn active_path(&self) -> String {
        self.lock().active.clone()
    }

    fn navigate(&self, path: &str) {
        let mut state = self.lock();
        state.active = path.to_string();
        state.history.push(path.to_string());
    }
}
