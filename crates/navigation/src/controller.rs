use std::time::Duration;

use tracing::debug;

use crate::{
    guard::TransitionGuard,
    input::{Direction, InputEvent, InputOutcome, MoveOutcome, NavKey},
    router::Router,
    sequence::SectionSequence,
    NavigationError,
};

pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct NavigationConfig {
    pub sequence: SectionSequence,
    pub cooldown: Duration,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sequence: SectionSequence::portfolio(),
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

/// Turns wheel and paging-key input into one-section moves on a [`Router`].
///
/// The current index is always read through the router, so navigation that
/// bypasses the controller (a nav link, a typed URL) is picked up on the next
/// event. Detaching, or dropping the controller, cancels any pending
/// cooldown.
pub struct NavigationController<R: Router> {
    router: R,
    sequence: SectionSequence,
    guard: TransitionGuard,
    attached: bool,
}

impl<R: Router> NavigationController<R> {
    /// Must be called from within a tokio runtime; the cooldown timer is
    /// spawned on it.
    pub fn attach(router: R, config: NavigationConfig) -> Result<Self, NavigationError> {
        let guard = TransitionGuard::new(config.cooldown)?;
        debug!(
            sections = config.sequence.len(),
            cooldown_ms = config.cooldown.as_millis() as u64,
            "navigation controller attached"
        );
        Ok(Self {
            router,
            sequence: config.sequence,
            guard,
            attached: true,
        })
    }

    pub fn detach(&mut self) {
        if self.attached {
            self.attached = false;
            self.guard.cancel();
            debug!("navigation controller detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn current_index(&self) -> Option<usize> {
        self.sequence.index_of(&self.router.active_path())
    }

    pub fn total_sections(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_transitioning(&self) -> bool {
        self.guard.is_transitioning()
    }

    pub fn has_pending_cooldown(&self) -> bool {
        self.guard.has_pending_cooldown()
    }

    pub fn sequence(&self) -> &SectionSequence {
        &self.sequence
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        match event {
            InputEvent::Wheel { delta_y } => self.handle_wheel(delta_y),
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    /// Boundary scrolls keep their default behaviour so the page is never
    /// trapped at the first or last section.
    pub fn handle_wheel(&mut self, delta_y: f64) -> InputOutcome {
        if !self.attached {
            return InputOutcome::passthrough();
        }
        if self.guard.is_transitioning() {
            return InputOutcome {
                prevent_default: true,
                result: Some(MoveOutcome::Transitioning),
            };
        }

        let Some(direction) = (InputEvent::Wheel { delta_y }).direction() else {
            return InputOutcome::passthrough();
        };
        if self.target_index(direction).is_none() {
            return InputOutcome::passthrough();
        }

        InputOutcome {
            prevent_default: true,
            result: Some(self.request_move(direction)),
        }
    }

    /// Paging keys are always swallowed, even when the move itself is a
    /// boundary no-op.
    pub fn handle_key(&mut self, key: NavKey) -> InputOutcome {
        if !self.attached {
            return InputOutcome::passthrough();
        }
        let Some(direction) = key.direction() else {
            return InputOutcome::passthrough();
        };

        InputOutcome {
            prevent_default: true,
            result: Some(self.request_move(direction)),
        }
    }

    pub fn request_move(&mut self, direction: Direction) -> MoveOutcome {
        if !self.attached {
            return MoveOutcome::Detached;
        }
        if self.guard.is_transitioning() {
            debug!(?direction, "move ignored while transitioning");
            return MoveOutcome::Transitioning;
        }
        match self.target_index(direction) {
            Some(target) => self.move_to(target),
            None => {
                debug!(?direction, "move ignored at sequence boundary");
                MoveOutcome::OutOfBounds
            }
        }
    }

    /// Jumps straight to `index` under the same guard rules as a step.
    pub fn scroll_to(&mut self, index: usize) -> MoveOutcome {
        if !self.attached {
            return MoveOutcome::Detached;
        }
        if self.guard.is_transitioning() {
            return MoveOutcome::Transitioning;
        }
        if index >= self.sequence.len() {
            return MoveOutcome::OutOfBounds;
        }
        self.move_to(index)
    }

    // A path outside the sequence counts as index -1, so stepping forward
    // from a not-found page lands on the first section.
    fn target_index(&self, direction: Direction) -> Option<usize> {
        let current = self
            .current_index()
            .map(|index| index as isize)
            .unwrap_or(-1);
        let target = current + direction.step();
        if target < 0 || target as usize >= self.sequence.len() {
            None
        } else {
            Some(target as usize)
        }
    }

    fn move_to(&mut self, target: usize) -> MoveOutcome {
        let Some(path) = self.sequence.path_at(target).map(str::to_owned) else {
            return MoveOutcome::OutOfBounds;
        };
        let from = self.current_index();
        if !self.guard.try_begin() {
            return MoveOutcome::Transitioning;
        }
        debug!(?from, to = target, %path, "navigating to section");
        self.router.navigate(&path);
        MoveOutcome::Moved { from, to: target }
    }
}

impl<R: Router> Drop for NavigationController<R> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
