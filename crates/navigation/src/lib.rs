//! Full-page scroll navigation: maps wheel and keyboard input onto moves
//! between a fixed sequence of sections, one move per cooldown window.

mod controller;
mod guard;
mod input;
mod router;
mod sequence;

pub use controller::{NavigationConfig, NavigationController, DEFAULT_COOLDOWN};
pub use guard::{GuardState, TransitionGuard};
pub use input::{Direction, InputEvent, InputOutcome, MoveOutcome, NavKey};
pub use router::{MemoryRouter, Router};
pub use sequence::{SectionSequence, SequenceError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigation controller must be attached inside a tokio runtime")]
    NoRuntime,
}
