#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub(crate) fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    PageDown,
    ArrowUp,
    PageUp,
    Other,
}

impl NavKey {
    /// Maps DOM-style key names; anything unrecognised is `Other`.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowDown" => NavKey::ArrowDown,
            "PageDown" => NavKey::PageDown,
            "ArrowUp" => NavKey::ArrowUp,
            "PageUp" => NavKey::PageUp,
            _ => NavKey::Other,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            NavKey::ArrowDown | NavKey::PageDown => Some(Direction::Forward),
            NavKey::ArrowUp | NavKey::PageUp => Some(Direction::Backward),
            NavKey::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Vertical wheel delta; positive scrolls towards later sections.
    Wheel { delta_y: f64 },
    Key(NavKey),
}

impl InputEvent {
    pub fn direction(&self) -> Option<Direction> {
        match *self {
            InputEvent::Wheel { delta_y } if delta_y > 0.0 => Some(Direction::Forward),
            InputEvent::Wheel { delta_y } if delta_y < 0.0 => Some(Direction::Backward),
            InputEvent::Wheel { .. } => None,
            InputEvent::Key(key) => key.direction(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Option<usize>, to: usize },
    Transitioning,
    OutOfBounds,
    Detached,
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// What happened to one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOutcome {
    /// The host should cancel the event's default scrolling.
    pub prevent_default: bool,
    /// `None` when the event carried no navigation intent.
    pub result: Option<MoveOutcome>,
}

impl InputOutcome {
    pub(crate) fn passthrough() -> Self {
        Self {
            prevent_default: false,
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_sign_selects_direction() {
        assert_eq!(
            InputEvent::Wheel { delta_y: 120.0 }.direction(),
            Some(Direction::Forward)
        );
        assert_eq!(
            InputEvent::Wheel { delta_y: -3.5 }.direction(),
            Some(Direction::Backward)
        );
        assert_eq!(InputEvent::Wheel { delta_y: 0.0 }.direction(), None);
    }

    #[test]
    fn only_paging_keys_carry_direction() {
        assert_eq!(
            NavKey::from_key_name("PageDown").direction(),
            Some(Direction::Forward)
        );
        assert_eq!(
            NavKey::from_key_name("ArrowUp").direction(),
            Some(Direction::Backward)
        );
        assert_eq!(NavKey::from_key_name("Enter"), NavKey::Other);
        assert_eq!(NavKey::Other.direction(), None);
    }
}
