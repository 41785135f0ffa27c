//! Translates egui input into navigation events.

use egui::{Event, Key};
use navigation::{InputEvent, NavKey};

pub fn nav_key(key: Key) -> NavKey {
    match key {
        Key::ArrowDown => NavKey::ArrowDown,
        Key::PageDown => NavKey::PageDown,
        Key::ArrowUp => NavKey::ArrowUp,
        Key::PageUp => NavKey::PageUp,
        _ => NavKey::Other,
    }
}

/// egui reports wheel-up as positive y; navigation expects positive to mean
/// "towards later sections".
pub fn wheel_event(raw_scroll_y: f32) -> Option<InputEvent> {
    (raw_scroll_y != 0.0).then(|| InputEvent::Wheel {
        delta_y: -f64::from(raw_scroll_y),
    })
}

/// Paging keys pressed this frame, in order.
pub fn pressed_nav_keys(events: &[Event]) -> Vec<Key> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Key {
                key, pressed: true, ..
            } if nav_key(*key) != NavKey::Other => Some(*key),
            _ => None,
        })
        .collect()
}

/// Drops `key`'s press and release so no widget scrolls on it.
pub fn suppress_key(events: &mut Vec<Event>, key: Key) {
    events.retain(|event| !matches!(event, Event::Key { key: k, .. } if *k == key));
}
