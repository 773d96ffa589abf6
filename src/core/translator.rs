//! Remote event -> input state transitions.
//!
//! Each event is a self-contained transition over [`InputState`]; the only
//! effect that reaches beyond input state is a resize, which is handed back to
//! the caller as a new [`DisplayGeometry`] to apply.

use super::event::{KeyEvent, PointerButtonEvent, RemoteEvent, ResizeEvent};
use super::geometry::{sanitize_ratio, DisplayGeometry};
use super::input::{InputState, ModifierFlags};
use super::keys::NamedKey;

/// What the caller must do after an event was applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Event kind not handled; nothing changed
    Ignored,
    /// Input state changed; schedule a redraw
    Redraw,
    /// Display geometry must be replaced, then redraw
    Resize {
        geometry: DisplayGeometry,
        /// Ratio the client reported, before any override
        reported_ratio: Option<f32>,
    },
}

impl Transition {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, Transition::Ignored)
    }
}

/// Override first, then the reported ratio, then 1.0
pub fn resolve_pixel_ratio(ratio_override: Option<f32>, reported: Option<f32>) -> f32 {
    sanitize_ratio(ratio_override.or(reported).unwrap_or(1.0))
}

/// Apply one remote event to `state`
pub fn translate(
    state: &mut InputState,
    event: &RemoteEvent,
    ratio_override: Option<f32>,
) -> Transition {
    match event {
        RemoteEvent::Resize(resize) => resize_transition(resize, ratio_override),
        RemoteEvent::PointerMove(moved) => {
            state.set_pointer(moved.x, moved.y);
            Transition::Redraw
        }
        RemoteEvent::PointerDown(button) | RemoteEvent::PointerUp(button) => {
            apply_pointer_button(state, button);
            Transition::Redraw
        }
        RemoteEvent::Key(key) => {
            apply_key(state, key);
            Transition::Redraw
        }
        RemoteEvent::Unknown => Transition::Ignored,
    }
}

fn resize_transition(resize: &ResizeEvent, ratio_override: Option<f32>) -> Transition {
    let ratio = resolve_pixel_ratio(ratio_override, resize.pixel_ratio);
    Transition::Resize {
        geometry: DisplayGeometry::new(resize.width, resize.height, ratio),
        reported_ratio: resize.pixel_ratio,
    }
}

fn apply_pointer_button(state: &mut InputState, event: &PointerButtonEvent) {
    let (x, y) = event.position();
    if x >= 0.0 && y >= 0.0 {
        state.set_pointer(x, y);
    } else {
        log::debug!("Ignoring negative pointer position ({}, {})", x, y);
    }

    if let Some(buttons) = &event.buttons {
        state.set_buttons(buttons);
    }
}

fn apply_key(state: &mut InputState, event: &KeyEvent) {
    match NamedKey::from_name(&event.key) {
        Some(key) => state.set_key(key, event.pressed),
        None => log::debug!("Unmapped key {:?}", event.key),
    }
    state.set_modifiers(ModifierFlags::from_names(&event.modifiers));
}
