use super::geometry::DisplayGeometry;
use super::keys::NamedKey;

/// Number of pointer button slots (primary, secondary, middle, extra1, extra2)
pub const BUTTON_SLOTS: usize = 5;

/// Slot index -> egui button; remote button ids are slot + 1
const BUTTON_ORDER: [egui::PointerButton; BUTTON_SLOTS] = [
    egui::PointerButton::Primary,
    egui::PointerButton::Secondary,
    egui::PointerButton::Middle,
    egui::PointerButton::Extra1,
    egui::PointerButton::Extra2,
];

/// Modifier keys held during an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierFlags {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub super_key: bool,
}

impl ModifierFlags {
    /// Build flags from remote modifier names (`Shift`, `Control`, `Alt`, `Meta`)
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let held = |wanted: &str| names.iter().any(|name| name.as_ref() == wanted);
        Self {
            shift: held("Shift"),
            control: held("Control"),
            alt: held("Alt"),
            super_key: held("Meta"),
        }
    }

    pub fn to_egui(self) -> egui::Modifiers {
        egui::Modifiers {
            alt: self.alt,
            ctrl: self.control,
            shift: self.shift,
            // egui has no generic super modifier; Meta is the Mac command key
            mac_cmd: self.super_key,
            command: self.control,
        }
    }
}

/// Input state mirrored from the remote client
///
/// Pointer coordinates are logical pixels, the same unit egui calls points.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    pointer: Option<(f32, f32)>,
    buttons_down: [bool; BUTTON_SLOTS],
    keys_down: [bool; NamedKey::COUNT],
    modifiers: ModifierFlags,
    delta_time: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pointer: None,
            buttons_down: [false; BUTTON_SLOTS],
            keys_down: [false; NamedKey::COUNT],
            modifiers: ModifierFlags::default(),
            delta_time: 0.0,
        }
    }

    /// Current pointer position, if the pointer has been seen
    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.pointer
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some((x, y));
    }

    /// Replace the pressed-button set with the given 1-based button ids
    ///
    /// Ids outside `1..=BUTTON_SLOTS` are ignored.
    pub fn set_buttons(&mut self, ids: &[u32]) {
        self.buttons_down = [false; BUTTON_SLOTS];
        for &id in ids {
            match (id as usize).checked_sub(1) {
                Some(slot) if slot < BUTTON_SLOTS => self.buttons_down[slot] = true,
                _ => log::debug!("Ignoring pointer button id {}", id),
            }
        }
    }

    pub fn is_button_down(&self, slot: usize) -> bool {
        self.buttons_down.get(slot).copied().unwrap_or(false)
    }

    /// Pressed button slots (0-based)
    pub fn pressed_buttons(&self) -> Vec<usize> {
        (0..BUTTON_SLOTS).filter(|&slot| self.buttons_down[slot]).collect()
    }

    pub fn set_key(&mut self, key: NamedKey, pressed: bool) {
        self.keys_down[key.slot()] = pressed;
    }

    pub fn is_key_down(&self, key: NamedKey) -> bool {
        self.keys_down[key.slot()]
    }

    /// Pressed keys in slot order
    pub fn pressed_keys(&self) -> Vec<NamedKey> {
        NamedKey::all().filter(|&key| self.is_key_down(key)).collect()
    }

    pub fn modifiers(&self) -> ModifierFlags {
        self.modifiers
    }

    pub fn set_modifiers(&mut self, modifiers: ModifierFlags) {
        self.modifiers = modifiers;
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn set_delta_time(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts level-triggered `InputState` into egui's edge-triggered events
///
/// Remembers what was last handed to egui and emits only the transitions
/// since then.
#[derive(Debug, Clone, Default)]
pub struct RawInputBuilder {
    submitted: InputState,
}

impl RawInputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the raw input for one frame
    pub fn build(
        &mut self,
        state: &InputState,
        geometry: &DisplayGeometry,
        time: f64,
        max_texture_side: usize,
    ) -> egui::RawInput {
        let modifiers = state.modifiers().to_egui();
        let events = self.transitions(state, modifiers);

        let (width, height) = geometry.logical_size();
        let mut raw_input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(width, height),
            )),
            max_texture_side: Some(max_texture_side),
            time: Some(time),
            predicted_dt: state.delta_time(),
            modifiers,
            events,
            focused: true,
            ..Default::default()
        };
        raw_input
            .viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(geometry.pixel_ratio);

        self.submitted = state.clone();
        raw_input
    }

    /// Events that take egui from the last submitted state to `state`
    pub fn transitions(&self, state: &InputState, modifiers: egui::Modifiers) -> Vec<egui::Event> {
        let mut events = Vec::new();
        let previous = &self.submitted;

        if state.pointer() != previous.pointer() {
            match state.pointer() {
                Some((x, y)) => events.push(egui::Event::PointerMoved(egui::pos2(x, y))),
                None => events.push(egui::Event::PointerGone),
            }
        }

        let (x, y) = state.pointer().unwrap_or((0.0, 0.0));
        for (slot, &button) in BUTTON_ORDER.iter().enumerate() {
            let pressed = state.is_button_down(slot);
            if pressed != previous.is_button_down(slot) {
                events.push(egui::Event::PointerButton {
                    pos: egui::pos2(x, y),
                    button,
                    pressed,
                    modifiers,
                });
            }
        }

        for key in NamedKey::all() {
            let pressed = state.is_key_down(key);
            if pressed != previous.is_key_down(key) {
                events.push(egui::Event::Key {
                    key: key.to_egui(),
                    physical_key: None,
                    pressed,
                    repeat: false,
                    modifiers,
                });
            }
        }

        events
    }
}
