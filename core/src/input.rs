//! Platform-agnostic input events and key/button state tracking.
//!
//! Platform layers translate their native events into [`KeyEvent`],
//! [`MouseEvent`] and [`WheelEvent`] and feed them to an [`InputState`],
//! which records which keys and buttons are held and forwards each event to
//! an [`InputHandler`].

use std::collections::HashMap;

/// Physical keyboard key identifier.
///
/// Matches common physical key positions (US QWERTY layout names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Digits
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    // Arrows
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
}

impl KeyCode {
    /// Parse a physical key name as reported by browsers (`KeyboardEvent.code`),
    /// e.g. `"KeyA"`, `"Digit1"`, `"ArrowUp"`, `"ShiftLeft"`.
    pub fn from_code(code: &str) -> Option<Self> {
        if let Some(letter) = code.strip_prefix("Key") {
            return Self::letter(letter);
        }
        if let Some(digit) = code.strip_prefix("Digit") {
            return Self::digit(digit);
        }
        Some(match code {
            "ShiftLeft" => Self::ShiftLeft,
            "ShiftRight" => Self::ShiftRight,
            "ControlLeft" => Self::ControlLeft,
            "ControlRight" => Self::ControlRight,
            "AltLeft" => Self::AltLeft,
            "AltRight" => Self::AltRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Space" => Self::Space,
            "Enter" => Self::Enter,
            "Escape" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            _ => return None,
        })
    }

    fn letter(s: &str) -> Option<Self> {
        const LETTERS: [KeyCode; 26] = [
            KeyCode::A,
            KeyCode::B,
            KeyCode::C,
            KeyCode::D,
            KeyCode::E,
            KeyCode::F,
            KeyCode::G,
            KeyCode::H,
            KeyCode::I,
            KeyCode::J,
            KeyCode::K,
            KeyCode::L,
            KeyCode::M,
            KeyCode::N,
            KeyCode::O,
            KeyCode::P,
            KeyCode::Q,
            KeyCode::R,
            KeyCode::S,
            KeyCode::T,
            KeyCode::U,
            KeyCode::V,
            KeyCode::W,
            KeyCode::X,
            KeyCode::Y,
            KeyCode::Z,
        ];
        match s.as_bytes() {
            [c @ b'A'..=b'Z'] => Some(LETTERS[(c - b'A') as usize]),
            _ => None,
        }
    }

    fn digit(s: &str) -> Option<Self> {
        const DIGITS: [KeyCode; 10] = [
            KeyCode::Digit0,
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
            KeyCode::Digit9,
        ];
        match s.as_bytes() {
            [c @ b'0'..=b'9'] => Some(DIGITS[(c - b'0') as usize]),
            _ => None,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// Map a platform button index (0 left, 1 middle, 2 right, 3 back, 4 forward).
    pub fn from_index(index: u16) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            3 => Self::Back,
            4 => Self::Forward,
            other => Self::Other(other),
        }
    }
}

/// Whether a key or button went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementState {
    Pressed,
    Released,
}

/// Modifier keys held while an event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

/// A mouse move or button event, in surface-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub x: f32,
    pub y: f32,
    /// Movement since the previous mouse event.
    pub dx: f32,
    pub dy: f32,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

/// A wheel scroll, normalized to one step per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// -1, 0 or 1.
    pub dx: f32,
    /// -1, 0 or 1.
    pub dy: f32,
}

impl WheelEvent {
    /// Normalize raw wheel deltas (lines or pixels) to their sign.
    pub fn from_deltas(dx: f32, dy: f32) -> Self {
        Self {
            dx: crate::math::sign_or_zero(dx),
            dy: crate::math::sign_or_zero(dy),
        }
    }
}

/// Receives input events after [`InputState`] has updated its tables.
///
/// Every method defaults to doing nothing, so implementors only override
/// the events they care about.
pub trait InputHandler {
    fn on_key_down(&mut self, _event: &KeyEvent) {}
    fn on_key_up(&mut self, _event: &KeyEvent) {}
    fn on_mouse_move(&mut self, _event: &MouseEvent) {}
    fn on_mouse_button_down(&mut self, _event: &MouseEvent) {}
    fn on_mouse_button_up(&mut self, _event: &MouseEvent) {}
    fn on_wheel(&mut self, _event: &WheelEvent) {}
}

/// Handler that ignores everything; useful when only the state tables matter.
impl InputHandler for () {}

/// Tracks which keys and mouse buttons are currently held.
///
/// Keys and buttons that were never reported read as released.
#[derive(Debug, Default)]
pub struct InputState {
    keys: HashMap<KeyCode, ElementState>,
    buttons: HashMap<MouseButton, ElementState>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition, then forward it to `handler`.
    pub fn handle_key(
        &mut self,
        state: ElementState,
        event: &KeyEvent,
        handler: &mut dyn InputHandler,
    ) {
        self.keys.insert(event.code, state);
        match state {
            ElementState::Pressed => handler.on_key_down(event),
            ElementState::Released => handler.on_key_up(event),
        }
    }

    /// Record a button transition, then forward it to `handler`.
    pub fn handle_mouse_button(
        &mut self,
        state: ElementState,
        event: &MouseEvent,
        handler: &mut dyn InputHandler,
    ) {
        self.buttons.insert(event.button, state);
        match state {
            ElementState::Pressed => handler.on_mouse_button_down(event),
            ElementState::Released => handler.on_mouse_button_up(event),
        }
    }

    pub fn handle_mouse_move(&mut self, event: &MouseEvent, handler: &mut dyn InputHandler) {
        handler.on_mouse_move(event);
    }

    pub fn handle_wheel(&mut self, event: &WheelEvent, handler: &mut dyn InputHandler) {
        handler.on_wheel(event);
    }

    pub fn is_key_down(&self, code: KeyCode) -> bool {
        self.keys.get(&code) == Some(&ElementState::Pressed)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.get(&button) == Some(&ElementState::Pressed)
    }

    /// Forget every held key and button, e.g. when the surface loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }
}
