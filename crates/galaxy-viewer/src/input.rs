//! Keyboard handling for the viewer.

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Key that toggles fullscreen.
pub const FULLSCREEN_KEY: KeyCode = KeyCode::KeyF;

/// Edge-triggered switch: fires once per press, ignores repeats while the key
/// is held and re-arms on release.
#[derive(Debug, Clone, Copy)]
pub struct ToggleLatch {
    armed: bool,
}

impl Default for ToggleLatch {
    fn default() -> Self {
        Self { armed: true }
    }
}

impl ToggleLatch {
    /// Returns `true` when this press should trigger the action.
    pub fn press(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    pub fn release(&mut self) {
        self.armed = true;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feeds one key transition; `true` means "toggle now".
    pub fn on_key(&mut self, state: ElementState, repeat: bool) -> bool {
        match state {
            ElementState::Pressed if repeat => false,
            ElementState::Pressed => self.press(),
            ElementState::Released => {
                self.release();
                false
            }
        }
    }
}

/// What the loop should do in response to a keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleFullscreen,
    Quit,
    None,
}

/// Keyboard state for the running loop.
#[derive(Debug, Default)]
pub struct Keyboard {
    fullscreen: ToggleLatch,
}

impl Keyboard {
    pub fn handle(&mut self, event: &KeyEvent) -> KeyAction {
        self.handle_key(event.physical_key, event.state, event.repeat)
    }

    pub fn handle_key(&mut self, key: PhysicalKey, state: ElementState, repeat: bool) -> KeyAction {
        match key {
            PhysicalKey::Code(FULLSCREEN_KEY) => {
                if self.fullscreen.on_key(state, repeat) {
                    KeyAction::ToggleFullscreen
                } else {
                    KeyAction::None
                }
            }
            PhysicalKey::Code(KeyCode::Escape) if state == ElementState::Pressed => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}
