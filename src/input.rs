use std::collections::HashSet;

use flickergrid::InputKey;
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};

/// Collects key presses between frames. Held keys are reported once, so OS
/// auto-repeat does not scroll the menu.
pub struct InputHandler {
    held_keys: HashSet<VirtualKeyCode>,
    pressed: Vec<InputKey>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held_keys: HashSet::new(),
            pressed: Vec::new(),
        }
    }

    pub fn handle_keyboard_input(&mut self, input: &KeyboardInput) {
        if let Some(key_code) = input.virtual_keycode {
            self.handle_key(key_code, input.state);
        }
    }

    fn handle_key(&mut self, key_code: VirtualKeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.held_keys.insert(key_code) {
                    return;
                }
                if let Some(key) = map_key(key_code) {
                    self.pressed.push(key);
                }
            }
            ElementState::Released => {
                self.held_keys.remove(&key_code);
            }
        }
    }

    /// Keys pressed since the previous call, in press order.
    pub fn take_pressed(&mut self) -> Vec<InputKey> {
        std::mem::take(&mut self.pressed)
    }
}

fn map_key(key_code: VirtualKeyCode) -> Option<InputKey> {
    match key_code {
        VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => Some(InputKey::Confirm),
        VirtualKeyCode::Left => Some(InputKey::Left),
        VirtualKeyCode::Up => Some(InputKey::Up),
        VirtualKeyCode::Right => Some(InputKey::Right),
        VirtualKeyCode::Down => Some(InputKey::Down),
        VirtualKeyCode::Escape => Some(InputKey::Escape),
        VirtualKeyCode::P => Some(InputKey::Pause),
        _ => None,
    }
}
