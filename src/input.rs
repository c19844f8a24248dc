//! Keyboard and mouse state polled once per frame.

use fnv::FnvHashSet;
use glam::Vec2;
use winit::event::{ElementState, VirtualKeyCode};

pub const FORWARD: VirtualKeyCode = VirtualKeyCode::W;
pub const BACK: VirtualKeyCode = VirtualKeyCode::S;
pub const LEFT: VirtualKeyCode = VirtualKeyCode::A;
pub const RIGHT: VirtualKeyCode = VirtualKeyCode::D;

/// `(decrement, increment)` for each component of the Julia constant.
pub const PARAMETER_KEYS: [(VirtualKeyCode, VirtualKeyCode); 4] = [
    (VirtualKeyCode::T, VirtualKeyCode::Y),
    (VirtualKeyCode::U, VirtualKeyCode::I),
    (VirtualKeyCode::O, VirtualKeyCode::P),
    (VirtualKeyCode::H, VirtualKeyCode::J),
];

/// Movement keys held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Movement {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

/// Parameter keys held during a frame, per component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Adjustment {
    pub decrement: bool,
    pub increment: bool,
}

#[derive(Debug, Default)]
pub struct Input {
    held: FnvHashSet<VirtualKeyCode>,
    mouse_delta: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&mut self, key: VirtualKeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.held.insert(key);
            }
            ElementState::Released => {
                self.held.remove(&key);
            }
        }
    }

    pub fn is_held(&self, key: VirtualKeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Accumulate raw pointer motion until the next frame drains it.
    pub fn mouse_motion(&mut self, dx: f64, dy: f64) {
        self.mouse_delta += Vec2::new(dx as f32, dy as f32);
    }

    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Forget everything. Key releases are not delivered to an unfocused window.
    pub fn reset(&mut self) {
        self.held.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    pub fn movement(&self) -> Movement {
        Movement {
            forward: self.is_held(FORWARD),
            back: self.is_held(BACK),
            left: self.is_held(LEFT),
            right: self.is_held(RIGHT),
        }
    }

    pub fn adjustments(&self) -> [Adjustment; 4] {
        PARAMETER_KEYS.map(|(decrement, increment)| Adjustment {
            decrement: self.is_held(decrement),
            increment: self.is_held(increment),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut input = Input::new();
        input.key(VirtualKeyCode::W, ElementState::Pressed);
        input.key(VirtualKeyCode::D, ElementState::Pressed);
        assert_eq!(
            input.movement(),
            Movement {
                forward: true,
                right: true,
                ..Movement::default()
            }
        );

        input.key(VirtualKeyCode::W, ElementState::Released);
        assert!(!input.is_held(VirtualKeyCode::W));
        assert!(input.is_held(VirtualKeyCode::D));
    }

    #[test]
    fn repeated_presses_need_one_release() {
        let mut input = Input::new();
        input.key(VirtualKeyCode::A, ElementState::Pressed);
        input.key(VirtualKeyCode::A, ElementState::Pressed);
        input.key(VirtualKeyCode::A, ElementState::Released);
        assert!(!input.is_held(VirtualKeyCode::A));
    }

    #[test]
    fn mouse_delta_accumulates_until_taken() {
        let mut input = Input::new();
        input.mouse_motion(3.0, -1.0);
        input.mouse_motion(2.0, 4.0);
        assert_eq!(input.take_mouse_delta(), Vec2::new(5.0, 3.0));
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn parameter_keys_map_to_channels() {
        let mut input = Input::new();
        input.key(VirtualKeyCode::Y, ElementState::Pressed);
        input.key(VirtualKeyCode::H, ElementState::Pressed);
        let adjustments = input.adjustments();
        assert!(adjustments[0].increment && !adjustments[0].decrement);
        assert_eq!(adjustments[1], Adjustment::default());
        assert_eq!(adjustments[2], Adjustment::default());
        assert!(adjustments[3].decrement && !adjustments[3].increment);
    }

    #[test]
    fn reset_clears_keys_and_motion() {
        let mut input = Input::new();
        input.key(VirtualKeyCode::S, ElementState::Pressed);
        input.mouse_motion(10.0, 10.0);
        input.reset();
        assert_eq!(input.movement(), Movement::default());
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
    }
}
