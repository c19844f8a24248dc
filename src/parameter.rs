use glam::Vec4;

use crate::input::Adjustment;

/// The quaternion Julia constant `c`. Any value is valid; far out of range it simply
/// renders an empty or degenerate set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JuliaParameter(pub Vec4);

impl Default for JuliaParameter {
    fn default() -> Self {
        Self(Vec4::new(-0.291, -0.399, 0.339, 0.437))
    }
}

impl JuliaParameter {
    /// Nudge each component by `step` per held key. Holding both keys of a channel cancels.
    pub fn adjust(&mut self, adjustments: [Adjustment; 4], step: f32) {
        for (component, adjustment) in adjustments.iter().enumerate() {
            if adjustment.increment {
                self.0[component] += step;
            }
            if adjustment.decrement {
                self.0[component] -= step;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCREMENT: Adjustment = Adjustment {
        decrement: false,
        increment: true,
    };
    const DECREMENT: Adjustment = Adjustment {
        decrement: true,
        increment: false,
    };
    const IDLE: Adjustment = Adjustment {
        decrement: false,
        increment: false,
    };

    #[test]
    fn adjusts_only_held_channels() {
        let mut parameter = JuliaParameter(Vec4::ZERO);
        parameter.adjust([IDLE, INCREMENT, IDLE, DECREMENT], 0.5);
        assert_eq!(parameter.0, Vec4::new(0.0, 0.5, 0.0, -0.5));
    }

    #[test]
    fn increment_then_decrement_returns_to_start() {
        let start = JuliaParameter::default();
        let mut parameter = start;
        let step = 1.0 / 60.0;
        for _ in 0..90 {
            parameter.adjust([INCREMENT, DECREMENT, INCREMENT, INCREMENT], step);
        }
        for _ in 0..90 {
            parameter.adjust([DECREMENT, INCREMENT, DECREMENT, DECREMENT], step);
        }
        assert!(parameter.0.abs_diff_eq(start.0, 1e-4));
    }

    #[test]
    fn both_keys_cancel() {
        let both = Adjustment {
            decrement: true,
            increment: true,
        };
        let mut parameter = JuliaParameter::default();
        parameter.adjust([both; 4], 0.25);
        assert!(parameter.0.abs_diff_eq(JuliaParameter::default().0, 1e-6));
    }
}
