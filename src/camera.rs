//! Free-look camera.
//!
//! Only position and the two look angles are stored. The orientation basis is rebuilt
//! from the angles every frame, so there is no accumulated drift to renormalise.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::input::Movement;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Radians. Unbounded; the trigonometry wraps it.
    pub yaw: f32,
    /// Radians, elevation above the horizontal plane. Unbounded like `yaw`.
    pub pitch: f32,
}

/// Five units out along `+x`, looking back at the origin.
impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 0.0, 0.0),
            yaw: PI,
            pitch: 0.0,
        }
    }
}

impl Camera {
    /// Turn by a relative mouse motion. Moving the mouse up (negative `y`) raises the pitch.
    pub fn look(&mut self, mouse_delta: Vec2, delta_time: f32, sensitivity: f32) {
        self.yaw += mouse_delta.x * delta_time * sensitivity;
        self.pitch -= mouse_delta.y * delta_time * sensitivity;
    }

    pub fn basis(&self) -> Basis {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        let forward = Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize();
        // Independent of pitch, so strafing stays level.
        let right = Vec3::new(sin_yaw, 0.0, -cos_yaw);
        let up = forward.cross(right);

        Basis { forward, right, up }
    }

    /// Move along the basis for every held movement key. Keys compose by plain vector
    /// addition, so diagonal movement is faster than movement along one axis.
    pub fn fly(&mut self, basis: &Basis, movement: Movement, step: f32) {
        if movement.forward {
            self.position += step * basis.forward;
        }
        if movement.back {
            self.position -= step * basis.forward;
        }
        if movement.right {
            self.position += step * basis.right;
        }
        if movement.left {
            self.position -= step * basis.right;
        }
    }
}

/// Camera orientation for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Basis {
    /**
    Fold the projection into the basis.

    Scaling `right` by `tan(fov / 2) * aspect_ratio` and `up` by `tan(fov / 2)` lets the
    shader build a view ray as `forward + u * right + v * up` for `(u, v)` in `[-1, 1]`
    without knowing the field of view or the window shape.
    */
    pub fn with_projection(self, fov: f32, aspect_ratio: f32) -> Self {
        let scale = (fov / 2.0).tan();
        Self {
            forward: self.forward,
            right: self.right * scale * aspect_ratio,
            up: self.up * scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, EPSILON),
            "{actual:?} is not close to {expected:?}"
        );
    }

    #[test]
    fn default_looks_at_origin() {
        let camera = Camera::default();
        let basis = camera.basis();
        assert_close(basis.forward, -camera.position.normalize());
        assert_close(basis.forward, Vec3::NEG_X);
        assert_close(basis.right, Vec3::Z);
        assert_close(basis.up, Vec3::Y);
    }

    #[test]
    fn zero_mouse_delta_keeps_angles() {
        let mut camera = Camera {
            yaw: 1.3,
            pitch: -0.4,
            ..Camera::default()
        };
        camera.look(Vec2::ZERO, 1.0 / 60.0, 0.5);
        assert_eq!(camera.yaw, 1.3);
        assert_eq!(camera.pitch, -0.4);
    }

    #[test]
    fn look_halves_scaled_delta_and_inverts_y() {
        let mut camera = Camera {
            yaw: 0.0,
            ..Camera::default()
        };
        camera.look(Vec2::new(12.0, 8.0), 0.25, 0.5);
        assert_eq!(camera.yaw, 12.0 * 0.25 / 2.0);
        assert_eq!(camera.pitch, -(8.0 * 0.25 / 2.0));
    }

    #[test]
    fn forward_is_unit_and_right_is_level() {
        for yaw in [-7.0, -PI, -1.0, 0.0, 0.3, FRAC_PI_2, 2.5, 11.0] {
            for pitch in [-3.0, -FRAC_PI_2, -0.7, 0.0, 0.2, FRAC_PI_3, 1.4, 9.0] {
                let basis = Camera {
                    position: Vec3::ZERO,
                    yaw,
                    pitch,
                }
                .basis();
                assert!((basis.forward.length() - 1.0).abs() < EPSILON);
                assert_eq!(basis.right.y, 0.0);
                assert!((basis.right.length() - 1.0).abs() < EPSILON);
                assert!(basis.up.dot(basis.forward).abs() < EPSILON);
                assert!(basis.up.dot(basis.right).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn diagonal_movement_adds_both_displacements() {
        let basis = Camera::default().basis();
        let step = 5.0 * 0.5;

        let mut diagonal = Camera::default();
        diagonal.fly(
            &basis,
            Movement {
                forward: true,
                right: true,
                ..Movement::default()
            },
            step,
        );

        let mut forward_only = Camera::default();
        forward_only.fly(
            &basis,
            Movement {
                forward: true,
                ..Movement::default()
            },
            step,
        );

        let mut right_only = Camera::default();
        right_only.fly(
            &basis,
            Movement {
                right: true,
                ..Movement::default()
            },
            step,
        );

        let origin = Camera::default().position;
        assert_close(
            diagonal.position - origin,
            (forward_only.position - origin) + (right_only.position - origin),
        );
        assert!(((diagonal.position - origin).length() - step * 2.0_f32.sqrt()).abs() < EPSILON);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut camera = Camera::default();
        camera.fly(
            &camera.basis(),
            Movement {
                forward: true,
                back: true,
                left: true,
                right: true,
            },
            1.0,
        );
        assert_close(camera.position, Camera::default().position);
    }

    #[test]
    fn projection_scales_right_and_up() {
        let basis = Camera::default().basis().with_projection(FRAC_PI_2, 2.0);
        assert_close(basis.forward, Vec3::NEG_X);
        assert_close(basis.right, Vec3::Z * 2.0);
        assert_close(basis.up, Vec3::Y);
    }
}
