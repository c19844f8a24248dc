use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

use crate::camera::Basis;

/**
[`bytemuck`]-compatible per-frame uniform block. Corresponds to `common.wgsl#Frame`.

WGSL aligns `vec3<f32>` to 16 bytes, so each vector carries a trailing padding slot.
The one after `camera_position` holds the aspect ratio.
*/
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub camera_position: [f32; 3],
    pub aspect_ratio: f32,
    pub camera_forward: [f32; 3],
    _padding0: f32,
    pub camera_right: [f32; 3],
    _padding1: f32,
    pub camera_up: [f32; 3],
    _padding2: f32,
    pub c: [f32; 4],
}

impl Frame {
    pub fn new(camera_position: Vec3, basis: &Basis, aspect_ratio: f32, c: Vec4) -> Self {
        Self {
            camera_position: camera_position.to_array(),
            aspect_ratio,
            camera_forward: basis.forward.to_array(),
            _padding0: 0.0,
            camera_right: basis.right.to_array(),
            _padding1: 0.0,
            camera_up: basis.up.to_array(),
            _padding2: 0.0,
            c: c.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::mem::{offset_of, size_of};

    use super::*;

    #[test]
    fn layout_matches_wgsl() {
        assert_eq!(size_of::<Frame>(), 80);
        assert_eq!(offset_of!(Frame, aspect_ratio), 12);
        assert_eq!(offset_of!(Frame, camera_forward), 16);
        assert_eq!(offset_of!(Frame, camera_right), 32);
        assert_eq!(offset_of!(Frame, camera_up), 48);
        assert_eq!(offset_of!(Frame, c), 64);
    }
}
