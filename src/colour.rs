//! Colour gradient used by `julia.wgsl` to shade the fractal surface.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Number of stops in the gradient. Corresponds to the array length of `common.wgsl#Gradient`.
pub const GRADIENT_STOPS: usize = 8;

/// Gradient stops as packed `0xRRGGBB`, darkest first.
pub const GRADIENT_HEX: [u32; GRADIENT_STOPS] = [
    0x1E183A, 0x2F2461, 0x4B3589, 0x7A4DA8, 0xB067B4, 0xE0879F, 0xF7B58C, 0xFDE7C4,
];

/// Decode a packed `0xRRGGBB` value into normalised RGB.
pub fn from_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}

/// [`bytemuck`]-compatible gradient block. Each stop is padded to a `vec4` to satisfy
/// the 16-byte array stride of WGSL uniform buffers.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
    pub stops: [[f32; 4]; GRADIENT_STOPS],
}

impl Gradient {
    pub fn from_hex(hex: &[u32; GRADIENT_STOPS]) -> Self {
        let mut stops = [[0.0; 4]; GRADIENT_STOPS];
        for (stop, hex) in stops.iter_mut().zip(hex) {
            *stop = from_hex(*hex).extend(1.0).to_array();
        }
        Self { stops }
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::from_hex(&GRADIENT_HEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_exact_components() {
        assert_eq!(
            from_hex(0x1E183A),
            Vec3::new(30.0 / 255.0, 24.0 / 255.0, 58.0 / 255.0)
        );
        assert_eq!(from_hex(0xFFFFFF), Vec3::ONE);
        assert_eq!(from_hex(0x000000), Vec3::ZERO);
    }

    #[test]
    fn gradient_keeps_stop_order() {
        let gradient = Gradient::default();
        for (index, hex) in GRADIENT_HEX.iter().enumerate() {
            let [r, g, b, a] = gradient.stops[index];
            assert_eq!(Vec3::new(r, g, b), from_hex(*hex));
            assert_eq!(a, 1.0);
        }
    }

    #[test]
    fn gradient_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<Gradient>(), GRADIENT_STOPS * 16);
    }
}
