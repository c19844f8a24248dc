use bytemuck::{Pod, Zeroable};
use winit::dpi::{PhysicalPosition, PhysicalSize};

/// Client area of the window, in physical pixels.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A minimised window reports a zero extent; nothing can be allocated for it.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `width / height`, divided as floats so that e.g. 1280x1024 gives 1.25 rather than 1.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn center(&self) -> PhysicalPosition<f64> {
        PhysicalPosition::new(
            (self.width as f64 / 2.0).round(),
            (self.height as f64 / 2.0).round(),
        )
    }
}

impl From<PhysicalSize<u32>> for Size {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_does_not_truncate() {
        assert_eq!(Size::new(1280, 1024).aspect_ratio(), 1.25);
        assert_eq!(Size::new(1920, 1080).aspect_ratio(), 1920.0 / 1080.0);
        assert_eq!(Size::new(600, 800).aspect_ratio(), 0.75);
    }

    #[test]
    fn zero_extent_is_empty() {
        assert!(Size::new(0, 0).is_empty());
        assert!(Size::new(800, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn center_rounds_odd_sizes() {
        let center = Size::new(801, 600).center();
        assert_eq!(center.x, 401.0);
        assert_eq!(center.y, 300.0);
    }
}
