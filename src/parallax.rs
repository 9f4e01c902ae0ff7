//! Mini hearts that drift with the pointer over the question image.

use crate::constants::{MINI_HEART_ROTATION_DEG, PARALLAX_STRENGTH};
use crate::geometry::{Bounds, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub rotation_deg: f64,
    pub translate: Point,
}

impl Transform2D {
    pub const fn rotated(rotation_deg: f64) -> Self {
        Self {
            rotation_deg,
            translate: Point::ORIGIN,
        }
    }
}

/// Offset of the `index`-th layer for a pointer over `region`. Deeper layers
/// move further.
pub fn parallax_offset(region: &Bounds, pointer: Point, index: usize) -> Point {
    let center = region.center();
    let depth = PARALLAX_STRENGTH * (index as f64 + 1.0);
    Point::new((pointer.x - center.x) * depth, (pointer.y - center.y) * depth)
}

#[derive(Debug, Clone)]
pub struct ParallaxLayers {
    transforms: Vec<Transform2D>,
}

impl ParallaxLayers {
    pub fn new(count: usize) -> Self {
        Self {
            transforms: vec![Transform2D::rotated(MINI_HEART_ROTATION_DEG); count],
        }
    }

    pub fn on_pointer_move(&mut self, region: &Bounds, pointer: Point) {
        for (index, transform) in self.transforms.iter_mut().enumerate() {
            transform.translate = parallax_offset(region, pointer, index);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        for transform in &mut self.transforms {
            transform.translate = Point::ORIGIN;
        }
    }

    pub fn transforms(&self) -> &[Transform2D] {
        &self.transforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_scale_with_layer_index() {
        let region = Bounds::new(0.0, 0.0, 200.0, 100.0);
        let pointer = Point::new(200.0, 0.0);
        let first = parallax_offset(&region, pointer, 0);
        let third = parallax_offset(&region, pointer, 2);
        assert!((first.x - 3.0).abs() < 1e-9);
        assert!((first.y + 1.5).abs() < 1e-9);
        assert!((third.x - 9.0).abs() < 1e-9);
    }

    #[test]
    fn pointer_at_center_does_not_move() {
        let region = Bounds::new(40.0, 40.0, 100.0, 100.0);
        assert_eq!(
            parallax_offset(&region, region.center(), 3),
            Point::new(0.0, 0.0)
        );
    }

    #[test]
    fn leave_resets_translation_but_keeps_rotation() {
        let mut layers = ParallaxLayers::new(3);
        let region = Bounds::new(0.0, 0.0, 100.0, 100.0);
        layers.on_pointer_move(&region, Point::new(90.0, 10.0));
        assert!(layers.transforms().iter().all(|t| t.translate != Point::ORIGIN));
        layers.on_pointer_leave();
        for t in layers.transforms() {
            assert_eq!(t.translate, Point::ORIGIN);
            assert_eq!(t.rotation_deg, 45.0);
        }
    }
}
