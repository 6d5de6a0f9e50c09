//! Edge behavior of a body: confined by walls, or wrapping around the viewport
//!
//! Wrap-around bodies live on a torus. A body straddling the right or bottom
//! edge also exists at a "shadow" position one viewport to the left/up, which
//! is where its overhanging part shows up on the opposite side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Viewport;
use crate::modulo;

/// How a body treats the viewport edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Topology {
    /// Walls are real obstacles; a body cannot leave the viewport
    #[default]
    Bounded,
    /// Walls are ignored; a body leaving one edge re-enters the opposite one
    WrapAround,
}

impl Topology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topology::Bounded => "bounded",
            Topology::WrapAround => "wrap",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bounded" | "walls" => Some(Topology::Bounded),
            "wrap" | "wraparound" | "wrap-around" | "torus" => Some(Topology::WrapAround),
            _ => None,
        }
    }

    /// Whether wall obstacles are skipped during detection
    #[inline]
    pub fn ignores_walls(&self) -> bool {
        matches!(self, Topology::WrapAround)
    }

    /// Apply one displacement and map the result back into the viewport
    pub fn advance(&self, position: Vec2, displacement: Vec2, viewport: &Viewport) -> Vec2 {
        let next = position + displacement;
        match self {
            Topology::Bounded => next,
            Topology::WrapAround => self.wrap(next, viewport),
        }
    }

    /// Fold a position into `[0, width) x [0, height)` (identity for bounded bodies)
    pub fn wrap(&self, position: Vec2, viewport: &Viewport) -> Vec2 {
        match self {
            Topology::Bounded => position,
            Topology::WrapAround => Vec2::new(
                modulo(position.x, viewport.width),
                modulo(position.y, viewport.height),
            ),
        }
    }

    /// Offsets to the shadow copies of a body near the right/bottom edges.
    ///
    /// Up to three: left, up, and diagonal when the body sits in the corner.
    pub fn shadow_offsets(&self, position: Vec2, radius: f32, viewport: &Viewport) -> ShadowOffsets {
        let mut out = ShadowOffsets::default();
        if !matches!(self, Topology::WrapAround) {
            return out;
        }

        let near_right = position.x > viewport.width - radius;
        let near_bottom = position.y > viewport.height - radius;

        if near_right {
            out.push(Vec2::new(-viewport.width, 0.0));
        }
        if near_bottom {
            out.push(Vec2::new(0.0, -viewport.height));
        }
        if near_right && near_bottom {
            out.push(Vec2::new(-viewport.width, -viewport.height));
        }
        out
    }

    /// Every position a body should be drawn at this frame, primary first
    pub fn render_positions(&self, position: Vec2, radius: f32, viewport: &Viewport) -> Vec<Vec2> {
        let mut positions = vec![position];
        positions.extend(
            self.shadow_offsets(position, radius, viewport)
                .iter()
                .map(|offset| position + *offset),
        );
        positions
    }
}

/// Fixed-capacity list of shadow offsets (no allocation on the hot path)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShadowOffsets {
    offsets: [Vec2; 3],
    len: usize,
}

impl ShadowOffsets {
    fn push(&mut self, offset: Vec2) {
        self.offsets[self.len] = offset;
        self.len += 1;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec2> {
        self.offsets[..self.len].iter()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn test_bounded_advance_is_plain_addition() {
        let next = Topology::Bounded.advance(Vec2::new(799.0, 10.0), Vec2::new(2.0, -20.0), &viewport());
        assert_eq!(next, Vec2::new(801.0, -10.0));
    }

    #[test]
    fn test_wrap_advance_reenters_opposite_edge() {
        let vp = viewport();
        let next = Topology::WrapAround.advance(Vec2::new(799.0, 1.0), Vec2::new(2.0, -2.0), &vp);
        assert!((next.x - 1.0).abs() < 1e-3);
        assert!((next.y - 599.0).abs() < 1e-3);
    }

    #[test]
    fn test_shadow_offsets() {
        let vp = viewport();
        let wrap = Topology::WrapAround;

        assert!(wrap.shadow_offsets(Vec2::new(400.0, 300.0), 20.0, &vp).is_empty());

        let right = wrap.shadow_offsets(Vec2::new(790.0, 300.0), 20.0, &vp);
        assert_eq!(right.iter().copied().collect::<Vec<_>>(), vec![Vec2::new(-800.0, 0.0)]);

        let corner = wrap.shadow_offsets(Vec2::new(790.0, 590.0), 20.0, &vp);
        assert_eq!(corner.len(), 3);

        // Bounded bodies never have shadows
        assert!(
            Topology::Bounded
                .shadow_offsets(Vec2::new(790.0, 590.0), 20.0, &vp)
                .is_empty()
        );
    }

    #[test]
    fn test_render_positions_straddling_edge() {
        let vp = viewport();
        let positions = Topology::WrapAround.render_positions(Vec2::new(795.0, 300.0), 10.0, &vp);
        assert_eq!(positions, vec![Vec2::new(795.0, 300.0), Vec2::new(-5.0, 300.0)]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Topology::from_str("Wrap"), Some(Topology::WrapAround));
        assert_eq!(Topology::from_str("bounded"), Some(Topology::Bounded));
        assert_eq!(Topology::from_str("sphere"), None);
    }

    proptest! {
        #[test]
        fn wrapped_position_stays_in_viewport(
            start in 0.0f32..800.0,
            steps in -2000i32..2000,
            speed in prop::sample::select(vec![0.5f32, 1.0, 2.0, 4.0]),
        ) {
            let vp = viewport();
            let displacement = Vec2::new(steps as f32 * speed, 0.0);
            let next = Topology::WrapAround.advance(Vec2::new(start, 300.0), displacement, &vp);
            prop_assert!(next.x >= 0.0 && next.x < vp.width);
            let expected = crate::modulo(start + displacement.x, vp.width);
            prop_assert!((next.x - expected).abs() < 1e-3);
        }
    }
}
