//! Axis-aligned rectangles and viewport bounds
//!
//! Screen coordinates: origin at the top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp;
use crate::error::{Result, SimError};

/// An axis-aligned rectangle given by its edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::from_ltrb(x, y, x + width, y + height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Point of the rectangle nearest to `point` (the point itself when inside)
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            clamp(point.x, self.left, self.right),
            clamp(point.y, self.top, self.bottom),
        )
    }

    /// Circle overlap: strict, so a circle resting exactly on an edge does not hit
    #[inline]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        crate::distance_squared(center, self.closest_point(center)) < radius * radius
    }
}

/// Drawable area the simulation lives in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(SimError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_ltrb(0.0, 0.0, self.width, self.height)
    }

    /// Whether this viewport is narrow enough to use the reduced ball count
    pub fn is_narrow(&self) -> bool {
        self.width <= crate::consts::NARROW_VIEWPORT_WIDTH
    }
}
