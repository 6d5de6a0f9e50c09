//! Bounce Field - A decorative bouncing-ball background
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, waves)
//! - `render`: Flattens simulation state into draw commands
//! - `settings`: Data-driven configuration
//! - `error`: Configuration errors

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::{DensityPreset, Settings};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// How far wall obstacles extend beyond each viewport edge
    pub const WALL_MARGIN: f32 = 10.0;

    /// Consecutive collisions tolerated before a body is considered wedged
    pub const STUCK_THRESHOLD: u32 = 3;

    /// Placement attempts per body before giving up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

    /// Ball defaults (widths in pixels, speed in pixels per tick)
    pub const BALL_MIN_WIDTH: f32 = 20.0;
    pub const BALL_MAX_WIDTH: f32 = 80.0;
    pub const BALL_SPEED: f32 = 0.5;

    /// Ball counts for wide and narrow viewports
    pub const BALL_COUNT: usize = 10;
    pub const NARROW_BALL_COUNT: usize = 2;
    /// Viewports at or below this width count as narrow
    pub const NARROW_VIEWPORT_WIDTH: f32 = 800.0;

    /// Wave growth numerator: a wave grows by `WAVE_GROWTH / initial_radius` per tick
    pub const WAVE_GROWTH: f32 = 5.0;
    /// Fading waves lose this much alpha per second
    pub const WAVE_FADE_PER_SEC: f32 = 1.5;

    /// Palette alpha used by the default blue shades
    pub const BALL_ALPHA: f32 = 0.4;
}

/// Clamp `value` into `[min, max]`
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Squared euclidean distance between two points
#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

/// Mathematical modulo: result is in `[0, divisor)` for positive divisors,
/// even when `dividend` is negative
#[inline]
pub fn modulo(dividend: f32, divisor: f32) -> f32 {
    let r = dividend.rem_euclid(divisor);
    // rem_euclid can round up to exactly `divisor` for tiny negative inputs
    if r >= divisor { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(12.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_distance_squared() {
        let d = distance_squared(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((d - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_modulo_negative() {
        assert!((modulo(-1.0, 800.0) - 799.0).abs() < 1e-4);
        assert!((modulo(801.0, 800.0) - 1.0).abs() < 1e-4);
        assert_eq!(modulo(0.0, 800.0), 0.0);
        assert!(modulo(-1e-9, 800.0) < 800.0);
    }
}
