//! Wave effects: rings that expand from a collision point, then vanish
//!
//! Purely visual. Nothing in the physics reads them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::consts::{WAVE_FADE_PER_SEC, WAVE_GROWTH};

/// How a wave ends its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WaveStyle {
    /// Grow until the radius doubles
    #[default]
    Grow,
    /// Grow while fading; removed once fully transparent
    Fade,
}

/// An expanding ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wave {
    pub pos: Vec2,
    pub initial_radius: f32,
    pub radius: f32,
    pub color: Color,
    pub alpha: f32,
    pub style: WaveStyle,
}

impl Wave {
    pub fn new(pos: Vec2, radius: f32, color: Color, style: WaveStyle) -> Self {
        Self {
            pos,
            initial_radius: radius,
            radius,
            color,
            alpha: color.a,
            style,
        }
    }

    /// Advance the wave. `ticks` is the number of simulation ticks this
    /// update stands for; `dt` is elapsed wall time in seconds.
    ///
    /// Returns true once the wave has crossed its termination threshold.
    pub fn update(&mut self, ticks: f32, dt: f32) -> bool {
        // Smaller waves grow faster
        self.radius += ticks * WAVE_GROWTH / self.initial_radius;
        match self.style {
            WaveStyle::Grow => self.radius >= self.initial_radius * 2.0,
            WaveStyle::Fade => {
                self.alpha -= dt * WAVE_FADE_PER_SEC;
                self.alpha <= 0.0
            }
        }
    }

    /// Color to draw with (alpha reflects fading)
    pub fn draw_color(&self) -> Color {
        self.color.with_alpha(self.alpha.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> Color {
        Color::rgba(33, 113, 181, 0.4)
    }

    #[test]
    fn test_grow_wave_expires_at_double_radius() {
        // 5 / 5 = 1 unit per tick, so 5 ticks to go from 5 to 10
        let mut wave = Wave::new(Vec2::ZERO, 5.0, color(), WaveStyle::Grow);
        for _ in 0..4 {
            assert!(!wave.update(1.0, 1.0 / 60.0));
        }
        assert!(wave.update(1.0, 1.0 / 60.0));
        assert!(wave.radius >= 10.0);
    }

    #[test]
    fn test_radius_is_monotonic() {
        let mut wave = Wave::new(Vec2::ZERO, 20.0, color(), WaveStyle::Fade);
        let mut last = wave.radius;
        for _ in 0..10 {
            wave.update(1.0, 0.016);
            assert!(wave.radius > last);
            last = wave.radius;
        }
    }

    #[test]
    fn test_fade_wave_expires_when_transparent() {
        let mut wave = Wave::new(Vec2::ZERO, 1000.0, color(), WaveStyle::Fade);
        // alpha 0.4 at 1.5/s is gone after ~0.27s
        assert!(!wave.update(1.0, 0.1));
        assert!(!wave.update(1.0, 0.1));
        assert!(wave.update(1.0, 0.1));
        assert_eq!(wave.draw_color().a, 0.0);
    }
}
