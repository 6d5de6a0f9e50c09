//! Ball colors: a fixed palette pick, or a hue that drifts every tick

use serde::{Deserialize, Serialize};

/// An RGBA color (channels 0-255, alpha 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string, e.g. `rgba(66,146,198,0.4)`
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }

    /// Convert HSL (hue in degrees, saturation/lightness 0-1) to RGB
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, a: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgba(to_u8(r), to_u8(g), to_u8(b), a)
    }

    /// Nice looking shades of blue
    pub fn blue_shades(alpha: f32) -> Vec<Color> {
        vec![
            Color::rgba(66, 146, 198, alpha),
            Color::rgba(33, 113, 181, alpha),
            Color::rgba(8, 81, 156, alpha),
            Color::rgba(8, 48, 107, alpha),
            Color::rgba(8, 48, 107, alpha),
        ]
    }
}

/// Which color strategy new bodies get
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Random entry from the palette, fixed for the body's lifetime
    #[default]
    Palette,
    /// Random starting hue that drifts each tick
    HueShift,
}

/// Per-body color behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColorStrategy {
    Static(Color),
    HueShift {
        hue: f32,
        saturation: f32,
        lightness: f32,
        alpha: f32,
        /// Degrees added per tick
        speed: f32,
    },
}

impl ColorStrategy {
    pub fn hue_shift(hue: f32, alpha: f32, speed: f32) -> Self {
        ColorStrategy::HueShift {
            hue,
            saturation: 0.6,
            lightness: 0.5,
            alpha,
            speed,
        }
    }

    /// Current color
    pub fn color(&self) -> Color {
        match *self {
            ColorStrategy::Static(color) => color,
            ColorStrategy::HueShift {
                hue,
                saturation,
                lightness,
                alpha,
                ..
            } => Color::from_hsla(hue, saturation, lightness, alpha),
        }
    }

    /// Advance by `ticks` simulation ticks
    pub fn advance(&mut self, ticks: f32) {
        if let ColorStrategy::HueShift { hue, speed, .. } = self {
            *hue = (*hue + *speed * ticks).rem_euclid(360.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string() {
        assert_eq!(Color::rgba(66, 146, 198, 0.4).to_css(), "rgba(66,146,198,0.4)");
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Color::from_hsla(0.0, 1.0, 0.5, 1.0), Color::rgba(255, 0, 0, 1.0));
        assert_eq!(Color::from_hsla(120.0, 1.0, 0.5, 1.0), Color::rgba(0, 255, 0, 1.0));
        assert_eq!(Color::from_hsla(240.0, 1.0, 0.5, 1.0), Color::rgba(0, 0, 255, 1.0));
        assert_eq!(Color::from_hsla(360.0, 1.0, 0.5, 1.0), Color::rgba(255, 0, 0, 1.0));
    }

    #[test]
    fn test_static_color_never_changes() {
        let c = Color::rgba(8, 81, 156, 0.4);
        let mut strategy = ColorStrategy::Static(c);
        strategy.advance(100.0);
        assert_eq!(strategy.color(), c);
    }

    #[test]
    fn test_hue_shift_wraps() {
        let mut strategy = ColorStrategy::hue_shift(350.0, 1.0, 5.0);
        strategy.advance(4.0);
        match strategy {
            ColorStrategy::HueShift { hue, .. } => assert!((hue - 10.0).abs() < 1e-3),
            _ => panic!("strategy changed kind"),
        }
    }
}
