//! Simulation settings
//!
//! Persisted in LocalStorage on the web; the host may also hand in JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::color::{Color, ColorMode};
use crate::sim::geometry::Viewport;
use crate::sim::topology::Topology;
use crate::sim::wave::WaveStyle;

/// How crowded the field is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DensityPreset {
    Sparse,
    #[default]
    Normal,
    Busy,
}

impl DensityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DensityPreset::Sparse => "Sparse",
            DensityPreset::Normal => "Normal",
            DensityPreset::Busy => "Busy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sparse" | "low" => Some(DensityPreset::Sparse),
            "normal" | "medium" | "med" => Some(DensityPreset::Normal),
            "busy" | "high" => Some(DensityPreset::Busy),
            _ => None,
        }
    }

    /// Ball counts for (wide, narrow) viewports
    pub fn ball_counts(&self) -> (usize, usize) {
        match self {
            DensityPreset::Sparse => (5, 1),
            DensityPreset::Normal => (BALL_COUNT, NARROW_BALL_COUNT),
            DensityPreset::Busy => (20, 4),
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (same seed, same run)
    pub seed: u64,

    // === Population ===
    /// Balls on wide viewports
    pub ball_count: usize,
    /// Balls on viewports at most `NARROW_VIEWPORT_WIDTH` wide
    pub narrow_ball_count: usize,
    /// Ball width range, `[min, max)`; sampled widths are whole pixels
    pub min_width: f32,
    pub max_width: f32,
    /// Per-axis speed in pixels per tick
    pub speed: f32,

    // === Look ===
    pub color_mode: ColorMode,
    /// Colors picked from in `ColorMode::Palette`
    pub palette: Vec<Color>,
    /// Alpha for hue-shifting bodies
    pub alpha: f32,
    /// Hue drift in degrees per tick
    pub hue_speed: f32,
    /// Spawn built-in waves on collision
    pub waves: bool,
    pub wave_style: WaveStyle,

    // === Behavior ===
    pub topology: Topology,
    /// Run the tick only on every Nth animation callback
    pub frame_skip: u32,
    /// Consecutive collisions tolerated before relocation
    pub stuck_threshold: u32,
    /// Random tries per body during initial placement
    pub max_placement_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,

            ball_count: BALL_COUNT,
            narrow_ball_count: NARROW_BALL_COUNT,
            min_width: BALL_MIN_WIDTH,
            max_width: BALL_MAX_WIDTH,
            speed: BALL_SPEED,

            color_mode: ColorMode::Palette,
            palette: Color::blue_shades(BALL_ALPHA),
            alpha: BALL_ALPHA,
            hue_speed: 0.5,
            waves: true,
            wave_style: WaveStyle::Grow,

            topology: Topology::Bounded,
            frame_skip: 1,
            stuck_threshold: STUCK_THRESHOLD,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl Settings {
    /// Apply a density preset (updates ball counts only)
    pub fn apply_preset(&mut self, preset: DensityPreset) {
        let (wide, narrow) = preset.ball_counts();
        self.ball_count = wide;
        self.narrow_ball_count = narrow;
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.color_mode == ColorMode::Palette && self.palette.is_empty() {
            return Err(SimError::EmptyPalette);
        }
        // Sampled widths are floored, so anything under one pixel can become zero
        if !(self.min_width >= 1.0 && self.min_width < self.max_width && self.max_width.is_finite()) {
            return Err(SimError::InvalidWidthRange {
                min: self.min_width,
                max: self.max_width,
            });
        }
        if self.frame_skip == 0 {
            return Err(SimError::ZeroFrameSkip);
        }
        Ok(())
    }

    /// Number of balls for this viewport
    pub fn ball_count_for(&self, viewport: &Viewport) -> usize {
        if viewport.is_narrow() {
            self.narrow_ball_count
        } else {
            self.ball_count
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "bounce_field_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"seed": 42, "topology": "WrapAround"}"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.topology, Topology::WrapAround);
        assert_eq!(settings.ball_count, BALL_COUNT);
        assert_eq!(settings.palette.len(), 5);
    }

    #[test]
    fn test_json_roundtrip_preserves_settings() {
        let mut settings = Settings::default();
        settings.apply_preset(DensityPreset::Busy);
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let empty_palette = Settings {
            palette: Vec::new(),
            ..Settings::default()
        };
        assert_eq!(empty_palette.validate(), Err(SimError::EmptyPalette));

        // An empty palette is fine when colors come from hue shifting
        let hue = Settings {
            color_mode: ColorMode::HueShift,
            ..empty_palette
        };
        assert!(hue.validate().is_ok());

        let widths = Settings {
            min_width: 40.0,
            max_width: 40.0,
            ..Settings::default()
        };
        assert!(matches!(widths.validate(), Err(SimError::InvalidWidthRange { .. })));

        let skip = Settings {
            frame_skip: 0,
            ..Settings::default()
        };
        assert_eq!(skip.validate(), Err(SimError::ZeroFrameSkip));
    }

    #[test]
    fn test_sub_pixel_widths_rejected() {
        let tiny = Settings {
            min_width: 0.5,
            max_width: 0.9,
            ..Settings::default()
        };
        assert_eq!(
            tiny.validate(),
            Err(SimError::InvalidWidthRange { min: 0.5, max: 0.9 })
        );
        assert!(Settings::from_json(r#"{"min_width": 0.5, "max_width": 0.9}"#).is_err());

        // One pixel is the smallest width that still floors to a positive radius
        let one = Settings {
            min_width: 1.0,
            max_width: 1.5,
            ..Settings::default()
        };
        assert!(one.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(Settings::from_json("{not json"), Err(SimError::Parse(_))));
    }

    #[test]
    fn test_ball_count_for_viewport() {
        let settings = Settings::default();
        let narrow = Viewport::new(800.0, 900.0).unwrap();
        let wide = Viewport::new(801.0, 900.0).unwrap();
        assert_eq!(settings.ball_count_for(&narrow), NARROW_BALL_COUNT);
        assert_eq!(settings.ball_count_for(&wide), BALL_COUNT);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(DensityPreset::from_str("HIGH"), Some(DensityPreset::Busy));
        assert_eq!(DensityPreset::from_str("sparse").unwrap().as_str(), "Sparse");
        assert_eq!(DensityPreset::from_str("nope"), None);
    }

    #[test]
    fn test_apply_preset_sets_ball_counts_only() {
        let mut settings = Settings {
            seed: 7,
            ..Settings::default()
        };
        settings.apply_preset(DensityPreset::Sparse);
        assert_eq!((settings.ball_count, settings.narrow_ball_count), (5, 1));
        assert_eq!(settings.seed, 7);
        assert!(settings.validate().is_ok());
    }
}
