//! Configuration errors
//!
//! Steady-state ticking never fails; everything here is raised while
//! building or reconfiguring a simulation.

/// Errors surfaced while setting up a simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// No free spot was found for a body within the attempt budget.
    #[error(
        "could not place body {index} (radius {radius}) without overlap after {attempts} attempts -- \
         viewport {width}x{height} is too crowded"
    )]
    PlacementExhausted {
        index: usize,
        radius: f32,
        attempts: u32,
        width: f32,
        height: f32,
    },

    /// Viewport dimensions must be finite and positive.
    #[error("invalid viewport {width}x{height}: dimensions must be finite and positive")]
    InvalidViewport { width: f32, height: f32 },

    /// Static color mode needs at least one palette entry.
    #[error("palette is empty -- at least one color is required")]
    EmptyPalette,

    /// Ball widths must be at least one whole pixel and ordered.
    #[error("invalid ball width range {min}..{max}: widths must be at least 1 and min < max")]
    InvalidWidthRange { min: f32, max: f32 },

    /// Frame sampling interval must be at least one callback.
    #[error("frame skip interval must be at least 1")]
    ZeroFrameSkip,

    /// Settings JSON could not be parsed.
    #[error("failed to parse settings: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Parse(err.to_string())
    }
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, SimError>;
