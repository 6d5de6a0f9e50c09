//! Deterministic simulation module
//!
//! All motion and collision logic lives here. This module must be pure and deterministic:
//! - One logical tick per sampled host callback
//! - Seeded RNG only
//! - Stable iteration order (by body index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod color;
pub mod geometry;
pub mod obstacle;
pub mod resolve;
pub mod state;
pub mod tick;
pub mod topology;
pub mod wave;

pub use collision::{CollisionOutcome, circles_overlap, detect};
pub use color::{Color, ColorMode, ColorStrategy};
pub use geometry::{Rect, Viewport};
pub use obstacle::{Obstacle, ObstacleField};
pub use resolve::{Resolution, resolve};
pub use state::{Body, CollisionEvent, SimulationState, random_position};
pub use tick::{FrameSampler, StepResult, on_resize, step};
pub use topology::Topology;
pub use wave::{Wave, WaveStyle};
