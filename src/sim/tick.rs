//! Simulation tick
//!
//! One tick runs three phases in order:
//! 1. Detect and resolve collisions for every body, in index order. Later
//!    bodies see the already flipped velocities of earlier ones, but not
//!    their new positions.
//! 2. Move every body by its (possibly flipped) velocity.
//! 3. Grow/fade existing waves, drop the finished ones, then add the waves
//!    spawned by this tick's collisions.

use glam::Vec2;

use super::collision::detect;
use super::geometry::{Rect, Viewport};
use super::obstacle::ObstacleField;
use super::resolve::resolve;
use super::state::{CollisionEvent, SimulationState};
use super::wave::Wave;
use crate::error::{Result, SimError};

/// Runs the full tick only on every Nth host callback.
///
/// Skipped callbacks are made up for by scaling each sampled tick's
/// displacement by N, so perceived speed does not change.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSampler {
    interval: u32,
    counter: u32,
    /// Wall time accumulated over skipped callbacks (seconds)
    pending_dt: f32,
}

impl FrameSampler {
    pub fn new(interval: u32) -> Result<Self> {
        if interval == 0 {
            return Err(SimError::ZeroFrameSkip);
        }
        Ok(Self {
            interval,
            counter: 0,
            pending_dt: 0.0,
        })
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Displacement multiplier for a sampled tick
    #[inline]
    pub fn scale(&self) -> f32 {
        self.interval as f32
    }

    /// Register one host callback. Returns the accumulated wall time when
    /// this callback should run a tick.
    pub fn sample(&mut self, dt: f32) -> Option<f32> {
        self.counter += 1;
        self.pending_dt += dt;
        if self.counter < self.interval {
            return None;
        }
        self.counter = 0;
        Some(std::mem::take(&mut self.pending_dt))
    }
}

/// Everything that happened during one `step` call
#[derive(Debug, Clone, Default)]
pub struct StepResult {
    /// Whether this callback ran a tick (false when skipped by the sampler)
    pub ticked: bool,
    /// Number of bodies advanced
    pub moved_bodies: usize,
    /// One event per collision wave request, in resolution order
    pub spawned_effects: Vec<CollisionEvent>,
    /// Waves removed this tick
    pub expired_effects: Vec<Wave>,
    /// IDs of bodies teleported out of a wedge
    pub relocated: Vec<u32>,
}

/// Advance the simulation for one host animation callback.
///
/// `delta_hint` is the wall time since the previous callback in seconds;
/// only fading waves use it. Motion is per tick.
pub fn step(state: &mut SimulationState, delta_hint: f32) -> StepResult {
    let Some(dt) = state.sampler.sample(delta_hint) else {
        return StepResult::default();
    };
    let scale = state.sampler.scale();
    let mut result = StepResult {
        ticked: true,
        ..Default::default()
    };

    // Phase 1: collisions
    for index in 0..state.bodies.len() {
        let outcome = detect(index, &state.bodies, &state.field, &state.viewport, scale);
        let resolution = resolve(state, index, outcome);
        if resolution.relocated {
            result.relocated.push(state.bodies[index].id);
        }
        result.spawned_effects.extend(resolution.events);
    }

    // Phase 2: motion
    let viewport = state.viewport;
    for body in &mut state.bodies {
        body.pos = body.topology.advance(body.pos, body.vel * scale, &viewport);
        body.color.advance(scale);
    }
    result.moved_bodies = state.bodies.len();

    // Phase 3: waves. New ones join after the update so they are first
    // drawn at their initial radius.
    let mut live = Vec::with_capacity(state.waves.len() + result.spawned_effects.len());
    for mut wave in state.waves.drain(..) {
        if wave.update(scale, dt) {
            result.expired_effects.push(wave);
        } else {
            live.push(wave);
        }
    }
    if state.settings.waves {
        let style = state.settings.wave_style;
        live.extend(
            result
                .spawned_effects
                .iter()
                .map(|e| Wave::new(e.pos, e.radius, e.color, style)),
        );
    }
    state.waves = live;

    state.time_ticks += 1;
    result
}

/// Swap in a new viewport and obstacle field.
///
/// Wrap-around bodies are folded into the new bounds. Any body left
/// overlapping an obstacle, or stranded outside a bounded viewport, is
/// relocated. Takes effect from the next tick.
pub fn on_resize(state: &mut SimulationState, viewport: Viewport, regions: &[Rect]) {
    state.field = ObstacleField::build(viewport, regions);
    state.viewport = viewport;

    let bounds = viewport.as_rect();
    let mut relocated = 0;
    for index in 0..state.bodies.len() {
        let body = &mut state.bodies[index];
        body.pos = body.topology.wrap(body.pos, &viewport);
        let outside = bounds.closest_point(body.pos) != body.pos;
        if outside || body.overlaps_field(&state.field) {
            state.relocate_body(index);
            relocated += 1;
        }
    }

    log::info!(
        "Resized to {}x{}: {} obstacles, {} bodies relocated",
        viewport.width,
        viewport.height,
        state.field.len(),
        relocated
    );
}

/// Centroid of all bodies, or the viewport center when there are none
pub fn centroid(state: &SimulationState) -> Vec2 {
    if state.bodies.is_empty() {
        return state.viewport.size() / 2.0;
    }
    let sum: Vec2 = state.bodies.iter().map(|b| b.pos).sum();
    sum / state.bodies.len() as f32
}
