//! Simulation state and core types
//!
//! `SimulationState` owns everything a tick touches: bodies, waves, the
//! current obstacle snapshot, and the seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::{Color, ColorMode, ColorStrategy};
use super::geometry::{Rect, Viewport};
use super::obstacle::ObstacleField;
use super::tick::FrameSampler;
use super::topology::Topology;
use super::wave::Wave;
use crate::error::{Result, SimError};
use crate::settings::Settings;

/// A moving circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks in a row that ended in a collision
    pub consecutive_collisions: u32,
    pub topology: Topology,
    pub color: ColorStrategy,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            id,
            pos,
            vel,
            radius,
            consecutive_collisions: 0,
            topology: Topology::Bounded,
            color: ColorStrategy::Static(Color::rgba(66, 146, 198, 1.0)),
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_color(mut self, color: ColorStrategy) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.radius * 2.0
    }

    /// Whether this body currently overlaps another (touching counts)
    pub fn overlaps_body(&self, other: &Body) -> bool {
        let reach = self.radius + other.radius;
        crate::distance_squared(self.pos, other.pos) <= reach * reach
    }

    /// Whether this body currently overlaps any obstacle it can see
    pub fn overlaps_field(&self, field: &ObstacleField) -> bool {
        let skip_walls = self.topology.ignores_walls();
        field
            .obstacles()
            .iter()
            .filter(|o| !(skip_walls && o.is_wall))
            .any(|o| o.rect.overlaps_circle(self.pos, self.radius))
    }
}

/// A collision worth drawing a wave for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub body_id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Uniform random position for a body of `radius`, inset by its width.
///
/// Falls back to the viewport center on an axis too small for the inset.
pub fn random_position(rng: &mut Pcg32, radius: f32, viewport: &Viewport) -> Vec2 {
    let inset = radius * 2.0;
    let axis = |rng: &mut Pcg32, extent: f32| {
        if extent > inset * 2.0 {
            rng.random_range(inset..extent - inset)
        } else {
            extent / 2.0
        }
    };
    let x = axis(rng, viewport.width);
    let y = axis(rng, viewport.height);
    Vec2::new(x, y)
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub settings: Settings,
    pub viewport: Viewport,
    /// Latest obstacle snapshot (replaced whole on resize)
    pub field: ObstacleField,
    /// Bodies in scan order
    pub bodies: Vec<Body>,
    pub waves: Vec<Wave>,
    /// Logical ticks run so far
    pub time_ticks: u64,
    pub sampler: FrameSampler,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SimulationState {
    /// Build a state and place `settings.ball_count_for(viewport)` bodies
    pub fn new(settings: Settings, viewport: Viewport, regions: &[Rect]) -> Result<Self> {
        let mut state = Self::empty(settings, viewport, regions)?;
        let count = state.settings.ball_count_for(&viewport);
        for _ in 0..count {
            state.spawn_random_body()?;
        }
        log::info!(
            "Simulation initialized: {} bodies, {} obstacles, viewport {}x{}, seed {}",
            state.bodies.len(),
            state.field.len(),
            viewport.width,
            viewport.height,
            state.settings.seed
        );
        Ok(state)
    }

    /// Build a state with no bodies
    pub fn empty(settings: Settings, viewport: Viewport, regions: &[Rect]) -> Result<Self> {
        settings.validate()?;
        let sampler = FrameSampler::new(settings.frame_skip)?;
        Ok(Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            field: ObstacleField::build(viewport, regions),
            viewport,
            bodies: Vec::new(),
            waves: Vec::new(),
            time_ticks: 0,
            sampler,
            settings,
            next_id: 1,
        })
    }

    /// Allocate a new body ID
    pub fn next_body_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a fully specified body (no overlap check)
    pub fn push_body(&mut self, body: Body) {
        self.bodies.push(body);
    }

    /// Create a random body and place it where it overlaps nothing
    pub fn spawn_random_body(&mut self) -> Result<u32> {
        let id = self.next_body_id();
        let (min_w, max_w) = (self.settings.min_width, self.settings.max_width);
        let width = self.rng.random_range(min_w..max_w).floor().max(1.0);
        let radius = width / 2.0;

        let speed = self.settings.speed;
        let vx = if self.rng.random_bool(0.5) { speed } else { -speed };
        let vy = if self.rng.random_bool(0.5) { speed } else { -speed };

        let color = self.pick_color();
        let mut body = Body::new(id, Vec2::ZERO, Vec2::new(vx, vy), radius)
            .with_topology(self.settings.topology)
            .with_color(color);

        body.pos = self.find_free_position(&body)?;
        self.bodies.push(body);
        Ok(id)
    }

    fn pick_color(&mut self) -> ColorStrategy {
        match self.settings.color_mode {
            ColorMode::Palette => {
                let idx = self.rng.random_range(0..self.settings.palette.len());
                ColorStrategy::Static(self.settings.palette[idx])
            }
            ColorMode::HueShift => {
                let hue = self.rng.random_range(0.0..360.0);
                ColorStrategy::hue_shift(hue, self.settings.alpha, self.settings.hue_speed)
            }
        }
    }

    /// Retry random positions until `body` overlaps neither an obstacle nor
    /// an already placed body. The attempt budget is capped.
    fn find_free_position(&mut self, body: &Body) -> Result<Vec2> {
        let attempts = self.settings.max_placement_attempts;
        let mut candidate = body.clone();
        for _ in 0..attempts {
            candidate.pos = random_position(&mut self.rng, body.radius, &self.viewport);
            let blocked = candidate.overlaps_field(&self.field)
                || self.bodies.iter().any(|other| candidate.overlaps_body(other));
            if !blocked {
                return Ok(candidate.pos);
            }
        }
        log::warn!(
            "Gave up placing body {} after {} attempts",
            body.id,
            attempts
        );
        Err(SimError::PlacementExhausted {
            index: self.bodies.len(),
            radius: body.radius,
            attempts,
            width: self.viewport.width,
            height: self.viewport.height,
        })
    }

    /// Relocate a body to a random spot, best effort (overlap is not checked)
    pub fn relocate_body(&mut self, index: usize) {
        let radius = self.bodies[index].radius;
        let pos = random_position(&mut self.rng, radius, &self.viewport);
        let body = &mut self.bodies[index];
        log::debug!(
            "Relocating body {} from ({:.1}, {:.1}) to ({:.1}, {:.1})",
            body.id,
            body.pos.x,
            body.pos.y,
            pos.x,
            pos.y
        );
        body.pos = pos;
        body.consecutive_collisions = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn test_new_places_without_overlap() {
        let regions = [Rect::from_ltrb(200.0, 200.0, 600.0, 260.0)];
        let state = SimulationState::new(Settings::default(), viewport(), &regions).unwrap();

        assert_eq!(state.bodies.len(), 2); // 800 wide counts as narrow
        for (i, body) in state.bodies.iter().enumerate() {
            assert!(body.radius > 0.0);
            assert!(!body.overlaps_field(&state.field));
            for other in &state.bodies[i + 1..] {
                assert!(!body.overlaps_body(other));
            }
        }
    }

    #[test]
    fn test_ball_count_follows_viewport_width() {
        let wide = Viewport::new(1280.0, 720.0).unwrap();
        let state = SimulationState::new(Settings::default(), wide, &[]).unwrap();
        assert_eq!(state.bodies.len(), 10);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = SimulationState::new(Settings::default(), viewport(), &[]).unwrap();
        let b = SimulationState::new(Settings::default(), viewport(), &[]).unwrap();
        for (x, y) in a.bodies.iter().zip(&b.bodies) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
            assert_eq!(x.radius, y.radius);
        }
    }

    #[test]
    fn test_body_properties_in_range() {
        let wide = Viewport::new(1920.0, 1080.0).unwrap();
        let state = SimulationState::new(Settings::default(), wide, &[]).unwrap();
        for body in &state.bodies {
            assert!(body.width() >= 20.0 && body.width() < 80.0);
            assert_eq!(body.vel.x.abs(), 0.5);
            assert_eq!(body.vel.y.abs(), 0.5);
            assert_eq!(body.consecutive_collisions, 0);
        }
    }

    #[test]
    fn test_crowded_viewport_fails_loudly() {
        // One region covers the whole viewport: nowhere to go
        let tiny = Viewport::new(100.0, 100.0).unwrap();
        let regions = [Rect::from_ltrb(0.0, 0.0, 100.0, 100.0)];
        let settings = Settings {
            max_placement_attempts: 50,
            ..Settings::default()
        };
        let err = SimulationState::new(settings, tiny, &regions).unwrap_err();
        assert!(matches!(err, SimError::PlacementExhausted { attempts: 50, .. }));
    }

    #[test]
    fn test_sub_pixel_widths_never_reach_spawn() {
        let settings = Settings {
            min_width: 0.5,
            max_width: 0.9,
            ..Settings::default()
        };
        let wide = Viewport::new(1280.0, 720.0).unwrap();
        let err = SimulationState::new(settings, wide, &[]).unwrap_err();
        assert!(matches!(err, SimError::InvalidWidthRange { .. }));
    }

    #[test]
    fn test_random_position_is_inset() {
        let mut rng = Pcg32::seed_from_u64(7);
        let vp = viewport();
        for _ in 0..200 {
            let p = random_position(&mut rng, 15.0, &vp);
            assert!(p.x >= 30.0 && p.x <= 770.0);
            assert!(p.y >= 30.0 && p.y <= 570.0);
        }
    }

    #[test]
    fn test_random_position_small_viewport_centers() {
        let mut rng = Pcg32::seed_from_u64(7);
        let vp = Viewport::new(50.0, 600.0).unwrap();
        let p = random_position(&mut rng, 20.0, &vp);
        assert_eq!(p.x, 25.0);
    }

    #[test]
    fn test_zero_bodies_is_valid() {
        let settings = Settings {
            ball_count: 0,
            narrow_ball_count: 0,
            ..Settings::default()
        };
        let state = SimulationState::new(settings, viewport(), &[]).unwrap();
        assert!(state.bodies.is_empty());
    }
}
