//! Collision detection with axis-separated probing
//!
//! To decide how a body should bounce, it is nudged along X only and tested,
//! then along Y only and tested. Each axis that would overlap is reported
//! separately, so a diagonal approach into a vertical wall flips only `vx`.
//!
//! Candidates are scanned obstacles first, then bodies in index order, and
//! the first hit wins (not the nearest).

use glam::Vec2;

use super::geometry::Viewport;
use super::obstacle::ObstacleField;
use super::state::Body;

/// Which axes of a one-step move would collide, and with what
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub x_hit: bool,
    pub y_hit: bool,
    /// Index of the other body for body-body hits; `None` for obstacles
    pub other_body: Option<usize>,
}

impl CollisionOutcome {
    fn from_axes(x_hit: bool, y_hit: bool, other_body: Option<usize>) -> Option<Self> {
        (x_hit || y_hit).then_some(Self {
            x_hit,
            y_hit,
            other_body,
        })
    }
}

/// Circle vs circle; touching counts as a hit
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    crate::distance_squared(a, b) <= reach * reach
}

/// Probe each axis: displace by `step` along that axis only and ask `hits`
#[inline]
fn probe_axes(pos: Vec2, step: Vec2, mut hits: impl FnMut(Vec2) -> bool) -> (bool, bool) {
    let x_hit = hits(pos + Vec2::new(step.x, 0.0));
    let y_hit = hits(pos + Vec2::new(0.0, step.y));
    (x_hit, y_hit)
}

/// Test whether advancing `bodies[index]` by `vel * step_scale` collides.
///
/// Obstacles are tested at the body's own position only. Wrap-around bodies
/// skip walls and are additionally tested against other bodies at their
/// shadow positions while near the right/bottom edge.
pub fn detect(
    index: usize,
    bodies: &[Body],
    field: &ObstacleField,
    viewport: &Viewport,
    step_scale: f32,
) -> Option<CollisionOutcome> {
    let body = &bodies[index];
    let step = body.vel * step_scale;
    let skip_walls = body.topology.ignores_walls();

    for obstacle in field.obstacles() {
        if skip_walls && obstacle.is_wall {
            continue;
        }
        let (x_hit, y_hit) = probe_axes(body.pos, step, |p| {
            obstacle.rect.overlaps_circle(p, body.radius)
        });
        if let Some(outcome) = CollisionOutcome::from_axes(x_hit, y_hit, None) {
            return Some(outcome);
        }
    }

    let shadows = body.topology.shadow_offsets(body.pos, body.radius, viewport);
    for (other_index, other) in bodies.iter().enumerate() {
        if other_index == index {
            continue;
        }
        let (x_hit, y_hit) = probe_axes(body.pos, step, |p| {
            circles_overlap(p, body.radius, other.pos, other.radius)
                || shadows
                    .iter()
                    .any(|offset| circles_overlap(p + *offset, body.radius, other.pos, other.radius))
        });
        if let Some(outcome) = CollisionOutcome::from_axes(x_hit, y_hit, Some(other_index)) {
            return Some(outcome);
        }
    }

    None
}
