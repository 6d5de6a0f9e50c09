//! Collision response: flip velocity components, count repeats, unstick
//!
//! A body that keeps colliding tick after tick is usually wedged between two
//! obstacles or bouncing back and forth against another body. Past
//! `stuck_threshold` consecutive collisions it is teleported to a random spot.
//! The new spot is not checked for overlap; the next detection pass sorts it out.

use super::collision::CollisionOutcome;
use super::state::{CollisionEvent, SimulationState};

/// What the resolver did to a body this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Wave requests: the body's center, plus the other body's for body-body hits
    pub events: Vec<CollisionEvent>,
    /// The body was teleported out of a wedge
    pub relocated: bool,
}

/// Apply `outcome` to `state.bodies[index]`
pub fn resolve(
    state: &mut SimulationState,
    index: usize,
    outcome: Option<CollisionOutcome>,
) -> Resolution {
    let mut resolution = Resolution::default();

    let Some(outcome) = outcome else {
        state.bodies[index].consecutive_collisions = 0;
        return resolution;
    };

    let body = &mut state.bodies[index];
    flip_axes(&mut body.vel, &outcome);
    body.consecutive_collisions += 1;
    resolution.events.push(CollisionEvent {
        body_id: body.id,
        pos: body.pos,
        radius: body.radius,
        color: body.color.color(),
    });

    // Mutual response: the other body bounces on the same axes
    if let Some(other_index) = outcome.other_body {
        let other = &mut state.bodies[other_index];
        flip_axes(&mut other.vel, &outcome);
        resolution.events.push(CollisionEvent {
            body_id: other.id,
            pos: other.pos,
            radius: other.radius,
            color: other.color.color(),
        });
    }

    if state.bodies[index].consecutive_collisions > state.settings.stuck_threshold {
        state.relocate_body(index);
        resolution.relocated = true;
    }

    resolution
}

#[inline]
fn flip_axes(vel: &mut glam::Vec2, outcome: &CollisionOutcome) {
    if outcome.x_hit {
        vel.x = -vel.x;
    }
    if outcome.y_hit {
        vel.y = -vel.y;
    }
}
