//! Render extraction
//!
//! Flattens a `SimulationState` into a list of circles for whatever is doing
//! the drawing (canvas 2D on the web). Wrap-around bodies straddling an edge
//! are emitted once per visible copy.

use glam::Vec2;

use crate::sim::color::Color;
use crate::sim::state::SimulationState;

/// How a circle is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Fill,
    Stroke,
}

/// One circle to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCircle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub paint: Paint,
}

/// Everything to draw for one frame, back to front
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub width: f32,
    pub height: f32,
    pub circles: Vec<DrawCircle>,
}

impl RenderFrame {
    /// Bodies first (filled), then waves (stroked)
    pub fn extract(state: &SimulationState) -> Self {
        let viewport = &state.viewport;
        let mut circles = Vec::with_capacity(state.bodies.len() + state.waves.len());

        for body in &state.bodies {
            let color = body.color.color();
            for center in body.topology.render_positions(body.pos, body.radius, viewport) {
                circles.push(DrawCircle {
                    center,
                    radius: body.radius,
                    color,
                    paint: Paint::Fill,
                });
            }
        }

        for wave in &state.waves {
            circles.push(DrawCircle {
                center: wave.pos,
                radius: wave.radius,
                color: wave.draw_color(),
                paint: Paint::Stroke,
            });
        }

        Self {
            width: viewport.width,
            height: viewport.height,
            circles,
        }
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCircle> {
        self.circles.iter().filter(|c| c.paint == Paint::Fill)
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawCircle> {
        self.circles.iter().filter(|c| c.paint == Paint::Stroke)
    }
}
