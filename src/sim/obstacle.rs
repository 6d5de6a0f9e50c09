//! Static obstacles: page regions plus screen-edge walls
//!
//! The field is an immutable snapshot. A resize builds a brand new field
//! and swaps it in between ticks; there is no partial update path.

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Viewport};
use crate::consts::WALL_MARGIN;

/// A static rectangle bodies bounce off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Screen-edge obstacle (ignored by wrap-around bodies)
    pub is_wall: bool,
}

impl Obstacle {
    pub fn region(rect: Rect) -> Self {
        Self {
            rect,
            is_wall: false,
        }
    }

    pub fn wall(rect: Rect) -> Self {
        Self {
            rect,
            is_wall: true,
        }
    }
}

/// Snapshot of every obstacle for one viewport size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    pub viewport: Viewport,
    /// External regions first, then the four walls (top, bottom, left, right)
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Build the field for a viewport. Walls sit `WALL_MARGIN` outside each
    /// edge so a body can only reach them from the inward face.
    pub fn build(viewport: Viewport, regions: &[Rect]) -> Self {
        let (w, h) = (viewport.width, viewport.height);
        let mut obstacles: Vec<Obstacle> = regions.iter().copied().map(Obstacle::region).collect();
        obstacles.extend([
            Obstacle::wall(Rect::from_ltrb(0.0, -WALL_MARGIN, w, 0.0)),
            Obstacle::wall(Rect::from_ltrb(0.0, h, w, h + WALL_MARGIN)),
            Obstacle::wall(Rect::from_ltrb(-WALL_MARGIN, 0.0, 0.0, h)),
            Obstacle::wall(Rect::from_ltrb(w, 0.0, w + WALL_MARGIN, h)),
        ]);
        Self {
            viewport,
            obstacles,
        }
    }

    /// Field with no obstacles at all, not even walls
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            viewport,
            obstacles: Vec::new(),
        }
    }

    /// Obstacles in scan order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn walls(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.is_wall)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| !o.is_wall)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
