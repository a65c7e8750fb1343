use crate::engine::Rect;
use crate::liftable::{InteractionArea, Obstacle};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Wall {
    bounds: Rect,
}

impl Wall {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Wall {
            bounds: Rect::new(x, y, width, height),
        }
    }

    /// Picks the horizontal or vertical brick image
    pub fn orientation(&self) -> Orientation {
        if self.bounds.width > self.bounds.height {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    pub fn as_obstacle(&self) -> Obstacle {
        Obstacle::Area(self.bounds)
    }
}

impl InteractionArea for Wall {
    fn collision_bounds(&self) -> Rect {
        self.bounds
    }
}
