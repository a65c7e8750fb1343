use crate::engine::{Point, Rect, Size};
use crate::items::ItemKind;
use crate::liftable::{InteractionArea, Liftable, Motion};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CartonSize {
    Small,
    Medium,
    Large,
}

/// A moving box
pub struct Carton {
    motion: Motion,
    carton_size: CartonSize,
    size: Size,
}

impl Carton {
    pub fn new(position: Point, carton_size: CartonSize, size: Size) -> Self {
        Carton {
            motion: Motion::new(position, ItemKind::Carton(carton_size).weight()),
            carton_size,
            size,
        }
    }
}

impl InteractionArea for Carton {
    // the box art has a drop shadow and open flaps around the actual box
    fn collision_bounds(&self) -> Rect {
        let position = self.motion.position();
        Rect::new(
            position.x + self.size.width / 6.0,
            position.y + self.size.height / 6.0,
            self.size.width / 2.0,
            self.size.height / 2.0,
        )
    }
}

impl Liftable for Carton {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Carton(self.carton_size)
    }

    fn size(&self) -> Size {
        self.size
    }
}
