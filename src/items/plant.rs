use crate::engine::{Point, Rect, Size};
use crate::items::ItemKind;
use crate::liftable::{InteractionArea, Liftable, Motion};
use serde::{Deserialize, Serialize};

const POT_WIDTH: f64 = 45.0;
const POT_HEIGHT: f64 = 30.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PlantKind {
    BirdOfParadise,
    Snake,
}

pub struct Plant {
    motion: Motion,
    plant_kind: PlantKind,
    size: Size,
}

impl Plant {
    pub fn new(position: Point, plant_kind: PlantKind, size: Size) -> Self {
        Plant {
            motion: Motion::new(position, ItemKind::Plant(plant_kind).weight()),
            plant_kind,
            size,
        }
    }
}

impl InteractionArea for Plant {
    // leaves hang over everything, only the pot bumps into things
    fn collision_bounds(&self) -> Rect {
        let position = self.motion.position();
        Rect::new(
            position.x + (self.size.width - POT_WIDTH) / 2.0,
            position.y + self.size.height - POT_HEIGHT,
            POT_WIDTH,
            POT_HEIGHT,
        )
    }
}

impl Liftable for Plant {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Plant(self.plant_kind)
    }

    fn size(&self) -> Size {
        self.size
    }
}
