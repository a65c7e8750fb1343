use crate::engine::{Point, Rect, Size};
use crate::items::ItemKind;
use crate::liftable::{InteractionArea, Liftable, Motion};

pub struct Chest {
    motion: Motion,
    size: Size,
}

impl Chest {
    pub fn new(position: Point, size: Size) -> Self {
        Chest {
            motion: Motion::new(position, ItemKind::Chest.weight()),
            size,
        }
    }
}

impl InteractionArea for Chest {
    fn collision_bounds(&self) -> Rect {
        Rect::from_parts(self.motion.position(), self.size)
    }
}

impl Liftable for Chest {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Chest
    }

    fn size(&self) -> Size {
        self.size
    }
}
