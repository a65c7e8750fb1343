use crate::engine::{Point, Rect, Size};
use crate::items::ItemKind;
use crate::liftable::{InteractionArea, Liftable, Motion};

/// The car. Liftable like everything else, as long as the bay is not full
pub struct Tike {
    motion: Motion,
    size: Size,
}

impl Tike {
    pub fn new(position: Point, size: Size) -> Self {
        Tike {
            motion: Motion::new(position, ItemKind::Tike.weight()),
            size,
        }
    }
}

impl InteractionArea for Tike {
    fn collision_bounds(&self) -> Rect {
        let position = self.motion.position();
        Rect::new(
            position.x + self.size.width / 8.0,
            position.y + self.size.height / 4.0,
            self.size.width * 0.75,
            self.size.height / 2.0,
        )
    }
}

impl Liftable for Tike {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Tike
    }

    fn size(&self) -> Size {
        self.size
    }
}
