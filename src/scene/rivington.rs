use super::MovedItem;
use crate::assets::{AssetKey, Assets};
use crate::engine::{Point, Rect, Renderer, Size, TextAlign};

const FIRST_SLOT_Y: f64 = 100.0;
const SLOT_GAP: f64 = 50.0;
const SCALE: f64 = 2.0;
const HOVER_SCALE: f64 = 2.2;
const FONT_SIZE: f64 = 12.0;

/// The new place. Whatever made it into the car is lined up down the middle,
/// lightest first
pub struct Rivington {
    moved: Vec<MovedItem>,
    pointer: Option<Point>,
}

impl Rivington {
    pub fn new(mut moved: Vec<MovedItem>) -> Self {
        // heaviest first then flipped, equal weights end up reversed
        moved.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        moved.reverse();
        log::info!("arrived at Rivington with {} items", moved.len());
        Rivington {
            moved,
            pointer: None,
        }
    }

    pub fn moved(&self) -> &[MovedItem] {
        &self.moved
    }

    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Unhovered slot of every item, top to bottom
    pub fn slots(&self, canvas: Size) -> Vec<(Rect, &MovedItem)> {
        let center_x = canvas.width / 2.0;
        let mut y = FIRST_SLOT_Y;
        self.moved
            .iter()
            .map(|item| {
                let slot = Rect::centered_on(Point::new(center_x, y), item.size.scaled(SCALE));
                y += item.size.height * SCALE + SLOT_GAP;
                (slot, item)
            })
            .collect()
    }

    fn is_hovered(&self, slot: &Rect) -> bool {
        // strict, the pointer resting on an edge is not a hover
        self.pointer.is_some_and(|pointer| {
            pointer.x > slot.x && pointer.x < slot.right() && pointer.y > slot.y && pointer.y < slot.bottom()
        })
    }

    pub fn hovered(&self, canvas: Size) -> Option<&MovedItem> {
        self.slots(canvas)
            .into_iter()
            .find(|(slot, _)| self.is_hovered(slot))
            .map(|(_, item)| item)
    }

    pub fn draw(&self, renderer: &Renderer, assets: &Assets, canvas: Size) {
        renderer.fill(&Rect::from_parts(Point::default(), canvas), "lightblue");

        for (slot, item) in self.slots(canvas) {
            let hovered = self.is_hovered(&slot);
            let scale = if hovered { HOVER_SCALE } else { SCALE };
            if let Some(image) = assets.image(AssetKey::Item(item.kind)) {
                renderer.draw_image(image, &Rect::centered_on(slot.center(), item.size.scaled(scale)));
            }
            if hovered {
                let x = canvas.width / 2.0;
                renderer.draw_text(item.name(), Point::new(x, canvas.height - 100.0), FONT_SIZE, "black", TextAlign::Center);
                renderer.draw_text(
                    item.description(),
                    Point::new(x, canvas.height - 50.0),
                    FONT_SIZE,
                    "black",
                    TextAlign::Center,
                );
            }
        }
    }
}
