use super::MovedItem;
use crate::assets::{AssetKey, Assets};
use crate::engine::{self, Point, Rect, Renderer, Size};
use crate::items::ItemKind;
use crate::liftable::Direction;
use crate::sprite::Pose;
use rand::rngs::SmallRng;
use rand::Rng;

// pixel offsets the car rides over, one step every FRAME_DELAY frames
const BOUNCE_HEIGHTS: [f64; 8] = [0.0, -1.0, -3.0, -1.0, -3.0, -2.0, -1.0, -3.0];
const FRAME_DELAY: u64 = 10;
const CARRIER_SCALE: f64 = 2.0;
const CAR_SCALE: f64 = 3.0;

/// Driving cutscene between the two apartments, carries the load along
pub struct MoveSkit<R = SmallRng> {
    moved: Vec<MovedItem>,
    started: f64,
    duration: f64,
    frame: u64,
    bounce: f64,
    rng: R,
}

impl<R: Rng> MoveSkit<R> {
    pub fn new(moved: Vec<MovedItem>, now: f64, duration: f64, rng: R) -> Self {
        MoveSkit {
            moved,
            started: now,
            duration,
            frame: 0,
            bounce: 0.0,
            rng,
        }
    }

    pub fn moved(&self) -> &[MovedItem] {
        &self.moved
    }

    pub fn into_moved(self) -> Vec<MovedItem> {
        self.moved
    }

    pub fn bounce(&self) -> f64 {
        self.bounce
    }

    /// Advances the bounce, true once the ride is over
    pub fn update(&mut self, now: f64) -> bool {
        if self.frame % FRAME_DELAY == 0 {
            let step = (self.frame / FRAME_DELAY) as usize % BOUNCE_HEIGHTS.len();
            self.bounce = BOUNCE_HEIGHTS[step] + self.rng.gen_range(-1..=1) as f64;
        }
        self.frame += 1;
        now - self.started >= self.duration
    }

    pub fn draw(&self, renderer: &Renderer, assets: &Assets, canvas: Size) {
        if let Some(street) = assets.image(AssetKey::Street) {
            let center = Point::new(canvas.width / 2.0, canvas.height / 2.0);
            let size = cover(canvas, engine::image_size(street));
            renderer.draw_image(street, &Rect::centered_on(center, size));
        }

        if let Some(carrier) = assets.image(AssetKey::Sprite(Pose::Standing(Direction::Right))) {
            let size = engine::image_size(carrier);
            renderer.draw_image(
                carrier,
                &Rect::from_parts(
                    Point::new(
                        canvas.width / 2.0 - size.width - 20.0,
                        canvas.height - size.height * 3.0 + self.bounce,
                    ),
                    size.scaled(CARRIER_SCALE),
                ),
            );
        }

        if let Some(car) = assets.image(AssetKey::Item(ItemKind::Tike)) {
            let size = engine::image_size(car);
            renderer.draw_image(
                car,
                &Rect::from_parts(
                    Point::new(
                        canvas.width / 2.0 - size.width * CAR_SCALE / 2.0,
                        canvas.height - size.height * 2.7 + self.bounce,
                    ),
                    size.scaled(CAR_SCALE),
                ),
            );
        }
    }
}

/// Smallest size with the image's aspect ratio that covers the canvas
pub fn cover(canvas: Size, image: Size) -> Size {
    if image.width <= 0.0 || image.height <= 0.0 {
        return canvas;
    }
    let canvas_ratio = canvas.width / canvas.height;
    let image_ratio = image.width / image.height;
    if image_ratio > canvas_ratio {
        Size::new(canvas.height * image_ratio, canvas.height)
    } else {
        Size::new(canvas.width, canvas.width / image_ratio)
    }
}
