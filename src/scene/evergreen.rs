use super::dialog::Dialog;
use super::MovedItem;
use crate::assets::{AssetKey, Assets, Dimensions};
use crate::bay::{self, CargoBay, BAY_HEIGHT, BAY_WIDTH, WEIGHT_LIMIT};
use crate::engine::{Point, Rect, Renderer, Size, TextAlign};
use crate::items::{Carton, CartonSize, Chest, ItemKind, Orientation, Plant, PlantKind, Tike, Wall};
use crate::liftable::{Direction, InteractionArea, Items, Liftable, LiftableId, Obstacle, ObstacleList};
use crate::sprite::{Carrier, Controls, Pose};
use rand::rngs::SmallRng;
use std::rc::Rc;

const WALL_THICKNESS: f64 = 20.0;
// gap in the right wall the bay sits in
const DOORWAY_HALF_HEIGHT: f64 = 100.0;
const BAY_WALL_THICKNESS: f64 = 10.0;
const READING_SIZE: f64 = 10.0;
const READING_COLOR: &str = "rgb(74, 246, 38)";
const OVERWEIGHT_COLOR: &str = "red";

/// The old apartment. Owns every item, the carrier only borrows them by id
pub struct Evergreen {
    canvas: Size,
    walls: Vec<Wall>,
    items: Items,
    tike: LiftableId,
    carrier: Carrier,
    bay: CargoBay,
    reading: f64,
    dialog: Dialog,
}

impl Evergreen {
    pub fn new(canvas: Size, dimensions: &Dimensions, rng: SmallRng) -> Self {
        let center = Point::new(canvas.width / 2.0, canvas.height / 2.0);
        let at = |dx: f64, dy: f64| Point::new(center.x + dx, center.y + dy);
        let carton = |dx: f64, dy: f64, size: CartonSize| {
            Carton::new(at(dx, dy), size, dimensions.item(ItemKind::Carton(size)))
        };

        let mut items = Items::new();
        for (dx, dy) in [(40.0, -170.0), (100.0, -215.0), (40.0, -215.0), (100.0, -170.0)] {
            items.insert(carton(dx, dy, CartonSize::Medium));
        }
        items.insert(carton(70.0, -275.0, CartonSize::Large));
        items.insert(carton(50.0, 175.0, CartonSize::Small));
        items.insert(Chest::new(at(-200.0, -210.0), dimensions.item(ItemKind::Chest)));
        for (dx, dy, kind) in [
            (-40.0, -200.0, PlantKind::Snake),
            (-300.0, -280.0, PlantKind::BirdOfParadise),
        ] {
            items.insert(Plant::new(at(dx, dy), kind, dimensions.item(ItemKind::Plant(kind))));
        }
        let tike = items.insert(Tike::new(at(-320.0, 120.0), dimensions.item(ItemKind::Tike)));

        let mut carrier = Carrier::new(
            at(-100.0, 150.0),
            dimensions.get(AssetKey::Sprite(Pose::Standing(Direction::Down))),
        );
        carrier.set_liftables(items.ids().collect());

        // the car never counts towards the load
        let monitored: Rc<[LiftableId]> = items.ids().filter(|id| *id != tike).collect();
        let bay = CargoBay::new(CargoBay::<SmallRng>::region_for(canvas), monitored, &items, rng);
        let reading = bay.true_weight(&items);

        let mut scene = Evergreen {
            canvas,
            walls: Vec::new(),
            items,
            tike,
            carrier,
            bay,
            reading,
            dialog: Dialog::default(),
        };
        scene.resize(canvas);
        scene
    }

    /// Four walls with a doorway on the right where the bay is
    pub fn walls_for(canvas: Size) -> Vec<Wall> {
        let Size { width, height } = canvas;
        vec![
            Wall::new(0.0, 0.0, WALL_THICKNESS, height),
            Wall::new(width - WALL_THICKNESS, 0.0, WALL_THICKNESS, height / 2.0 - DOORWAY_HALF_HEIGHT),
            // outside the canvas, stops things flying off through the doorway
            Wall::new(
                width + WALL_THICKNESS,
                height / 2.0 - DOORWAY_HALF_HEIGHT,
                WALL_THICKNESS,
                DOORWAY_HALF_HEIGHT * 2.0,
            ),
            Wall::new(
                width - WALL_THICKNESS,
                height / 2.0 + DOORWAY_HALF_HEIGHT,
                WALL_THICKNESS,
                height / 2.0,
            ),
            Wall::new(0.0, 0.0, width, WALL_THICKNESS),
            Wall::new(0.0, height - WALL_THICKNESS, width, WALL_THICKNESS),
        ]
    }

    /// Rebuilds the walls and hands one fresh obstacle list to everybody
    pub fn resize(&mut self, canvas: Size) {
        self.canvas = canvas;
        self.walls = Self::walls_for(canvas);

        let obstacles: ObstacleList = self
            .walls
            .iter()
            .map(Wall::as_obstacle)
            .chain(self.items.ids().map(Obstacle::Liftable))
            .collect();
        self.carrier.set_obstacles(obstacles.clone());
        let ids: Vec<LiftableId> = self.items.ids().collect();
        for id in ids {
            if let Some(item) = self.items.get_mut(id) {
                item.set_obstacles(obstacles.clone());
            }
        }
        self.bay.set_region(CargoBay::<SmallRng>::region_for(canvas));
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn items(&self) -> &Items {
        &self.items
    }

    pub fn carrier(&self) -> &Carrier {
        &self.carrier
    }

    pub fn bay(&self) -> &CargoBay {
        &self.bay
    }

    pub fn reading(&self) -> f64 {
        self.reading
    }

    /// Loaded bay, empty hands, next to the car
    fn ready_to_leave(&self, now: f64) -> bool {
        self.carrier.held().is_none()
            && !self.carrier.has_interacted_recently(now)
            && self.bay.is_overweight(&self.items)
            && self
                .items
                .get(self.tike)
                .is_some_and(|tike| tike.is_nearby(self.carrier.reach_point()))
    }

    fn departing(&self) -> Vec<MovedItem> {
        self.bay
            .liftables_in_bay(&self.items)
            .into_iter()
            .filter_map(|id| self.items.get(id))
            .map(MovedItem::from_liftable)
            .collect()
    }

    /// ::update per tick, returns the load once the car leaves
    /// - the car cannot be picked up while the bay is overweight
    /// - the bay is sampled exactly once, draw only reads `reading`
    pub fn update(&mut self, controls: &Controls, space_down: bool, now: f64) -> Option<Vec<MovedItem>> {
        if controls.interact && self.ready_to_leave(now) {
            let moved = self.departing();
            log::info!("leaving Evergreen with {} items ({:.1})", moved.len(), self.reading);
            return Some(moved);
        }

        let overweight = self.bay.is_overweight(&self.items);
        let tike = self.tike;
        let excluded = move |id: LiftableId| overweight && id == tike;
        self.carrier
            .handle_input(controls, &mut self.items, now, &excluded);
        self.carrier.update(&mut self.items);
        self.items.update_all();
        self.reading = self.bay.display_weight(&self.items, now);

        self.dialog.handle_input(space_down);
        self.dialog.update(now);
        None
    }

    pub fn draw(&self, renderer: &Renderer, assets: &Assets) {
        renderer.fill(&Rect::from_parts(Point::default(), self.canvas), "white");

        for wall in &self.walls {
            if let Some(image) = assets.image(AssetKey::Wall(wall.orientation())) {
                renderer.draw_image(image, &wall.collision_bounds());
            }
        }
        self.draw_bay(renderer, assets);

        // whatever is in the air goes over the carrier
        for (_, item) in self.items.iter().filter(|(_, item)| !item.is_airborne()) {
            draw_item(renderer, assets, item);
        }
        if let Some(image) = assets.image(AssetKey::Sprite(self.carrier.pose())) {
            renderer.draw_image(image, &self.carrier.bounding_box());
        }
        for (_, item) in self.items.iter().filter(|(_, item)| item.is_airborne()) {
            draw_item(renderer, assets, item);
        }

        self.dialog.draw(renderer, self.canvas);
    }

    fn draw_bay(&self, renderer: &Renderer, assets: &Assets) {
        let region = self.bay.region();
        let middle = Point::new(region.x + BAY_WIDTH / 2.0, region.y + BAY_HEIGHT / 2.0);
        let y_offset = (BAY_HEIGHT + BAY_WALL_THICKNESS) / 2.0;
        let x_offset = (BAY_WIDTH + BAY_WALL_THICKNESS) / 2.0;
        let horizontal = Size::new(BAY_WIDTH, BAY_WALL_THICKNESS);

        if let Some(image) = assets.image(AssetKey::BayWall(Orientation::Horizontal)) {
            for dy in [-y_offset, y_offset] {
                let center = Point::new(middle.x, middle.y + dy);
                renderer.draw_image(image, &Rect::centered_on(center, horizontal));
            }
        }
        if let Some(image) = assets.image(AssetKey::BayWall(Orientation::Vertical)) {
            let center = Point::new(middle.x - x_offset, middle.y);
            let size = Size::new(BAY_WALL_THICKNESS, BAY_HEIGHT);
            renderer.draw_image(image, &Rect::centered_on(center, size));
        }

        let Some(display) = assets.image(AssetKey::BayDisplay) else {
            return;
        };
        let display_size = crate::engine::image_size(display);
        let center = Point::new(middle.x + 20.0, middle.y - BAY_HEIGHT / 1.65);
        renderer.draw_image(display, &Rect::centered_on(center, display_size));

        let color = if self.reading > WEIGHT_LIMIT {
            OVERWEIGHT_COLOR
        } else {
            READING_COLOR
        };
        renderer.draw_text(
            &bay::format_reading(self.reading),
            Point::new(middle.x + display_size.width / 2.55, middle.y - BAY_HEIGHT / 1.58),
            READING_SIZE,
            color,
            TextAlign::Center,
        );
    }
}

fn draw_item(renderer: &Renderer, assets: &Assets, item: &dyn Liftable) {
    if let Some(image) = assets.image(AssetKey::Item(item.kind())) {
        renderer.draw_image(image, &Rect::from_parts(item.position(), item.size()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liftable::Phase;
    use rand::SeedableRng;

    const CANVAS: Size = Size {
        width: 1200.0,
        height: 800.0,
    };

    // every image falls back to 32x32
    fn scene() -> Evergreen {
        Evergreen::new(CANVAS, &Dimensions::default(), SmallRng::seed_from_u64(3))
    }

    fn interact() -> Controls {
        Controls {
            interact: true,
            ..Controls::default()
        }
    }

    // carrier whose reach point is the car's bounds center
    fn stand_at_the_car(scene: &mut Evergreen) {
        let target = scene.items.get(scene.tike).unwrap().collision_bounds_center();
        let mut carrier = Carrier::new(
            Point::new(target.x - 12.8, target.y - 12.8),
            Size::new(32.0, 32.0),
        );
        carrier.set_liftables(scene.items.ids().collect());
        scene.carrier = carrier;
    }

    // pins everything but the car inside the bay
    fn load_the_bay(scene: &mut Evergreen) {
        let ids: Vec<LiftableId> = scene.items.ids().filter(|id| *id != scene.tike).collect();
        for (i, id) in ids.into_iter().enumerate() {
            let item = scene.items.get_mut(id).unwrap();
            item.lift();
            item.follow_sprite(Point::new(1000.0, 220.0 + i as f64 * 30.0));
        }
    }

    #[test]
    fn starts_with_an_empty_bay() {
        let scene = scene();
        assert_eq!(scene.items.len(), 10);
        assert_eq!(scene.bay.true_weight(&scene.items), 0.0);
        assert_eq!(scene.reading(), 0.0);
        assert!(scene.items.iter().all(|(_, item)| item.phase() == Phase::Resting));
    }

    #[test]
    fn walls_leave_a_doorway_on_the_right() {
        let walls = Evergreen::walls_for(CANVAS);
        assert_eq!(walls.len(), 6);
        assert_eq!(walls[1].collision_bounds(), Rect::new(1180.0, 0.0, 20.0, 300.0));
        assert_eq!(walls[3].collision_bounds(), Rect::new(1180.0, 500.0, 20.0, 400.0));
        let doorway = Point::new(1190.0, 400.0);
        assert!(walls.iter().all(|wall| !wall.collision_bounds().contains(doorway)));
    }

    #[test]
    fn resize_replaces_every_obstacle_list() {
        let mut scene = scene();
        let bigger = Size::new(1400.0, 900.0);
        scene.resize(bigger);

        assert_eq!(scene.bay.region(), CargoBay::<SmallRng>::region_for(bigger));
        let right_wall = Obstacle::Area(Rect::new(1380.0, 0.0, 20.0, 350.0));
        for (_, item) in scene.items.iter() {
            assert_eq!(item.obstacles().len(), 16);
            assert_eq!(item.obstacles()[1], right_wall);
        }
    }

    #[test]
    fn the_car_lifts_like_anything_else_when_the_bay_is_light() {
        let mut scene = scene();
        stand_at_the_car(&mut scene);
        assert_eq!(scene.update(&interact(), false, 1000.0), None);
        assert_eq!(scene.carrier.held(), Some(scene.tike));
    }

    #[test]
    fn overweight_bay_and_the_car_means_leaving() {
        let mut scene = scene();
        load_the_bay(&mut scene);
        stand_at_the_car(&mut scene);
        assert!(scene.bay.is_overweight(&scene.items));

        let moved = scene.update(&interact(), false, 1000.0).unwrap();
        assert_eq!(moved.len(), 9);
        assert!(moved.iter().all(|item| item.kind != ItemKind::Tike));
        let total: f64 = moved.iter().map(|item| item.weight).sum();
        assert!(total > WEIGHT_LIMIT);
    }

    #[test]
    fn no_leaving_without_interacting() {
        let mut scene = scene();
        load_the_bay(&mut scene);
        stand_at_the_car(&mut scene);
        assert_eq!(scene.update(&Controls::default(), false, 1000.0), None);
    }

    #[test]
    fn reading_is_sampled_on_update() {
        let mut scene = scene();
        load_the_bay(&mut scene);
        scene.update(&Controls::default(), false, 1000.0);
        // calibration snaps to the new weight first
        assert_eq!(scene.reading(), scene.bay.true_weight(&scene.items));
        assert!(scene.bay.is_calibrating());
    }
}
