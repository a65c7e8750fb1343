//! Runs in a headless browser: `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use moving_day::bay::{format_reading, CargoBay};
use moving_day::engine::{Point, Rect, Size};
use moving_day::items::{Carton, CartonSize};
use moving_day::liftable::{Direction, InteractionArea, Items, Liftable, Obstacle, Phase};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::rc::Rc;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn thrown_carton_settles_against_a_wall() {
    let mut items = Items::new();
    let id = items.insert(Carton::new(Point::new(100.0, 100.0), CartonSize::Small, Size::new(60.0, 60.0)));
    let wall = Rect::new(200.0, 0.0, 20.0, 400.0);
    items
        .get_mut(id)
        .unwrap()
        .set_obstacles(Rc::from(vec![Obstacle::Area(wall)]));

    let carton = items.get_mut(id).unwrap();
    carton.lift();
    carton.drop_toward(Direction::Right);
    for _ in 0..200 {
        items.update_all();
    }
    let carton = items.get(id).unwrap();
    assert_eq!(carton.phase(), Phase::Resting);
    assert!(carton.collision_bounds().right() <= wall.x);
}

#[wasm_bindgen_test]
fn bay_calibrates_on_the_browser_clock() {
    let mut items = Items::new();
    let id = items.insert(Carton::new(Point::new(10.0, 10.0), CartonSize::Medium, Size::new(60.0, 60.0)));
    let region = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut bay = CargoBay::new(region, Rc::from(vec![id]), &items, SmallRng::seed_from_u64(1));

    let start = js_sys::Date::now();
    let reading = bay.display_weight(&items, start);
    assert_eq!(format_reading(reading), "20.8");
    assert_eq!(bay.display_weight(&items, start + 600.0), bay.true_weight(&items));
}
