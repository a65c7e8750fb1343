// Concrete things that sit in the apartment. Every liftable here holds a
// Motion and only decides the shape of its own collision bounds :
//
// ┌──────────┬────────┬──────────────────────────────────────────────┐
// │ item     │ weight │ collision bounds (image w x h at x, y)       │
// ├──────────┼────────┼──────────────────────────────────────────────┤
// │ carton   │ 5.0    │ x + w/6, y + h/6, w/2, h/2 (small)           │
// │          │ 20.8   │ (medium)                                     │
// │          │ 8.5    │ (large, lots of air in there)                │
// │ chest    │ 40.5   │ whole image                                  │
// │ plant    │ 4.8    │ the 45 x 30 pot at the bottom (bird)         │
// │          │ 2.3    │ (snake)                                      │
// │ tike     │ 60.0   │ body of the car, wheels and roof excluded    │
// └──────────┴────────┴──────────────────────────────────────────────┘
mod carton;
mod chest;
mod plant;
mod tike;
mod wall;

pub use self::carton::{Carton, CartonSize};
pub use self::chest::Chest;
pub use self::plant::{Plant, PlantKind};
pub use self::tike::Tike;
pub use self::wall::{Orientation, Wall};

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ItemKind {
    Carton(CartonSize),
    Chest,
    Plant(PlantKind),
    Tike,
}

impl ItemKind {
    pub fn weight(&self) -> f64 {
        match self {
            ItemKind::Carton(CartonSize::Small) => 5.0,
            ItemKind::Carton(CartonSize::Medium) => 20.8,
            ItemKind::Carton(CartonSize::Large) => 8.5,
            ItemKind::Chest => 40.5,
            ItemKind::Plant(PlantKind::BirdOfParadise) => 4.8,
            ItemKind::Plant(PlantKind::Snake) => 2.3,
            ItemKind::Tike => 60.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Carton(CartonSize::Small) => "Small Box",
            ItemKind::Carton(CartonSize::Medium) => "Box",
            ItemKind::Carton(CartonSize::Large) => "Big Box",
            ItemKind::Chest => "Chest",
            ItemKind::Plant(PlantKind::BirdOfParadise) => "Bird of Paradise",
            ItemKind::Plant(PlantKind::Snake) => "Snake Plant",
            ItemKind::Tike => "Tike",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ItemKind::Carton(CartonSize::Small) => "Cables, probably",
            ItemKind::Carton(CartonSize::Medium) => "Books nobody will read again",
            ItemKind::Carton(CartonSize::Large) => "Pillows and a lamp shade",
            ItemKind::Chest => "Found on the curb, kept for years",
            ItemKind::Plant(PlantKind::BirdOfParadise) => "Good for shade",
            ItemKind::Plant(PlantKind::Snake) => "Good for poking things",
            ItemKind::Tike => "Gets there eventually",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Point, Rect, Size};
    use crate::liftable::{InteractionArea, Liftable};
    use approx::assert_relative_eq;

    #[test]
    fn carton_bounds_are_inset_by_a_sixth() {
        let carton = Carton::new(Point::new(60.0, 120.0), CartonSize::Medium, Size::new(60.0, 30.0));
        assert_eq!(carton.collision_bounds(), Rect::new(70.0, 125.0, 30.0, 15.0));
        assert_relative_eq!(carton.weight(), 20.8);
    }

    #[test]
    fn plant_bounds_are_the_pot() {
        let plant = Plant::new(Point::new(0.0, 0.0), PlantKind::Snake, Size::new(65.0, 100.0));
        assert_eq!(plant.collision_bounds(), Rect::new(10.0, 70.0, 45.0, 30.0));
        assert_eq!(plant.name(), "Snake Plant");
    }

    #[test]
    fn chest_bounds_are_the_image() {
        let chest = Chest::new(Point::new(5.0, 6.0), Size::new(40.0, 30.0));
        assert_eq!(chest.collision_bounds(), Rect::new(5.0, 6.0, 40.0, 30.0));
        assert_relative_eq!(chest.weight(), 40.5);
    }

    #[test]
    fn held_carton_tracks_with_its_bounds_origin() {
        let mut carton = Carton::new(Point::new(0.0, 0.0), CartonSize::Small, Size::new(60.0, 60.0));
        carton.lift();
        carton.follow_sprite(Point::new(300.0, 200.0));
        assert_eq!(carton.collision_bounds().position(), Point::new(300.0, 200.0));
        assert_eq!(carton.position(), Point::new(290.0, 190.0));
    }

    #[test]
    fn nearby_is_inclusive_at_the_threshold() {
        // bounds center at (25, 25)
        let carton = Carton::new(Point::new(0.0, 0.0), CartonSize::Small, Size::new(60.0, 60.0));
        assert!(carton.is_nearby(Point::new(125.0, 25.0)));
        assert!(!carton.is_nearby(Point::new(125.0001, 25.0)));
        assert!(carton.is_nearby_within(Point::new(35.0, 25.0), 10.0));
        assert!(!carton.is_nearby_within(Point::new(35.0, 25.0), 9.99));
    }
}
