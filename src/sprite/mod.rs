// ┌──────────────────────────────────────────────────────────────────────────┐
// │                      Directory Structure                                 │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ src/              │                                                      │
// │ ├── lib.rs        │ wasm entry                                           │
// │ ├── game.rs       │ scene switching : Evergreen → MoveSkit → Rivington   │
// │ ├── liftable/     │ motion core shared by everything you can pick up     │
// │ ├── items/        │ cartons, chest, plants, car, walls                   │
// │ ├── bay.rs        │ cargo bay scale                                      │
// │ ├── scene/        │ per scene setup + drawing                            │
// │ └── sprite/       │ the player                                           │
// │     ├── mod.rs    │ Pose : which image to show                           │
// │     └── carrier.rs│ movement, lifting, carrying                          │
// └───────────────────┴──────────────────────────────────────────────────────┘
pub mod carrier;

pub use self::carrier::{Carrier, Controls, Interaction};

use crate::liftable::Direction;

/// Which sprite image is shown, one walking and one standing per direction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Pose {
    Walking(Direction),
    Standing(Direction),
}

impl Pose {
    pub fn image_path(&self) -> &'static str {
        match self {
            Pose::Walking(Direction::Up) => "sprite/up.gif",
            Pose::Walking(Direction::Down) => "sprite/down.gif",
            Pose::Walking(Direction::Left) => "sprite/left.gif",
            Pose::Walking(Direction::Right) => "sprite/right.gif",
            Pose::Standing(Direction::Up) => "sprite/up_rest.gif",
            Pose::Standing(Direction::Down) => "sprite/down_rest.gif",
            Pose::Standing(Direction::Left) => "sprite/left_rest.gif",
            Pose::Standing(Direction::Right) => "sprite/right_rest.gif",
        }
    }

    pub fn all() -> [Pose; 8] {
        use Direction::*;
        [
            Pose::Walking(Up),
            Pose::Walking(Down),
            Pose::Walking(Left),
            Pose::Walking(Right),
            Pose::Standing(Up),
            Pose::Standing(Down),
            Pose::Standing(Left),
            Pose::Standing(Right),
        ]
    }
}
