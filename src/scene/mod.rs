// One module per scene, in the order they play :
// - evergreen : the apartment, carry everything into the bay
// - moveskit  : driving cutscene
// - rivington : the new place, shows what made it
// dialog is the typewriter box Evergreen talks through
pub mod dialog;
pub mod evergreen;
pub mod moveskit;
pub mod rivington;

pub use self::evergreen::Evergreen;
pub use self::moveskit::MoveSkit;
pub use self::rivington::Rivington;

use crate::engine::Size;
use crate::items::ItemKind;
use crate::liftable::Liftable;

/// What is left of an item once it has been driven away
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MovedItem {
    pub kind: ItemKind,
    pub size: Size,
    pub weight: f64,
}

impl MovedItem {
    pub fn from_liftable(item: &dyn Liftable) -> Self {
        MovedItem {
            kind: item.kind(),
            size: item.size(),
            weight: item.weight(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }
}
