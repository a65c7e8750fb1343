use super::{Liftable, Obstacle};
use crate::engine::Rect;

/// Non-owning handle into Items, handed to carriers, bays and obstacle lists
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LiftableId(usize);

/// Scene owned store of every liftable, entries are never removed so a
/// LiftableId stays valid for the lifetime of the scene
#[derive(Default)]
pub struct Items {
    entries: Vec<Box<dyn Liftable>>,
}

impl Items {
    pub fn new() -> Self {
        Items::default()
    }

    pub fn insert(&mut self, item: impl Liftable + 'static) -> LiftableId {
        self.entries.push(Box::new(item));
        LiftableId(self.entries.len() - 1)
    }

    pub fn get(&self, id: LiftableId) -> Option<&dyn Liftable> {
        self.entries.get(id.0).map(|item| item.as_ref())
    }

    pub fn get_mut(&mut self, id: LiftableId) -> Option<&mut (dyn Liftable + 'static)> {
        self.entries.get_mut(id.0).map(|item| item.as_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = LiftableId> {
        (0..self.entries.len()).map(LiftableId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LiftableId, &dyn Liftable)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, item)| (LiftableId(index), item.as_ref()))
    }

    pub fn bounds_of(&self, obstacle: &Obstacle) -> Option<Rect> {
        match obstacle {
            Obstacle::Area(rect) => Some(*rect),
            Obstacle::Liftable(id) => self.get(*id).map(|item| item.collision_bounds()),
        }
    }

    /// Current rectangles for an obstacle list, dangling handles are skipped
    /// - `skip_held` : carriers walk through whatever is being carried
    pub fn resolve(&self, obstacles: &[Obstacle], skip_held: bool) -> Vec<Rect> {
        obstacles
            .iter()
            .filter(|obstacle| match obstacle {
                Obstacle::Liftable(id) if skip_held => {
                    self.get(*id).is_some_and(|item| !item.is_lifted())
                }
                _ => true,
            })
            .filter_map(|obstacle| self.bounds_of(obstacle))
            .collect()
    }

    /// Integrates every item in insertion order, each against its own
    /// obstacle list as it stands right before its turn
    pub fn update_all(&mut self) {
        for index in 0..self.entries.len() {
            let obstacles = self.resolve(self.entries[index].obstacles(), false);
            self.entries[index].update(&obstacles);
        }
    }
}
