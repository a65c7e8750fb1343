// ┌──────────────────────────────────────────────────────────────────────────┐
// │                        Liftable Module Layout                            │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ liftable/         │                                                      │
// │ ├── mod.rs        │ Liftable + InteractionArea traits, Motion component  │
// │ ├── state.rs      │ Resting / Settling / Held typestates + physics       │
// │ └── registry.rs   │ Items : scene owned store addressed by LiftableId    │
// └───────────────────┴──────────────────────────────────────────────────────┘
// Every concrete item (carton, chest, plant, car) owns a Motion and delegates
// to it, only the collision bounds shape differs per item.
pub mod registry;
pub mod state;

use self::state::{Held, IsSettling, LiftableState, MotionContext, Resting, Settling};
use crate::engine::{Point, Rect, Size};
use crate::items::ItemKind;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;

pub use self::registry::{Items, LiftableId};

/// Default Euclidean reach for the nearby check
pub const NEARBY_THRESHOLD: f64 = 100.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Observable phase, the three are mutually exclusive
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Resting,
    Settling,
    Held,
}

#[derive(Debug, Error, PartialEq)]
pub enum LiftError {
    #[error("cannot drop an object that is not held")]
    NotHeld,
}

/// Anything that occupies a rectangle : walls, items, the car
pub trait InteractionArea {
    fn collision_bounds(&self) -> Rect;

    fn collision_bounds_center(&self) -> Point {
        self.collision_bounds().center()
    }
}

/// Rectangle providers an object collides with, walls are plain areas and
/// liftables are looked up in the registry each time they are needed
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Obstacle {
    Area(Rect),
    Liftable(LiftableId),
}

/// Shared read-mostly obstacle list, replaced wholesale by the scene
pub type ObstacleList = Rc<[Obstacle]>;

pub enum Event<'a> {
    Lift,
    Drop(Direction),
    Update { bounds: Rect, obstacles: &'a [Rect] },
    Follow { target: Point, bounds: Rect },
}

#[derive(Debug, Copy, Clone)]
enum LiftableStateMachine {
    Resting(LiftableState<Resting>),
    Settling(LiftableState<Settling>),
    Held(LiftableState<Held>),
}

impl From<LiftableState<Resting>> for LiftableStateMachine {
    fn from(state: LiftableState<Resting>) -> Self {
        LiftableStateMachine::Resting(state)
    }
}

impl From<LiftableState<Settling>> for LiftableStateMachine {
    fn from(state: LiftableState<Settling>) -> Self {
        LiftableStateMachine::Settling(state)
    }
}

impl From<LiftableState<Held>> for LiftableStateMachine {
    fn from(state: LiftableState<Held>) -> Self {
        LiftableStateMachine::Held(state)
    }
}

impl From<IsSettling> for LiftableStateMachine {
    fn from(is_settling: IsSettling) -> Self {
        match is_settling {
            IsSettling::Done(resting_state) => resting_state.into(),
            IsSettling::InProgress(settling_state) => settling_state.into(),
        }
    }
}

impl LiftableStateMachine {
    // CONSUMING self and returning the next state, the old one is gone
    fn transition(self, event: Event) -> Self {
        use LiftableStateMachine::*;
        match (self, event) {
            (Resting(state), Event::Lift) => state.lift().into(),
            (Settling(state), Event::Lift) => state.lift().into(),
            (Held(state), Event::Drop(direction)) => state.drop_toward(direction).into(),
            (Held(state), Event::Follow { target, bounds }) => state.follow(target, bounds).into(),
            (Settling(state), Event::Update { bounds, obstacles }) => {
                state.update(bounds, obstacles).into()
            }
            // everything else keeps the current state : resting and held
            // objects do not integrate, only held objects follow
            _ => self,
        }
    }

    fn context(&self) -> &MotionContext {
        use LiftableStateMachine::*;
        match self {
            Resting(state) => state.context(),
            Settling(state) => state.context(),
            Held(state) => state.context(),
        }
    }

    fn phase(&self) -> Phase {
        match self {
            LiftableStateMachine::Resting(_) => Phase::Resting,
            LiftableStateMachine::Settling(_) => Phase::Settling,
            LiftableStateMachine::Held(_) => Phase::Held,
        }
    }
}

/// Motion component every liftable holds as a field
#[derive(Debug, Clone)]
pub struct Motion {
    state: LiftableStateMachine,
    weight: f64,
    obstacles: Option<ObstacleList>,
}

impl Motion {
    pub fn new(position: Point, weight: f64) -> Self {
        Motion {
            state: LiftableState::new(position).into(),
            weight,
            obstacles: None,
        }
    }

    pub fn position(&self) -> Point {
        self.state.context().position
    }

    pub fn velocity(&self) -> Point {
        self.state.context().velocity
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_lifted(&self) -> bool {
        self.phase() == Phase::Held
    }

    pub fn is_moving(&self) -> bool {
        self.phase() == Phase::Settling
    }

    /// Missing list reads as no obstacles
    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.as_deref().unwrap_or(&[])
    }

    pub fn set_obstacles(&mut self, obstacles: ObstacleList) {
        self.obstacles = Some(obstacles);
    }

    pub fn lift(&mut self) {
        self.state = self.state.transition(Event::Lift);
    }

    /// Dropping something that is not held is a caller bug, ignored here
    pub fn drop_toward(&mut self, direction: Direction) {
        if let Err(err) = self.try_drop_toward(direction) {
            log::warn!("drop toward {:?} ignored: {}", direction, err);
        }
    }

    pub fn try_drop_toward(&mut self, direction: Direction) -> Result<(), LiftError> {
        if !self.is_lifted() {
            return Err(LiftError::NotHeld);
        }
        self.state = self.state.transition(Event::Drop(direction));
        Ok(())
    }

    pub fn update(&mut self, bounds: Rect, obstacles: &[Rect]) {
        self.state = self.state.transition(Event::Update { bounds, obstacles });
    }

    pub fn follow_sprite(&mut self, target: Point, bounds: Rect) {
        self.state = self.state.transition(Event::Follow { target, bounds });
    }
}

/// Capability shared by every object the carrier can pick up
pub trait Liftable: InteractionArea {
    fn motion(&self) -> &Motion;
    fn motion_mut(&mut self) -> &mut Motion;
    fn kind(&self) -> ItemKind;
    /// Size of the drawn image
    fn size(&self) -> Size;

    fn name(&self) -> &str {
        self.kind().name()
    }

    fn description(&self) -> &str {
        self.kind().description()
    }

    fn position(&self) -> Point {
        self.motion().position()
    }

    fn velocity(&self) -> Point {
        self.motion().velocity()
    }

    fn weight(&self) -> f64 {
        self.motion().weight()
    }

    fn phase(&self) -> Phase {
        self.motion().phase()
    }

    fn is_lifted(&self) -> bool {
        self.motion().is_lifted()
    }

    /// Held or still flying, drawn above the carrier
    fn is_airborne(&self) -> bool {
        self.phase() != Phase::Resting
    }

    fn lift(&mut self) {
        self.motion_mut().lift();
    }

    fn drop_toward(&mut self, direction: Direction) {
        self.motion_mut().drop_toward(direction);
    }

    fn try_drop_toward(&mut self, direction: Direction) -> Result<(), LiftError> {
        self.motion_mut().try_drop_toward(direction)
    }

    fn update(&mut self, obstacles: &[Rect]) {
        let bounds = self.collision_bounds();
        self.motion_mut().update(bounds, obstacles);
    }

    fn follow_sprite(&mut self, target: Point) {
        let bounds = self.collision_bounds();
        self.motion_mut().follow_sprite(target, bounds);
    }

    fn is_nearby(&self, point: Point) -> bool {
        self.is_nearby_within(point, NEARBY_THRESHOLD)
    }

    fn is_nearby_within(&self, point: Point, threshold: f64) -> bool {
        self.collision_bounds_center().distance(point) <= threshold
    }

    fn obstacles(&self) -> &[Obstacle] {
        self.motion().obstacles()
    }

    fn set_obstacles(&mut self, obstacles: ObstacleList) {
        self.motion_mut().set_obstacles(obstacles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lift_zeroes_velocity_and_stops_integration() {
        let mut motion = Motion::new(Point::new(10.0, 10.0), 5.0);
        motion.lift();
        motion.drop_toward(Direction::Up);
        assert!(motion.is_moving());
        motion.lift();
        assert!(motion.is_lifted());
        assert_eq!(motion.velocity(), Point::default());

        let bounds = Rect::new(10.0, 10.0, 4.0, 4.0);
        motion.update(bounds, &[]);
        assert_eq!(motion.position(), Point::new(10.0, 10.0));
        assert_eq!(motion.velocity(), Point::default());
    }

    #[test]
    fn drop_sets_impulse_before_any_tick() {
        let mut motion = Motion::new(Point::default(), 1.0);
        motion.lift();
        motion.drop_toward(Direction::Right);
        assert_eq!(motion.velocity(), Point::new(10.0, -5.0));
        assert_eq!(motion.phase(), Phase::Settling);
    }

    #[test]
    fn dropping_without_holding_is_a_no_op() {
        let mut motion = Motion::new(Point::new(3.0, 4.0), 1.0);
        motion.drop_toward(Direction::Left);
        assert_eq!(motion.phase(), Phase::Resting);
        assert_eq!(motion.velocity(), Point::default());
        assert_eq!(motion.try_drop_toward(Direction::Left), Err(LiftError::NotHeld));
    }

    #[test]
    fn follow_only_moves_held_objects() {
        let mut motion = Motion::new(Point::new(0.0, 0.0), 1.0);
        let bounds = Rect::new(2.0, 2.0, 4.0, 4.0);
        motion.follow_sprite(Point::new(50.0, 50.0), bounds);
        assert_eq!(motion.position(), Point::new(0.0, 0.0));

        motion.lift();
        motion.follow_sprite(Point::new(50.0, 50.0), bounds);
        assert_eq!(motion.position(), Point::new(48.0, 48.0));
    }

    #[test]
    fn settling_comes_to_rest() {
        let mut motion = Motion::new(Point::new(0.0, 0.0), 1.0);
        motion.lift();
        motion.drop_toward(Direction::Down);
        let size = Size::new(4.0, 4.0);
        for _ in 0..100 {
            let bounds = Rect::from_parts(motion.position(), size);
            motion.update(bounds, &[]);
        }
        assert_eq!(motion.phase(), Phase::Resting);
        assert_eq!(motion.velocity(), Point::default());
        // 10 * (1 + 0.9 + 0.81 + ...) until the speed falls under 0.1
        assert_relative_eq!(motion.position().y, 99.0, epsilon = 0.5);
    }

    #[test]
    fn missing_obstacle_list_is_empty() {
        let motion = Motion::new(Point::default(), 0.0);
        assert!(motion.obstacles().is_empty());
    }
}
