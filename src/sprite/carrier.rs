use super::Pose;
use crate::engine::{KeyState, Point, Rect, Size};
use crate::liftable::{Direction, Items, LiftableId, ObstacleList};
use std::rc::Rc;

const BASE_SPEED: f64 = 1.0;
const FRICTION: f64 = 0.80;
// speed = base / (1 + weight * WEIGHT_DRAG)
const WEIGHT_DRAG: f64 = 0.07;
// approximately 1/√2
const DIAGONAL_FACTOR: f64 = 0.707;
const STOP_SPEED: f64 = 0.01;
// the sprite is drawn at 80% of its image size
const DRAW_SCALE: f64 = 0.8;
// point the carrier reaches from, as a fraction of the image from its origin
const REACH_FRACTION: f64 = 0.4;
pub const LIFT_COOLDOWN_MS: f64 = 250.0;

/// Input snapshot for one tick, only what the carrier cares about
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub interact: bool,
}

impl Controls {
    pub fn from_keys(keystate: &KeyState) -> Self {
        Controls {
            left: keystate.is_pressed("ArrowLeft") || keystate.is_pressed("KeyA"),
            right: keystate.is_pressed("ArrowRight") || keystate.is_pressed("KeyD"),
            up: keystate.is_pressed("ArrowUp") || keystate.is_pressed("KeyW"),
            down: keystate.is_pressed("ArrowDown") || keystate.is_pressed("KeyS"),
            interact: keystate.is_pressed("KeyE"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Interaction {
    Lifted(LiftableId),
    Dropped(LiftableId),
    Nothing,
}

/// The player. Holds at most one liftable at a time, by handle only : the
/// scene owns the item, the carrier just drags its position along
pub struct Carrier {
    position: Point,
    velocity: Point,
    frame_size: Size,
    speed: f64,
    facing: Direction,
    pose: Pose,
    held: Option<LiftableId>,
    liftables: Rc<[LiftableId]>,
    obstacles: Option<ObstacleList>,
    last_interaction: Option<f64>,
}

impl Carrier {
    pub fn new(position: Point, frame_size: Size) -> Self {
        Carrier {
            position,
            velocity: Point::default(),
            frame_size,
            speed: BASE_SPEED,
            facing: Direction::Down,
            pose: Pose::Standing(Direction::Down),
            held: None,
            liftables: Rc::from(Vec::new()),
            obstacles: None,
            last_interaction: None,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn held(&self) -> Option<LiftableId> {
        self.held
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn frame_size(&self) -> Size {
        self.frame_size
    }

    /// Where the carrier is drawn, and what it bumps into walls with
    pub fn bounding_box(&self) -> Rect {
        Rect::from_parts(self.position, self.frame_size.scaled(DRAW_SCALE))
    }

    pub fn set_obstacles(&mut self, obstacles: ObstacleList) {
        self.obstacles = Some(obstacles);
    }

    pub fn set_liftables(&mut self, liftables: Rc<[LiftableId]>) {
        self.liftables = liftables;
    }

    /// Current speed, slowed down by whatever is being carried
    pub fn speed(&self, items: &Items) -> f64 {
        let weight = self
            .held
            .and_then(|id| items.get(id))
            .map_or(0.0, |item| item.weight());
        BASE_SPEED * (1.0 / (1.0 + weight * WEIGHT_DRAG))
    }

    pub fn reach_point(&self) -> Point {
        Point::new(
            self.position.x + self.frame_size.width * REACH_FRACTION,
            self.position.y + self.frame_size.height * REACH_FRACTION,
        )
    }

    pub fn has_interacted_recently(&self, now: f64) -> bool {
        self.last_interaction
            .is_some_and(|last| now - last < LIFT_COOLDOWN_MS * 2.0)
    }

    /// ::handle_input per tick
    /// - speed is decided by what was held at the start of the tick
    /// - interact is rate limited, holding the key toggles every 250ms
    /// - `excluded` : candidates the scene does not allow to be lifted now
    pub fn handle_input(
        &mut self,
        controls: &Controls,
        items: &mut Items,
        now: f64,
        excluded: &dyn Fn(LiftableId) -> bool,
    ) -> Interaction {
        self.speed = self.speed(items);

        let interaction = if controls.interact {
            self.try_interact(items, now, excluded)
        } else {
            Interaction::Nothing
        };

        let mut ax = 0.0;
        let mut ay = 0.0;

        if controls.left {
            ax = -self.speed;
            self.facing = Direction::Left;
        } else if controls.right {
            ax = self.speed;
            self.facing = Direction::Right;
        }

        if controls.up {
            ay = -self.speed;
            if ax == 0.0 {
                self.facing = Direction::Up;
            }
        } else if controls.down {
            ay = self.speed;
            if ax == 0.0 {
                self.facing = Direction::Down;
            }
        }

        // same speed diagonally
        if ax != 0.0 && ay != 0.0 {
            ax *= DIAGONAL_FACTOR;
            ay *= DIAGONAL_FACTOR;
        }

        let moved = controls.left || controls.right || controls.up || controls.down;
        self.pose = if moved {
            Pose::Walking(self.facing)
        } else {
            Pose::Standing(self.facing)
        };

        self.velocity.x += ax;
        self.velocity.y += ay;

        interaction
    }

    /// Cooldown gate in front of attempt_interact
    pub fn try_interact(
        &mut self,
        items: &mut Items,
        now: f64,
        excluded: &dyn Fn(LiftableId) -> bool,
    ) -> Interaction {
        let cooled_down = self
            .last_interaction
            .is_none_or(|last| now - last > LIFT_COOLDOWN_MS);
        if !cooled_down {
            return Interaction::Nothing;
        }
        self.last_interaction = Some(now);
        self.attempt_interact(items, excluded)
    }

    /// Drops what is held, or lifts the nearest liftable within reach
    pub fn attempt_interact(
        &mut self,
        items: &mut Items,
        excluded: &dyn Fn(LiftableId) -> bool,
    ) -> Interaction {
        if let Some(id) = self.held.take() {
            if let Some(item) = items.get_mut(id) {
                item.drop_toward(self.facing);
            }
            log::debug!("dropped {:?} toward {:?}", id, self.facing);
            return Interaction::Dropped(id);
        }

        let reach = self.reach_point();
        let mut closest: Option<(LiftableId, f64)> = None;
        for &id in self.liftables.iter() {
            if excluded(id) {
                continue;
            }
            let Some(item) = items.get(id) else {
                continue;
            };
            if !item.is_nearby(reach) {
                continue;
            }
            let distance = item.collision_bounds_center().distance(reach);
            // strict : the first of two equally close candidates wins
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((id, distance));
            }
        }

        let Some((id, _)) = closest else {
            return Interaction::Nothing;
        };
        let Some(item) = items.get_mut(id) else {
            return Interaction::Nothing;
        };
        item.lift();
        self.held = Some(id);
        log::debug!("lifted {:?} ({})", id, item.name());
        Interaction::Lifted(id)
    }

    /// ::update per tick
    /// - friction, then axis separated movement against the obstacles
    /// - the held item is then pinned to the new position
    pub fn update(&mut self, items: &mut Items) {
        self.velocity.x *= FRICTION;
        self.velocity.y *= FRICTION;

        let obstacles = match &self.obstacles {
            Some(list) => items.resolve(list, true),
            None => Vec::new(),
        };
        let bounds = self.bounding_box();
        let is_colliding = |dx: f64, dy: f64| {
            let candidate = bounds.translated(dx, dy);
            obstacles.iter().any(|obstacle| candidate.intersects(obstacle))
        };

        let mut moved_x = 0.0;
        if !is_colliding(self.velocity.x, 0.0) {
            self.position.x += self.velocity.x;
            moved_x = self.velocity.x;
        }
        if !is_colliding(moved_x, self.velocity.y) {
            self.position.y += self.velocity.y;
        }

        if self.velocity.x.abs() < STOP_SPEED {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < STOP_SPEED {
            self.velocity.y = 0.0;
        }

        if let Some(item) = self.held.and_then(|id| items.get_mut(id)) {
            item.follow_sprite(self.position);
        }
    }
}
