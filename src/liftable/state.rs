/// All code relating to individual motion states lives behind this module and
/// keeps invalid states unrepresentable, a state can only be reached through
/// the transition methods below :
/// - PUBLIC  : LiftableState and MotionContext are public
/// - PRIVATE : the context is only mutated in here
///
/// ┌──────────────── State Transition Flow ──────────────────┐
/// │  From State  →  Event        →  To State                │
/// ├─────────────────────────────────────────────────────────┤
/// │  Resting     →  Lift         →  Held                    │
/// │  Settling    →  Lift         →  Held                    │
/// │  Held        →  Drop(dir)    →  Settling                │
/// │  Held        →  Follow       →  Held (position only)    │
/// │  -------        ------                                  │
/// │  Settling    →  Update       →  Resting (when stopped)  │
/// └─────────────────────────────────────────────────────────┘
use super::Direction;
use crate::engine::{Point, Rect};

// physics consts, top left is origin so negative y is up
const FRICTION: f64 = 0.90;
const THROW_SPEED: f64 = 10.0;
const THROW_ARC: f64 = 5.0;
const UP_THROW_BOOST: f64 = 1.7;
const GRAVITY: f64 = 1.0;
const BOUNCE_FACTOR: f64 = 0.1;
const REST_SPEED: f64 = 0.1;

#[derive(Debug, Copy, Clone)]
pub struct Resting;
#[derive(Debug, Copy, Clone)]
pub struct Settling;
#[derive(Debug, Copy, Clone)]
pub struct Held;

pub enum IsSettling {
    Done(LiftableState<Resting>),
    InProgress(LiftableState<Settling>),
}

#[derive(Debug, Copy, Clone, PartialEq)]
/// Shared data for every state : draw origin + velocity
pub struct MotionContext {
    pub position: Point,
    pub velocity: Point,
}

#[derive(Debug, Copy, Clone)]
pub struct LiftableState<S> {
    context: MotionContext,
    // type-level tag only, never read
    _state: S,
}

impl<S> LiftableState<S> {
    pub fn context(&self) -> &MotionContext {
        &self.context
    }
}

impl LiftableState<Resting> {
    pub fn new(position: Point) -> Self {
        LiftableState {
            context: MotionContext {
                position,
                velocity: Point::default(),
            },
            _state: Resting,
        }
    }

    pub fn lift(self) -> LiftableState<Held> {
        LiftableState {
            context: self.context.stop(),
            _state: Held,
        }
    }
}

impl LiftableState<Settling> {
    /// One integration tick
    /// - `bounds` : collision bounds at the current position
    /// - `obstacles` : every rectangle this object can hit this tick
    pub fn update(mut self, bounds: Rect, obstacles: &[Rect]) -> IsSettling {
        self.context = self.context.integrate(bounds, obstacles);
        if self.context.velocity.x.abs() < REST_SPEED && self.context.velocity.y.abs() < REST_SPEED {
            IsSettling::Done(self.settle())
        } else {
            IsSettling::InProgress(self)
        }
    }

    pub fn lift(self) -> LiftableState<Held> {
        LiftableState {
            context: self.context.stop(),
            _state: Held,
        }
    }

    fn settle(self) -> LiftableState<Resting> {
        LiftableState {
            context: self.context.stop(),
            _state: Resting,
        }
    }
}

impl LiftableState<Held> {
    pub fn drop_toward(self, direction: Direction) -> LiftableState<Settling> {
        LiftableState {
            context: self.context.throw(direction),
            _state: Settling,
        }
    }

    /// Moves so the collision bounds origin sits on `target`
    pub fn follow(mut self, target: Point, bounds: Rect) -> Self {
        let offset_x = bounds.x - self.context.position.x;
        let offset_y = bounds.y - self.context.position.y;
        self.context.position = Point::new(target.x - offset_x, target.y - offset_y);
        self
    }
}

impl MotionContext {
    fn stop(mut self) -> Self {
        self.velocity = Point::default();
        self
    }

    fn throw(mut self, direction: Direction) -> Self {
        self.velocity = match direction {
            Direction::Left => Point::new(-THROW_SPEED, -THROW_ARC),
            Direction::Right => Point::new(THROW_SPEED, -THROW_ARC),
            Direction::Up => Point::new(0.0, -THROW_SPEED * UP_THROW_BOOST),
            Direction::Down => Point::new(0.0, THROW_SPEED),
        };
        self
    }

    /// ::integrate per tick
    /// - gravity only while rising : a throw arc, not a fall
    /// - axes are resolved one after the other, x first
    /// - a blocked axis bounces back at a tenth of its speed and does not move
    fn integrate(mut self, bounds: Rect, obstacles: &[Rect]) -> Self {
        if self.velocity.y < 0.0 {
            self.velocity.y += GRAVITY;
        }

        let dx = self.velocity.x;
        let dy = self.velocity.y;

        let moved_x = if Self::is_colliding(&bounds, dx, 0.0, obstacles) {
            self.velocity.x = -self.velocity.x * BOUNCE_FACTOR;
            0.0
        } else {
            self.position.x += dx;
            dx
        };

        if Self::is_colliding(&bounds, moved_x, dy, obstacles) {
            self.velocity.y = -self.velocity.y * BOUNCE_FACTOR;
        } else {
            self.position.y += dy;
        }

        self.velocity.x *= FRICTION;
        self.velocity.y *= FRICTION;
        self
    }

    fn is_colliding(bounds: &Rect, dx: f64, dy: f64, obstacles: &[Rect]) -> bool {
        let candidate = bounds.translated(dx, dy);
        obstacles
            .iter()
            // an obstacle with exactly our bounds is taken to be ourselves
            .filter(|obstacle| *obstacle != bounds)
            .any(|obstacle| candidate.intersects(obstacle))
    }
}
