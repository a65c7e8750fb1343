use crate::assets::Assets;
use crate::browser;
use crate::config::GameConfig;
use crate::engine::{Game, KeyState, Point, Rect, Renderer, Size, TextAlign};
use crate::scene::{Evergreen, MoveSkit, Rivington};
use crate::sprite::Controls;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// ┌────────────────────────── Scene Flow ───────────────────────────┐
/// │                                                                 │
/// │   ┌────────────┐  car leaves  ┌────────────┐  ride over         │
/// │   │ Evergreen  ├─────────────►│  MoveSkit  ├──────────┐         │
/// │   │ carry/lift │  Vec<Moved>  │  cutscene  │          ▼         │
/// │   └────────────┘              └────────────┘   ┌────────────┐   │
/// │                                                │ Rivington  │   │
/// │                                                │  showcase  │   │
/// │                                                └────────────┘   │
/// │                                                                 │
/// │  Below GameConfig::min_canvas nothing updates, a message is     │
/// │  drawn instead until the window grows again                     │
/// └─────────────────────────────────────────────────────────────────┘
pub enum MovingDay {
    /// Config and images are still being fetched
    Loading,
    Loaded(Moving),
}

impl MovingDay {
    pub fn new() -> Self {
        MovingDay::Loading
    }
}

impl Default for MovingDay {
    fn default() -> Self {
        MovingDay::new()
    }
}

pub struct Moving {
    config: GameConfig,
    assets: Assets,
    canvas: Size,
    rng: SmallRng,
    scene: Scene,
}

/// Per tick input, already mapped from the raw key state
#[derive(Debug, Default, Copy, Clone)]
pub struct Input {
    pub controls: Controls,
    pub space: bool,
    pub pointer: Option<Point>,
}

impl Input {
    pub fn from_keys(keystate: &KeyState) -> Self {
        Input {
            controls: Controls::from_keys(keystate),
            space: keystate.is_pressed("Space"),
            pointer: keystate.pointer(),
        }
    }
}

pub enum Scene {
    Evergreen(Box<Evergreen>),
    MoveSkit(MoveSkit),
    Rivington(Rivington),
}

impl Scene {
    /// ::update, returns the scene to switch to when this one is over
    pub fn update(
        &mut self,
        input: &Input,
        now: f64,
        config: &GameConfig,
        rng: &mut SmallRng,
    ) -> Option<Scene> {
        match self {
            Scene::Evergreen(evergreen) => evergreen
                .update(&input.controls, input.space, now)
                .map(|moved| {
                    let skit = MoveSkit::new(moved, now, config.cutscene_ms, child_rng(rng));
                    Scene::MoveSkit(skit)
                }),
            Scene::MoveSkit(skit) => skit
                .update(now)
                .then(|| Scene::Rivington(Rivington::new(skit.moved().to_vec()))),
            Scene::Rivington(rivington) => {
                rivington.set_pointer(input.pointer);
                None
            }
        }
    }

    pub fn resize(&mut self, canvas: Size) {
        // the other two lay themselves out while drawing
        if let Scene::Evergreen(evergreen) = self {
            evergreen.resize(canvas);
        }
    }

    fn draw(&self, renderer: &Renderer, assets: &Assets, canvas: Size) {
        match self {
            Scene::Evergreen(evergreen) => evergreen.draw(renderer, assets),
            Scene::MoveSkit(skit) => skit.draw(renderer, assets, canvas),
            Scene::Rivington(rivington) => rivington.draw(renderer, assets, canvas),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Scene::Evergreen(_) => "Evergreen",
            Scene::MoveSkit(_) => "MoveSkit",
            Scene::Rivington(_) => "Rivington",
        }
    }
}

fn child_rng(rng: &mut SmallRng) -> SmallRng {
    SmallRng::seed_from_u64(rng.gen())
}

fn small_device_message(renderer: &Renderer, canvas: Size) {
    renderer.fill(&Rect::from_parts(Point::default(), canvas), "black");
    let center = Point::new(canvas.width / 2.0, canvas.height / 2.0);
    for (line, dy) in [("Moving Day is meant to be", -10.0), ("played on large devices.", 10.0)] {
        renderer.draw_text(line, Point::new(center.x, center.y + dy), 15.0, "white", TextAlign::Center);
    }
}

#[async_trait(?Send)]
impl Game for MovingDay {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            MovingDay::Loading => {
                let config = GameConfig::load().await;
                let assets = Assets::load(&config).await?;
                let canvas = browser::canvas_size()?;
                let mut rng = match config.seed {
                    Some(seed) => SmallRng::seed_from_u64(seed),
                    None => SmallRng::from_entropy(),
                };
                let evergreen = Evergreen::new(canvas, &assets.dimensions(), child_rng(&mut rng));
                log::info!("starting in Evergreen at {}x{}", canvas.width, canvas.height);
                Ok(Box::new(MovingDay::Loaded(Moving {
                    config,
                    assets,
                    canvas,
                    rng,
                    scene: Scene::Evergreen(Box::new(evergreen)),
                })))
            }
            MovingDay::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, keystate: &KeyState, now: f64) {
        if let MovingDay::Loaded(moving) = self {
            if !moving.config.fits(moving.canvas) {
                return;
            }
            let input = Input::from_keys(keystate);
            if let Some(next) = moving
                .scene
                .update(&input, now, &moving.config, &mut moving.rng)
            {
                log::info!("{} -> {}", moving.scene.name(), next.name());
                moving.scene = next;
            }
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let MovingDay::Loaded(moving) = self {
            if !moving.config.fits(moving.canvas) {
                small_device_message(renderer, moving.canvas);
                return;
            }
            renderer.clear(&Rect::from_parts(Point::default(), moving.canvas));
            moving.scene.draw(renderer, &moving.assets, moving.canvas);
        }
    }

    fn resize(&mut self, size: Size) {
        if let MovingDay::Loaded(moving) = self {
            log::debug!("canvas resized to {}x{}", size.width, size.height);
            moving.canvas = size;
            moving.scene.resize(size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Dimensions;
    use crate::items::ItemKind;
    use crate::scene::MovedItem;

    fn chest() -> MovedItem {
        MovedItem {
            kind: ItemKind::Chest,
            size: Size::new(32.0, 32.0),
            weight: 40.5,
        }
    }

    fn config() -> GameConfig {
        GameConfig {
            cutscene_ms: 100.0,
            ..GameConfig::default()
        }
    }

    #[test]
    fn cutscene_hands_its_load_to_rivington() {
        let config = config();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut scene = Scene::MoveSkit(MoveSkit::new(vec![chest()], 0.0, 100.0, child_rng(&mut rng)));

        assert!(scene.update(&Input::default(), 50.0, &config, &mut rng).is_none());
        let next = scene.update(&Input::default(), 100.0, &config, &mut rng);
        match next {
            Some(Scene::Rivington(rivington)) => assert_eq!(rivington.moved(), &[chest()]),
            _ => panic!("expected Rivington"),
        }
    }

    #[test]
    fn evergreen_stays_put_without_input() {
        let config = config();
        let mut rng = SmallRng::seed_from_u64(5);
        let evergreen = Evergreen::new(Size::new(1200.0, 800.0), &Dimensions::default(), child_rng(&mut rng));
        let mut scene = Scene::Evergreen(Box::new(evergreen));
        for tick in 0..10 {
            assert!(scene
                .update(&Input::default(), tick as f64 * 16.0, &config, &mut rng)
                .is_none());
        }
        assert_eq!(scene.name(), "Evergreen");
    }

    #[test]
    fn rivington_tracks_the_pointer() {
        let config = config();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut scene = Scene::Rivington(Rivington::new(vec![chest()]));
        let input = Input {
            pointer: Some(Point::new(400.0, 100.0)),
            ..Input::default()
        };
        assert!(scene.update(&input, 0.0, &config, &mut rng).is_none());
        let Scene::Rivington(rivington) = &scene else {
            panic!("expected Rivington");
        };
        assert_eq!(rivington.hovered(Size::new(800.0, 900.0)).map(|item| item.kind), Some(ItemKind::Chest));
    }

    #[test]
    fn child_rngs_are_reproducible() {
        let mut first = SmallRng::seed_from_u64(9);
        let mut second = SmallRng::seed_from_u64(9);
        assert_eq!(child_rng(&mut first).gen::<u64>(), child_rng(&mut second).gen::<u64>());
    }
}
