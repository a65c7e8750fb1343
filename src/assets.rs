use crate::config::GameConfig;
use crate::engine::{self, Size};
use crate::items::{CartonSize, ItemKind, Orientation, PlantKind};
use crate::sprite::Pose;
use anyhow::{Context, Result};
use futures::future::try_join_all;
use std::collections::HashMap;
use web_sys::HtmlImageElement;

/// Every image the game draws
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Sprite(Pose),
    Item(ItemKind),
    Wall(Orientation),
    BayWall(Orientation),
    BayDisplay,
    Street,
}

impl AssetKey {
    pub fn path(&self) -> &'static str {
        match self {
            AssetKey::Sprite(pose) => pose.image_path(),
            AssetKey::Item(ItemKind::Carton(CartonSize::Small)) => "boxes/small.png",
            AssetKey::Item(ItemKind::Carton(CartonSize::Medium)) => "boxes/medium.png",
            AssetKey::Item(ItemKind::Carton(CartonSize::Large)) => "boxes/large.png",
            AssetKey::Item(ItemKind::Chest) => "sobu/chest.png",
            AssetKey::Item(ItemKind::Plant(PlantKind::BirdOfParadise)) => "plants/bird.png",
            AssetKey::Item(ItemKind::Plant(PlantKind::Snake)) => "plants/snake.png",
            AssetKey::Item(ItemKind::Tike) => "sobu/tike.png",
            AssetKey::Wall(Orientation::Horizontal) => "sobu/walls/horizontal.png",
            AssetKey::Wall(Orientation::Vertical) => "sobu/walls/vertical.png",
            AssetKey::BayWall(Orientation::Horizontal) => "cargobay/horizontal.png",
            AssetKey::BayWall(Orientation::Vertical) => "cargobay/vertical.png",
            AssetKey::BayDisplay => "cargobay/display.png",
            AssetKey::Street => "sobu/street.gif",
        }
    }

    pub fn all() -> Vec<AssetKey> {
        let mut keys: Vec<AssetKey> = Pose::all().into_iter().map(AssetKey::Sprite).collect();
        keys.extend(
            [
                ItemKind::Carton(CartonSize::Small),
                ItemKind::Carton(CartonSize::Medium),
                ItemKind::Carton(CartonSize::Large),
                ItemKind::Chest,
                ItemKind::Plant(PlantKind::BirdOfParadise),
                ItemKind::Plant(PlantKind::Snake),
                ItemKind::Tike,
            ]
            .map(AssetKey::Item),
        );
        keys.extend([
            AssetKey::Wall(Orientation::Horizontal),
            AssetKey::Wall(Orientation::Vertical),
            AssetKey::BayWall(Orientation::Horizontal),
            AssetKey::BayWall(Orientation::Vertical),
            AssetKey::BayDisplay,
            AssetKey::Street,
        ]);
        keys
    }
}

/// Image sizes only, what the scenes lay themselves out with
#[derive(Debug, Clone, Default)]
pub struct Dimensions {
    sizes: HashMap<AssetKey, Size>,
}

impl Dimensions {
    // anything unknown is drawn as a small square
    const FALLBACK: Size = Size {
        width: 32.0,
        height: 32.0,
    };

    pub fn new(sizes: HashMap<AssetKey, Size>) -> Self {
        Dimensions { sizes }
    }

    pub fn get(&self, key: AssetKey) -> Size {
        self.sizes.get(&key).copied().unwrap_or_else(|| {
            log::warn!("no size for {:?}, using {:?}", key, Self::FALLBACK);
            Self::FALLBACK
        })
    }

    pub fn item(&self, kind: ItemKind) -> Size {
        self.get(AssetKey::Item(kind))
    }
}

/// Loaded images, handed to scenes for drawing instead of living in statics
pub struct Assets {
    images: HashMap<AssetKey, HtmlImageElement>,
}

impl Assets {
    pub async fn load(config: &GameConfig) -> Result<Assets> {
        // all images load at once, total time is the slowest one
        let keys = AssetKey::all();
        let images = try_join_all(keys.iter().map(|key| {
            let path = config.asset_path(key.path());
            async move {
                engine::load_image(&path)
                    .await
                    .with_context(|| format!("Failed to load image resource from : {}", path))
            }
        }))
        .await?;
        log::info!("loaded {} images", images.len());
        Ok(Assets {
            images: keys.into_iter().zip(images).collect(),
        })
    }

    pub fn image(&self, key: AssetKey) -> Option<&HtmlImageElement> {
        self.images.get(&key)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.images
                .iter()
                .map(|(key, image)| (*key, engine::image_size(image)))
                .collect(),
        )
    }
}
