use crate::browser;
use crate::engine::Size;
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = "moving_day.json";

/// Optional overrides served next to the wasm bundle. Everything has a
/// default, so a partial file is fine and a missing one is not an error
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// Prefix for every asset path, e.g. "/static/"
    pub asset_root: String,
    /// Below this the game asks for a bigger screen
    pub min_canvas: Size,
    pub cutscene_ms: f64,
    /// Fixed seed for the scale jitter and the cutscene bounce
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            asset_root: "/".to_string(),
            min_canvas: Size::new(600.0, 700.0),
            cutscene_ms: 6000.0,
            seed: None,
        }
    }
}

impl GameConfig {
    pub async fn load() -> GameConfig {
        match browser::fetch_json::<GameConfig>(CONFIG_PATH).await {
            Ok(config) => {
                log::info!("loaded {}", CONFIG_PATH);
                config
            }
            Err(err) => {
                log::warn!("using default config, could not load {}: {:#}", CONFIG_PATH, err);
                GameConfig::default()
            }
        }
    }

    pub fn asset_path(&self, path: &str) -> String {
        format!("{}{}", self.asset_root, path)
    }

    pub fn fits(&self, canvas: Size) -> bool {
        canvas.width >= self.min_canvas.width && canvas.height >= self.min_canvas.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_paths_are_prefixed() {
        let config = GameConfig {
            asset_root: "/static/".to_string(),
            ..GameConfig::default()
        };
        assert_eq!(config.asset_path("boxes/small.png"), "/static/boxes/small.png");
    }

    #[test]
    fn small_canvas_does_not_fit() {
        let config = GameConfig::default();
        assert!(config.fits(Size::new(600.0, 700.0)));
        assert!(!config.fits(Size::new(599.0, 900.0)));
        assert!(!config.fits(Size::new(1200.0, 640.0)));
    }
}
