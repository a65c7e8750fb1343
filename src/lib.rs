// ==================== Imports ====================
use wasm_bindgen::prelude::*;

pub mod assets;
pub mod bay;
pub mod browser;
pub mod config;
pub mod engine;
pub mod game;
pub mod items;
pub mod liftable;
pub mod scene;
pub mod sprite;

use engine::GameLoop;
use game::MovingDay;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs the panic hook and the console logger
/// - starts the game loop, which loads config and images first
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    browser::init_logger(level).map_err(|err| JsValue::from_str(&format!("{:#}", err)))?;

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(MovingDay::new()).await {
            log::error!("could not start the game : {:#}", err);
        }
    });

    Ok(())
}
