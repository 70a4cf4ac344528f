// ==================== Imports ====================
use engine::GameLoop;
use game::DodgeRun;
use wasm_bindgen::prelude::*;

pub mod browser;
pub mod config;
pub mod engine;
pub mod game;
pub mod sprite;

// ==================== Constants ====================
pub const LOG_LEVEL: log::Level = if cfg!(debug_assertions) {
    log::Level::Debug
} else {
    log::Level::Info
};

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs panic hook and console logging
/// - loads config + images
/// - starts the frame loop
#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();
    // a second init only reports that a logger is already set
    let _ = console_log::init_with_level(LOG_LEVEL);

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(DodgeRun::new()).await {
            log::error!("Could not start game loop : {:#?}", err);
        }
    });

    Ok(())
}
