/// Block Keeper - Chrome Extension for blocking accounts on X/Twitter
/// Built with Rust + WASM + Yew

pub mod account;
pub mod automation;
pub mod config;
pub mod handle;
pub mod i18n;
pub mod indicator;
pub mod messages;
pub mod registry;
pub mod stats;
pub mod storage;
pub mod transfer;
pub mod ui;
pub mod web;

#[cfg(test)]
mod fakes;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Alt+B, blockUser messages and the blocked-profile badge on x.com pages
#[wasm_bindgen]
pub fn start_content_script() -> Result<(), JsValue> {
    web::content::start()
}

// Message, command and context menu listeners of the service worker
#[wasm_bindgen]
pub fn start_background() {
    web::background::start();
}

// Validate a handle typed into the popup or an options page
#[wasm_bindgen]
pub fn normalize_handle(raw: &str) -> Option<String> {
    handle::Handle::parse(raw).ok().map(|h| h.to_string())
}
