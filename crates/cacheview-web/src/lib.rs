//! Browser front-end: builds with `trunk` for `wasm32-unknown-unknown`.
#![cfg(target_arch = "wasm32")]

mod api;
mod app;
mod logging;
mod scheduler;
mod surface;

pub use api::FetchApi;
pub use app::{init, App};
pub use scheduler::{BrowserScheduler, BrowserTimer};
pub use surface::PageSignals;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    leptos::mount::mount_to_body(App);
}
