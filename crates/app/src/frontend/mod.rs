//! Leptos single-page frontend.
//!
//! Components hold a view-model from [`crate::views`] in a signal and render
//! it; every decision (gating, validation, rollback) lives in the view-model.

pub mod app;

use wasm_bindgen::prelude::*;

/// WASM entry point, run when the module loads.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    chainboard_observability::init();

    leptos::mount_to_body(app::App);
}
