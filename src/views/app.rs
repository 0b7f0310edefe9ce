// ============================================================================
// APP VIEW - Menú + hueco de la vista activa
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::state::AppState;
use crate::views::{render_nav_menu, render_outlet};

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("app")
        .child(render_nav_menu(state)?)?
        .child(render_outlet(state)?)
        .map(ElementBuilder::build)
}
