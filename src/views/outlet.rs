// ============================================================================
// OUTLET VIEW - Hueco donde se muestra exactamente una vista
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::ElementBuilder;
use crate::models::{ChunkError, Location, ViewId};
use crate::state::{AppState, Outlet};
use crate::views::pages::render_view;

pub fn render_outlet(state: &AppState) -> Result<Element, JsValue> {
    let content = match state.outlet() {
        Outlet::Placeholder(_) => render_placeholder()?,
        Outlet::View { view, props } => render_view(view, &props)?,
        Outlet::Failed { view, error } => render_failed(view, &error)?,
        Outlet::NotFound(location) => render_not_found(&location)?,
    };

    ElementBuilder::new("div")?
        .class("view-slot")
        .child(content)
        .map(ElementBuilder::build)
}

/// Se muestra mientras se descarga el código de la vista
pub fn render_placeholder() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("h3")?.text(&CONFIG.loading_text).build())
}

fn render_failed(view: ViewId, error: &ChunkError) -> Result<Element, JsValue> {
    let message = ElementBuilder::new("p")?
        .text(&format!("Could not load {}: {}", view.label(), error))
        .build();

    let retry = ElementBuilder::new("button")?
        .class("btn-retry")
        .text("retry")
        .on_click(move |_| crate::retry_view(view))?
        .build();

    ElementBuilder::new("div")?
        .class("view-error")
        .child(message)?
        .child(retry)
        .map(ElementBuilder::build)
}

fn render_not_found(location: &Location) -> Result<Element, JsValue> {
    log::warn!("⚠️ [ROUTER] Ninguna ruta para {}", location.pathname);
    Ok(ElementBuilder::new("h3")?
        .class("not-found")
        .text(&CONFIG.not_found_text)
        .build())
}
