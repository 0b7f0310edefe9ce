// ============================================================================
// PAGES - Vistas cargadas de forma diferida (una por chunk asíncrono)
// ============================================================================

pub mod home;
pub mod about;
pub mod contact;

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::{RouteProps, ViewId};
use crate::services::chunk_registry;

/// Renderiza una vista cuyo chunk ya está cargado y registrado. Manda el
/// `render` que exporte el módulo raíz del chunk; si no exporta ninguno se
/// usa la página del shell.
pub fn render_view(view: ViewId, props: &RouteProps) -> Result<Element, JsValue> {
    match chunk_registry::render_from_chunk(view.chunk_name(), props) {
        Ok(Some(element)) => return Ok(element),
        Ok(None) => {}
        Err(e) => log::error!("❌ [VIEW] render de {} falló: {:?}", view, e),
    }

    match view {
        ViewId::Home => home::render_home(props),
        ViewId::About => about::render_about(props),
        ViewId::Contact => contact::render_contact(props),
    }
}

/// Línea con el payload fijo de la ruta
pub(crate) fn render_value(props: &RouteProps) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("p")?
        .class("route-value")
        .text(&format!("value: {}", props.value))
        .build())
}
