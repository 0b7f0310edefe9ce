// ============================================================================
// EVENT HANDLING
// ============================================================================
// Listeners sobre elementos: cuando el elemento se destruye (re-render con
// set_inner_html("")) el navegador limpia el listener, así que forget() no
// acumula closures. Los listeners sobre window viven en HistoryService.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, MouseEvent};

pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Click "normal" sobre un enlace: botón izquierdo y sin teclas modificadoras.
/// Los demás (nueva pestaña, etc.) se dejan al navegador.
pub fn is_plain_click(event: &MouseEvent) -> bool {
    event.button() == 0
        && !event.meta_key()
        && !event.ctrl_key()
        && !event.shift_key()
        && !event.alt_key()
}

/// Intercepta el click de un enlace y entrega su destino al handler
pub fn on_link_click<F>(element: &Element, to: &str, handler: F) -> Result<(), JsValue>
where
    F: Fn(&str) + 'static,
{
    let to = to.to_string();
    on_click(element, move |event: MouseEvent| {
        if !is_plain_click(&event) {
            return;
        }
        event.prevent_default();
        handler(&to);
    })
}
