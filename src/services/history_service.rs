// ============================================================================
// HISTORY SERVICE - URL del navegador (pushState / popstate)
// ============================================================================
// El listener global de popstate solo se registra UNA VEZ (mismo criterio
// que cualquier listener sobre window: si se registra varias veces se acumula).
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::PopStateEvent;
use crate::dom::window;
use crate::models::Location;

#[derive(Clone, Default)]
pub struct HistoryService {
    listening: Rc<Cell<bool>>,
}

impl HistoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ubicación actual de window.location
    pub fn current_location() -> Location {
        let Some(location) = window().map(|w| w.location()) else {
            return Location::default();
        };
        let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
        Location {
            pathname: if pathname.is_empty() { "/".to_string() } else { pathname },
            search: location.search().unwrap_or_default(),
            hash: location.hash().unwrap_or_default(),
        }
    }

    /// Navegar sin recargar la página
    pub fn push(&self, path: &str) -> Result<Location, JsValue> {
        let history = window()
            .ok_or_else(|| JsValue::from_str("No window"))?
            .history()?;
        history.push_state_with_url(&JsValue::NULL, "", Some(path))?;
        Ok(Self::current_location())
    }

    /// Escuchar back/forward del navegador
    pub fn listen<F>(&self, callback: F) -> Result<(), JsValue>
    where
        F: Fn(Location) + 'static,
    {
        if self.listening.replace(true) {
            log::warn!("⚠️ [HISTORY] listen() ya fue llamado, ignorando llamada duplicada");
            return Ok(());
        }

        let win = window().ok_or_else(|| JsValue::from_str("No window"))?;
        let closure = Closure::wrap(Box::new(move |_e: PopStateEvent| {
            callback(Self::current_location());
        }) as Box<dyn FnMut(PopStateEvent)>);

        win.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
        // Listener global registrado una sola vez: vive lo mismo que la app
        closure.forget();
        Ok(())
    }
}
