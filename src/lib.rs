// ============================================================================
// LAZY ROUTE SHELL - Router de cliente con vistas diferidas (RUST PURO)
// ============================================================================
// - Router: tres rutas, first-match-wins, enlaces con marca "active"
// - State: Rc<RefCell> + notificaciones (una sola instancia de App)
// - Services: descarga de chunks (<script>) + registro de módulos + manifest + history
// - Views: funciones que construyen DOM
// - split_chunks: política vendor/common usada por el CLI de build
// ============================================================================

pub mod config;
pub mod models;
pub mod router;
pub mod state;
pub mod services;
pub mod dom;
pub mod views;
pub mod split_chunks;
mod app;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;
use crate::models::{Location, ViewId};

// Instancia global de la app montada
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 Lazy route shell");

    let app = App::new()?;
    app.start()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });
    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|app_cell| match app_cell.borrow().as_ref() {
        Some(app) => {
            if let Err(e) = app.render() {
                log::error!("❌ [APP] Error re-renderizando: {:?}", e);
            }
        }
        None => log::warn!("⚠️ [APP] App no está inicializada"),
    });
}

/// Navegación desde un enlace
pub fn navigate_to(path: &str) {
    APP.with(|app_cell| {
        if let Some(app) = app_cell.borrow().as_ref() {
            if let Err(e) = app.navigate(path) {
                log::error!("❌ [ROUTER] No se pudo navegar a {}: {:?}", path, e);
            }
        }
    });
}

/// Back/forward del navegador
pub fn on_location_change(location: Location) {
    APP.with(|app_cell| {
        if let Some(app) = app_cell.borrow().as_ref() {
            app.apply_location(location);
        }
    });
}

/// Botón "retry" de una vista que no pudo cargarse
pub fn retry_view(view: ViewId) {
    APP.with(|app_cell| {
        if let Some(app) = app_cell.borrow().as_ref() {
            app.retry(view);
        }
    });
}

/// Navegación llamable desde JavaScript
#[wasm_bindgen]
pub fn navigate(path: &str) {
    navigate_to(path);
}
