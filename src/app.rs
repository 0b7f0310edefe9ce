// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Conecta la URL del navegador con el estado y lanza la descarga diferida de
// la vista que toque. Cada cambio de estado programa un re-render completo
// (agrupado con Timeout(0) para no renderizar varias veces seguidas).
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::models::{Location, ViewId};
use crate::services::{chunk_registry, HistoryService, HttpManifestSource, ScriptChunkLoader, ViewLoader};
use crate::split_chunks::ENTRY_CHUNK;
use crate::state::{AppState, LoadTicket};
use crate::views::render_app;

pub type WebViewLoader = ViewLoader<ScriptChunkLoader, HttpManifestSource>;

pub struct App {
    state: AppState,
    root: Element,
    history: HistoryService,
    loader: Rc<WebViewLoader>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(&CONFIG.root_element_id).ok_or_else(|| {
            JsValue::from_str(&format!("No #{} element found", CONFIG.root_element_id))
        })?;

        let state = AppState::new(HistoryService::current_location());

        let render_pending = Rc::new(Cell::new(false));
        state.subscribe_to_changes(move || {
            if render_pending.replace(true) {
                return;
            }
            let render_pending = render_pending.clone();
            Timeout::new(0, move || {
                render_pending.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        let loader = ViewLoader::new(ScriptChunkLoader::new(), HttpManifestSource::from_config());

        Ok(Self {
            state,
            root,
            history: HistoryService::new(),
            loader: Rc::new(loader),
        })
    }

    /// Arranca el módulo de entrada (si `main.js` se registró), escucha
    /// back/forward y pide la vista de la URL inicial
    pub fn start(&self) -> Result<(), JsValue> {
        if chunk_registry::is_registered(ENTRY_CHUNK) {
            if let Err(e) = chunk_registry::run_root(ENTRY_CHUNK) {
                log::error!("❌ [APP] El módulo de entrada falló: {:?}", e);
            }
        } else {
            log::warn!("⚠️ [APP] {}.js no está registrado", ENTRY_CHUNK);
        }
        self.history.listen(crate::on_location_change)?;
        if let Some(ticket) = self.state.request_current_view() {
            self.spawn_load(ticket);
        }
        Ok(())
    }

    pub fn render(&self) -> Result<(), JsValue> {
        log::debug!("🎬 [APP] render {}", self.state.router.location.with(|l| l.pathname.clone()));
        let view = render_app(&self.state)?;
        clear_children(&self.root);
        append_child(&self.root, &view)
    }

    /// Click en un enlace del menú
    pub fn navigate(&self, path: &str) -> Result<(), JsValue> {
        let location = self.history.push(path)?;
        self.apply_location(location);
        Ok(())
    }

    /// URL cambiada (pushState propio o popstate del navegador)
    pub fn apply_location(&self, location: Location) {
        if let Some(ticket) = self.state.navigate(location) {
            self.spawn_load(ticket);
        }
    }

    pub fn retry(&self, view: ViewId) {
        if let Some(ticket) = self.state.retry(view) {
            self.spawn_load(ticket);
        }
    }

    /// La descarga no se cancela: si el usuario navega a otra ruta sigue en
    /// segundo plano y solo actualiza el estado de su propia vista.
    fn spawn_load(&self, ticket: LoadTicket) {
        let state = self.state.clone();
        let loader = self.loader.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = loader.load_view(ticket.view).await;
            state.finish_load(ticket, result);
        });
    }
}
