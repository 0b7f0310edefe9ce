// ============================================================================
// CHUNK LOADER - Descarga de ficheros de chunk mediante <script>
// ============================================================================
// Igual que el runtime JSONP de un bundler: un <script data-chunk="url">
// por fichero. Si la etiqueta ya existe (cargada o en vuelo) se reutiliza,
// así dos vistas que comparten `common.js` no lo piden dos veces.
// Si falla, la etiqueta se elimina para que un reintento cree otra nueva.
// Que el script cargue no basta: el chunk tiene que haberse registrado.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlScriptElement};
use crate::dom::{document, query_selector};
use crate::models::ChunkError;
use crate::services::chunk_registry;

const LOADED_ATTR: &str = "data-loaded";

/// Carga un fichero de chunk por URL
#[allow(async_fn_in_trait)]
pub trait ChunkLoader {
    async fn load_file(&self, url: &str) -> Result<(), ChunkError>;

    /// El chunk se ejecutó y dejó sus módulos en el registro
    fn is_registered(&self, chunk: &str) -> bool;
}

fn dom_error(e: JsValue) -> ChunkError {
    ChunkError::Dom(format!("{:?}", e))
}

/// Loader del navegador basado en etiquetas <script>
#[derive(Clone, Default)]
pub struct ScriptChunkLoader;

impl ScriptChunkLoader {
    pub fn new() -> Self {
        Self
    }

    fn existing_script(url: &str) -> Result<Option<HtmlScriptElement>, JsValue> {
        let selector = format!("script[data-chunk=\"{}\"]", url);
        Ok(query_selector(&selector)?.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok()))
    }

    fn create_script(url: &str) -> Result<HtmlScriptElement, JsValue> {
        let script = document()
            .ok_or_else(|| JsValue::from_str("No document"))?
            .create_element("script")?
            .dyn_into::<HtmlScriptElement>()?;
        script.set_src(url);
        script.set_async(true);
        script.set_attribute("data-chunk", url)?;
        Ok(script)
    }

    /// Promesa que se resuelve con `load` y se rechaza con `error`
    fn watch(script: &HtmlScriptElement) -> Result<js_sys::Promise, JsValue> {
        let mut setup: Result<(), JsValue> = Ok(());
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let loaded = script.clone();
            let on_load = Closure::once_into_js(move |_e: Event| {
                let _ = loaded.set_attribute(LOADED_ATTR, "true");
                let _ = resolve.call0(&JsValue::NULL);
            });
            let failed = script.clone();
            let on_error = Closure::once_into_js(move |_e: Event| {
                failed.remove();
                let _ = reject.call0(&JsValue::NULL);
            });
            setup = script
                .add_event_listener_with_callback("load", on_load.unchecked_ref())
                .and_then(|_| script.add_event_listener_with_callback("error", on_error.unchecked_ref()));
        });
        setup.map(|_| promise)
    }
}

impl ChunkLoader for ScriptChunkLoader {
    async fn load_file(&self, url: &str) -> Result<(), ChunkError> {
        let (script, is_new) = match Self::existing_script(url).map_err(dom_error)? {
            Some(script) => {
                if script.get_attribute(LOADED_ATTR).as_deref() == Some("true") {
                    return Ok(());
                }
                log::debug!("[LOADER] {} ya está en vuelo, esperando", url);
                (script, false)
            }
            None => (Self::create_script(url).map_err(dom_error)?, true),
        };

        let promise = Self::watch(&script).map_err(dom_error)?;
        if is_new {
            let head = document()
                .and_then(|doc| doc.head())
                .ok_or_else(|| ChunkError::Dom("No <head> element".to_string()))?;
            head.append_child(&script).map_err(dom_error)?;
        }

        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|_| ChunkError::Script { url: url.to_string() })
    }

    fn is_registered(&self, chunk: &str) -> bool {
        chunk_registry::is_registered(chunk)
    }
}
