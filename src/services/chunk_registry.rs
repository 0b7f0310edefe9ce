// ============================================================================
// CHUNK REGISTRY - Chunks que han llegado y ejecución de sus módulos
// ============================================================================
// Cada fichero de chunk, al ejecutarse, deja [nombre, raíz, módulos] en
// `self.lazyRouteShellChunks` (ver split_chunks::emit). Aquí se vuelca ese
// array a un registro propio y se ejecutan los módulos bajo demanda, una
// sola vez cada uno, con la firma `function (module, exports, require)`.
// ============================================================================

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;
use crate::dom::window;
use crate::models::{RouteProps, CHUNK_GLOBAL};

#[derive(Default)]
struct Registry {
    /// chunk -> módulo raíz (None en los compartidos)
    chunks: BTreeMap<String, Option<String>>,
    factories: HashMap<String, Function>,
    exports: HashMap<String, JsValue>,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

fn key(name: &str) -> JsValue {
    JsValue::from_str(name)
}

/// Vuelca las entradas pendientes del array global y lo vacía.
/// Devuelve cuántos chunks nuevos se registraron.
pub fn sync() -> Result<usize, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("No window"))?;
    let pending = Reflect::get(&win, &key(CHUNK_GLOBAL))?;
    if pending.is_undefined() || pending.is_null() {
        return Ok(0);
    }
    let pending: Array = pending.dyn_into()?;
    let count = pending.length() as usize;
    for entry in pending.iter() {
        register(entry.dyn_into::<Array>()?)?;
    }
    Reflect::set(&pending, &key("length"), &JsValue::from(0))?;
    Ok(count)
}

fn register(entry: Array) -> Result<(), JsValue> {
    let name = entry
        .get(0)
        .as_string()
        .ok_or_else(|| JsValue::from_str("Chunk entry without name"))?;
    let root = entry.get(1).as_string();
    let modules = Object::entries(&entry.get(2).dyn_into::<Object>()?);

    REGISTRY.with(|registry| -> Result<(), JsValue> {
        let mut registry = registry.borrow_mut();
        for pair in modules.iter() {
            let pair: Array = pair.dyn_into()?;
            let Some(id) = pair.get(0).as_string() else {
                continue;
            };
            let factory: Function = pair.get(1).dyn_into()?;
            registry.factories.entry(id).or_insert(factory);
        }
        registry.chunks.insert(name.clone(), root);
        Ok(())
    })?;

    log::debug!("📥 [REGISTRY] chunk {} registrado", name);
    Ok(())
}

pub fn is_registered(chunk: &str) -> bool {
    if let Err(e) = sync() {
        log::warn!("⚠️ [REGISTRY] No se pudo leer {}: {:?}", CHUNK_GLOBAL, e);
    }
    REGISTRY.with(|registry| registry.borrow().chunks.contains_key(chunk))
}

/// `require(id)` de los módulos: ejecuta la factoría la primera vez y
/// devuelve `module.exports`
pub fn require(id: &str) -> Result<JsValue, JsValue> {
    if let Some(exports) = REGISTRY.with(|r| r.borrow().exports.get(id).cloned()) {
        return Ok(exports);
    }
    sync()?;
    let factory = REGISTRY
        .with(|r| r.borrow().factories.get(id).cloned())
        .ok_or_else(|| JsValue::from_str(&format!("Module {} is not registered", id)))?;

    let module = Object::new();
    let exports: JsValue = Object::new().into();
    Reflect::set(&module, &key("exports"), &exports)?;
    // Visible antes de ejecutar: un ciclo entre módulos ve exports parciales
    REGISTRY.with(|r| r.borrow_mut().exports.insert(id.to_string(), exports.clone()));

    let require_fn =
        Closure::<dyn Fn(String) -> Result<JsValue, JsValue>>::new(|id: String| require(&id)).into_js_value();
    if let Err(e) = factory.call3(&JsValue::UNDEFINED, &module, &exports, &require_fn) {
        REGISTRY.with(|r| r.borrow_mut().exports.remove(id));
        return Err(e);
    }

    let exports = Reflect::get(&module, &key("exports"))?;
    REGISTRY.with(|r| r.borrow_mut().exports.insert(id.to_string(), exports.clone()));
    Ok(exports)
}

/// Ejecuta el módulo raíz de un chunk ya registrado
pub fn run_root(chunk: &str) -> Result<Option<JsValue>, JsValue> {
    sync()?;
    let root = REGISTRY.with(|r| r.borrow().chunks.get(chunk).cloned().flatten());
    root.map(|id| require(&id)).transpose()
}

/// Si el módulo raíz del chunk exporta `render` (o `default`) como función,
/// la llama con las props de la ruta y devuelve el elemento que produzca
pub fn render_from_chunk(chunk: &str, props: &RouteProps) -> Result<Option<Element>, JsValue> {
    let Some(exports) = run_root(chunk)? else {
        return Ok(None);
    };
    if !exports.is_object() && !exports.is_function() {
        return Ok(None);
    }

    let render = ["render", "default"].iter().find_map(|name| {
        Reflect::get(&exports, &key(name))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
    });
    let Some(render) = render else {
        return Ok(None);
    };

    let node = render.call1(&JsValue::UNDEFINED, &props_object(props)?)?;
    Ok(node.dyn_into::<Element>().ok())
}

/// `{ match: { path, url, isExact, params }, location: { pathname, search, hash }, value }`
fn props_object(props: &RouteProps) -> Result<JsValue, JsValue> {
    let params = Object::new();
    for (name, value) in &props.route_match.params {
        Reflect::set(&params, &key(name), &key(value))?;
    }

    let route_match = Object::new();
    Reflect::set(&route_match, &key("path"), &key(&props.route_match.path))?;
    Reflect::set(&route_match, &key("url"), &key(&props.route_match.url))?;
    Reflect::set(&route_match, &key("isExact"), &JsValue::from_bool(props.route_match.is_exact))?;
    Reflect::set(&route_match, &key("params"), &params)?;

    let location = Object::new();
    Reflect::set(&location, &key("pathname"), &key(&props.location.pathname))?;
    Reflect::set(&location, &key("search"), &key(&props.location.search))?;
    Reflect::set(&location, &key("hash"), &key(&props.location.hash))?;

    let object = Object::new();
    Reflect::set(&object, &key("match"), &route_match)?;
    Reflect::set(&object, &key("location"), &location)?;
    Reflect::set(&object, &key("value"), &key(&props.value))?;
    Ok(object.into())
}
