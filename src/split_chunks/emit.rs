// ============================================================================
// EMIT - Escritura de un fichero `<chunk>.js` por chunk planificado
// ============================================================================
// Cada fichero, al ejecutarse, añade una entrada al array global
// `self[CHUNK_GLOBAL]`:
//
//   [nombre, módulo raíz | null, { id: function (module, exports, require) { ... } }]
//
// El runtime del shell lee ese array para saber qué chunks han llegado y
// ejecutar sus módulos bajo demanda.
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use crate::models::CHUNK_GLOBAL;
use super::chunk::Chunk;
use super::graph::ModuleGraph;
use super::planner::ChunkPlan;
use super::PlanError;

/// Código de cada módulo: el del grafo o, si no lo trae, `src_root/<path>`
pub fn module_sources(
    graph: &ModuleGraph,
    src_root: Option<&Path>,
) -> Result<BTreeMap<String, String>, PlanError> {
    let mut sources = BTreeMap::new();
    for module in &graph.modules {
        let source = match (&module.source, src_root) {
            (Some(source), _) => source.clone(),
            (None, Some(root)) => {
                let path = root.join(&module.path);
                fs::read_to_string(&path).map_err(|e| PlanError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
            (None, None) => {
                log::warn!("⚠️ [EMIT] {} sin código, se emite vacío", module.path);
                String::new()
            }
        };
        sources.insert(module.path.clone(), source);
    }
    Ok(sources)
}

pub fn render_chunk(chunk: &Chunk, sources: &BTreeMap<String, String>) -> Result<String, PlanError> {
    let global = serde_json::to_string(CHUNK_GLOBAL)?;
    let root = match &chunk.root {
        Some(root) => serde_json::to_string(root)?,
        None => "null".to_string(),
    };

    let mut out = format!("/* chunk: {} */\n", chunk.name);
    out.push_str(&format!(
        "(self[{global}] = self[{global}] || []).push([\n  {},\n  {},\n  {{\n",
        serde_json::to_string(&chunk.name)?,
        root,
        global = global
    ));
    for module in &chunk.modules {
        let source = sources.get(module).map(String::as_str).unwrap_or("");
        out.push_str(&format!(
            "    {}: function (module, exports, require) {{\n{}\n    }},\n",
            serde_json::to_string(module)?,
            source.trim_end()
        ));
    }
    out.push_str("  },\n]);\n");
    Ok(out)
}

/// Escribe todos los chunks en `out_dir`; devuelve las rutas escritas
pub fn write_chunks(
    plan: &ChunkPlan,
    sources: &BTreeMap<String, String>,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, PlanError> {
    let mut written = Vec::with_capacity(plan.chunks.len());
    for chunk in &plan.chunks {
        let path = out_dir.join(chunk.file_name());
        let js = render_chunk(chunk, sources)?;
        fs::write(&path, js).map_err(|e| PlanError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("[EMIT] {} ({} módulos)", path.display(), chunk.len());
        written.push(path);
    }
    Ok(written)
}
