// ============================================================================
// SPLIT CHUNKS - Política de partición del bundle
// ============================================================================
// Pasada posterior al build sobre el grafo de módulos: un chunk de entrada,
// uno por destino de `import()`, `vendor` para todo lo que viene de
// `node_modules` y `common` para el código que comparten dos o más chunks
// asíncronos. `emit` escribe un `.js` por chunk.
// ============================================================================

pub mod graph;
pub mod cache_group;
pub mod chunk;
pub mod config;
pub mod planner;
pub mod emit;
pub mod html;

use thiserror::Error;

pub use cache_group::{CacheGroup, ChunkFilter, ModuleTest};
pub use chunk::{Chunk, ChunkKind};
pub use config::SplitChunksConfig;
pub use emit::{module_sources, render_chunk, write_chunks};
pub use graph::{Import, ImportKind, Module, ModuleGraph};
pub use html::{render_index_html, DEFAULT_BOOT_MODULE, DEFAULT_TEMPLATE};
pub use planner::{plan_chunks, ChunkPlan, ENTRY_CHUNK};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("entry module `{0}` is not declared")]
    MissingEntry(String),
    #[error("module `{0}` is declared twice")]
    DuplicateModule(String),
    #[error("import {from} -> {to} references an undeclared module")]
    UnknownModule { from: String, to: String },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot access {path}: {message}")]
    Io { path: String, message: String },
}
