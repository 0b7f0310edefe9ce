// ============================================================================
// CACHE GROUPS - Reglas que sacan módulos de sus chunks a un chunk compartido
// ============================================================================

use serde::{Deserialize, Serialize};
use super::chunk::ChunkKind;

/// Chunks que revisa un cache group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkFilter {
    /// Entry y asíncronos
    All,
    /// Solo los que se cargan con `import()`
    #[default]
    Async,
    /// Solo el de entrada
    Initial,
}

impl ChunkFilter {
    pub fn accepts(self, kind: ChunkKind) -> bool {
        match (self, kind) {
            (_, ChunkKind::Shared) => false,
            (ChunkFilter::All, _) => true,
            (ChunkFilter::Async, ChunkKind::Async) => true,
            (ChunkFilter::Initial, ChunkKind::Entry) => true,
            _ => false,
        }
    }
}

/// Segmento que debe aparecer en el path del módulo
/// (`node_modules` casa con `node_modules/react/index.js`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleTest(pub String);

impl ModuleTest {
    pub fn matches(&self, path: &str) -> bool {
        path.split(&['/', '\\'][..]).any(|segment| segment == self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheGroup {
    pub name: String,
    /// Sin test entra cualquier módulo
    #[serde(default)]
    pub test: Option<ModuleTest>,
    #[serde(default)]
    pub chunks: ChunkFilter,
    #[serde(default = "default_min_chunks")]
    pub min_chunks: usize,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub reuse_existing_chunk: bool,
    /// Ignora `min_size`
    #[serde(default)]
    pub enforce: bool,
    /// Sustituye al `min_size` global
    #[serde(default)]
    pub min_size: Option<u64>,
}

fn default_min_chunks() -> usize {
    1
}

impl CacheGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            test: None,
            chunks: ChunkFilter::default(),
            min_chunks: default_min_chunks(),
            priority: 0,
            reuse_existing_chunk: false,
            enforce: false,
            min_size: None,
        }
    }

    /// Todo el código de terceros, síncrono o diferido
    pub fn vendor() -> Self {
        Self {
            test: Some(ModuleTest("node_modules".to_string())),
            chunks: ChunkFilter::All,
            priority: 20,
            ..Self::new("vendor")
        }
    }

    /// Código que comparten dos o más chunks asíncronos
    pub fn common() -> Self {
        Self {
            chunks: ChunkFilter::Async,
            min_chunks: 2,
            priority: 10,
            reuse_existing_chunk: true,
            enforce: true,
            ..Self::new("common")
        }
    }

    pub fn accepts_module(&self, path: &str) -> bool {
        self.test.as_ref().map_or(true, |test| test.matches(path))
    }
}
