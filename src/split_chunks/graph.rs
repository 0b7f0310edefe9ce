// ============================================================================
// MODULE GRAPH - Entrada del planificador de chunks
// ============================================================================
// Cada módulo se identifica por su path resuelto. Los imports son síncronos
// (van en el mismo chunk que quien importa) o asíncronos (`import()`, que
// abre un chunk descargable por separado).
// ============================================================================

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use serde::{Deserialize, Serialize};
use super::PlanError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Path resuelto, también es el id del módulo
    pub path: String,
    /// Tamaño en bytes (solo para `min_size`)
    #[serde(default)]
    pub size: u64,
    /// Código del módulo; sin él se lee de `--src-root`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Module {
    pub fn new(path: &str, size: u64) -> Self {
        Self { path: path.to_string(), size, source: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Sync,
    Async,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub from: String,
    pub to: String,
    pub kind: ImportKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleGraph {
    pub entry: String,
    pub modules: Vec<Module>,
    #[serde(default)]
    pub imports: Vec<Import>,
}

impl ModuleGraph {
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let graph: ModuleGraph = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Entry e imports deben apuntar a módulos declarados; ids únicos
    pub fn validate(&self) -> Result<(), PlanError> {
        let mut seen = BTreeSet::new();
        for module in &self.modules {
            if !seen.insert(module.path.as_str()) {
                return Err(PlanError::DuplicateModule(module.path.clone()));
            }
        }
        if !seen.contains(self.entry.as_str()) {
            return Err(PlanError::MissingEntry(self.entry.clone()));
        }
        for import in &self.imports {
            for end in [&import.from, &import.to] {
                if !seen.contains(end.as_str()) {
                    return Err(PlanError::UnknownModule {
                        from: import.from.clone(),
                        to: import.to.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn module(&self, path: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.path == path)
    }

    pub fn size_of(&self, path: &str) -> u64 {
        self.module(path).map(|m| m.size).unwrap_or(0)
    }

    fn edges(&self, kind: ImportKind) -> BTreeMap<&str, Vec<&str>> {
        let mut edges: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for import in self.imports.iter().filter(|i| i.kind == kind) {
            edges.entry(import.from.as_str()).or_default().push(import.to.as_str());
        }
        edges
    }

    /// Módulos alcanzables desde `root` por imports síncronos. Los que están
    /// en `available` se saltan y no se recorren.
    pub fn sync_closure(&self, root: &str, available: &BTreeSet<String>) -> BTreeSet<String> {
        let sync = self.edges(ImportKind::Sync);
        let mut found = BTreeSet::new();
        let mut queue = VecDeque::from([root]);

        while let Some(path) = queue.pop_front() {
            if available.contains(path) || !found.insert(path.to_string()) {
                continue;
            }
            if let Some(next) = sync.get(path) {
                queue.extend(next.iter().copied());
            }
        }
        found
    }

    /// Destinos de `import()` de cualquiera de `modules`, en orden de declaración
    pub fn async_targets(&self, modules: &BTreeSet<String>) -> Vec<String> {
        let mut targets: Vec<String> = Vec::new();
        for import in &self.imports {
            if import.kind == ImportKind::Async
                && modules.contains(&import.from)
                && !targets.contains(&import.to)
            {
                targets.push(import.to.clone());
            }
        }
        targets
    }
}
