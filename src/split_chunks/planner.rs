// ============================================================================
// PLANNER - Reparto de módulos en chunks
// ============================================================================
// 1. Chunks iniciales: `main` con todo lo que el entry alcanza por imports
//    síncronos; cada destino de `import()` abre un chunk asíncrono con lo que
//    alcanza, menos lo que ya está cargado por CUALQUIER camino que llegue a
//    él (intersección sobre todos sus padres, iterada hasta punto fijo).
// 2. Cache groups, de mayor a menor prioridad: cada módulo que casa sale de
//    los chunks que lo tienen y entra en el chunk del grupo. Solo se toma de
//    chunks entry/async, así que un grupo de menor prioridad ya no lo ve.
// 3. Se eliminan los chunks vacíos. Cada chunk entry/async recibe la lista
//    ordenada de chunks a cargar antes que él (compartidos primero).
// ============================================================================

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use serde::Serialize;
use crate::models::ChunkManifest;
use super::cache_group::CacheGroup;
use super::chunk::{chunk_name_for, file_name, Chunk, ChunkKind};
use super::config::SplitChunksConfig;
use super::graph::ModuleGraph;
use super::PlanError;

/// Nombre del chunk de entrada (`main.js`)
pub const ENTRY_CHUNK: &str = "main";

#[derive(Debug, Clone, Serialize)]
pub struct ChunkPlan {
    pub chunks: Vec<Chunk>,
    /// Chunk entry/async -> chunks a cargar, dependencias primero y él al final
    pub groups: BTreeMap<String, Vec<String>>,
}

impl ChunkPlan {
    pub fn chunk(&self, name: &str) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.name == name)
    }

    /// Chunk en el que acabó un módulo
    pub fn chunk_of(&self, module: &str) -> Option<&str> {
        self.chunks
            .iter()
            .find(|c| c.modules.contains(module))
            .map(|c| c.name.as_str())
    }

    pub fn files_for(&self, origin: &str) -> Vec<String> {
        self.groups
            .get(origin)
            .map(|names| names.iter().map(|n| file_name(n)).collect())
            .unwrap_or_default()
    }

    pub fn manifest(&self, public_path: &str) -> ChunkManifest {
        let chunks = self
            .groups
            .keys()
            .filter(|name| name.as_str() != ENTRY_CHUNK)
            .map(|name| (name.clone(), self.files_for(name)))
            .collect();
        ChunkManifest {
            public_path: public_path.to_string(),
            initial: self.files_for(ENTRY_CHUNK),
            chunks,
        }
    }
}

pub fn plan_chunks(graph: &ModuleGraph, config: &SplitChunksConfig) -> Result<ChunkPlan, PlanError> {
    graph.validate()?;

    let mut chunks = initial_chunks(graph);
    let mut requires: BTreeMap<String, Vec<String>> = chunks
        .iter()
        .map(|c| (c.name.clone(), Vec::new()))
        .collect();

    for group in config.ordered_groups() {
        apply_group(graph, config, &group, &mut chunks, &mut requires);
    }

    chunks.retain(|c| !c.is_empty());
    let live: BTreeSet<&str> = chunks.iter().map(|c| c.name.as_str()).collect();

    let groups = requires
        .keys()
        .map(|origin| {
            let mut order = Vec::new();
            resolve_group(origin, &requires, &mut BTreeSet::new(), &mut order);
            order.retain(|name| live.contains(name.as_str()));
            (origin.clone(), order)
        })
        .collect();

    Ok(ChunkPlan { chunks, groups })
}

/// Raíces de chunk en orden de descubrimiento (el entry primero) y, para
/// cada una, los módulos que ya están cargados cuando se pide.
///
/// Una raíz con varios padres solo puede contar con lo que TODOS ellos
/// aportan. La disponibilidad solo decrece, así que reencolar una raíz
/// cada vez que se estrecha termina.
fn availability(graph: &ModuleGraph) -> (Vec<String>, BTreeMap<String, BTreeSet<String>>) {
    let mut order = vec![graph.entry.clone()];
    let mut available = BTreeMap::from([(graph.entry.clone(), BTreeSet::new())]);
    let mut queue = VecDeque::from([graph.entry.clone()]);

    while let Some(root) = queue.pop_front() {
        let mut provided = available.get(&root).cloned().unwrap_or_default();
        let modules = graph.sync_closure(&root, &provided);
        provided.extend(modules.iter().cloned());

        for target in graph.async_targets(&modules) {
            match available.get_mut(&target) {
                None => {
                    available.insert(target.clone(), provided.clone());
                    order.push(target.clone());
                    queue.push_back(target);
                }
                Some(current) => {
                    let narrowed: BTreeSet<String> = current.intersection(&provided).cloned().collect();
                    if narrowed.len() < current.len() {
                        log::debug!(
                            "🔀 [SPLIT] {} pierde {} módulos disponibles (padre {})",
                            target,
                            current.len() - narrowed.len(),
                            root
                        );
                        *current = narrowed;
                        if !queue.contains(&target) {
                            queue.push_back(target);
                        }
                    }
                }
            }
        }
    }
    (order, available)
}

fn initial_chunks(graph: &ModuleGraph) -> Vec<Chunk> {
    let (order, available) = availability(graph);
    let mut names = BTreeSet::from([ENTRY_CHUNK.to_string()]);

    order
        .iter()
        .map(|root| {
            let modules = graph.sync_closure(root, &available.get(root).cloned().unwrap_or_default());
            if *root == graph.entry {
                return Chunk::entry(ENTRY_CHUNK, root, modules);
            }
            let name = unique_name(chunk_name_for(root), &mut names);
            log::debug!("📦 [SPLIT] chunk asíncrono {} <- {} ({} módulos)", name, root, modules.len());
            Chunk::async_chunk(&name, root, modules)
        })
        .collect()
}

fn unique_name(base: String, taken: &mut BTreeSet<String>) -> String {
    let mut name = base.clone();
    let mut n = 2;
    while taken.contains(&name) {
        name = format!("{}-{}", base, n);
        n += 1;
    }
    taken.insert(name.clone());
    name
}

fn apply_group(
    graph: &ModuleGraph,
    config: &SplitChunksConfig,
    group: &CacheGroup,
    chunks: &mut Vec<Chunk>,
    requires: &mut BTreeMap<String, Vec<String>>,
) {
    // módulo -> chunks de origen que lo contienen
    let mut selected: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if !group.chunks.accepts(chunk.kind) {
            continue;
        }
        for module in chunk.modules.iter().filter(|m| group.accepts_module(m)) {
            selected.entry(module.clone()).or_default().push(i);
        }
    }
    selected.retain(|_, sources| sources.len() >= group.min_chunks);
    if selected.is_empty() {
        return;
    }

    let size: u64 = selected.keys().map(|m| graph.size_of(m)).sum();
    let min_size = config.min_size_for(group);
    if size < min_size {
        log::debug!("[SPLIT] grupo {} descartado: {} bytes < min_size {}", group.name, size, min_size);
        return;
    }

    let modules: BTreeSet<String> = selected.keys().cloned().collect();
    let sources: BTreeSet<usize> = selected.values().flatten().copied().collect();

    let reused = if group.reuse_existing_chunk {
        sources.iter().copied().find(|&i| chunks[i].modules == modules)
    } else {
        None
    };
    let target = match reused {
        Some(i) => {
            log::debug!("[SPLIT] grupo {} reutiliza el chunk {}", group.name, chunks[i].name);
            i
        }
        None => shared_chunk(chunks, &group.name),
    };

    for (module, holders) in &selected {
        for &i in holders.iter().filter(|&&i| i != target) {
            chunks[i].modules.remove(module);
        }
        chunks[target].modules.insert(module.clone());
    }

    let target_name = chunks[target].name.clone();
    for &i in sources.iter().filter(|&&i| i != target) {
        let list = requires.entry(chunks[i].name.clone()).or_default();
        if !list.contains(&target_name) {
            list.push(target_name.clone());
        }
    }

    log::info!(
        "📦 [SPLIT] {} <- {} módulos de {} chunks ({} bytes)",
        target_name,
        modules.len(),
        sources.len(),
        size
    );
}

/// Chunk compartido del grupo, creado la primera vez. Si el nombre ya lo usa
/// un chunk entry/async se le añade sufijo.
fn shared_chunk(chunks: &mut Vec<Chunk>, name: &str) -> usize {
    if let Some(i) = chunks.iter().position(|c| c.kind == ChunkKind::Shared && c.name == name) {
        return i;
    }
    let mut taken: BTreeSet<String> = chunks.iter().map(|c| c.name.clone()).collect();
    let name = unique_name(name.to_string(), &mut taken);
    chunks.push(Chunk::shared(&name));
    chunks.len() - 1
}

/// En profundidad: un chunk requerido con requisitos propios (un chunk
/// asíncrono reutilizado) los trae delante de él.
fn resolve_group(
    name: &str,
    requires: &BTreeMap<String, Vec<String>>,
    visiting: &mut BTreeSet<String>,
    order: &mut Vec<String>,
) {
    if !visiting.insert(name.to_string()) {
        return;
    }
    for dep in requires.get(name).into_iter().flatten() {
        resolve_group(dep, requires, visiting, order);
    }
    if !order.iter().any(|n| n == name) {
        order.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split_chunks::graph::{Import, ImportKind, Module};

    fn graph(modules: &[(&str, u64)], imports: &[(&str, &str, ImportKind)]) -> ModuleGraph {
        ModuleGraph {
            entry: modules[0].0.to_string(),
            modules: modules.iter().map(|(path, size)| Module::new(path, *size)).collect(),
            imports: imports
                .iter()
                .map(|(from, to, kind)| Import { from: from.to_string(), to: to.to_string(), kind: *kind })
                .collect(),
        }
    }

    /// Módulos cargados tras seguir una cadena de `import()` desde `main`
    fn loaded_via(plan: &ChunkPlan, chain: &[&str]) -> BTreeSet<String> {
        chain
            .iter()
            .flat_map(|origin| plan.groups.get(*origin).into_iter().flatten())
            .filter_map(|name| plan.chunk(name))
            .flat_map(|chunk| chunk.modules.iter().cloned())
            .collect()
    }

    fn no_groups() -> SplitChunksConfig {
        SplitChunksConfig { cache_groups: Vec::new(), ..Default::default() }
    }

    use ImportKind::{Async, Sync};

    #[test]
    fn module_in_a_single_async_chunk_stays_there() {
        let g = graph(
            &[("index.js", 1), ("home.js", 1), ("only-home.js", 1)],
            &[("index.js", "home.js", Async), ("home.js", "only-home.js", Sync)],
        );
        let plan = plan_chunks(&g, &SplitChunksConfig::default()).unwrap();
        assert_eq!(plan.chunk_of("only-home.js"), Some("home"));
        assert!(plan.chunk("common").is_none());
        assert_eq!(plan.files_for("home"), vec!["home.js"]);
        assert_eq!(plan.chunk("home").and_then(|c| c.root.as_deref()), Some("home.js"));
    }

    #[test]
    fn entry_modules_are_not_duplicated_into_async_chunks() {
        let g = graph(
            &[("index.js", 1), ("util.js", 1), ("a.js", 1), ("b.js", 1)],
            &[
                ("index.js", "util.js", Sync),
                ("index.js", "a.js", Async),
                ("index.js", "b.js", Async),
                ("a.js", "util.js", Sync),
                ("b.js", "util.js", Sync),
            ],
        );
        let plan = plan_chunks(&g, &SplitChunksConfig::default()).unwrap();
        assert_eq!(plan.chunk_of("util.js"), Some(ENTRY_CHUNK));
        assert!(plan.chunk("common").is_none());
    }

    #[test]
    fn third_party_code_shared_by_views_goes_to_vendor() {
        let g = graph(
            &[("index.js", 1), ("a.js", 1), ("b.js", 1), ("node_modules/lodash/index.js", 1)],
            &[
                ("index.js", "a.js", Async),
                ("index.js", "b.js", Async),
                ("a.js", "node_modules/lodash/index.js", Sync),
                ("b.js", "node_modules/lodash/index.js", Sync),
            ],
        );
        let plan = plan_chunks(&g, &SplitChunksConfig::default()).unwrap();
        assert_eq!(plan.chunk_of("node_modules/lodash/index.js"), Some("vendor"));
        assert!(plan.chunk("common").is_none());
        assert_eq!(plan.files_for("a"), vec!["vendor.js", "a.js"]);
    }

    #[test]
    fn existing_chunk_is_reused_for_common_code() {
        // widget.js es chunk asíncrono propio y además lo importan a y b
        let g = graph(
            &[("index.js", 1), ("a.js", 1), ("b.js", 1), ("widget.js", 1)],
            &[
                ("index.js", "a.js", Async),
                ("index.js", "b.js", Async),
                ("index.js", "widget.js", Async),
                ("a.js", "widget.js", Sync),
                ("b.js", "widget.js", Sync),
            ],
        );
        let plan = plan_chunks(&g, &SplitChunksConfig::default()).unwrap();
        assert!(plan.chunk("common").is_none());
        assert_eq!(plan.chunk_of("widget.js"), Some("widget"));
        assert_eq!(plan.files_for("a"), vec!["widget.js", "a.js"]);
    }

    #[test]
    fn min_size_blocks_non_enforced_groups() {
        let g = graph(
            &[("index.js", 1), ("node_modules/tiny/index.js", 10)],
            &[("index.js", "node_modules/tiny/index.js", Sync)],
        );
        let config = SplitChunksConfig { min_size: 1_000, ..Default::default() };
        let plan = plan_chunks(&g, &config).unwrap();
        assert_eq!(plan.chunk_of("node_modules/tiny/index.js"), Some(ENTRY_CHUNK));
        assert!(plan.chunk("vendor").is_none());
    }

    #[test]
    fn generic_groups_only_when_enabled() {
        let g = graph(
            &[("index.js", 1), ("a.js", 1), ("b.js", 1), ("shared.js", 1)],
            &[
                ("index.js", "a.js", Async),
                ("index.js", "b.js", Async),
                ("a.js", "shared.js", Sync),
                ("b.js", "shared.js", Sync),
            ],
        );
        let config = SplitChunksConfig {
            default_groups: true,
            cache_groups: Vec::new(),
            ..Default::default()
        };
        let plan = plan_chunks(&g, &config).unwrap();
        assert_eq!(plan.chunk_of("shared.js"), Some("default"));

        let plan = plan_chunks(&g, &no_groups()).unwrap();
        assert_eq!(plan.chunk("a").map(Chunk::len), Some(2));
    }

    #[test]
    fn colliding_async_names_get_suffixes() {
        let g = graph(
            &[("index.js", 1), ("a/view.js", 1), ("b/view.js", 1)],
            &[("index.js", "a/view.js", Async), ("index.js", "b/view.js", Async)],
        );
        let plan = plan_chunks(&g, &SplitChunksConfig::default()).unwrap();
        assert_eq!(plan.chunk_of("a/view.js"), Some("view"));
        assert_eq!(plan.chunk_of("b/view.js"), Some("view-2"));
    }

    #[test]
    fn nested_async_chunk_sees_parent_modules() {
        let g = graph(
            &[("index.js", 1), ("a.js", 1), ("dep.js", 1), ("nested.js", 1)],
            &[
                ("index.js", "a.js", Async),
                ("a.js", "dep.js", Sync),
                ("a.js", "nested.js", Async),
                ("nested.js", "dep.js", Sync),
            ],
        );
        let plan = plan_chunks(&g, &SplitChunksConfig::default()).unwrap();
        assert_eq!(plan.chunk_of("dep.js"), Some("a"));
        assert_eq!(plan.chunk("nested").map(Chunk::len), Some(1));
    }

    // a aporta dep.js pero b no: nested no puede contar con él
    fn two_parent_graph() -> ModuleGraph {
        graph(
            &[("index.js", 1), ("a.js", 1), ("b.js", 1), ("dep.js", 1), ("nested.js", 1)],
            &[
                ("index.js", "a.js", Async),
                ("index.js", "b.js", Async),
                ("a.js", "dep.js", Sync),
                ("a.js", "nested.js", Async),
                ("b.js", "nested.js", Async),
                ("nested.js", "dep.js", Sync),
            ],
        )
    }

    #[test]
    fn nested_chunk_keeps_modules_only_one_parent_provides() {
        let plan = plan_chunks(&two_parent_graph(), &no_groups()).unwrap();
        let nested = plan.chunk("nested").unwrap();
        assert!(nested.modules.contains("dep.js"));
        assert!(nested.modules.contains("nested.js"));
        assert!(!plan.chunk("b").unwrap().modules.contains("dep.js"));
    }

    #[test]
    fn nested_chunk_is_complete_through_every_parent() {
        let g = two_parent_graph();
        let needed = g.sync_closure("nested.js", &BTreeSet::new());

        for config in [SplitChunksConfig::default(), no_groups()] {
            let plan = plan_chunks(&g, &config).unwrap();
            for parent in ["a", "b"] {
                let loaded = loaded_via(&plan, &[ENTRY_CHUNK, parent, "nested"]);
                assert!(
                    needed.is_subset(&loaded),
                    "main -> {} -> nested carga {:?}",
                    parent,
                    loaded
                );
            }
        }

        // Con la política por defecto dep.js queda en common, antes que nested
        let plan = plan_chunks(&g, &SplitChunksConfig::default()).unwrap();
        assert_eq!(plan.chunk_of("dep.js"), Some("common"));
        assert_eq!(plan.files_for("nested"), vec!["common.js", "nested.js"]);
        assert_eq!(plan.files_for("a"), vec!["common.js", "a.js"]);
    }

    #[test]
    fn module_every_parent_provides_is_not_repeated() {
        let g = graph(
            &[("index.js", 1), ("a.js", 1), ("b.js", 1), ("dep.js", 1), ("nested.js", 1)],
            &[
                ("index.js", "a.js", Async),
                ("index.js", "b.js", Async),
                ("a.js", "dep.js", Sync),
                ("b.js", "dep.js", Sync),
                ("a.js", "nested.js", Async),
                ("b.js", "nested.js", Async),
                ("nested.js", "dep.js", Sync),
            ],
        );
        let plan = plan_chunks(&g, &no_groups()).unwrap();
        assert_eq!(plan.chunk("nested").map(Chunk::len), Some(1));
    }

    #[test]
    fn availability_narrows_through_late_parents() {
        // mid se descubre vía a (que aporta x) y más tarde vía c (que no);
        // leaf, hijo de mid, tiene que acabar con x a su alcance
        let g = graph(
            &[
                ("index.js", 1),
                ("a.js", 1),
                ("b.js", 1),
                ("c.js", 1),
                ("x.js", 1),
                ("mid.js", 1),
                ("leaf.js", 1),
            ],
            &[
                ("index.js", "a.js", Async),
                ("index.js", "b.js", Async),
                ("a.js", "x.js", Sync),
                ("a.js", "mid.js", Async),
                ("b.js", "c.js", Async),
                ("c.js", "mid.js", Async),
                ("mid.js", "leaf.js", Async),
                ("leaf.js", "x.js", Sync),
            ],
        );
        let needed = g.sync_closure("leaf.js", &BTreeSet::new());

        for config in [SplitChunksConfig::default(), no_groups()] {
            let plan = plan_chunks(&g, &config).unwrap();
            for chain in [
                vec![ENTRY_CHUNK, "a", "mid", "leaf"],
                vec![ENTRY_CHUNK, "b", "c", "mid", "leaf"],
            ] {
                let loaded = loaded_via(&plan, &chain);
                assert!(needed.is_subset(&loaded), "{:?} carga {:?}", chain, loaded);
            }
        }
    }
}
