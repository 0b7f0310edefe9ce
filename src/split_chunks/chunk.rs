// ============================================================================
// CHUNK - Unidad de salida del planificador (un fichero `<nombre>.js`)
// ============================================================================

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Lo carga el HTML de entrada
    Entry,
    /// Se carga bajo demanda vía `import()`
    Async,
    /// Creado por un cache group
    Shared,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub name: String,
    pub kind: ChunkKind,
    /// Módulo que abre el chunk (entry o destino de `import()`); los
    /// compartidos no tienen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    pub modules: BTreeSet<String>,
}

impl Chunk {
    pub fn entry(name: &str, root: &str, modules: BTreeSet<String>) -> Self {
        Self {
            name: name.to_string(),
            kind: ChunkKind::Entry,
            root: Some(root.to_string()),
            modules,
        }
    }

    pub fn async_chunk(name: &str, root: &str, modules: BTreeSet<String>) -> Self {
        Self {
            name: name.to_string(),
            kind: ChunkKind::Async,
            root: Some(root.to_string()),
            modules,
        }
    }

    pub fn shared(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ChunkKind::Shared,
            root: None,
            modules: BTreeSet::new(),
        }
    }

    pub fn file_name(&self) -> String {
        file_name(&self.name)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }
}

pub fn file_name(chunk: &str) -> String {
    format!("{}.js", chunk)
}

/// Nombre de un chunk asíncrono a partir del fichero importado:
/// `./src/home.component.jsx` -> `home.component`
pub fn chunk_name_for(path: &str) -> String {
    let file = path.rsplit(&['/', '\\'][..]).next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
        _ => file.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn async_names_come_from_the_file() {
        assert_eq!(chunk_name_for("./src/home.component.jsx"), "home.component");
        assert_eq!(chunk_name_for("src/about.jsx"), "about");
        assert_eq!(chunk_name_for("Makefile"), "Makefile");
        assert_eq!(chunk_name_for(".env"), ".env");
    }

    #[test]
    fn shared_chunks_have_no_root() {
        assert_eq!(Chunk::shared("common").root, None);
        let view = Chunk::async_chunk("about", "src/about.jsx", BTreeSet::new());
        assert_eq!(view.root.as_deref(), Some("src/about.jsx"));
        assert_eq!(view.file_name(), "about.js");
    }
}
