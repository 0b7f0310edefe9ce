// ============================================================================
// CHUNK MANIFEST - Contrato entre el planificador de chunks y el runtime
// ============================================================================
// El CLI `split-chunks` lo escribe en `chunk-manifest.json`; el shell lo
// descarga una vez y lo usa para saber qué ficheros necesita cada vista.
// ============================================================================

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Array global donde cada fichero de chunk se registra al ejecutarse
pub const CHUNK_GLOBAL: &str = "lazyRouteShellChunks";

/// Fallo al cargar el código de una vista
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },
    #[error("script {url} failed to load")]
    Script { url: String },
    #[error("chunk manifest unavailable: {0}")]
    Manifest(String),
    #[error("chunk `{0}` is not listed in the manifest")]
    MissingChunk(String),
    #[error("chunk `{0}` loaded but did not register")]
    Unregistered(String),
    #[error("DOM error: {0}")]
    Dom(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkManifest {
    /// Prefijo público de los ficheros (`output.publicPath`)
    #[serde(default = "default_public_path")]
    pub public_path: String,
    /// Ficheros síncronos que el HTML de entrada carga directamente
    #[serde(default)]
    pub initial: Vec<String>,
    /// Chunk asíncrono -> ficheros a cargar, en orden (vendor, common, propio)
    #[serde(default)]
    pub chunks: BTreeMap<String, Vec<String>>,
}

fn default_public_path() -> String {
    "/".to_string()
}

impl ChunkManifest {
    /// Ficheros que necesita un chunk asíncrono
    pub fn files_for(&self, chunk: &str) -> Result<&[String], ChunkError> {
        self.chunks
            .get(chunk)
            .map(|files| files.as_slice())
            .ok_or_else(|| ChunkError::MissingChunk(chunk.to_string()))
    }

    /// URL pública de un fichero
    pub fn url_for(&self, file: &str) -> String {
        if self.public_path.ends_with('/') {
            format!("{}{}", self.public_path, file)
        } else {
            format!("{}/{}", self.public_path, file)
        }
    }

    /// Ficheros de un chunk que aún no han sido cargados por el runtime
    /// (los iniciales ya vienen en el HTML de entrada)
    pub fn pending_files<'a>(&'a self, chunk: &str) -> Result<Vec<&'a str>, ChunkError> {
        Ok(self
            .files_for(chunk)?
            .iter()
            .filter(|file| !self.initial.contains(file))
            .map(String::as_str)
            .collect())
    }
}
