// ============================================================================
// MANIFEST SERVICE - SOLO descarga del chunk-manifest.json (stateless)
// ============================================================================

use gloo_net::http::Request;
use crate::config::CONFIG;
use crate::models::{ChunkError, ChunkManifest};

/// Origen del manifest de chunks
#[allow(async_fn_in_trait)]
pub trait ManifestSource {
    async fn fetch_manifest(&self) -> Result<ChunkManifest, ChunkError>;
}

/// Manifest servido junto a los ficheros del build
#[derive(Clone)]
pub struct HttpManifestSource {
    url: String,
}

impl HttpManifestSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// URL configurada en tiempo de compilación
    pub fn from_config() -> Self {
        Self::new(CONFIG.manifest_url.clone())
    }
}

impl ManifestSource for HttpManifestSource {
    async fn fetch_manifest(&self) -> Result<ChunkManifest, ChunkError> {
        log::info!("📄 [MANIFEST] Descargando {}", self.url);

        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| ChunkError::Network {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        if !response.ok() {
            return Err(ChunkError::Manifest(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .json::<ChunkManifest>()
            .await
            .map_err(|e| ChunkError::Manifest(format!("Parse error: {}", e)))
    }
}
