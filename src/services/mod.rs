pub mod chunk_loader;
pub mod chunk_registry;
pub mod manifest_service;
pub mod view_loader;
pub mod history_service;

pub use chunk_loader::{ChunkLoader, ScriptChunkLoader};
pub use manifest_service::{HttpManifestSource, ManifestSource};
pub use view_loader::ViewLoader;
pub use history_service::HistoryService;
