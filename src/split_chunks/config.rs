// ============================================================================
// SPLIT CHUNKS CONFIG - Política de partición
// ============================================================================
// Por defecto sin grupos genéricos y exactamente dos grupos propios:
// `vendor` (código de terceros) y `common` (compartido por dos o más chunks
// asíncronos). Un JSON con la misma forma la sustituye.
// ============================================================================

use std::path::Path;
use serde::{Deserialize, Serialize};
use super::cache_group::{CacheGroup, ChunkFilter, ModuleTest};
use super::PlanError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitChunksConfig {
    /// Grupos genéricos `vendors` / `default`
    pub default_groups: bool,
    /// Bytes mínimos para que un grupo no forzado cree chunk
    pub min_size: u64,
    pub cache_groups: Vec<CacheGroup>,
}

impl Default for SplitChunksConfig {
    fn default() -> Self {
        Self {
            default_groups: false,
            min_size: 0,
            cache_groups: vec![CacheGroup::vendor(), CacheGroup::common()],
        }
    }
}

impl SplitChunksConfig {
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, PlanError> {
        let json = std::fs::read_to_string(path).map_err(|e| PlanError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Grupos genéricos, solo con `default_groups`
    pub fn generic_groups() -> Vec<CacheGroup> {
        vec![
            CacheGroup {
                test: Some(ModuleTest("node_modules".to_string())),
                chunks: ChunkFilter::Async,
                priority: -10,
                ..CacheGroup::new("vendors")
            },
            CacheGroup {
                min_chunks: 2,
                priority: -20,
                reuse_existing_chunk: true,
                ..CacheGroup::new("default")
            },
        ]
    }

    /// Orden de evaluación: prioridad de mayor a menor; en empate, orden de
    /// declaración (los propios antes que los genéricos)
    pub fn ordered_groups(&self) -> Vec<CacheGroup> {
        let mut groups = self.cache_groups.clone();
        if self.default_groups {
            groups.extend(Self::generic_groups());
        }
        groups.sort_by(|a, b| b.priority.cmp(&a.priority));
        groups
    }

    pub fn min_size_for(&self, group: &CacheGroup) -> u64 {
        if group.enforce {
            0
        } else {
            group.min_size.unwrap_or(self.min_size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_vendor_then_common() {
        let names: Vec<_> = SplitChunksConfig::default()
            .ordered_groups()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["vendor", "common"]);
    }

    #[test]
    fn generic_groups_rank_last() {
        let config = SplitChunksConfig { default_groups: true, ..Default::default() };
        let names: Vec<_> = config.ordered_groups().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["vendor", "common", "vendors", "default"]);
    }

    #[test]
    fn enforce_ignores_min_size() {
        let config = SplitChunksConfig { min_size: 30_000, ..Default::default() };
        assert_eq!(config.min_size_for(&CacheGroup::common()), 0);
        assert_eq!(config.min_size_for(&CacheGroup::vendor()), 30_000);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SplitChunksConfig::from_json(r#"{"min_size": 10}"#).unwrap();
        assert_eq!(config.min_size, 10);
        assert_eq!(config.cache_groups.len(), 2);
        assert!(!config.default_groups);
    }
}
