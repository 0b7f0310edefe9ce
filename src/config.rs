use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Elemento donde se monta la app
    pub root_element_id: String,
    /// Manifest generado por `split-chunks`
    pub manifest_url: String,
    pub loading_text: String,
    pub not_found_text: String,
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            root_element_id: "root".to_string(),
            manifest_url: "/chunk-manifest.json".to_string(),
            loading_text: "please wait...".to_string(),
            not_found_text: "page not found".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ShellConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            root_element_id: option_env!("SHELL_ROOT_ID")
                .map(str::to_string)
                .unwrap_or(defaults.root_element_id),
            manifest_url: option_env!("SHELL_MANIFEST_URL")
                .map(str::to_string)
                .unwrap_or(defaults.manifest_url),
            loading_text: defaults.loading_text,
            not_found_text: defaults.not_found_text,
            log_level: option_env!("SHELL_LOG_LEVEL")
                .map(str::to_string)
                .unwrap_or(defaults.log_level),
        }
    }

    /// Nivel para wasm-logger; valores desconocidos caen en Info
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: ShellConfig = ShellConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_build_output() {
        let config = ShellConfig::default();
        assert_eq!(config.root_element_id, "root");
        assert_eq!(config.manifest_url, "/chunk-manifest.json");
        assert_eq!(config.loading_text, "please wait...");
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let mut config = ShellConfig::default();
        config.log_level = "debug".into();
        assert_eq!(config.log_level(), log::Level::Debug);
        config.log_level = "loud".into();
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
