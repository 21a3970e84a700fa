//! Application state management for the paramlab GUI

use paramlab_core::{
    FileConfig, NumericParameter, SettingValue, SettingsMap, SharedContext, default_parameters,
    load_config, sanitize_parameters,
};

/// Main application state (domain/persistent)
#[derive(Clone)]
pub struct AppState {
    /// Configuration from paramlab-core
    pub config: FileConfig,

    /// Read-only capability/authorization context shared with all widgets
    pub context: SharedContext,

    /// Parent-owned settings map the widgets write into
    pub settings: SettingsMap,

    /// Sanitized numeric parameter catalog
    pub parameters: Vec<NumericParameter>,

    /// Non-fatal issues collected while loading, for the technical log
    pub startup_warnings: Vec<String>,
}

impl AppState {
    pub fn new() -> Self {
        let load = load_config();
        let mut warnings = load.warnings;

        let (parameters, mut catalog_warnings) = sanitize_parameters(default_parameters());
        warnings.append(&mut catalog_warnings);

        let context =
            SharedContext::from_definitions(&load.config.capabilities, load.config.authorized);

        // Seed the live settings map from persisted committed values.
        let mut settings = SettingsMap::new(&parameters);
        for (key, value) in &load.config.settings.numeric {
            settings.update(key, SettingValue::Number(*value));
        }
        if let Some(model) = &load.config.settings.model {
            settings.update(
                paramlab_core::MODEL_SETTING_KEY,
                SettingValue::Text(model.clone()),
            );
        }

        Self {
            config: load.config,
            context,
            settings,
            parameters,
            startup_warnings: warnings,
        }
    }

    /// Save configuration to disk
    pub fn save_config(&self) -> Result<(), String> {
        paramlab_core::save_config(&self.config).map_err(|e| e.to_string())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
