//! Disk-backed configuration for the playground.
//!
//! Persists committed settings, UI preferences, and the capability catalog
//! to `config.toml` under the platform config directory. Loading never
//! fails: malformed or stale content degrades to defaults and every repair
//! is reported as a warning string for the caller to surface.

use crate::context::MODEL_CAPABILITY;
use crate::settings::{NumericParameter, default_parameters, sanitize_parameters};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "paramlab";
const CONFIG_FILE_NAME: &str = "config.toml";
const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Result returned by [`load_config`], capturing the source and any non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

/// Indicates where the configuration was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No persisted configuration was found or usable; defaults were synthesized.
    Default,
    /// Configuration was read from `config.toml`.
    File,
}

/// Errors that can occur when persisting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML serialization error: {0}")]
    Ser(#[from] toml::ser::Error),
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "FileConfig::schema_version")]
    pub schema_version: u32,
    #[serde(default = "default_authorized")]
    pub authorized: bool,
    #[serde(default)]
    pub settings: SavedSettings,
    #[serde(default)]
    pub ui: UiPreferences,
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<CapabilityDefinition>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            authorized: default_authorized(),
            settings: SavedSettings::default(),
            ui: UiPreferences::default(),
            capabilities: default_capabilities(),
        }
    }
}

impl FileConfig {
    const fn schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }
}

const fn default_authorized() -> bool {
    true
}

/// Committed settings values worth keeping across sessions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedSettings {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub numeric: BTreeMap<String, f64>,
}

/// UI-only preferences that the GUI needs to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default)]
    pub theme: ThemePreference,
    #[serde(default)]
    pub show_technical_log: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            theme: ThemePreference::Dark,
            show_technical_log: false,
        }
    }
}

/// Theme preference options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl Default for ThemePreference {
    fn default() -> Self {
        ThemePreference::Dark
    }
}

/// A named, ordered list of selectable options scoping what the current
/// session may configure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDefinition {
    pub name: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub builtin: bool,
}

pub(crate) fn default_capabilities() -> Vec<CapabilityDefinition> {
    vec![CapabilityDefinition {
        name: MODEL_CAPABILITY.to_string(),
        options: vec![
            "dall-e-3".to_string(),
            "dall-e-2".to_string(),
            "gpt-image-1".to_string(),
        ],
        builtin: true,
    }]
}

/// Path to the configuration directory.
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Path to `config.toml`.
pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Load the configuration from the default location, falling back to defaults.
pub fn load_config() -> ConfigLoadResult {
    load_config_from(&config_path())
}

/// Load the configuration from an explicit path.
pub fn load_config_from(path: &Path) -> ConfigLoadResult {
    let mut warnings = Vec::new();

    if path.exists() {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
                Ok(cfg) => {
                    let (cfg, mut sanitize_warnings) = sanitize_config(cfg, &catalog());
                    warnings.append(&mut sanitize_warnings);
                    return ConfigLoadResult {
                        config: cfg,
                        warnings,
                        source: ConfigSource::File,
                    };
                }
                Err(err) => {
                    warnings.push(format!(
                        "Failed to parse {} as TOML: {}. Falling back to defaults.",
                        CONFIG_FILE_NAME, err
                    ));
                }
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to read {}: {}. Falling back to defaults.",
                    CONFIG_FILE_NAME, err
                ));
            }
        }
    }

    ConfigLoadResult {
        config: FileConfig::default(),
        warnings,
        source: ConfigSource::Default,
    }
}

/// Persist the configuration to the default location.
pub fn save_config(config: &FileConfig) -> Result<(), ConfigError> {
    save_config_to(&config_path(), config)
}

/// Persist the configuration to an explicit path.
pub fn save_config_to(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(config)?;
    fs::write(path, serialized)?;
    Ok(())
}

fn catalog() -> Vec<NumericParameter> {
    sanitize_parameters(default_parameters()).0
}

fn sanitize_config(
    mut config: FileConfig,
    parameters: &[NumericParameter],
) -> (FileConfig, Vec<String>) {
    let mut warnings = Vec::new();

    if config.schema_version != CURRENT_SCHEMA_VERSION {
        warnings.push(format!(
            "Unknown config schema version {}. Resetting to {}.",
            config.schema_version, CURRENT_SCHEMA_VERSION
        ));
        return (FileConfig::default(), warnings);
    }

    // Capability hygiene: drop unnamed entries, dedupe, restore built-ins.
    let before = config.capabilities.len();
    config
        .capabilities
        .retain(|capability| !capability.name.trim().is_empty());
    if config.capabilities.len() != before {
        warnings.push("Removed capability entries with empty names.".to_string());
    }

    let mut capability_names = HashSet::new();
    let mut duplicates = HashSet::new();
    config.capabilities.retain(|capability| {
        if !capability_names.insert(capability.name.clone()) {
            duplicates.insert(capability.name.clone());
            false
        } else {
            true
        }
    });
    if !duplicates.is_empty() {
        warnings.push(format!(
            "Removed duplicate capability names: {}",
            duplicates.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }

    for builtin in default_capabilities() {
        if !config
            .capabilities
            .iter()
            .any(|capability| capability.name == builtin.name)
        {
            warnings.push(format!(
                "Built-in capability '{}' was missing. Restoring defaults.",
                builtin.name
            ));
            config.capabilities.push(builtin);
        }
    }
    config.capabilities.sort_by(|a, b| a.name.cmp(&b.name));

    // Numeric settings: unknown keys are dropped, out-of-range values are
    // clamped back into their catalog range, missing keys are seeded.
    let mut numeric = BTreeMap::new();
    for (key, value) in &config.settings.numeric {
        let Some(parameter) = parameters.iter().find(|p| p.key == *key) else {
            warnings.push(format!(
                "Dropping saved value for unknown parameter '{}'.",
                key
            ));
            continue;
        };
        if !value.is_finite() || !(parameter.min..=parameter.max).contains(value) {
            warnings.push(format!(
                "Saved value {} for '{}' is outside [{}, {}]. Resetting to {}.",
                value, key, parameter.min, parameter.max, parameter.default
            ));
            numeric.insert(key.clone(), parameter.default);
        } else {
            numeric.insert(key.clone(), *value);
        }
    }
    for parameter in parameters {
        numeric
            .entry(parameter.key.clone())
            .or_insert(parameter.default);
    }
    config.settings.numeric = numeric;

    // A saved model that is no longer offered falls back to "nothing chosen".
    if let Some(model) = config.settings.model.clone() {
        let offered = config
            .capabilities
            .iter()
            .find(|capability| capability.name == MODEL_CAPABILITY)
            .is_some_and(|capability| capability.options.contains(&model));
        if !offered {
            warnings.push(format!(
                "Saved model '{}' is not offered by '{}'. Clearing selection.",
                model, MODEL_CAPABILITY
            ));
            config.settings.model = None;
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_round_trip() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");

        let config = FileConfig::default();
        save_config_to(&path, &config).expect("save config");

        let loaded = load_config_from(&path);
        assert_eq!(loaded.source, ConfigSource::File);
        assert_eq!(loaded.config.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(loaded.config.capabilities, default_capabilities());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("does-not-exist.toml");

        let loaded = load_config_from(&path);
        assert_eq!(loaded.source, ConfigSource::Default);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_bad_toml_degrades_to_defaults_with_warning() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "this is not { toml").expect("write fixture");

        let loaded = load_config_from(&path);
        assert_eq!(loaded.source, ConfigSource::Default);
        assert!(
            loaded.warnings.iter().any(|w| w.contains("Failed to parse")),
            "warnings: {:?}",
            loaded.warnings
        );
    }

    #[test]
    fn test_sanitize_wrong_schema_version() {
        let mut config = FileConfig::default();
        config.schema_version = 999;

        let (sanitized, warnings) = sanitize_config(config, &catalog());

        assert_eq!(sanitized.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(
            warnings.iter().any(|w| w.contains("schema version")),
            "Should warn about unknown schema version"
        );
    }

    #[test]
    fn test_sanitize_restores_missing_builtin_capability() {
        let mut config = FileConfig::default();
        config.capabilities.clear();

        let (sanitized, warnings) = sanitize_config(config, &catalog());

        assert!(
            sanitized
                .capabilities
                .iter()
                .any(|c| c.name == MODEL_CAPABILITY),
            "Built-in capability should be restored"
        );
        assert!(warnings.iter().any(|w| w.contains("was missing")));
    }

    #[test]
    fn test_sanitize_clamps_out_of_range_saved_value() {
        let mut config = FileConfig::default();
        config.settings.numeric.insert("n".to_string(), 99.0);

        let (sanitized, warnings) = sanitize_config(config, &catalog());

        assert_eq!(sanitized.settings.numeric.get("n"), Some(&1.0));
        assert!(warnings.iter().any(|w| w.contains("outside")));
    }

    #[test]
    fn test_sanitize_drops_unknown_numeric_key() {
        let mut config = FileConfig::default();
        config.settings.numeric.insert("seed".to_string(), 42.0);

        let (sanitized, warnings) = sanitize_config(config, &catalog());

        assert!(!sanitized.settings.numeric.contains_key("seed"));
        assert!(warnings.iter().any(|w| w.contains("unknown parameter")));
    }

    #[test]
    fn test_sanitize_seeds_missing_numeric_keys() {
        let config = FileConfig::default();

        let (sanitized, _) = sanitize_config(config, &catalog());

        for parameter in catalog() {
            assert!(
                sanitized.settings.numeric.contains_key(&parameter.key),
                "missing seed for '{}'",
                parameter.key
            );
        }
    }

    #[test]
    fn test_sanitize_clears_unoffered_model() {
        let mut config = FileConfig::default();
        config.settings.model = Some("midjourney-v7".to_string());

        let (sanitized, warnings) = sanitize_config(config, &catalog());

        assert_eq!(sanitized.settings.model, None);
        assert!(warnings.iter().any(|w| w.contains("not offered")));
    }

    #[test]
    fn test_sanitize_keeps_offered_model() {
        let mut config = FileConfig::default();
        config.settings.model = Some("dall-e-3".to_string());

        let (sanitized, warnings) = sanitize_config(config, &catalog());

        assert_eq!(sanitized.settings.model.as_deref(), Some("dall-e-3"));
        assert!(warnings.is_empty(), "warnings: {:?}", warnings);
    }
}
