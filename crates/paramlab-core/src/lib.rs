//! Core library crate exposing shared paramlab domain logic.

pub mod config;
pub mod context;
pub mod field;
pub mod logging;
pub mod settings;

pub use config::{
    CapabilityDefinition, ConfigError, ConfigLoadResult, ConfigSource, FileConfig, SavedSettings,
    ThemePreference, UiPreferences, config_directory, config_path, load_config, load_config_from,
    save_config, save_config_to,
};
pub use context::{CapabilityLookup, MODEL_CAPABILITY, SharedContext};
pub use field::{NumericFieldState, ParseOutcome};
pub use settings::{
    MODEL_SETTING_KEY, NumericParameter, SettingValue, SettingsMap, UpdateOutcome,
    default_parameters, sanitize_parameters,
};
