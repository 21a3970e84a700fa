//! Playground settings map and the numeric parameter catalog.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Literal key the model selector writes into the settings map.
pub const MODEL_SETTING_KEY: &str = "model";

/// A single settings value; keys are either numeric parameters or the
/// model name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Number(f64),
    Text(String),
}

/// Why a settings write was applied or refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// The key is neither the model key nor a catalog parameter.
    RejectedUnknownKey,
    /// The value's type does not match what the key expects.
    RejectedTypeMismatch,
}

/// Catalog entry describing one bounds-checked numeric parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericParameter {
    pub key: String,
    pub label: String,
    pub description: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl NumericParameter {
    fn new(
        key: &str,
        label: &str,
        description: &str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            min,
            max,
            default,
        }
    }
}

/// Built-in numeric parameter catalog for the image playground.
pub fn default_parameters() -> Vec<NumericParameter> {
    vec![
        NumericParameter::new(
            "n",
            "Image Count",
            "How many images to generate per request",
            1.0,
            10.0,
            1.0,
        ),
        NumericParameter::new(
            "temperature",
            "Temperature",
            "Sampling temperature; higher values produce more varied output",
            0.0,
            2.0,
            1.0,
        ),
        NumericParameter::new(
            "top_p",
            "Top P",
            "Nucleus sampling cutoff applied to prompt expansion",
            0.0,
            1.0,
            0.95,
        ),
        NumericParameter::new(
            "max_tokens",
            "Max Tokens",
            "Upper bound on tokens spent rewriting the prompt",
            1.0,
            4096.0,
            512.0,
        ),
    ]
}

/// Validate a parameter catalog at the configuration boundary.
///
/// Entries with a non-finite bound or `min > max` are dropped; an
/// out-of-range default is clamped. Every repair is reported as a warning
/// string for the caller to surface.
pub fn sanitize_parameters(
    parameters: Vec<NumericParameter>,
) -> (Vec<NumericParameter>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut sanitized = Vec::with_capacity(parameters.len());
    let mut seen = BTreeSet::new();

    for mut parameter in parameters {
        if !seen.insert(parameter.key.clone()) {
            warnings.push(format!(
                "Removed duplicate parameter key '{}'.",
                parameter.key
            ));
            continue;
        }
        if !parameter.min.is_finite() || !parameter.max.is_finite() {
            warnings.push(format!(
                "Parameter '{}' has a non-finite bound. Dropping it.",
                parameter.key
            ));
            continue;
        }
        if parameter.min > parameter.max {
            warnings.push(format!(
                "Parameter '{}' has min {} greater than max {}. Dropping it.",
                parameter.key, parameter.min, parameter.max
            ));
            continue;
        }
        if !parameter.default.is_finite()
            || !(parameter.min..=parameter.max).contains(&parameter.default)
        {
            let clamped = parameter.default.clamp(parameter.min, parameter.max);
            let clamped = if clamped.is_finite() {
                clamped
            } else {
                parameter.min
            };
            warnings.push(format!(
                "Parameter '{}' default {} is outside [{}, {}]. Clamping to {}.",
                parameter.key, parameter.default, parameter.min, parameter.max, clamped
            ));
            parameter.default = clamped;
        }
        sanitized.push(parameter);
    }

    (sanitized, warnings)
}

/// Parent-owned mapping of setting keys to their current values.
///
/// Widgets write exactly one key each through [`update`] and never read the
/// map back; key/type pairing is validated here, on the parent side.
///
/// [`update`]: SettingsMap::update
#[derive(Debug, Clone, Default)]
pub struct SettingsMap {
    values: BTreeMap<String, SettingValue>,
    numeric_keys: BTreeSet<String>,
}

impl SettingsMap {
    /// Build a map accepting the model key plus the given catalog keys,
    /// seeded with each parameter's default.
    pub fn new(parameters: &[NumericParameter]) -> Self {
        let mut map = Self {
            values: BTreeMap::new(),
            numeric_keys: parameters.iter().map(|p| p.key.clone()).collect(),
        };
        for parameter in parameters {
            map.values.insert(
                parameter.key.clone(),
                SettingValue::Number(parameter.default),
            );
        }
        map
    }

    /// Single mutator for settings writes.
    ///
    /// Unknown keys and mistyped values are refused with a warning rather
    /// than surfaced as an error.
    pub fn update(&mut self, key: &str, value: SettingValue) -> UpdateOutcome {
        let expects_number = self.numeric_keys.contains(key);
        if !expects_number && key != MODEL_SETTING_KEY {
            warn!(key, "Ignoring settings write for unknown key");
            return UpdateOutcome::RejectedUnknownKey;
        }
        match (&value, expects_number) {
            (SettingValue::Number(_), true) | (SettingValue::Text(_), false) => {
                self.values.insert(key.to_string(), value);
                UpdateOutcome::Applied
            }
            _ => {
                warn!(key, "Ignoring settings write with mismatched value type");
                UpdateOutcome::RejectedTypeMismatch
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// Current numeric value for a catalog key, if one has been written.
    pub fn numeric_value(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(SettingValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// Currently selected model, if any.
    pub fn model(&self) -> Option<&str> {
        match self.values.get(MODEL_SETTING_KEY) {
            Some(SettingValue::Text(model)) => Some(model.as_str()),
            _ => None,
        }
    }
}
