//! UI-specific state (ephemeral)

use paramlab_core::{NumericFieldState, NumericParameter, SettingsMap};
use std::collections::{BTreeMap, VecDeque};

const MAX_LOG_ENTRIES: usize = 200;

/// UI-specific state that doesn't need to be persisted
#[derive(Clone)]
pub struct UiState {
    /// Current theme (dark/light)
    pub theme: Theme,

    /// One provisional-value editor per catalog parameter
    pub editors: BTreeMap<String, NumericFieldState>,

    /// Technical log visibility
    pub technical_log_expanded: bool,

    /// Whether a missing model capability has already been logged
    pub missing_capability_logged: bool,

    /// Technical log entries (capped)
    pub technical_log: VecDeque<LogEntry>,
}

impl UiState {
    /// Build editors seeded from the current committed settings values.
    pub fn new(parameters: &[NumericParameter], settings: &SettingsMap) -> Self {
        let editors = parameters
            .iter()
            .map(|parameter| {
                let current = settings
                    .numeric_value(&parameter.key)
                    .unwrap_or(parameter.default);
                (
                    parameter.key.clone(),
                    NumericFieldState::new(current, parameter.min, parameter.max),
                )
            })
            .collect();

        Self {
            theme: Theme::Dark,
            editors,
            technical_log_expanded: false,
            missing_capability_logged: false,
            technical_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    /// Add a log entry, maintaining the entry cap
    pub fn add_log_entry(&mut self, entry: LogEntry) {
        if self.technical_log.len() >= MAX_LOG_ENTRIES {
            self.technical_log.pop_front();
        }
        self.technical_log.push_back(entry);
    }
}

/// Theme selection
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Technical log entry
#[derive(Clone)]
pub struct LogEntry {
    /// Timestamp
    pub timestamp: String,

    /// Log level
    pub level: LogLevel,

    /// Message
    pub message: String,
}

/// Log level for coloring
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}
