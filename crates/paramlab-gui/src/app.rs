//! Main application structure for the paramlab GUI

use crate::state::AppState;
use crate::ui_state::{LogEntry, LogLevel, Theme, UiState};
use crate::widgets;
use chrono::Local;
use paramlab_core::{
    MODEL_CAPABILITY, MODEL_SETTING_KEY, SettingValue, ThemePreference, UpdateOutcome,
};
use std::time::Duration;

const MODEL_PLACEHOLDER: &str = "Select a model...";

/// Main application struct implementing eframe::App
pub struct PlaygroundApp {
    /// Domain state
    state: AppState,

    /// UI state
    ui_state: UiState,

    /// Last config save time
    last_save: std::time::Instant,

    /// Config dirty flag
    config_dirty: bool,
}

impl PlaygroundApp {
    /// Create a new PlaygroundApp
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::new();
        let mut ui_state = UiState::new(&state.parameters, &state.settings);

        ui_state.theme = match state.config.ui.theme {
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light => Theme::Light,
        };
        ui_state.technical_log_expanded = state.config.ui.show_technical_log;

        let mut app = Self {
            state,
            ui_state,
            last_save: std::time::Instant::now(),
            config_dirty: false,
        };

        app.add_log(LogLevel::Info, "Playground started");
        let warnings = app.state.startup_warnings.clone();
        for warning in warnings {
            tracing::warn!("{}", warning);
            app.add_log(LogLevel::Warning, warning);
        }

        app
    }

    /// Add a log entry
    fn add_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.ui_state.add_log_entry(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
        });
    }

    /// Apply theme to egui context
    fn apply_theme(&self, ctx: &egui::Context) {
        let visuals = match self.ui_state.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);
    }

    /// Auto-save configuration if dirty and enough time has passed
    fn handle_auto_save(&mut self) {
        if self.config_dirty && self.last_save.elapsed() > Duration::from_millis(300) {
            if let Err(e) = self.state.save_config() {
                self.add_log(LogLevel::Error, format!("Failed to save config: {}", e));
            } else {
                self.config_dirty = false;
                self.last_save = std::time::Instant::now();
            }
        }
    }

    /// Mark configuration as dirty
    fn mark_dirty(&mut self) {
        self.config_dirty = true;
    }

    /// Route a committed numeric value into the settings map.
    fn apply_numeric_commit(&mut self, key: &str, value: f64) {
        match self.state.settings.update(key, SettingValue::Number(value)) {
            UpdateOutcome::Applied => {
                let previous = self
                    .state
                    .config
                    .settings
                    .numeric
                    .insert(key.to_string(), value);
                if previous != Some(value) {
                    tracing::debug!(key, value, "Committed numeric setting");
                    self.add_log(LogLevel::Info, format!("{} set to {}", key, value));
                    self.mark_dirty();
                }
            }
            _ => {
                self.add_log(
                    LogLevel::Warning,
                    format!("Settings write for '{}' was refused", key),
                );
            }
        }
    }

    /// Route a model selection into the settings map.
    fn apply_model_selection(&mut self, model: String) {
        let outcome = self
            .state
            .settings
            .update(MODEL_SETTING_KEY, SettingValue::Text(model.clone()));
        if outcome != UpdateOutcome::Applied {
            self.add_log(LogLevel::Warning, "Model selection was refused");
            return;
        }

        let changed = self.state.config.settings.model.as_deref() != Some(model.as_str());
        self.state.config.settings.model = Some(model.clone());
        if !changed {
            return;
        }

        // Switching models restores every parameter to its catalog default.
        // The field editors pick up the new defaults on the next frame,
        // discarding any in-progress edits.
        let parameters = self.state.parameters.clone();
        for parameter in &parameters {
            self.state
                .settings
                .update(&parameter.key, SettingValue::Number(parameter.default));
            self.state
                .config
                .settings
                .numeric
                .insert(parameter.key.clone(), parameter.default);
        }

        tracing::info!(model = %model, "Model selected");
        self.add_log(
            LogLevel::Info,
            format!("Model set to {}; parameters reset to defaults", model),
        );
        self.mark_dirty();
    }

    /// Render the top panel with title and theme toggle
    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Paramlab");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.ui_state.theme {
                        Theme::Dark => "☀ Light",
                        Theme::Light => "🌙 Dark",
                    };
                    if ui.button(theme_label).clicked() {
                        let (theme, preference) = match self.ui_state.theme {
                            Theme::Dark => (Theme::Light, ThemePreference::Light),
                            Theme::Light => (Theme::Dark, ThemePreference::Dark),
                        };
                        self.ui_state.theme = theme;
                        self.state.config.ui.theme = preference;
                        self.mark_dirty();
                    }

                    if self.config_dirty {
                        if ui.button("💾 Save").clicked() {
                            if let Err(e) = self.state.save_config() {
                                self.add_log(LogLevel::Error, format!("Failed to save: {}", e));
                            } else {
                                self.add_log(LogLevel::Info, "Configuration saved");
                                self.config_dirty = false;
                            }
                        }
                    }
                });
            });
        });
    }

    /// Render the main UI content
    fn render_main_ui(&mut self, ui: &mut egui::Ui) {
        let mut pending_model = None;
        let mut pending_commits: Vec<(String, f64)> = Vec::new();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // Model selection card
                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());

                    let lookup = self.state.context.capability_options(MODEL_CAPABILITY);
                    if lookup.is_missing() && !self.ui_state.missing_capability_logged {
                        tracing::warn!(
                            capability = MODEL_CAPABILITY,
                            "Capability entry is missing from the shared context"
                        );
                        self.ui_state.add_log_entry(LogEntry {
                            timestamp: Local::now().format("%H:%M:%S").to_string(),
                            level: LogLevel::Warning,
                            message: format!(
                                "Capability '{}' is missing; no models to offer",
                                MODEL_CAPABILITY
                            ),
                        });
                        self.ui_state.missing_capability_logged = true;
                    }

                    pending_model = widgets::model_selector::render(
                        ui,
                        lookup.options(),
                        self.state.settings.model(),
                        MODEL_PLACEHOLDER,
                        !self.state.context.is_authorized(),
                    );
                });

                ui.add_space(8.0);

                // Generation parameters card
                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    ui.heading("Generation Parameters");
                    ui.add_space(4.0);

                    for parameter in &self.state.parameters {
                        let Some(field) = self.ui_state.editors.get_mut(&parameter.key) else {
                            continue;
                        };
                        let default_value = self
                            .state
                            .settings
                            .numeric_value(&parameter.key)
                            .unwrap_or(parameter.default);

                        if let Some(committed) = widgets::numeric_field::render(
                            ui,
                            parameter,
                            field,
                            default_value,
                            self.state.context.is_authorized(),
                        ) {
                            pending_commits.push((parameter.key.clone(), committed));
                        }
                    }
                });

                ui.add_space(8.0);

                // Technical log
                let log_response = egui::CollapsingHeader::new("Technical Log")
                    .default_open(self.ui_state.technical_log_expanded)
                    .show(ui, |ui| {
                        widgets::technical_log::render(ui, &mut self.ui_state);
                    });
                if log_response.header_response.clicked() {
                    self.ui_state.technical_log_expanded = !self.ui_state.technical_log_expanded;
                    self.state.config.ui.show_technical_log = self.ui_state.technical_log_expanded;
                    self.mark_dirty();
                }
            });

        for (key, value) in pending_commits {
            self.apply_numeric_commit(&key, value);
        }
        if let Some(model) = pending_model {
            self.apply_model_selection(model);
        }
    }
}

impl eframe::App for PlaygroundApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);

        self.render_top_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_main_ui(ui);
        });

        self.handle_auto_save();
    }
}
