//! Model selector card

/// Render the model selector card.
/// Returns the selected option when the user picks one.
pub fn render(
    ui: &mut egui::Ui,
    options: &[String],
    current: Option<&str>,
    placeholder: &str,
    disabled: bool,
) -> Option<String> {
    let mut selected = None;

    ui.vertical(|ui| {
        ui.heading("Model Selection");

        if disabled {
            ui.colored_label(
                egui::Color32::YELLOW,
                "Session is not authorized to change the model",
            );
            ui.add_space(4.0);
        }

        // Disabled means inert, not hidden: the combo still renders.
        ui.add_enabled_ui(!disabled, |ui| {
            ui.horizontal(|ui| {
                ui.label("Image model:")
                    .on_hover_text("Which image generation model handles playground requests");

                egui::ComboBox::from_id_salt("model_selector")
                    .selected_text(current.unwrap_or(placeholder).to_string())
                    .show_ui(ui, |ui| {
                        for option in options {
                            let is_current = current == Some(option.as_str());
                            if ui.selectable_label(is_current, option).clicked() {
                                selected = Some(option.clone());
                            }
                        }
                    });
            });
        });

        if options.is_empty() {
            ui.label(egui::RichText::new("No models available").weak());
        }
    });

    selected
}
