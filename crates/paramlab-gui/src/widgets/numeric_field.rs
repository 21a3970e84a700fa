//! Bounded numeric field widget

use paramlab_core::{NumericFieldState, NumericParameter};

/// Render one bounded numeric field row.
/// Returns the committed value when an edit is finalized this frame.
pub fn render(
    ui: &mut egui::Ui,
    parameter: &NumericParameter,
    field: &mut NumericFieldState,
    default_value: f64,
    enabled: bool,
) -> Option<f64> {
    // External reset: a new default from the parent overrides any
    // in-progress edit.
    if field.default_value() != default_value {
        field.reset(default_value);
    }

    let mut committed = None;

    ui.horizontal(|ui| {
        ui.label(format!("{}:", parameter.label))
            .on_hover_text(&parameter.description);

        ui.add_enabled_ui(enabled, |ui| {
            let response = ui.add(egui::TextEdit::singleline(field.text_mut()).desired_width(80.0));
            if response.changed() {
                // Only in-range parses reach the held value; rejected
                // keystrokes stay visible in the buffer until commit.
                field.refresh_provisional();
            }
            // Losing focus covers both blur and Enter in a singleline edit.
            if response.lost_focus() {
                committed = Some(field.commit());
            }
        });

        ui.label(
            egui::RichText::new(format!("({} to {})", parameter.min, parameter.max))
                .weak()
                .small(),
        );
    });

    committed
}
