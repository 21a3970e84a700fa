//! paramlab GUI module using eframe/egui
//!
//! This module provides the playground configuration window for paramlab.

pub mod app;
pub mod state;
pub mod ui_state;
pub mod widgets;

/// Main entry point for the GUI
pub fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 640.0])
            .with_min_inner_size([560.0, 420.0])
            .with_resizable(true)
            .with_title("Paramlab"),
        ..Default::default()
    };

    eframe::run_native(
        "Paramlab",
        native_options,
        Box::new(|cc| Ok(Box::new(app::PlaygroundApp::new(cc)))),
    )
    .map_err(|e| format!("{:?}", e))
    .map_err(|e| {
        Box::new(std::io::Error::other(e)) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(())
}
