#![deny(missing_docs)]

//! Entry point for the training console.
use std::sync::Arc;

use eframe::egui;
use trainconsole::console::TrainingController;
use trainconsole::console::ui::{ConsoleApp, MIN_VIEWPORT_SIZE};
use trainconsole::logging;
use trainconsole::settings::{self, ConsoleSettings};
use trainconsole::training_api::HttpTrainingApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = match settings::load_or_default() {
        Ok(settings) => Ok(settings),
        Err(err) => Err(format!("Failed to load settings: {err}")),
    };
    let filter = settings
        .as_ref()
        .map(|settings| settings.log_filter.as_str())
        .unwrap_or(logging::DEFAULT_LOG_FILTER);
    if let Err(err) = logging::init(filter) {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(980.0, 640.0))
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Training Console",
        native_options,
        Box::new(move |_cc| match settings.and_then(|settings| build_app(&settings)) {
            Ok(app) => Ok(Box::new(app)),
            Err(message) => {
                tracing::error!("{message}");
                Ok(Box::new(LaunchError { message }))
            }
        }),
    )?;
    Ok(())
}

fn build_app(settings: &ConsoleSettings) -> Result<ConsoleApp, String> {
    let api = HttpTrainingApi::from_settings(settings)
        .map_err(|err| format!("Invalid training server settings: {err}"))?;
    tracing::info!(api = %settings.api_base_url, "Training console starting");
    Ok(ConsoleApp::new(TrainingController::new(Arc::new(api))))
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start the training console");
                ui.label(&self.message);
            });
        });
    }
}
