//! egui renderer for the training console.

mod config_panel;
mod confirm_prompt;
mod overlay_layers;
mod run_panel;
mod status_area;
pub mod style;

use std::time::Duration;

use eframe::egui::{self, Frame, Margin, RichText};

use crate::console::controller::TrainingController;

/// Smallest window size the console layout fits in.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(760.0, 520.0);

/// Repaint interval while a run, a remote call or a status message is pending.
const TICK_INTERVAL: Duration = Duration::from_millis(15);

/// Renders the console over one [`TrainingController`].
pub struct ConsoleApp {
    controller: TrainingController,
    visuals_set: bool,
}

impl ConsoleApp {
    /// Wrap a controller and start loading the stored configuration.
    pub fn new(mut controller: TrainingController) -> Self {
        if let Err(err) = controller.load_config() {
            tracing::debug!("Initial configuration load skipped: {err}");
        }
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Model Training").color(palette.text_primary));
                    ui.separator();
                    let subtitle = if self.controller.load_in_flight() {
                        "Loading configuration..."
                    } else {
                        "Configure and launch training runs"
                    };
                    ui.label(RichText::new(subtitle).color(palette.text_muted));
                });
            });
    }

    fn render_center(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.render_config_panel(&mut columns[0]);
                self.render_run_panel(&mut columns[1]);
            });
        });
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.tick();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        self.render_center(ctx);
        self.render_confirm_prompt(ctx);
        if self.controller.needs_tick() {
            ctx.request_repaint_after(TICK_INTERVAL);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.shutdown();
    }
}
