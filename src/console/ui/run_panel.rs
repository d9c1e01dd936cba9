use eframe::egui::{self, Frame, Margin, ProgressBar, RichText, Ui};

use super::ConsoleApp;
use super::style;
use crate::console::view_model::{self, RunPanelView};

impl ConsoleApp {
    pub(super) fn render_run_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let view = view_model::run_panel(self.controller.run_status());
        let mut dismiss = false;
        Frame::new()
            .fill(style::compartment_fill())
            .stroke(style::section_stroke())
            .inner_margin(Margin::same(12))
            .show(ui, |ui| {
                ui.heading(RichText::new("Training Run").color(palette.text_primary));
                ui.add_space(8.0);
                match &view {
                    RunPanelView::Waiting { hint } => {
                        ui.label(RichText::new(*hint).color(palette.text_muted));
                    }
                    RunPanelView::Running { label, fraction } => {
                        ui.label(RichText::new(label).color(palette.accent_ice));
                        ui.add_space(6.0);
                        let percent = (fraction * 100.0).round();
                        let width = ui.available_width();
                        ui.add(
                            ProgressBar::new(*fraction)
                                .desired_width(width)
                                .text(format!("{percent:.0}%")),
                        );
                    }
                    RunPanelView::Completed { tiles } => {
                        ui.label(RichText::new("Training complete").color(palette.success));
                        ui.add_space(6.0);
                        egui::Grid::new("run_metrics_grid")
                            .num_columns(2)
                            .spacing([24.0, 8.0])
                            .show(ui, |ui| {
                                for tile in tiles {
                                    ui.label(RichText::new(tile.label).color(palette.text_muted));
                                    ui.label(
                                        RichText::new(&tile.value)
                                            .strong()
                                            .color(palette.text_primary),
                                    );
                                    ui.end_row();
                                }
                            });
                        ui.add_space(8.0);
                        dismiss = ui.button("Dismiss").clicked();
                    }
                }
            });
        if dismiss && let Err(err) = self.controller.dismiss_results() {
            tracing::debug!("Dismiss ignored: {err}");
        }
    }
}
