use eframe::egui::{self, Frame, Margin, RichText, StrokeKind};

use super::ConsoleApp;
use super::overlay_layers::OverlayLayer;
use super::style;
use crate::console::view_model::{self, ToastTone};

impl ConsoleApp {
    /// Transient status message pinned to the top right corner.
    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let Some(message) = self.controller.status_message() else {
            return;
        };
        let toast = view_model::status_toast(message);
        let palette = style::palette();
        let accent = match toast.tone {
            ToastTone::Success => palette.success,
            ToastTone::Error => palette.warning,
        };
        egui::Area::new(egui::Id::new("status_toast"))
            .order(OverlayLayer::Overlay.order())
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 56.0))
            .show(ctx, |ui| {
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(egui::Stroke::new(1.0, accent))
                    .inner_margin(Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let (badge_rect, _) = ui
                                .allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                            ui.painter().rect_filled(badge_rect, 0.0, accent);
                            ui.painter().rect_stroke(
                                badge_rect,
                                0.0,
                                style::section_stroke(),
                                StrokeKind::Inside,
                            );
                            ui.add_space(6.0);
                            ui.label(RichText::new(&toast.text).color(palette.text_primary));
                        });
                    });
            });
    }
}
