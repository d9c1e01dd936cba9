use eframe::egui::{self, Id, Order};

use super::style;

/// Stacking tiers for overlays drawn above the panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum OverlayLayer {
    /// Status toasts.
    Overlay,
    /// Prompts that block input to everything below.
    Modal,
}

impl OverlayLayer {
    pub(super) fn order(self) -> Order {
        match self {
            Self::Overlay => Order::Foreground,
            Self::Modal => Order::Tooltip,
        }
    }
}

/// Shade the panels behind `prompt` so the config and run buttons cannot be
/// pressed while a launch is awaiting an answer.
pub(super) fn shade_behind_prompt(ctx: &egui::Context, prompt: Id) {
    let screen = ctx.viewport_rect();
    egui::Area::new(prompt.with("input_shield"))
        .order(OverlayLayer::Modal.order())
        .fixed_pos(screen.min)
        .interactable(true)
        .show(ctx, |ui| {
            let (shield, _) = ui.allocate_exact_size(screen.size(), egui::Sense::click_and_drag());
            ui.painter().rect_filled(shield, 0.0, style::modal_scrim());
        });
}
