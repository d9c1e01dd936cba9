use eframe::egui::{self, Align2, Id, RichText};

use super::ConsoleApp;
use super::overlay_layers::{self, OverlayLayer};
use super::style;
use crate::console::state::RunStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PromptAction {
    None,
    Confirm,
    Decline,
}

impl ConsoleApp {
    /// Modal asking the operator to confirm a launch.
    pub(super) fn render_confirm_prompt(&mut self, ctx: &egui::Context) {
        let RunStatus::AwaitingConfirmation { starting } = *self.controller.run_status() else {
            return;
        };
        overlay_layers::shade_behind_prompt(ctx, Id::new("confirm_launch"));

        let mut action = PromptAction::None;
        if !starting && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            action = PromptAction::Decline;
        }
        let palette = style::palette();
        egui::Window::new("Start training?")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(OverlayLayer::Modal.order())
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("This will launch a training run with the saved parameters.")
                        .color(palette.text_primary),
                );
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.add_enabled(!starting, egui::Button::new("Cancel")).clicked() {
                        action = PromptAction::Decline;
                    }
                    let confirm_label = if starting { "Starting..." } else { "Yes, Start" };
                    if ui
                        .add_enabled(!starting, egui::Button::new(confirm_label))
                        .clicked()
                    {
                        action = PromptAction::Confirm;
                    }
                });
            });

        let result = match action {
            PromptAction::None => return,
            PromptAction::Confirm => self.controller.confirm_launch(),
            PromptAction::Decline => self.controller.decline_launch(),
        };
        if let Err(err) = result {
            tracing::debug!("{action:?} ignored: {err}");
        }
    }
}
