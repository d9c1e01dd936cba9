use eframe::egui::{self, Frame, Margin, RichText, Ui};

use super::ConsoleApp;
use super::style;
use crate::console::view_model;
use crate::training::{ConfigDraft, ConfigField, ModelVariant};

const NUMERIC_FIELDS: [ConfigField; 4] = [
    ConfigField::Classes,
    ConfigField::Epochs,
    ConfigField::BatchSize,
    ConfigField::LearningRate,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConfigAction {
    None,
    Adjust,
    Save,
    Cancel,
    Train,
}

impl ConsoleApp {
    pub(super) fn render_config_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let mut action = ConfigAction::None;
        Frame::new()
            .fill(style::compartment_fill())
            .stroke(style::section_stroke())
            .inner_margin(Margin::same(12))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Training Parameters").color(palette.text_primary));
                    let (badge, color) = if self.controller.is_editing() {
                        ("Editing", palette.accent_mint)
                    } else {
                        ("Read Only", palette.text_muted)
                    };
                    ui.label(RichText::new(badge).small().color(color));
                });
                ui.add_space(8.0);
                action = match self.controller.draft_mut() {
                    Some(draft) => render_draft(ui, draft),
                    None => ConfigAction::None,
                };
                if !self.controller.is_editing() {
                    render_locked_rows(ui, &self.controller);
                }
                ui.add_space(10.0);
                let buttons = self.render_config_buttons(ui);
                if buttons != ConfigAction::None {
                    action = buttons;
                }
            });
        self.apply_config_action(action);
    }

    fn render_config_buttons(&self, ui: &mut Ui) -> ConfigAction {
        let mut action = ConfigAction::None;
        ui.horizontal(|ui| {
            if self.controller.is_editing() {
                let saving = self.controller.save_in_flight();
                let label = if saving { "Saving..." } else { "Save Parameters" };
                if ui.add_enabled(!saving, egui::Button::new(label)).clicked() {
                    action = ConfigAction::Save;
                }
                if ui.add_enabled(!saving, egui::Button::new("Cancel")).clicked() {
                    action = ConfigAction::Cancel;
                }
            } else {
                let adjust = egui::Button::new("Adjust Parameters");
                if ui.add_enabled(self.controller.can_begin_edit(), adjust).clicked() {
                    action = ConfigAction::Adjust;
                }
                if self.controller.launch_authorized() {
                    let train = egui::Button::new(
                        RichText::new("Train Model").color(style::palette().accent_mint),
                    );
                    if ui
                        .add_enabled(self.controller.can_request_launch(), train)
                        .clicked()
                    {
                        action = ConfigAction::Train;
                    }
                }
            }
        });
        action
    }

    fn apply_config_action(&mut self, action: ConfigAction) {
        let result = match action {
            ConfigAction::None => return,
            ConfigAction::Adjust => self.controller.begin_edit(),
            ConfigAction::Save => self.controller.commit_edit(),
            ConfigAction::Cancel => self.controller.cancel_edit(),
            ConfigAction::Train => self.controller.request_launch(),
        };
        if let Err(err) = result {
            tracing::debug!("{action:?} ignored: {err}");
        }
    }
}

fn render_draft(ui: &mut Ui, draft: &mut ConfigDraft) -> ConfigAction {
    let mut submit = false;
    egui::Grid::new("config_draft_grid")
        .num_columns(2)
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            ui.label("Model");
            egui::ComboBox::from_id_salt("model_variant_combo")
                .selected_text(draft.model.as_str())
                .show_ui(ui, |ui| {
                    for variant in ModelVariant::ALL {
                        ui.selectable_value(&mut draft.model, variant, variant.as_str());
                    }
                });
            ui.end_row();
            for field in NUMERIC_FIELDS {
                ui.label(field.label());
                let response = ui.add(
                    egui::TextEdit::singleline(draft.text_mut(field)).desired_width(140.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                ui.end_row();
            }
            ui.label("Augmentation");
            ui.checkbox(&mut draft.augmentation, "");
            ui.end_row();
        });
    if submit {
        ConfigAction::Save
    } else {
        ConfigAction::None
    }
}

fn render_locked_rows(ui: &mut Ui, controller: &crate::console::TrainingController) {
    let palette = style::palette();
    egui::Grid::new("config_locked_grid")
        .num_columns(2)
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            for row in view_model::config_rows(controller.config()) {
                ui.label(RichText::new(row.label).color(palette.text_muted));
                ui.label(RichText::new(row.value).color(palette.text_primary));
                ui.end_row();
            }
        });
}
