//! Helpers to convert controller state into egui-facing view structs.

use crate::console::state::{RunStatus, StatusKind, StatusMessage};
use crate::training::{ConfigField, MetricTile, TrainingConfiguration};

/// One read-only configuration row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigRowView {
    pub label: &'static str,
    pub value: String,
}

/// What the run panel shows.
#[derive(Clone, Debug, PartialEq)]
pub enum RunPanelView {
    /// Nothing has run yet in this session.
    Waiting { hint: &'static str },
    Running { label: String, fraction: f32 },
    Completed { tiles: [MetricTile; 4] },
}

/// Colour family for the status toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastTone {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusToastView {
    pub text: String,
    pub tone: ToastTone,
}

const WAITING_HINT: &str = "Save the configuration, then train to see results here.";
const STARTING_HINT: &str = "Starting training run...";

/// Rows shown while the configuration is locked.
pub fn config_rows(config: &TrainingConfiguration) -> Vec<ConfigRowView> {
    vec![
        row("Model", config.model.to_string()),
        row(ConfigField::Classes.label(), config.classes.to_string()),
        row(ConfigField::Epochs.label(), config.epochs.to_string()),
        row(ConfigField::BatchSize.label(), config.batch_size.to_string()),
        row(ConfigField::LearningRate.label(), config.lr.to_string()),
        row(
            "Augmentation",
            if config.augmentation { "On" } else { "Off" }.to_string(),
        ),
    ]
}

fn row(label: &'static str, value: String) -> ConfigRowView {
    ConfigRowView { label, value }
}

pub fn run_panel(status: &RunStatus) -> RunPanelView {
    match status {
        RunStatus::Idle | RunStatus::AwaitingConfirmation { starting: false } => {
            RunPanelView::Waiting { hint: WAITING_HINT }
        }
        RunStatus::AwaitingConfirmation { starting: true } => {
            RunPanelView::Waiting { hint: STARTING_HINT }
        }
        RunStatus::Running { progress, .. } => RunPanelView::Running {
            label: format!("Synchronizing Neural Weights: {}%", progress.round() as u32),
            fraction: (progress / 100.0).clamp(0.0, 1.0),
        },
        RunStatus::Completed { metrics, .. } => RunPanelView::Completed {
            tiles: metrics.tiles(),
        },
    }
}

pub fn status_toast(message: &StatusMessage) -> StatusToastView {
    StatusToastView {
        text: message.text.clone(),
        tone: match message.kind {
            StatusKind::Success => ToastTone::Success,
            StatusKind::Error => ToastTone::Error,
        },
    }
}
