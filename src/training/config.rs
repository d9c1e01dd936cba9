use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Detector architectures the backend can train.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelVariant {
    #[default]
    #[serde(rename = "YOLOv8n")]
    Yolov8n,
    #[serde(rename = "YOLOv8s")]
    Yolov8s,
    #[serde(rename = "YOLOv12n")]
    Yolov12n,
    #[serde(rename = "YOLOv12s")]
    Yolov12s,
}

impl ModelVariant {
    /// Every selectable variant, in presentation order.
    pub const ALL: [ModelVariant; 4] = [
        ModelVariant::Yolov8n,
        ModelVariant::Yolov8s,
        ModelVariant::Yolov12n,
        ModelVariant::Yolov12s,
    ];

    /// Identifier used on the wire and in the UI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yolov8n => "YOLOv8n",
            Self::Yolov8s => "YOLOv8s",
            Self::Yolov12n => "YOLOv12n",
            Self::Yolov12s => "YOLOv12s",
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hyperparameters for one training run, as exchanged with the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingConfiguration {
    pub model: ModelVariant,
    pub classes: u32,
    pub epochs: u32,
    pub batch_size: u32,
    /// Learning rate.
    pub lr: f64,
    pub augmentation: bool,
}

impl Default for TrainingConfiguration {
    fn default() -> Self {
        Self {
            model: ModelVariant::Yolov8n,
            classes: 4,
            epochs: 50,
            batch_size: 16,
            lr: 0.01,
            augmentation: true,
        }
    }
}

/// Numeric configuration fields that are typed in as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigField {
    Classes,
    Epochs,
    BatchSize,
    LearningRate,
}

impl ConfigField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Classes => "No. of Classes",
            Self::Epochs => "Epochs",
            Self::BatchSize => "Batch Size",
            Self::LearningRate => "Learning Rate",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationProblem {
    Missing,
    NotANumber,
    NotPositive,
    OutOfRange,
}

/// A draft field that cannot be sent to the backend.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}: {}", .field.label(), describe(.problem))]
pub struct ValidationError {
    pub field: ConfigField,
    pub problem: ValidationProblem,
}

fn describe(problem: &ValidationProblem) -> &'static str {
    match problem {
        ValidationProblem::Missing => "a value is required",
        ValidationProblem::NotANumber => "must be a number",
        ValidationProblem::NotPositive => "must be greater than zero",
        ValidationProblem::OutOfRange => "value is too large",
    }
}

/// Editable form of a [`TrainingConfiguration`].
///
/// Numeric fields keep the raw text the user typed so malformed input is
/// caught by [`ConfigDraft::parse`] instead of being sent to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigDraft {
    pub model: ModelVariant,
    pub classes: String,
    pub epochs: String,
    pub batch_size: String,
    pub lr: String,
    pub augmentation: bool,
}

impl From<&TrainingConfiguration> for ConfigDraft {
    fn from(config: &TrainingConfiguration) -> Self {
        Self {
            model: config.model,
            classes: config.classes.to_string(),
            epochs: config.epochs.to_string(),
            batch_size: config.batch_size.to_string(),
            lr: config.lr.to_string(),
            augmentation: config.augmentation,
        }
    }
}

impl ConfigDraft {
    /// Mutable text buffer for a numeric field.
    pub fn text_mut(&mut self, field: ConfigField) -> &mut String {
        match field {
            ConfigField::Classes => &mut self.classes,
            ConfigField::Epochs => &mut self.epochs,
            ConfigField::BatchSize => &mut self.batch_size,
            ConfigField::LearningRate => &mut self.lr,
        }
    }

    /// Validate every field, reporting the first one that fails.
    pub fn parse(&self) -> Result<TrainingConfiguration, ValidationError> {
        Ok(TrainingConfiguration {
            model: self.model,
            classes: parse_count(ConfigField::Classes, &self.classes)?,
            epochs: parse_count(ConfigField::Epochs, &self.epochs)?,
            batch_size: parse_count(ConfigField::BatchSize, &self.batch_size)?,
            lr: parse_rate(&self.lr)?,
            augmentation: self.augmentation,
        })
    }
}

fn parse_count(field: ConfigField, raw: &str) -> Result<u32, ValidationError> {
    let fail = |problem| ValidationError { field, problem };
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(fail(ValidationProblem::Missing));
    }
    let value: i64 = raw
        .parse()
        .map_err(|_| fail(ValidationProblem::NotANumber))?;
    if value < 1 {
        return Err(fail(ValidationProblem::NotPositive));
    }
    u32::try_from(value).map_err(|_| fail(ValidationProblem::OutOfRange))
}

fn parse_rate(raw: &str) -> Result<f64, ValidationError> {
    let fail = |problem| ValidationError {
        field: ConfigField::LearningRate,
        problem,
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(fail(ValidationProblem::Missing));
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| fail(ValidationProblem::NotANumber))?;
    if !value.is_finite() {
        return Err(fail(ValidationProblem::NotANumber));
    }
    if value <= 0.0 {
        return Err(fail(ValidationProblem::NotPositive));
    }
    Ok(value)
}
