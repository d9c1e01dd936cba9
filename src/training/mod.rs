//! Training configuration and run result types shared by the API client and
//! the console controller.

mod config;
mod metrics;

pub use config::{
    ConfigDraft, ConfigField, ModelVariant, TrainingConfiguration, ValidationError,
    ValidationProblem,
};
pub use metrics::{MetricTile, RunMetrics};
