//! Library exports for the training console binary and its tests.
/// Application directory resolution.
pub mod app_dirs;
/// Training console controller and egui renderer.
pub mod console;
/// Shared HTTP agent helpers.
pub mod http_client;
/// Logging setup.
pub mod logging;
/// Persisted console settings.
pub mod settings;
/// Training configuration and result types.
pub mod training;
/// Client for the training backend.
pub mod training_api;
