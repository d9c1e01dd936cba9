//! Training console: lifecycle controller, its state types, and the egui
//! renderer on top of them.

/// Time sources used by the controller.
pub mod clock;
/// Training-run lifecycle controller.
pub mod controller;
/// State types exposed by the controller.
pub mod state;
/// egui renderer.
pub mod ui;
/// Controller state converted into display structs.
pub mod view_model;

pub use controller::{TrainingController, TransitionError};
