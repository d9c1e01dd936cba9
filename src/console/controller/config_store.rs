use super::jobs::ConfigSaveResult;
use super::*;
use crate::training_api::ApiError;

pub(super) const SAVE_SUCCESS_MESSAGE: &str = "Parameters updated successfully";
pub(super) const SAVE_FAILURE_MESSAGE: &str = "Failed to update parameters";

impl TrainingController {
    /// Fetch the stored configuration in the background.
    ///
    /// Only runs while the configuration is locked; a save keeps it unlocked
    /// until its result arrives. Editing stays closed until the load result is
    /// applied, so a load never lands on top of a newer save. A failed load keeps whatever configuration is
    /// already held; it is only logged since the default is usable.
    pub fn load_config(&mut self) -> Result<(), TransitionError> {
        if self.edit.is_editing() {
            return Err(TransitionError::AlreadyEditing);
        }
        if self.jobs.load_in_progress() {
            return Ok(());
        }
        tracing::info!("Loading training configuration");
        self.jobs.begin_load();
        Ok(())
    }

    pub(super) fn apply_loaded_config(&mut self, result: Result<TrainingConfiguration, ApiError>) {
        self.jobs.clear_load();
        match result {
            Ok(config) => {
                tracing::info!(model = %config.model, epochs = config.epochs, "Training configuration loaded");
                self.config = config;
            }
            Err(err) => {
                tracing::warn!("Failed to load training configuration, keeping current values: {err}");
            }
        }
    }

    /// Send `config` to the backend. Nothing changes locally until the
    /// result arrives.
    pub(super) fn submit_config(&mut self, config: TrainingConfiguration) -> Result<(), TransitionError> {
        if self.jobs.save_in_progress() {
            return Err(TransitionError::SaveInFlight);
        }
        tracing::info!(model = %config.model, epochs = config.epochs, "Saving training configuration");
        self.jobs.begin_save(config);
        Ok(())
    }

    pub(super) fn apply_save_result(&mut self, outcome: ConfigSaveResult) {
        self.jobs.clear_save();
        match outcome.result {
            Ok(()) => {
                tracing::info!("Training configuration saved; launch authorized");
                self.config = outcome.submitted;
                self.edit = EditState::Locked;
                self.launch_authorized = true;
                self.post_status(SAVE_SUCCESS_MESSAGE, StatusKind::Success);
            }
            Err(err) => {
                tracing::warn!("Failed to save training configuration: {err}");
                self.post_status(err.user_message(SAVE_FAILURE_MESSAGE), StatusKind::Error);
            }
        }
    }
}
