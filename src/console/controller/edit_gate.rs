use super::*;

impl TrainingController {
    /// True when the Adjust control should be enabled.
    pub fn can_begin_edit(&self) -> bool {
        !self.edit.is_editing()
            && !self.jobs.save_in_progress()
            && !self.jobs.load_in_progress()
            && matches!(self.run, RunStatus::Idle | RunStatus::Completed { .. })
    }

    /// Unlock the configuration for editing.
    ///
    /// Any earlier launch authorization is revoked. A completed run is
    /// dismissed first so its results don't linger next to a new draft.
    pub fn begin_edit(&mut self) -> Result<(), TransitionError> {
        if self.edit.is_editing() {
            return Err(TransitionError::AlreadyEditing);
        }
        if self.jobs.save_in_progress() {
            return Err(TransitionError::SaveInFlight);
        }
        if self.jobs.load_in_progress() {
            return Err(TransitionError::LoadInFlight);
        }
        if matches!(self.run, RunStatus::Completed { .. }) {
            self.dismiss_results()?;
        }
        if !self.run.is_idle() {
            return Err(TransitionError::RunActive);
        }
        self.edit = EditState::Editing(ConfigDraft::from(&self.config));
        self.launch_authorized = false;
        tracing::info!("Configuration unlocked for editing");
        Ok(())
    }

    /// Validate the draft and save it. The configuration locks again once
    /// the backend accepts it.
    pub fn commit_edit(&mut self) -> Result<(), TransitionError> {
        let Some(draft) = self.edit.draft() else {
            return Err(TransitionError::NotEditing);
        };
        if self.jobs.save_in_progress() {
            return Err(TransitionError::SaveInFlight);
        }
        match draft.parse() {
            Ok(config) => self.submit_config(config),
            Err(err) => {
                tracing::info!("Rejected configuration draft: {err}");
                self.post_status(err.to_string(), StatusKind::Error);
                Err(err.into())
            }
        }
    }

    /// Throw the draft away and lock again. Authorization stays revoked.
    pub fn cancel_edit(&mut self) -> Result<(), TransitionError> {
        if !self.edit.is_editing() {
            return Err(TransitionError::NotEditing);
        }
        if self.jobs.save_in_progress() {
            return Err(TransitionError::SaveInFlight);
        }
        self.edit = EditState::Locked;
        tracing::info!("Configuration edit cancelled");
        Ok(())
    }
}
