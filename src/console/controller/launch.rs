use super::*;

impl TrainingController {
    /// True when the Train control should be offered.
    pub fn can_request_launch(&self) -> bool {
        self.launch_authorized && self.run.is_idle() && !self.edit.is_editing()
    }

    /// Ask for confirmation before starting a run.
    pub fn request_launch(&mut self) -> Result<(), TransitionError> {
        if !self.launch_authorized {
            return Err(TransitionError::NotAuthorized);
        }
        if !self.run.is_idle() {
            return Err(TransitionError::RunActive);
        }
        self.run = RunStatus::AwaitingConfirmation { starting: false };
        tracing::info!("Launch requested; awaiting confirmation");
        Ok(())
    }

    /// Back out of the confirmation prompt without contacting the backend.
    pub fn decline_launch(&mut self) -> Result<(), TransitionError> {
        match self.run {
            RunStatus::AwaitingConfirmation { starting: false } => {
                self.run = RunStatus::Idle;
                tracing::info!("Launch declined");
                Ok(())
            }
            RunStatus::AwaitingConfirmation { starting: true } => Err(TransitionError::StartInFlight),
            _ => Err(TransitionError::NotAwaitingConfirmation),
        }
    }

    /// Accept the prompt and issue the start command.
    pub fn confirm_launch(&mut self) -> Result<(), TransitionError> {
        match self.run {
            RunStatus::AwaitingConfirmation { starting: false } => self.start_run(),
            RunStatus::AwaitingConfirmation { starting: true } => Err(TransitionError::StartInFlight),
            _ => Err(TransitionError::NotAwaitingConfirmation),
        }
    }
}
