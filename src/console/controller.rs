//! Training-run lifecycle controller.
//!
//! One controller backs one console session. It owns the last-synced
//! configuration, the edit lock, launch authorization, the run status and
//! the status message. All transitions happen on the caller's thread; remote
//! calls run on worker threads and are applied when [`TrainingController::tick`]
//! drains their results.

mod config_store;
mod edit_gate;
mod jobs;
mod launch;
pub mod progress;
mod run;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use thiserror::Error;

use crate::console::clock::{Clock, SystemClock};
use crate::console::state::{EditState, RunId, RunStatus, StatusKind, StatusMessage, StatusNotifier};
use crate::training::{ConfigDraft, RunMetrics, TrainingConfiguration, ValidationError};
use crate::training_api::TrainingApi;

use jobs::{ControllerJobs, JobMessage};
use progress::{ProgressSourceFactory, RunProgress, fixed_duration_source};

/// A user action that is not allowed in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Configuration is already being edited")]
    AlreadyEditing,
    #[error("Configuration is not being edited")]
    NotEditing,
    #[error("A configuration save is still in flight")]
    SaveInFlight,
    #[error("The configuration is still loading")]
    LoadInFlight,
    #[error("Not available while a run is pending or in progress")]
    RunActive,
    #[error("Save the configuration before launching a run")]
    NotAuthorized,
    #[error("No launch is awaiting confirmation")]
    NotAwaitingConfirmation,
    #[error("The start request is still in flight")]
    StartInFlight,
    #[error("No completed run to dismiss")]
    NoResults,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Run that has been accepted by the backend and is being driven to completion.
struct ActiveRun {
    id: RunId,
    progress: Box<dyn RunProgress>,
    reported_metrics: Option<RunMetrics>,
}

/// Drives configuration editing, launch gating and run progress.
pub struct TrainingController {
    config: TrainingConfiguration,
    edit: EditState,
    launch_authorized: bool,
    run: RunStatus,
    active_run: Option<ActiveRun>,
    status: StatusNotifier,
    jobs: ControllerJobs,
    clock: Box<dyn Clock>,
    progress_source: ProgressSourceFactory,
}

impl TrainingController {
    /// Controller with the default configuration, wall clock and fixed
    /// 3-second progress clock. Call [`Self::load_config`] to hydrate it.
    pub fn new(api: Arc<dyn TrainingApi>) -> Self {
        Self {
            config: TrainingConfiguration::default(),
            edit: EditState::Locked,
            launch_authorized: false,
            run: RunStatus::Idle,
            active_run: None,
            status: StatusNotifier::default(),
            jobs: ControllerJobs::new(api),
            clock: Box::new(SystemClock),
            progress_source: fixed_duration_source(),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace what drives a run from 0 to 100%.
    pub fn with_progress_source(mut self, factory: ProgressSourceFactory) -> Self {
        self.progress_source = factory;
        self
    }

    /// Last configuration loaded from or saved to the backend.
    pub fn config(&self) -> &TrainingConfiguration {
        &self.config
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }

    /// The draft being edited. `None` while the configuration is locked.
    pub fn draft_mut(&mut self) -> Option<&mut ConfigDraft> {
        self.edit.draft_mut()
    }

    pub fn launch_authorized(&self) -> bool {
        self.launch_authorized
    }

    pub fn run_status(&self) -> &RunStatus {
        &self.run
    }

    /// The status message, unless it has aged out.
    pub fn status_message(&self) -> Option<&StatusMessage> {
        self.status.current(self.clock.now())
    }

    pub fn load_in_flight(&self) -> bool {
        self.jobs.load_in_progress()
    }

    pub fn save_in_flight(&self) -> bool {
        self.jobs.save_in_progress()
    }

    pub fn start_in_flight(&self) -> bool {
        self.jobs.start_in_progress()
    }

    /// True while any remote call has not been applied yet.
    pub fn jobs_in_flight(&self) -> bool {
        self.jobs.any_in_progress()
    }

    /// True while something needs periodic ticks: a remote call, a run, or a
    /// visible status message.
    pub fn needs_tick(&self) -> bool {
        self.jobs_in_flight() || self.active_run.is_some() || self.status_message().is_some()
    }

    /// Apply finished remote calls, advance the run and expire the status
    /// message. Call once per frame.
    pub fn tick(&mut self) {
        self.poll_jobs();
        let now = self.clock.now();
        self.advance_run(now);
        self.status.expire(now);
    }

    /// Stop a running progress source; used when the console closes.
    pub fn shutdown(&mut self) {
        if let Some(active) = self.active_run.as_mut() {
            active.progress.cancel();
            tracing::info!(run_id = %active.id, "Progress tracking stopped on shutdown");
        }
    }

    fn poll_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            match message {
                JobMessage::ConfigLoaded(result) => self.apply_loaded_config(result),
                JobMessage::ConfigSaved(outcome) => self.apply_save_result(outcome),
                JobMessage::RunStarted(result) => self.apply_start_result(result),
            }
        }
    }

    fn post_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        let now = self.clock.now();
        self.status.post(text, kind, now);
    }
}
