use std::time::Instant;

use super::*;
use crate::training_api::{ApiError, StartAccepted};

pub(super) const START_FAILURE_MESSAGE: &str = "Failed to start training";

impl TrainingController {
    pub(super) fn start_run(&mut self) -> Result<(), TransitionError> {
        if self.jobs.start_in_progress() {
            return Err(TransitionError::StartInFlight);
        }
        self.run = RunStatus::AwaitingConfirmation { starting: true };
        tracing::info!("Launch confirmed; sending start command");
        self.jobs.begin_start();
        Ok(())
    }

    pub(super) fn apply_start_result(&mut self, result: Result<StartAccepted, ApiError>) {
        self.jobs.clear_start();
        if !matches!(self.run, RunStatus::AwaitingConfirmation { starting: true }) {
            tracing::warn!("Ignoring start result outside of a pending launch");
            return;
        }
        match result {
            Ok(accepted) => {
                let id = RunId::new();
                let now = self.clock.now();
                self.active_run = Some(ActiveRun {
                    id,
                    progress: (self.progress_source)(now),
                    reported_metrics: accepted.metrics,
                });
                self.run = RunStatus::Running {
                    run_id: id,
                    progress: 0.0,
                };
                self.launch_authorized = false;
                tracing::info!(run_id = %id, "Training run started");
            }
            Err(err) => {
                // Authorization is only consumed by an accepted start.
                tracing::warn!("Training start rejected: {err}");
                self.run = RunStatus::Idle;
                self.post_status(err.user_message(START_FAILURE_MESSAGE), StatusKind::Error);
            }
        }
    }

    pub(super) fn advance_run(&mut self, now: Instant) {
        let Some(active) = self.active_run.as_mut() else {
            return;
        };
        let RunStatus::Running { progress, .. } = &mut self.run else {
            return;
        };
        // 100% stays visible for one tick before the results replace it.
        let reached_end = *progress >= 100.0 && active.progress.is_finished();
        if !reached_end {
            for value in active.progress.poll(now) {
                let value = value.clamp(0.0, 100.0);
                if value > *progress {
                    *progress = value;
                }
            }
            return;
        }
        if let Some(active) = self.active_run.take() {
            let metrics = active.reported_metrics.unwrap_or(RunMetrics::PLACEHOLDER);
            tracing::info!(run_id = %active.id, accuracy = metrics.accuracy, "Training run completed");
            self.run = RunStatus::Completed {
                run_id: active.id,
                metrics,
            };
        }
    }

    /// Close the results panel and return to idle.
    pub fn dismiss_results(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.run, RunStatus::Completed { .. }) {
            return Err(TransitionError::NoResults);
        }
        self.run = RunStatus::Idle;
        tracing::info!("Run results dismissed");
        Ok(())
    }
}
