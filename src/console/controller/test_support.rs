use std::collections::VecDeque;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use super::*;
use crate::console::clock::ManualClock;
use crate::training::ModelVariant;
use crate::training_api::{ApiError, StartAccepted};

/// In-memory backend with scripted failures and call counters.
#[derive(Default)]
pub(super) struct FakeApi {
    pub(super) stored: Mutex<Option<TrainingConfiguration>>,
    pub(super) fetch_error: Mutex<Option<ApiError>>,
    pub(super) save_errors: Mutex<VecDeque<ApiError>>,
    pub(super) start_results: Mutex<VecDeque<Result<StartAccepted, ApiError>>>,
    pub(super) save_calls: Mutex<Vec<TrainingConfiguration>>,
    pub(super) start_calls: Mutex<usize>,
    pub(super) fetch_delay: Mutex<Duration>,
}

impl FakeApi {
    pub(super) fn with_stored(config: TrainingConfiguration) -> Arc<Self> {
        let api = Self::default();
        *api.stored.lock().unwrap() = Some(config);
        Arc::new(api)
    }

    pub(super) fn fail_fetch(&self, err: ApiError) {
        *self.fetch_error.lock().unwrap() = Some(err);
    }

    /// Answer fetches with the stored value as it was when the call arrived,
    /// after `delay`.
    pub(super) fn slow_fetch(&self, delay: Duration) {
        *self.fetch_delay.lock().unwrap() = delay;
    }

    pub(super) fn fail_next_save(&self, err: ApiError) {
        self.save_errors.lock().unwrap().push_back(err);
    }

    pub(super) fn script_start(&self, result: Result<StartAccepted, ApiError>) {
        self.start_results.lock().unwrap().push_back(result);
    }

    pub(super) fn save_calls(&self) -> Vec<TrainingConfiguration> {
        self.save_calls.lock().unwrap().clone()
    }

    pub(super) fn start_calls(&self) -> usize {
        *self.start_calls.lock().unwrap()
    }
}

impl TrainingApi for FakeApi {
    fn fetch_config(&self) -> Result<TrainingConfiguration, ApiError> {
        if let Some(err) = self.fetch_error.lock().unwrap().clone() {
            return Err(err);
        }
        let stored = self.stored.lock().unwrap().clone();
        thread::sleep(*self.fetch_delay.lock().unwrap());
        stored.ok_or_else(|| ApiError::Rejected {
                status: 404,
                detail: None,
            })
    }

    fn update_config(&self, config: &TrainingConfiguration) -> Result<(), ApiError> {
        self.save_calls.lock().unwrap().push(config.clone());
        if let Some(err) = self.save_errors.lock().unwrap().pop_front() {
            return Err(err);
        }
        *self.stored.lock().unwrap() = Some(config.clone());
        Ok(())
    }

    fn start_training(&self) -> Result<StartAccepted, ApiError> {
        *self.start_calls.lock().unwrap() += 1;
        self.start_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(StartAccepted::default()))
    }
}

pub(super) fn reference_config() -> TrainingConfiguration {
    TrainingConfiguration {
        model: ModelVariant::Yolov8n,
        classes: 4,
        epochs: 50,
        batch_size: 16,
        lr: 0.01,
        augmentation: true,
    }
}

/// Controller over a fake backend holding [`reference_config`], on a manual clock.
pub(super) fn controller_with_fake() -> (TrainingController, Arc<FakeApi>, ManualClock) {
    let api = FakeApi::with_stored(reference_config());
    let clock = ManualClock::new();
    let controller = TrainingController::new(api.clone()).with_clock(clock.clone());
    (controller, api, clock)
}

/// Tick until every background call has been applied.
pub(super) fn settle(controller: &mut TrainingController) {
    for _ in 0..400 {
        controller.tick();
        if !controller.jobs_in_flight() {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("background jobs did not finish in time");
}

/// Load, edit epochs, and save successfully, leaving launch authorized.
pub(super) fn authorize_launch(controller: &mut TrainingController) {
    controller.load_config().unwrap();
    settle(controller);
    controller.begin_edit().unwrap();
    controller.draft_mut().unwrap().epochs = "100".into();
    controller.commit_edit().unwrap();
    settle(controller);
    assert!(controller.launch_authorized());
}

/// Drive the run to completion one progress step at a time, returning every
/// progress value observed after each tick.
pub(super) fn run_to_completion(
    controller: &mut TrainingController,
    clock: &ManualClock,
) -> Vec<f32> {
    let mut observed = Vec::new();
    if let Some(progress) = controller.run_status().progress() {
        observed.push(progress);
    }
    for _ in 0..200 {
        clock.advance(progress::FixedDurationClock::STEP);
        controller.tick();
        match controller.run_status() {
            RunStatus::Running { progress, .. } => observed.push(*progress),
            RunStatus::Completed { .. } => return observed,
            other => panic!("unexpected run status {other:?}"),
        }
    }
    panic!("run did not complete");
}
