use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::training::TrainingConfiguration;
use crate::training_api::{ApiError, StartAccepted, TrainingApi};

type TryRecvError = std::sync::mpsc::TryRecvError;

/// Completed network call, delivered back to the controller thread.
#[derive(Debug)]
pub(crate) enum JobMessage {
    ConfigLoaded(Result<TrainingConfiguration, ApiError>),
    ConfigSaved(ConfigSaveResult),
    RunStarted(Result<StartAccepted, ApiError>),
}

#[derive(Debug)]
pub(crate) struct ConfigSaveResult {
    /// The configuration that was sent; becomes current only on success.
    pub(crate) submitted: TrainingConfiguration,
    pub(crate) result: Result<(), ApiError>,
}

/// Runs remote calls on worker threads and tracks which are in flight.
pub(crate) struct ControllerJobs {
    api: Arc<dyn TrainingApi>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    load_in_progress: bool,
    save_in_progress: bool,
    start_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new(api: Arc<dyn TrainingApi>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            api,
            message_tx,
            message_rx,
            load_in_progress: false,
            save_in_progress: false,
            start_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn any_in_progress(&self) -> bool {
        self.load_in_progress || self.save_in_progress || self.start_in_progress
    }

    pub(super) fn load_in_progress(&self) -> bool {
        self.load_in_progress
    }

    pub(super) fn begin_load(&mut self) {
        if self.load_in_progress {
            return;
        }
        self.load_in_progress = true;
        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.fetch_config();
            let _ = tx.send(JobMessage::ConfigLoaded(result));
        });
    }

    pub(super) fn clear_load(&mut self) {
        self.load_in_progress = false;
    }

    pub(super) fn save_in_progress(&self) -> bool {
        self.save_in_progress
    }

    pub(super) fn begin_save(&mut self, submitted: TrainingConfiguration) {
        if self.save_in_progress {
            return;
        }
        self.save_in_progress = true;
        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.update_config(&submitted);
            let _ = tx.send(JobMessage::ConfigSaved(ConfigSaveResult { submitted, result }));
        });
    }

    pub(super) fn clear_save(&mut self) {
        self.save_in_progress = false;
    }

    pub(super) fn start_in_progress(&self) -> bool {
        self.start_in_progress
    }

    pub(super) fn begin_start(&mut self) {
        if self.start_in_progress {
            return;
        }
        self.start_in_progress = true;
        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.start_training();
            let _ = tx.send(JobMessage::RunStarted(result));
        });
    }

    pub(super) fn clear_start(&mut self) {
        self.start_in_progress = false;
    }
}
