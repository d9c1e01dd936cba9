use std::fmt;

use uuid::Uuid;

use crate::training::RunMetrics;

/// Identifier assigned to each accepted run; used to correlate log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Where the current run is in its lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RunStatus {
    #[default]
    Idle,
    /// Launch requested; waiting for the user to accept or decline.
    /// `starting` is set once accepted and the start call is in flight.
    AwaitingConfirmation { starting: bool },
    /// Progress in percent, `0.0..=100.0`.
    Running { run_id: RunId, progress: f32 },
    Completed { run_id: RunId, metrics: RunMetrics },
}

impl RunStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn awaiting_confirmation(&self) -> bool {
        matches!(self, Self::AwaitingConfirmation { .. })
    }

    pub fn progress(&self) -> Option<f32> {
        match self {
            Self::Running { progress, .. } => Some(*progress),
            _ => None,
        }
    }

    pub fn metrics(&self) -> Option<&RunMetrics> {
        match self {
            Self::Completed { metrics, .. } => Some(metrics),
            _ => None,
        }
    }
}
