//! Progress sources that drive a running run towards completion.

use std::time::{Duration, Instant};

/// Reports how far a run has progressed.
///
/// The controller polls it every tick and completes the run once it reports
/// finished. A backend-driven source (polling or streaming job status) can
/// replace the fixed clock without touching the controller.
pub trait RunProgress: Send {
    /// Progress values, in percent, for every step that fell due up to `now`,
    /// oldest first. Empty when nothing new happened.
    fn poll(&mut self, now: Instant) -> Vec<f32>;

    /// True once the last poll reported 100%.
    fn is_finished(&self) -> bool;

    /// Stop reporting further steps.
    fn cancel(&mut self);
}

/// Builds the progress source for a run accepted at the given instant.
pub type ProgressSourceFactory = Box<dyn Fn(Instant) -> Box<dyn RunProgress>>;

/// Deterministic stand-in for run duration: a fixed total split into equal
/// steps, independent of any backend signal.
#[derive(Clone, Debug)]
pub struct FixedDurationClock {
    started_at: Instant,
    step: Duration,
    total_steps: u32,
    completed_steps: u32,
    cancelled: bool,
}

impl FixedDurationClock {
    pub const DURATION: Duration = Duration::from_millis(3000);
    pub const STEP: Duration = Duration::from_millis(30);

    /// Clock with the standard 3000 ms / 30 ms timing.
    pub fn start(now: Instant) -> Self {
        Self::with_timing(now, Self::DURATION, Self::STEP)
    }

    pub fn with_timing(now: Instant, duration: Duration, step: Duration) -> Self {
        let step = step.max(Duration::from_millis(1));
        let steps = (duration.as_millis() / step.as_millis()).max(1);
        Self {
            started_at: now,
            step,
            total_steps: u32::try_from(steps).unwrap_or(u32::MAX),
            completed_steps: 0,
            cancelled: false,
        }
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn completed_steps(&self) -> u32 {
        self.completed_steps
    }

    fn percent_at(&self, step: u32) -> f32 {
        if step >= self.total_steps {
            return 100.0;
        }
        (step as f32 * 100.0 / self.total_steps as f32).min(100.0)
    }

    fn steps_due(&self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.started_at);
        let due = (elapsed.as_millis() / self.step.as_millis()).min(self.total_steps as u128);
        u32::try_from(due).unwrap_or(self.total_steps)
    }
}

impl RunProgress for FixedDurationClock {
    fn poll(&mut self, now: Instant) -> Vec<f32> {
        if self.cancelled || self.is_finished() {
            return Vec::new();
        }
        let due = self.steps_due(now);
        let values = (self.completed_steps + 1..=due)
            .map(|step| self.percent_at(step))
            .collect();
        self.completed_steps = self.completed_steps.max(due);
        values
    }

    fn is_finished(&self) -> bool {
        self.completed_steps >= self.total_steps
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// Default factory: the standard fixed-duration clock.
pub fn fixed_duration_source() -> ProgressSourceFactory {
    Box::new(|now| Box::new(FixedDurationClock::start(now)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_clock_has_one_hundred_steps() {
        let clock = FixedDurationClock::start(Instant::now());
        assert_eq!(clock.total_steps(), 100);
    }

    #[test]
    fn stepping_one_interval_at_a_time_reports_each_percent() {
        let start = Instant::now();
        let mut clock = FixedDurationClock::start(start);
        let mut observed = Vec::new();
        for tick in 1..=120u32 {
            observed.extend(clock.poll(start + FixedDurationClock::STEP * tick));
        }
        assert_eq!(observed.len(), 100);
        for (index, value) in observed.iter().enumerate() {
            assert_eq!(*value, (index + 1) as f32);
        }
        assert!(clock.is_finished());
    }

    #[test]
    fn late_poll_catches_up_in_order() {
        let start = Instant::now();
        let mut clock = FixedDurationClock::start(start);
        assert!(clock.poll(start + Duration::from_millis(29)).is_empty());
        let burst = clock.poll(start + Duration::from_millis(95));
        assert_eq!(burst, vec![1.0, 2.0, 3.0]);
        let rest = clock.poll(start + Duration::from_secs(10));
        assert_eq!(rest.len(), 97);
        assert_eq!(rest.last().copied(), Some(100.0));
        assert!(rest.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn finished_clock_stops_reporting() {
        let start = Instant::now();
        let mut clock = FixedDurationClock::start(start);
        clock.poll(start + FixedDurationClock::DURATION);
        assert!(clock.is_finished());
        assert!(clock.poll(start + Duration::from_secs(60)).is_empty());
        assert_eq!(clock.completed_steps(), 100);
    }

    #[test]
    fn poll_before_start_reports_nothing() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FixedDurationClock::start(start);
        assert!(clock.poll(start - Duration::from_millis(500)).is_empty());
        assert_eq!(clock.completed_steps(), 0);
    }

    #[test]
    fn uneven_timing_still_ends_at_exactly_one_hundred() {
        let start = Instant::now();
        let mut clock =
            FixedDurationClock::with_timing(start, Duration::from_millis(1000), Duration::from_millis(70));
        assert_eq!(clock.total_steps(), 14);
        let values = clock.poll(start + Duration::from_secs(2));
        assert_eq!(values.len(), 14);
        assert_eq!(values.last().copied(), Some(100.0));
        assert!(values.iter().all(|value| *value <= 100.0));
    }

    #[test]
    fn cancelled_clock_is_silent() {
        let start = Instant::now();
        let mut clock = FixedDurationClock::start(start);
        clock.poll(start + Duration::from_millis(300));
        clock.cancel();
        assert!(clock.poll(start + Duration::from_secs(5)).is_empty());
        assert!(!clock.is_finished());
    }
}
