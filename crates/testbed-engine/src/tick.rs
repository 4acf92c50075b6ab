//! Fixed-timestep clock for the testbed loop.
//!
//! The [`FixedStepper`] turns variable frame times into a whole number of
//! fixed physics steps. Wall time accumulates; each [`advance`](FixedStepper::advance)
//! returns how many steps of [`fixed_dt`](FixedStepper::fixed_dt) the caller
//! should run. A frame that would owe more than `max_substeps` steps runs the
//! cap and drops the remaining backlog, so a stalled window does not make the
//! simulation spiral.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use testbed_engine::tick::{FixedStepper, StepConfig};
//!
//! let mut stepper = FixedStepper::new(StepConfig::default()).unwrap();
//! let steps = stepper.advance(Duration::from_millis(55));
//! assert_eq!(steps, 3); // 60 Hz
//! assert_eq!(stepper.step_count(), 3);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

// ---------------------------------------------------------------------------
// StepConfig
// ---------------------------------------------------------------------------

/// Step rate settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Physics steps per simulated second. Must be positive and finite.
    pub hz: f64,
    /// Most steps a single frame may run. Must be at least 1.
    pub max_substeps: u32,
}

impl Default for StepConfig {
    /// 60 Hz, at most 8 steps per frame.
    fn default() -> Self {
        Self {
            hz: 60.0,
            max_substeps: 8,
        }
    }
}

impl StepConfig {
    /// Check the rate and the substep cap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepRate`] if `hz` is not positive and
    /// finite or `max_substeps` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hz.is_finite() && self.hz > 0.0) || self.max_substeps == 0 {
            return Err(ConfigError::InvalidStepRate {
                hz: self.hz,
                max_substeps: self.max_substeps,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FixedStepper
// ---------------------------------------------------------------------------

/// Accumulates wall time into fixed simulation steps.
#[derive(Debug, Clone)]
pub struct FixedStepper {
    config: StepConfig,
    fixed_dt: f64,
    accumulator: f64,
    step_counter: u64,
    paused: bool,
    single_step: bool,
}

impl FixedStepper {
    /// Create a running stepper.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepRate`] for an invalid config.
    pub fn new(config: StepConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            fixed_dt: 1.0 / config.hz,
            accumulator: 0.0,
            step_counter: 0,
            paused: false,
            single_step: false,
        })
    }

    /// Feed one frame's elapsed time and return the number of steps to run.
    ///
    /// While paused, time is discarded and only a pending
    /// [`request_single_step`](Self::request_single_step) yields a step.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.paused {
            self.accumulator = 0.0;
            if std::mem::take(&mut self.single_step) {
                self.step_counter += 1;
                return 1;
            }
            return 0;
        }

        self.accumulator += elapsed.as_secs_f64();
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt && steps < self.config.max_substeps {
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }
        if steps == self.config.max_substeps && self.accumulator >= self.fixed_dt {
            tracing::debug!(
                dropped_secs = self.accumulator,
                max_substeps = self.config.max_substeps,
                "frame backlog dropped"
            );
            self.accumulator = 0.0;
        }
        self.step_counter += u64::from(steps);
        steps
    }

    /// Stop or resume consuming wall time.
    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Pause or resume.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.single_step = false;
        self.accumulator = 0.0;
        tracing::info!(paused, "simulation pause toggled");
    }

    /// Run exactly one step on the next [`advance`](Self::advance). Pauses
    /// the clock if it was running.
    pub fn request_single_step(&mut self) {
        self.paused = true;
        self.single_step = true;
    }

    // -- accessors ----------------------------------------------------------

    /// Whether wall time is being ignored.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Steps issued so far.
    pub fn step_count(&self) -> u64 {
        self.step_counter
    }

    /// Seconds per step.
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Simulated seconds, computed as `step_count * fixed_dt` to avoid drift
    /// from repeated addition.
    pub fn sim_time(&self) -> f64 {
        self.step_counter as f64 * self.fixed_dt
    }

    /// The settings this stepper was built from.
    pub fn config(&self) -> &StepConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn stepper() -> FixedStepper {
        FixedStepper::new(StepConfig::default()).unwrap()
    }

    #[test]
    fn default_is_sixty_hz() {
        let s = stepper();
        assert!((s.fixed_dt() - 1.0 / 60.0).abs() < 1e-15);
        assert_eq!(s.step_count(), 0);
        assert!(!s.is_paused());
    }

    #[test]
    fn rejects_bad_rates() {
        for config in [
            StepConfig { hz: 0.0, max_substeps: 8 },
            StepConfig { hz: -30.0, max_substeps: 8 },
            StepConfig { hz: f64::NAN, max_substeps: 8 },
            StepConfig { hz: 60.0, max_substeps: 0 },
        ] {
            assert!(FixedStepper::new(config).is_err(), "{config:?}");
        }
    }

    #[test]
    fn short_frames_accumulate() {
        let mut s = stepper();
        assert_eq!(s.advance(Duration::from_millis(10)), 0);
        assert_eq!(s.advance(Duration::from_millis(10)), 1);
        assert_eq!(s.step_count(), 1);
    }

    #[test]
    fn long_frame_is_capped_and_backlog_dropped() {
        let mut s = stepper();
        assert_eq!(s.advance(Duration::from_secs(2)), 8);
        // Nothing owed after the drop.
        assert_eq!(s.advance(Duration::ZERO), 0);
        assert_eq!(s.step_count(), 8);
    }

    #[test]
    fn paused_stepper_ignores_time() {
        let mut s = stepper();
        s.toggle_pause();
        assert_eq!(s.advance(Duration::from_secs(1)), 0);
        s.toggle_pause();
        assert_eq!(s.advance(Duration::ZERO), 0);
    }

    #[test]
    fn single_step_runs_once_and_stays_paused() {
        let mut s = stepper();
        s.request_single_step();
        assert!(s.is_paused());
        assert_eq!(s.advance(Duration::from_secs(1)), 1);
        assert_eq!(s.advance(Duration::from_secs(1)), 0);
        assert_eq!(s.step_count(), 1);
    }

    #[test]
    fn sim_time_tracks_steps() {
        let mut s = FixedStepper::new(StepConfig { hz: 100.0, max_substeps: 100 }).unwrap();
        s.advance(Duration::from_millis(505));
        assert_eq!(s.step_count(), 50);
        assert!((s.sim_time() - 0.5).abs() < 1e-12);
    }
}
