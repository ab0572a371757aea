//! Sampling parameters, the cooling schedule, and the retry policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generation randomness for one attempt.
///
/// # Examples
///
/// ```
/// use conforma_core::SamplingParams;
///
/// let params = SamplingParams::default();
/// assert_eq!(params.temperature, 0.7);
/// assert_eq!(params.top_p, 0.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Softmax temperature
    pub temperature: f32,
    /// Nucleus-sampling probability mass
    pub top_p: f32,
}

impl SamplingParams {
    /// Create sampling parameters, clamping both values to `[0, 1]`.
    pub fn new(temperature: f32, top_p: f32) -> Self {
        Self {
            temperature: temperature.clamp(0.0, 1.0),
            top_p: top_p.clamp(0.0, 1.0),
        }
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Monotonic per-attempt reduction of sampling randomness.
///
/// Each retry lowers temperature and nucleus mass by a fixed step, clamped to
/// a floor of zero, so later attempts trade variety for conformance.
///
/// # Examples
///
/// ```
/// use conforma_core::{CoolingSchedule, SamplingParams};
///
/// let schedule = CoolingSchedule::default();
/// let base = SamplingParams::default();
///
/// let third = schedule.at(base, 2);
/// assert!((third.temperature - 0.3).abs() < 1e-6);
/// // Never goes negative, however many attempts are made.
/// assert_eq!(schedule.at(base, 100).temperature, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoolingSchedule {
    /// Temperature reduction per attempt
    pub temperature_step: f32,
    /// Nucleus mass reduction per attempt
    pub top_p_step: f32,
}

impl CoolingSchedule {
    /// Sampling parameters for the given zero-based attempt index.
    ///
    /// Pure function of the base parameters and the attempt index; both
    /// outputs are non-increasing in `attempt` and clamped at zero.
    pub fn at(&self, base: SamplingParams, attempt: usize) -> SamplingParams {
        let steps = attempt as f32;
        SamplingParams {
            temperature: (base.temperature - steps * self.temperature_step).max(0.0),
            top_p: (base.top_p - steps * self.top_p_step).max(0.0),
        }
    }

    /// A schedule that leaves sampling parameters unchanged across attempts.
    pub fn constant() -> Self {
        Self {
            temperature_step: 0.0,
            top_p_step: 0.0,
        }
    }
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        Self {
            temperature_step: 0.2,
            top_p_step: 0.1,
        }
    }
}

/// Attempt budget and inter-attempt wait for one unit of work.
///
/// The wait is a fixed interval, not an exponential backoff; the generation
/// services this engine fronts recover on a timescale of tens of seconds and
/// the cooling schedule already changes what each retry asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of generation attempts per unit of work
    pub max_attempts: usize,
    /// Fixed wait between attempts
    pub wait_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            wait_interval: Duration::from_secs(20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooling_is_monotonic_and_clamped() {
        let schedule = CoolingSchedule::default();
        let base = SamplingParams::default();

        let mut previous = schedule.at(base, 0);
        assert_eq!(previous, base);

        for attempt in 1..10 {
            let current = schedule.at(base, attempt);
            assert!(current.temperature <= previous.temperature);
            assert!(current.top_p <= previous.top_p);
            assert!(current.temperature >= 0.0);
            assert!(current.top_p >= 0.0);
            previous = current;
        }
    }

    #[test]
    fn constant_schedule_never_cools() {
        let schedule = CoolingSchedule::constant();
        let base = SamplingParams::new(0.5, 0.8);
        assert_eq!(schedule.at(base, 7), base);
    }

    #[test]
    fn sampling_params_clamp_to_unit_interval() {
        let params = SamplingParams::new(1.5, -0.2);
        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.top_p, 0.0);
    }
}
