// Tunable generator constants.
//
// The rhythm pool and the step/leap tables are data, not code: the algorithms
// in rhythm.rs and pitch.rs read them from `GeneratorConfig` instead of
// embedding magic numbers. Defaults reproduce the stock generator exactly;
// a JSON file passed via `--config` can override any field.
//
// **Critical constraint: determinism.** Changing any value here changes the
// melody produced for every seed. Two runs only match if their configs match.

use crate::error::MelodyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Beats in one measure. Time is fixed at 4/4, so a whole note fills a bar.
pub const BEATS_PER_MEASURE: f64 = 4.0;

/// Shortest allowed rhythm pool entry: one tick of a 512-tick measure.
pub const MIN_RHYTHM_FRACTION: f64 = 1.0 / 512.0;

/// Default starting pitch (middle C).
pub const MIDDLE_C: u8 = 60;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Allowed note durations as fractions of a measure, largest first.
    pub rhythm_pool: Vec<f64>,
    /// Probability of a stepwise move (vs. a leap) on each pitch advance.
    pub step_probability: f64,
    /// Semitone deltas for stepwise motion.
    pub steps: Vec<i8>,
    /// Semitone deltas for leaps.
    pub leaps: Vec<i8>,
    /// Pitch the walk starts from, clamped into the requested range.
    pub start_pitch: u8,
    /// Tolerance for "the measure is full" and for the final snap.
    pub epsilon: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            rhythm_pool: vec![1.0, 0.5, 0.25, 0.125, 0.0625],
            step_probability: 0.8,
            steps: vec![-2, -1, 1, 2],
            leaps: vec![-7, -5, 5, 7],
            start_pitch: MIDDLE_C,
            epsilon: 1e-6,
        }
    }
}

impl GeneratorConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, MelodyError> {
        let data = std::fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the algorithms can't run on.
    pub fn validate(&self) -> Result<(), MelodyError> {
        if self.rhythm_pool.is_empty() {
            return Err(MelodyError::InvalidConfig("rhythm_pool is empty".into()));
        }
        if let Some(bad) = self
            .rhythm_pool
            .iter()
            .find(|&&v| v.is_nan() || v < MIN_RHYTHM_FRACTION || v > 1.0)
        {
            return Err(MelodyError::InvalidConfig(format!(
                "rhythm_pool entry {bad} is not in [{MIN_RHYTHM_FRACTION}, 1]"
            )));
        }
        if !(0.0..=1.0).contains(&self.step_probability) {
            return Err(MelodyError::InvalidConfig(format!(
                "step_probability {} is not in [0, 1]",
                self.step_probability
            )));
        }
        if self.steps.is_empty() || self.leaps.is_empty() {
            return Err(MelodyError::InvalidConfig(
                "steps and leaps must both be non-empty".into(),
            ));
        }
        // Epsilon must stay well under the shortest note, or a bar can count
        // as full while a whole pool entry is still missing.
        let shortest = self
            .rhythm_pool
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        if self.epsilon.is_nan() || self.epsilon <= 0.0 || self.epsilon >= shortest / 2.0 {
            return Err(MelodyError::InvalidConfig(format!(
                "epsilon {} must be positive and below half the shortest pool entry ({shortest})",
                self.epsilon
            )));
        }
        if self.start_pitch > 127 {
            return Err(MelodyError::PitchOutOfMidiRange(self.start_pitch));
        }
        Ok(())
    }
}
