// Per-run generation parameters.
//
// `GenerationParams` is the typed contract between whatever front end parses
// user input (the `generate` binary uses clap) and the generative core. It is
// immutable for the duration of a run. The core assumes `validate()` has
// passed; in particular it never re-checks `low <= high`.

use crate::error::MelodyError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MEASURES: u32 = 4;
pub const DEFAULT_TEMPO: u32 = 100;
pub const DEFAULT_LOW_MIDI: u8 = 55;
pub const DEFAULT_HIGH_MIDI: u8 = 76;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    /// Number of 4/4 measures to fill.
    pub measures: u32,
    /// Beats per minute. Only the MIDI writer looks at this.
    pub tempo: u32,
    /// Seed text. `None` means a fresh, non-reproducible melody.
    pub seed: Option<String>,
    /// Lowest allowed MIDI pitch (inclusive).
    pub low_midi: u8,
    /// Highest allowed MIDI pitch (inclusive).
    pub high_midi: u8,
}

impl Default for GenerationParams {
    fn default() -> Self {
        GenerationParams {
            measures: DEFAULT_MEASURES,
            tempo: DEFAULT_TEMPO,
            seed: None,
            low_midi: DEFAULT_LOW_MIDI,
            high_midi: DEFAULT_HIGH_MIDI,
        }
    }
}

impl GenerationParams {
    /// Check the preconditions the core relies on.
    pub fn validate(&self) -> Result<(), MelodyError> {
        if self.measures == 0 {
            return Err(MelodyError::ZeroMeasures);
        }
        if self.tempo == 0 {
            return Err(MelodyError::ZeroTempo);
        }
        for pitch in [self.low_midi, self.high_midi] {
            if pitch > 127 {
                return Err(MelodyError::PitchOutOfMidiRange(pitch));
            }
        }
        if self.low_midi > self.high_midi {
            return Err(MelodyError::InvalidRange {
                low: self.low_midi,
                high: self.high_midi,
            });
        }
        Ok(())
    }
}
