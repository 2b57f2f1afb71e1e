// Error type for the melody generator.
//
// The generative core (rhythm, pitch, melody) never fails: it runs on
// validated inputs. Everything that can go wrong happens at the edges:
// parameter validation, config loading, and writing the MIDI file.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MelodyError {
    #[error("Invalid pitch range: low ({low}) is above high ({high})")]
    InvalidRange { low: u8, high: u8 },

    #[error("Pitch {0} is outside the MIDI range 0-127")]
    PitchOutOfMidiRange(u8),

    #[error("Measure count must be at least 1")]
    ZeroMeasures,

    #[error("Tempo must be at least 1 BPM")]
    ZeroTempo,

    #[error("Melody is too long for a MIDI timeline")]
    TimelineOverflow,

    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
