// Melody assembly: the top of the generative core.
//
// Drives rhythm.rs and pitch.rs across the requested number of measures and
// lays the resulting notes end to end on a beat timeline. The output is an
// ordered list of `NoteEvent`s where list order, time order, and playback
// order coincide, and each note starts exactly where the previous one ends.
//
// Draw order is part of the reproducibility contract: per measure, all
// rhythm draws happen first, then two pitch draws per note in order.

use crate::config::{BEATS_PER_MEASURE, GeneratorConfig};
use crate::params::GenerationParams;
use crate::pitch::{next_pitch, pitch_name};
use crate::random::source_for;
use crate::rhythm::partition_measure;
use seedsong_prng::UniformSource;
use serde::{Deserialize, Serialize};

/// One generated note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI pitch number, always within the run's `[low, high]`.
    pub pitch: u8,
    /// Start time in beats from the beginning of the piece.
    pub start: f64,
    /// Length in beats. Always positive.
    pub duration: f64,
    /// Zero-based index of the measure this note belongs to.
    pub measure: u32,
}

impl NoteEvent {
    /// Scientific pitch name, e.g. "C#4".
    pub fn name(&self) -> String {
        pitch_name(self.pitch)
    }

    /// Beat at which this note stops sounding.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A complete generated melody. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Melody {
    pub notes: Vec<NoteEvent>,
    pub measures: u32,
}

impl Melody {
    /// Total length in beats.
    pub fn total_beats(&self) -> f64 {
        self.notes.last().map_or(0.0, NoteEvent::end)
    }

    /// Notes belonging to one measure, in order.
    pub fn measure_notes(&self, measure: u32) -> impl Iterator<Item = &NoteEvent> {
        self.notes.iter().filter(move |n| n.measure == measure)
    }
}

/// Generate a melody. A pure function of `params`, `config`, and the draws
/// `rng` hands out; `params` must have passed `validate()`.
pub fn generate_melody(
    params: &GenerationParams,
    config: &GeneratorConfig,
    rng: &mut impl UniformSource,
) -> Melody {
    let (low, high) = (params.low_midi, params.high_midi);
    let mut pitch = config.start_pitch.clamp(low, high);
    let mut cursor = 0.0;
    let mut notes = Vec::new();

    for measure in 0..params.measures {
        let fractions = partition_measure(config, rng);
        for fraction in fractions {
            pitch = next_pitch(pitch, low, high, config, rng);
            let duration = fraction * BEATS_PER_MEASURE;
            notes.push(NoteEvent {
                pitch,
                start: cursor,
                duration,
                measure,
            });
            cursor += duration;
        }
    }

    Melody {
        notes,
        measures: params.measures,
    }
}

/// Generate a melody with a fresh random source built from `params.seed`.
pub fn generate_from_params(params: &GenerationParams, config: &GeneratorConfig) -> Melody {
    let mut rng = source_for(params.seed.as_deref());
    generate_melody(params, config, &mut rng)
}
