// Pitch walking and pitch naming.
//
// The melody is a bounded random walk over MIDI note numbers. Each advance
// is usually a step (1-2 semitones) and occasionally a leap (a fourth or a
// fifth), chosen from the tables in `GeneratorConfig`.
//
// Out-of-range candidates are clamped to the nearest bound, not reflected.
// Under sustained outward drift this repeats the boundary pitch; melodies
// are only reproducible if that policy stays exactly as it is.

use crate::config::GeneratorConfig;
use seedsong_prng::UniformSource;

/// Sharp-spelled pitch class names, indexed by `pitch % 12`.
const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Advance `current` by one random step or leap, clamped to `[low, high]`.
///
/// Always consumes two draws: one for step-vs-leap, one for the delta.
/// Requires `low <= high`.
pub fn next_pitch(
    current: u8,
    low: u8,
    high: u8,
    config: &GeneratorConfig,
    rng: &mut impl UniformSource,
) -> u8 {
    let table = if rng.chance(config.step_probability) {
        &config.steps
    } else {
        &config.leaps
    };
    let delta = table[rng.pick_index(table.len())];
    let candidate = current as i16 + delta as i16;
    candidate.clamp(low as i16, high as i16) as u8
}

/// Name a MIDI pitch in scientific notation, e.g. 60 -> "C4", 61 -> "C#4".
pub fn pitch_name(pitch: u8) -> String {
    let octave = (pitch / 12) as i8 - 1;
    format!("{}{octave}", PITCH_NAMES[(pitch % 12) as usize])
}
