// Seedsong Melody Generator
//
// Generates a single-voice melody from a handful of numeric parameters and an
// optional seed string, then renders it as a JSON report and a MIDI file.
// Given the same seed, parameters, and config the output is identical on
// every run and every platform.
//
// Architecture (data flows top to bottom):
// - config.rs: Tunable constants (rhythm pool, step/leap tables, start pitch)
// - params.rs: Per-run parameters (measures, tempo, seed, pitch range)
// - random.rs: Builds the run's random source from the seed (or OS entropy)
// - rhythm.rs: Fills one 4/4 measure with durations drawn from the pool
// - pitch.rs: Clamped random walk over MIDI pitches + pitch naming
// - melody.rs: Assembles measures into a contiguous note timeline
// - encode.rs: Maps beat lengths to symbolic duration tokens / tick counts
// - midi.rs: MIDI file output via midly
// - report.rs: JSON report of params and notes
// - error.rs: Error type for validation and I/O
//
// The PRNG itself lives in the `seedsong_prng` crate.

pub mod config;
pub mod encode;
pub mod error;
pub mod melody;
pub mod midi;
pub mod params;
pub mod pitch;
pub mod random;
pub mod report;
pub mod rhythm;
