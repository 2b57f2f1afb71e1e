// Symbolic duration encoding for MIDI output.
//
// Beat lengths that match a common note value are expressed as that value
// (quarter, dotted half, ...); anything else falls back to an explicit tick
// count at 128 ticks per beat. Each note carries two tokens: its own length,
// and its wait, the distance from the previous note's start to this one's
// (zero for the first note).
//
// midi.rs turns these tokens into absolute ticks. Keeping the token layer
// separate keeps the table testable without parsing MIDI bytes.

use crate::melody::Melody;
use std::fmt;

/// Ticks per beat (quarter note) in encoded durations and in the MIDI header.
pub const TICKS_PER_BEAT: u16 = 128;

/// Tolerance for matching a beat value against the duration table.
const TABLE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationToken {
    /// Zero-length marker.
    Zero,
    Eighth,
    Quarter,
    DottedQuarter,
    Half,
    DottedHalf,
    Whole,
    /// Explicit length in ticks.
    Ticks(u32),
}

/// Named durations and their length in beats.
const DURATION_TABLE: [(f64, DurationToken); 7] = [
    (0.0, DurationToken::Zero),
    (0.5, DurationToken::Eighth),
    (1.0, DurationToken::Quarter),
    (1.5, DurationToken::DottedQuarter),
    (2.0, DurationToken::Half),
    (3.0, DurationToken::DottedHalf),
    (4.0, DurationToken::Whole),
];

impl DurationToken {
    /// Map a beat length to a token, falling back to rounded ticks.
    pub fn from_beats(beats: f64) -> Self {
        DURATION_TABLE
            .iter()
            .find(|(b, _)| (b - beats).abs() < TABLE_TOLERANCE)
            .map(|&(_, token)| token)
            .unwrap_or_else(|| {
                DurationToken::Ticks((beats * TICKS_PER_BEAT as f64).round().max(0.0) as u32)
            })
    }

    /// Length of this token in ticks.
    pub fn ticks(self) -> u32 {
        let beat = TICKS_PER_BEAT as u32;
        match self {
            DurationToken::Zero => 0,
            DurationToken::Eighth => beat / 2,
            DurationToken::Quarter => beat,
            DurationToken::DottedQuarter => beat * 3 / 2,
            DurationToken::Half => beat * 2,
            DurationToken::DottedHalf => beat * 3,
            DurationToken::Whole => beat * 4,
            DurationToken::Ticks(t) => t,
        }
    }
}

impl fmt::Display for DurationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationToken::Zero => write!(f, "0"),
            DurationToken::Eighth => write!(f, "8"),
            DurationToken::Quarter => write!(f, "4"),
            DurationToken::DottedQuarter => write!(f, "d4"),
            DurationToken::Half => write!(f, "2"),
            DurationToken::DottedHalf => write!(f, "d2"),
            DurationToken::Whole => write!(f, "1"),
            DurationToken::Ticks(t) => write!(f, "T{t}"),
        }
    }
}

/// A note ready for the MIDI writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedNote {
    pub pitch: u8,
    pub name: String,
    pub duration: DurationToken,
    pub wait: DurationToken,
}

/// Encode a melody's notes in playback order.
pub fn encode_melody(melody: &Melody) -> Vec<EncodedNote> {
    let mut prev_start = 0.0;
    melody
        .notes
        .iter()
        .map(|note| {
            let wait = DurationToken::from_beats(note.start - prev_start);
            prev_start = note.start;
            EncodedNote {
                pitch: note.pitch,
                name: note.name(),
                duration: DurationToken::from_beats(note.duration),
                wait,
            }
        })
        .collect()
}
