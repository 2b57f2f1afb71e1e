// MIDI output from encoded melodies.
//
// Converts the token stream from encode.rs into a Standard MIDI File (SMF)
// for playback. Output is SMF Format 1 with a single named track carrying
// the tempo and every note. Timing is metrical at 128 ticks per quarter, so
// duration tokens map to ticks with no rescaling.
//
// A note's wait is the distance from the previous note's onset, and its
// note-off lands at onset + duration. Notes are contiguous, so every note-off
// shares a tick with the next note-on; offs are sorted first so the two
// never overlap on the same key.
//
// Uses the `midly` crate for MIDI writing.

use crate::encode::{EncodedNote, TICKS_PER_BEAT};
use crate::error::MelodyError;
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Name written into the track header.
pub const TRACK_NAME: &str = "Generated Melody";

const CHANNEL: u8 = 0;
const VELOCITY: u8 = 64;

/// Convert encoded notes to MIDI and write to a file.
pub fn write_midi(notes: &[EncodedNote], tempo_bpm: u32, path: &Path) -> Result<(), MelodyError> {
    let buf = smf_bytes(notes, tempo_bpm)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Serialize encoded notes to SMF bytes in memory.
pub fn smf_bytes(notes: &[EncodedNote], tempo_bpm: u32) -> Result<Vec<u8>, MelodyError> {
    let smf = notes_to_smf(notes, tempo_bpm)?;
    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    Ok(buf)
}

/// Microseconds per quarter note for a tempo, clamped to what a MIDI tempo
/// event can hold.
fn tempo_microseconds(tempo_bpm: u32) -> u32 {
    (60_000_000 / tempo_bpm.max(1)).min(0x00ff_ffff)
}

/// Build an in-memory SMF from encoded notes.
fn notes_to_smf(notes: &[EncodedNote], tempo_bpm: u32) -> Result<Smf<'static>, MelodyError> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_BEAT)),
    ));
    let channel = u4::new(CHANNEL);

    // (absolute tick, is_note_on, key). Sorting on this tuple puts note-offs
    // ahead of note-ons at the same tick.
    let mut timeline: Vec<(u32, bool, u7)> = Vec::with_capacity(notes.len() * 2);
    let mut onset: u32 = 0;
    for note in notes {
        let key = u7::try_from(note.pitch).ok_or(MelodyError::PitchOutOfMidiRange(note.pitch))?;
        onset = onset
            .checked_add(note.wait.ticks())
            .ok_or(MelodyError::TimelineOverflow)?;
        let release = onset
            .checked_add(note.duration.ticks())
            .ok_or(MelodyError::TimelineOverflow)?;
        timeline.push((onset, true, key));
        timeline.push((release, false, key));
    }
    timeline.sort_by_key(|&(tick, is_on, _)| (tick, is_on));

    let mut track: Track<'static> = Vec::new();
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(TRACK_NAME.as_bytes())),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_microseconds(
            tempo_bpm,
        )))),
    });

    let mut last_tick: u32 = 0;
    for (tick, is_on, key) in timeline {
        let message = if is_on {
            MidiMessage::NoteOn {
                key,
                vel: u7::new(VELOCITY),
            }
        } else {
            MidiMessage::NoteOff {
                key,
                vel: u7::new(0),
            }
        };
        track.push(TrackEvent {
            delta: u28::new(tick - last_tick),
            kind: TrackEventKind::Midi { channel, message },
        });
        last_tick = tick;
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    Ok(smf)
}
