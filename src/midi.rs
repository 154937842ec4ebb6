//! # Standard MIDI File Output
//!
//! Translates the same note notation the evaluator scores into a playable
//! Standard MIDI File (SMF), byte for byte. This is a pure format
//! translator: no scoring logic, no file I/O.
//!
//! ## Layout
//! A format-1 file with two tracks:
//! - Track 0: a single Set Tempo meta event from the header, then End of Track
//! - Track 1: for every note, a Note On at its absolute onset and a Note On
//!   with velocity 0 (the note-off convention) at onset + duration, merged in
//!   absolute-time order and delta-encoded with variable-length quantities,
//!   then End of Track
//!
//! When two events share a tick, onsets sort before releases of
//! earlier-started notes only by their position in the pre-sort order: all
//! onsets are collected first, then all releases, and the sort is stable.
//!
//! ## Example
//! ```rust
//! use euphony::midi::{to_midi, MidiHeader};
//!
//! let bytes = to_midi("p60:v90:d480:t0 ", &MidiHeader::default())?;
//! assert_eq!(&bytes[..4], b"MThd");
//! # Ok::<(), euphony::EuphonyError>(())
//! ```

use crate::error::EuphonyError;
use crate::notation::parse_notes;

/// Format-specific parameters for the emitted file.
///
/// - `division`: ticks per quarter note in the SMF header chunk
/// - `tempo_bpm`: tempo for the Set Tempo meta event on track 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiHeader {
    pub division: u16,
    pub tempo_bpm: u32,
}

impl Default for MidiHeader {
    fn default() -> Self {
        Self {
            division: 480,
            tempo_bpm: 120,
        }
    }
}

/// One channel event awaiting delta encoding: (absolute tick, pitch, velocity).
type ChannelEvent = (i64, u8, u8);

/// Translate a note-notation string into a complete SMF byte vector.
///
/// Trailing whitespace after the last token is tolerated, matching the
/// notation's trailing-delimiter convention.
///
/// # Errors
/// - [`EuphonyError::ParseError`] for malformed notation
/// - [`EuphonyError::DomainError`] for pitches or velocities outside 0-127,
///   or events landing at a negative absolute tick
/// - [`EuphonyError::ConfigError`] for a zero tempo
pub fn to_midi(source: &str, header: &MidiHeader) -> Result<Vec<u8>, EuphonyError> {
    if header.tempo_bpm == 0 {
        return Err(EuphonyError::ConfigError("tempo_bpm must be positive".to_string()));
    }

    let notes = parse_notes(source)?;

    // Collect all onsets first, then all releases, and sort stably so that
    // same-tick onsets precede same-tick releases queued behind them.
    let mut events: Vec<ChannelEvent> = Vec::with_capacity(notes.len() * 2);
    let mut absolute_time = 0i64;
    let mut releases = Vec::with_capacity(notes.len());
    for note in &notes {
        absolute_time += note.time;
        let pitch = channel_byte(note.pitch, "pitch")?;
        let velocity = channel_byte(note.velocity, "velocity")?;
        events.push((absolute_time, pitch, velocity));
        releases.push((absolute_time + note.duration, pitch, 0));
    }
    events.extend(releases);
    events.sort_by_key(|&(tick, _, _)| tick);

    if let Some(&(first_tick, _, _)) = events.first() {
        if first_tick < 0 {
            return Err(EuphonyError::DomainError {
                value: first_tick,
                message: "event time must not precede the start of the track".to_string(),
            });
        }
    }

    let mut file = Vec::new();
    file.extend_from_slice(b"MThd");
    file.extend_from_slice(&6u32.to_be_bytes());
    file.extend_from_slice(&1u16.to_be_bytes()); // format 1
    file.extend_from_slice(&2u16.to_be_bytes()); // two tracks
    file.extend_from_slice(&header.division.to_be_bytes());

    push_track(&mut file, &tempo_track(header.tempo_bpm));
    push_track(&mut file, &note_track(&events));

    Ok(file)
}

fn channel_byte(value: i32, what: &str) -> Result<u8, EuphonyError> {
    u8::try_from(value).ok().filter(|v| *v <= 127).ok_or_else(|| {
        EuphonyError::DomainError {
            value: value as i64,
            message: format!("{} must be in 0-127 for MIDI output", what),
        }
    })
}

fn tempo_track(tempo_bpm: u32) -> Vec<u8> {
    let micros_per_beat = 60_000_000 / tempo_bpm;
    let mut track = Vec::new();
    track.push(0x00); // delta 0
    track.extend_from_slice(&[0xFF, 0x51, 0x03]);
    track.extend_from_slice(&micros_per_beat.to_be_bytes()[1..]);
    push_end_of_track(&mut track);
    track
}

fn note_track(events: &[ChannelEvent]) -> Vec<u8> {
    let mut track = Vec::new();
    let mut previous_tick = 0i64;
    for &(tick, pitch, velocity) in events {
        push_vlq(&mut track, (tick - previous_tick) as u64);
        track.extend_from_slice(&[0x90, pitch, velocity]); // Note On, channel 0
        previous_tick = tick;
    }
    push_end_of_track(&mut track);
    track
}

fn push_end_of_track(track: &mut Vec<u8>) {
    track.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);
}

fn push_track(file: &mut Vec<u8>, data: &[u8]) {
    file.extend_from_slice(b"MTrk");
    file.extend_from_slice(&(data.len() as u32).to_be_bytes());
    file.extend_from_slice(data);
}

/// Encode a delta-time as a standard MIDI variable-length quantity.
fn push_vlq(buffer: &mut Vec<u8>, mut value: u64) {
    let mut bytes = [0u8; 10];
    let mut count = 0;
    loop {
        bytes[count] = (value & 0x7F) as u8;
        value >>= 7;
        count += 1;
        if value == 0 {
            break;
        }
    }
    // Emit most-significant group first, continuation bit on all but the last
    for i in (0..count).rev() {
        let continuation = if i > 0 { 0x80 } else { 0x00 };
        buffer.push(bytes[i] | continuation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vlq(value: u64) -> Vec<u8> {
        let mut buffer = Vec::new();
        push_vlq(&mut buffer, value);
        buffer
    }

    #[test]
    fn test_vlq_encoding() {
        assert_eq!(vlq(0), vec![0x00]);
        assert_eq!(vlq(0x7F), vec![0x7F]);
        assert_eq!(vlq(0x80), vec![0x81, 0x00]);
        assert_eq!(vlq(480), vec![0x83, 0x60]);
        assert_eq!(vlq(0x3FFF), vec![0xFF, 0x7F]);
        assert_eq!(vlq(0x4000), vec![0x81, 0x80, 0x00]);
    }

    #[test]
    fn test_header_chunk() {
        let bytes = to_midi("p60:v90:d480:t0 ", &MidiHeader::default()).unwrap();
        // MThd, length 6, format 1, 2 tracks, division 480
        assert_eq!(
            &bytes[..14],
            &[0x4D, 0x54, 0x68, 0x64, 0, 0, 0, 6, 0, 1, 0, 2, 0x01, 0xE0]
        );
    }

    #[test]
    fn test_tempo_track_contents() {
        let bytes = to_midi("", &MidiHeader { division: 480, tempo_bpm: 120 }).unwrap();
        // 120 bpm = 500000 us per beat = 0x07A120
        let tempo_event = [0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20];
        assert!(contains(&bytes, &tempo_event));
    }

    #[test]
    fn test_single_note_events_and_deltas() {
        let bytes = to_midi("p60:v90:d480:t0 ", &MidiHeader::default()).unwrap();
        // Onset at delta 0, release as velocity-0 Note On after 480 ticks
        assert!(contains(&bytes, &[0x00, 0x90, 0x3C, 0x5A, 0x83, 0x60, 0x90, 0x3C, 0x00]));
        assert!(bytes.ends_with(&[0x00, 0xFF, 0x2F, 0x00]));
    }

    #[test]
    fn test_events_sorted_by_absolute_time() {
        // Second note starts before the first ends; its onset must be
        // emitted between the two releases
        let bytes = to_midi("p60:v90:d960:t0 p64:v80:d480:t480 ", &MidiHeader::default()).unwrap();
        let expected = [
            0x00, 0x90, 0x3C, 0x5A, // t=0 onset 60
            0x83, 0x60, 0x90, 0x40, 0x50, // t=480 onset 64
            0x83, 0x60, 0x90, 0x3C, 0x00, // t=960 release 60
            0x00, 0x90, 0x40, 0x00, // t=960 release 64
        ];
        assert!(contains(&bytes, &expected));
    }

    #[test]
    fn test_empty_sequence_still_emits_both_tracks() {
        let bytes = to_midi("", &MidiHeader::default()).unwrap();
        assert_eq!(count_subslices(&bytes, b"MTrk"), 2);
        assert_eq!(count_subslices(&bytes, &[0xFF, 0x2F, 0x00]), 2);
    }

    #[test]
    fn test_rejects_out_of_range_pitch() {
        let err = to_midi("p128:v90:d480:t0 ", &MidiHeader::default()).unwrap_err();
        assert!(matches!(err, EuphonyError::DomainError { value: 128, .. }));
    }

    #[test]
    fn test_rejects_negative_event_time() {
        let err = to_midi("p60:v90:d480:t-10 ", &MidiHeader::default()).unwrap_err();
        assert!(matches!(err, EuphonyError::DomainError { .. }));
    }

    #[test]
    fn test_rejects_zero_tempo() {
        let header = MidiHeader { division: 480, tempo_bpm: 0 };
        assert!(matches!(
            to_midi("", &header),
            Err(EuphonyError::ConfigError(_))
        ));
    }

    #[test]
    fn test_malformed_notation_is_a_parse_error() {
        let err = to_midi("p60:v90 ", &MidiHeader::default()).unwrap_err();
        assert!(matches!(err, EuphonyError::ParseError { .. }));
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    fn count_subslices(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|window| *window == needle).count()
    }
}
