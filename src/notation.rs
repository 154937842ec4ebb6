//! Note-notation parsing
//!
//! Parses the compact note-event notation into structured events. A sequence
//! is a run of whitespace-separated tokens, each describing one played note:
//!
//! ```text
//! p60:v90:d480:t0 p64:v88:d480:t0 p67:v85:d960:t480
//! ```
//!
//! Each token has exactly four `:`-separated fields in fixed order:
//! - `p<int>` - MIDI pitch number (0-127 nominal, not enforced)
//! - `v<int>` - velocity (0-127 nominal, not enforced)
//! - `d<int>` - duration in ticks
//! - `t<int>` - delta-time in ticks since the previous event's onset
//!
//! Delta-times are cumulative: summing them in sequence order recovers each
//! event's absolute onset time. Field prefixes are validated strictly, so a
//! token like `x60:v90:d480:t0` is rejected rather than silently parsed.

use crate::error::EuphonyError;

/// One played note, as written in the notation.
///
/// `time` is a delta from the previous event's onset, not an absolute
/// position, so sequence order is significant. Events are never mutated
/// after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEvent {
    pub pitch: i32,
    pub velocity: i32,
    pub duration: i64,
    pub time: i64,
}

/// Expected field prefixes, in token order.
const FIELD_PREFIXES: [char; 4] = ['p', 'v', 'd', 't'];

/// Parse a note-notation string into an ordered sequence of events.
///
/// Leading, trailing, and repeated whitespace between tokens is tolerated.
/// An empty (or all-whitespace) input yields an empty sequence.
///
/// # Errors
/// Returns [`EuphonyError::ParseError`] if a token does not have exactly four
/// `:`-separated fields, a field does not start with its expected prefix
/// letter, or a field's value is not a valid integer.
pub fn parse_notes(source: &str) -> Result<Vec<NoteEvent>, EuphonyError> {
    let mut notes = Vec::new();

    for (index, token) in source.split_whitespace().enumerate() {
        let fields: Vec<&str> = token.split(':').collect();
        if fields.len() != 4 {
            return Err(EuphonyError::ParseError {
                index,
                token: token.to_string(),
                message: format!("expected 4 fields, found {}", fields.len()),
            });
        }

        notes.push(NoteEvent {
            pitch: parse_field(fields[0], FIELD_PREFIXES[0], index, token)?,
            velocity: parse_field(fields[1], FIELD_PREFIXES[1], index, token)?,
            duration: parse_field(fields[2], FIELD_PREFIXES[2], index, token)?,
            time: parse_field(fields[3], FIELD_PREFIXES[3], index, token)?,
        });
    }

    Ok(notes)
}

/// Parse one `<prefix><int>` field, validating the prefix letter.
fn parse_field<T: std::str::FromStr>(
    field: &str,
    prefix: char,
    index: usize,
    token: &str,
) -> Result<T, EuphonyError> {
    let value = field.strip_prefix(prefix).ok_or_else(|| EuphonyError::ParseError {
        index,
        token: token.to_string(),
        message: format!("field '{}' is missing the '{}' prefix", field, prefix),
    })?;

    value.parse().map_err(|_| EuphonyError::ParseError {
        index,
        token: token.to_string(),
        message: format!("'{}' is not a valid integer", value),
    })
}
