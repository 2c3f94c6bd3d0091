use alloc::vec::Vec;

use super::chunk::{ChunkHeader, TRACK_TAG};
use crate::{
    FormatError,
    message::{MidiMessage, RunningStatus},
    reader::{ReadResult, Reader, ReaderError},
    vlq::{Vlq, VlqBytes},
};

#[doc = r#"
A message together with its delta-time and the bytes it was decoded from.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackEvent<'a> {
    delta: Vlq,
    message: MidiMessage<'a>,
    raw: &'a [u8],
    position: usize,
}

impl<'a> TrackEvent<'a> {
    /// Reads a delta-time followed by one message.
    pub fn read(reader: &mut Reader<'a>, running_status: &mut RunningStatus) -> ReadResult<Self> {
        let delta = Vlq::read(reader)?;
        let position = reader.buffer_position();
        let (message, raw) = MidiMessage::read_with_span(reader, running_status)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(position, delta = delta.value(), %message, "read event");
        Ok(Self {
            delta,
            message,
            raw,
            position,
        })
    }

    /// Ticks since the previous event in the same track
    pub const fn delta_ticks(&self) -> u32 {
        self.delta.value()
    }

    /// The delta-time as a quantity
    pub const fn delta(&self) -> Vlq {
        self.delta
    }

    /// The delta-time re-encoded. Matches the file's bytes unless the
    /// file used a padded, non-minimal encoding.
    pub const fn delta_bytes(&self) -> VlqBytes {
        self.delta.encode()
    }

    /// The decoded message
    pub const fn message(&self) -> &MidiMessage<'a> {
        &self.message
    }

    /// The exact bytes the message was read from, excluding the delta-time
    pub const fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// Offset in the file of the first byte of [`TrackEvent::raw`]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// True if the status byte was omitted and implied by running status
    pub fn running_status(&self) -> bool {
        self.raw.first().is_some_and(|b| b & 0x80 == 0)
    }
}

#[doc = r#"
The events of one `MTrk` chunk in stream order.

# Example
```rust
# use smfdump::prelude::*;
let bytes = [
    b'M', b'T', b'r', b'k', 0, 0, 0, 12,
    0x00, 0x90, 0x3C, 0x64,
    0x60, 0x3C, 0x00,
    0x00, 0xFF, 0x2F, 0x00,
    // still inside the chunk, skipped
    0x00,
];
let mut reader = Reader::from_byte_slice(&bytes);
let track = Track::read(&mut reader).unwrap();

assert_eq!(track.events().len(), 3);
assert!(track.is_terminated());
assert!(track.events()[1].running_status());
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track<'a> {
    events: Vec<TrackEvent<'a>>,
    terminated: bool,
}

impl<'a> Track<'a> {
    /// Reads an `MTrk` chunk header and the events it contains.
    ///
    /// # Errors
    /// - [`FormatError::TrackTag`] if the chunk is not a track
    /// - see [`Track::read_body`]
    pub fn read(reader: &mut Reader<'a>) -> ReadResult<Self> {
        let header = ChunkHeader::read(reader)?;
        if header.tag() != TRACK_TAG {
            return Err(ReaderError::format(
                header.position(),
                FormatError::TrackTag(header.tag()),
            ));
        }
        Self::read_body(header, reader)
    }

    /// Reads events until end-of-track or the declared length is used up.
    ///
    /// The reader always resumes at the declared end of the chunk, even when
    /// end-of-track was seen earlier.
    ///
    /// # Errors
    /// - out of bounds if the file ends before the declared length
    /// - [`FormatError::TrackOverrun`] if an event runs past the declared length
    /// - any message decoding error
    pub fn read_body(header: ChunkHeader, reader: &mut Reader<'a>) -> ReadResult<Self> {
        let declared = header.len();
        let mut body = reader.sub_reader(declared as usize)?;
        let mut running_status = RunningStatus::default();
        let mut events = Vec::new();
        let mut terminated = false;

        while !body.is_empty() {
            let event = TrackEvent::read(&mut body, &mut running_status)
                .map_err(|e| e.into_overrun(declared))?;
            terminated = event.message().is_end_of_track();
            events.push(event);
            if terminated {
                break;
            }
        }

        #[cfg(feature = "tracing")]
        {
            if !body.is_empty() {
                tracing::warn!(
                    position = body.buffer_position(),
                    remaining = body.remaining(),
                    "ignoring bytes after end of track"
                );
            }
            if !terminated {
                tracing::debug!(
                    position = header.position(),
                    "track ended without an end-of-track event"
                );
            }
            tracing::debug!(
                position = header.position(),
                len = declared,
                events = events.len(),
                "read track chunk"
            );
        }

        Ok(Self { events, terminated })
    }

    /// The events in stream order
    pub fn events(&self) -> &[TrackEvent<'a>] {
        &self.events
    }

    /// True if the track ended with an end-of-track meta event
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Events paired with the ticks accumulated since the start of the track
    pub fn ticked_events(&self) -> impl Iterator<Item = (u64, &TrackEvent<'a>)> {
        self.events.iter().scan(0u64, |ticks, event| {
            *ticks += event.delta_ticks() as u64;
            Some((*ticks, event))
        })
    }

    /// Total length of the track in ticks
    pub fn duration_ticks(&self) -> u64 {
        self.events.iter().map(|e| e.delta_ticks() as u64).sum()
    }
}

#[cfg(test)]
fn track_bytes(body: &[u8]) -> Vec<u8> {
    let mut bytes = TRACK_TAG.to_vec();
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

#[test]
fn end_of_track_consumes_exactly_declared_length() {
    let bytes = track_bytes(&[0x00, 0x90, 0x3C, 0x64, 0x83, 0x60, 0x80, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00]);
    let mut reader = Reader::from_byte_slice(&bytes);
    let track = Track::read(&mut reader).unwrap();
    assert_eq!(reader.remaining(), 0);
    assert!(track.is_terminated());
    assert_eq!(track.events()[1].delta_ticks(), 480);
    assert_eq!(track.events()[1].delta_bytes().as_slice(), &[0x83, 0x60]);
    assert_eq!(track.duration_ticks(), 480);
}

#[test]
fn declared_length_without_end_of_track() {
    let bytes = track_bytes(&[0x00, 0xC0, 0x05, 0x10, 0x06]);
    let track = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert!(!track.is_terminated());
    assert_eq!(track.events().len(), 2);
    let ticks: Vec<u64> = track.ticked_events().map(|(t, _)| t).collect();
    assert_eq!(ticks, [0, 16]);
}

#[test]
fn running_status_resets_between_tracks() {
    let mut bytes = track_bytes(&[0x00, 0x90, 0x3C, 0x64]);
    bytes.extend(track_bytes(&[0x00, 0x3E, 0x64]));
    let mut reader = Reader::from_byte_slice(&bytes);
    Track::read(&mut reader).unwrap();
    let err = Track::read(&mut reader).unwrap_err();
    assert!(err.is_protocol_error());
}

#[test]
fn event_overrunning_declared_length() {
    // the note on needs one more byte than the chunk declares
    let mut bytes = track_bytes(&[0x00, 0x90, 0x3C]);
    bytes.extend_from_slice(&[0x64, 0x00, 0xFF, 0x2F, 0x00]);
    let err = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &crate::reader::ReaderErrorKind::Format(FormatError::TrackOverrun { declared: 3 })
    );
}

#[test]
fn wrong_track_tag() {
    let mut bytes = track_bytes(&[0x00, 0xFF, 0x2F, 0x00]);
    bytes[..4].copy_from_slice(b"MTrx");
    let err = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert!(err.is_format_error());
}
