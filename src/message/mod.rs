#![doc = r#"
Decoding of single messages from a track's event stream

# Grammar
```text
0x00-0x7F   data byte: running status supplies the status
0x80-0xEF   channel voice message, sets running status
0xF0, 0xF7  system exclusive packet, clears running status
0xF1-0xF3   system common message, clears running status
0xF6        tune request, clears running status
0xFF        meta event, clears running status
```
Every other byte is rejected.
"#]

pub mod channel;
pub use channel::*;

mod system;
pub use system::*;

use alloc::vec::Vec;
use core::fmt;

use crate::{
    ProtocolError, StatusByte,
    file::MetaMessage,
    reader::{ReadResult, Reader, ReaderError},
};

#[doc = r#"
The status byte a data byte implies when its own status was omitted.

Scoped to a single track: it starts empty and is only ever set by
channel voice messages.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunningStatus(Option<StatusByte>);

impl RunningStatus {
    /// The current status, if any
    pub const fn get(&self) -> Option<StatusByte> {
        self.0
    }

    /// Remember a channel voice status
    pub fn set(&mut self, status: StatusByte) {
        self.0 = Some(status);
    }

    /// Forget the current status
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

#[doc = r#"
One decoded message from a track.

# Example
```rust
# use smfdump::prelude::*;
let bytes = [0x90, 0x3C, 0x64, 0x3E, 0x64];
let mut reader = Reader::from_byte_slice(&bytes);
let mut running_status = RunningStatus::default();

let first = MidiMessage::read(&mut reader, &mut running_status).unwrap();
let second = MidiMessage::read(&mut reader, &mut running_status).unwrap();

assert_eq!(first.to_string(), "note_on channel=0 note=60 velocity=100");
assert_eq!(second.to_string(), "note_on channel=0 note=62 velocity=100");
assert_eq!(second.to_bytes(), [0x90, 0x3E, 0x64]);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage<'a> {
    /// `0x80`-`0xEF`
    ChannelVoice(ChannelVoiceMessage),
    /// `0xF0` or `0xF7`
    SystemExclusive(SysEx<'a>),
    /// `0xFF`
    Meta(MetaMessage<'a>),
    /// `0xF1`-`0xF3`, `0xF6`
    SystemCommon(SystemCommonMessage),
}

impl<'a> MidiMessage<'a> {
    /// Decode exactly one message, updating `running_status`.
    ///
    /// The reader must be positioned right after a delta-time.
    ///
    /// # Errors
    /// - out of bounds if the message is cut short
    /// - [`ProtocolError::NoRunningStatus`] for a data byte with nothing to imply
    /// - [`ProtocolError::UnrecognizedStatus`] for undefined and real-time status bytes
    /// - [`ProtocolError::InvalidDataByte`] for a data byte with its leading bit set
    pub fn read(reader: &mut Reader<'a>, running_status: &mut RunningStatus) -> ReadResult<Self> {
        let position = reader.buffer_position();
        let byte = reader.peek()?;

        let Ok(status) = StatusByte::new(byte) else {
            let Some(status) = running_status.get() else {
                return Err(protocol(position, ProtocolError::NoRunningStatus(byte)));
            };
            #[cfg(feature = "tracing")]
            tracing::trace!(position, status = status.byte(), "running status");
            return ChannelVoiceMessage::read(status, reader).map(Self::ChannelVoice);
        };

        let msg = match byte {
            0x80..=0xEF => {
                reader.read_next()?;
                let msg = ChannelVoiceMessage::read(status, reader)?;
                running_status.set(status);
                return Ok(Self::ChannelVoice(msg));
            }
            0xFF => {
                reader.read_next()?;
                Self::Meta(MetaMessage::read(reader)?)
            }
            0xF0 => {
                reader.read_next()?;
                Self::SystemExclusive(SysEx::read(SysExKind::Begin, reader)?)
            }
            0xF7 => {
                reader.read_next()?;
                Self::SystemExclusive(SysEx::read(SysExKind::Escape, reader)?)
            }
            0xF1..=0xF3 | 0xF6 => {
                reader.read_next()?;
                match SystemCommonMessage::read(byte, reader)? {
                    Some(msg) => Self::SystemCommon(msg),
                    None => return Err(protocol(position, ProtocolError::UnrecognizedStatus(byte))),
                }
            }
            _ => return Err(protocol(position, ProtocolError::UnrecognizedStatus(byte))),
        };
        running_status.clear();
        Ok(msg)
    }

    /// Decode one message and also return the exact bytes it was read from.
    ///
    /// The span omits the status byte when running status supplied it.
    pub fn read_with_span(
        reader: &mut Reader<'a>,
        running_status: &mut RunningStatus,
    ) -> ReadResult<(Self, &'a [u8])> {
        let start = reader.buffer_position();
        let msg = Self::read(reader, running_status)?;
        Ok((msg, reader.consumed_since(start)))
    }

    /// The complete encoding of this message, status byte always included.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::ChannelVoice(m) => m.to_bytes(),
            Self::SystemExclusive(m) => m.to_bytes(),
            Self::Meta(m) => m.to_bytes(),
            Self::SystemCommon(m) => m.to_bytes(),
        }
    }

    /// The status byte this message is identified by
    pub fn status(&self) -> u8 {
        match self {
            Self::ChannelVoice(m) => m.status(),
            Self::SystemExclusive(m) => m.kind().status(),
            Self::Meta(_) => 0xFF,
            Self::SystemCommon(m) => m.status(),
        }
    }

    /// True for the end-of-track meta event
    pub fn is_end_of_track(&self) -> bool {
        matches!(self, Self::Meta(meta) if meta.is_end_of_track())
    }
}

impl fmt::Display for MidiMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelVoice(m) => fmt::Display::fmt(m, f),
            Self::SystemExclusive(m) => fmt::Display::fmt(m, f),
            Self::Meta(m) => fmt::Display::fmt(m, f),
            Self::SystemCommon(m) => fmt::Display::fmt(m, f),
        }
    }
}

const fn protocol(position: usize, error: ProtocolError) -> ReaderError {
    ReaderError::new(position, crate::reader::ReaderErrorKind::Protocol(error))
}

#[cfg(test)]
fn read_all(bytes: &[u8]) -> ReadResult<Vec<MidiMessage<'_>>> {
    let mut reader = Reader::from_byte_slice(bytes);
    let mut running_status = RunningStatus::default();
    let mut messages = Vec::new();
    while !reader.is_empty() {
        messages.push(MidiMessage::read(&mut reader, &mut running_status)?);
    }
    Ok(messages)
}

#[test]
fn running_status_reuses_last_channel_status() {
    use pretty_assertions::assert_eq;
    let messages = read_all(&[0x90, 0x3C, 0x64, 0x3E, 0x64]).unwrap();
    assert_eq!(messages.len(), 2);
    for (msg, key) in messages.iter().zip([0x3C, 0x3E]) {
        let MidiMessage::ChannelVoice(cv) = msg else {
            panic!("expected a channel voice message, got {msg:?}");
        };
        assert_eq!(cv.status(), 0x90);
        assert!(matches!(cv.event(), VoiceEvent::NoteOn { note, velocity }
            if note.byte() == key && velocity.value() == 0x64));
    }
}

#[test]
fn span_omits_implied_status() {
    let bytes = [0xC1, 0x05, 0x06];
    let mut reader = Reader::from_byte_slice(&bytes);
    let mut running_status = RunningStatus::default();
    let (_, span) = MidiMessage::read_with_span(&mut reader, &mut running_status).unwrap();
    assert_eq!(span, &[0xC1, 0x05]);
    let (msg, span) = MidiMessage::read_with_span(&mut reader, &mut running_status).unwrap();
    assert_eq!(span, &[0x06]);
    assert_eq!(msg.to_bytes(), [0xC1, 0x06]);
}

#[test]
fn data_byte_without_status_is_rejected() {
    let err = read_all(&[0x3C, 0x64]).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &crate::reader::ReaderErrorKind::Protocol(ProtocolError::NoRunningStatus(0x3C))
    );
    assert_eq!(err.position(), 0);
}

#[test]
fn meta_and_sysex_clear_running_status() {
    let err = read_all(&[0x90, 0x3C, 0x64, 0xFF, 0x01, 0x00, 0x3E, 0x64]).unwrap_err();
    assert!(err.is_protocol_error());
    assert_eq!(err.position(), 6);

    let err = read_all(&[0x90, 0x3C, 0x64, 0xF0, 0x01, 0xF7, 0x3E, 0x64]).unwrap_err();
    assert_eq!(err.position(), 6);
}

#[test]
fn unrecognized_status_bytes() {
    for status in [0xF4, 0xF5, 0xF8, 0xFA, 0xFE] {
        let err = read_all(&[status]).unwrap_err();
        assert_eq!(
            err.error_kind(),
            &crate::reader::ReaderErrorKind::Protocol(ProtocolError::UnrecognizedStatus(status))
        );
    }
}

#[test]
fn system_common_is_decoded() {
    let messages = read_all(&[0xF3, 0x02, 0xF6]).unwrap();
    assert_eq!(
        messages,
        [
            MidiMessage::SystemCommon(SystemCommonMessage::SongSelect(
                crate::DataByte::new(2).unwrap()
            )),
            MidiMessage::SystemCommon(SystemCommonMessage::TuneRequest),
        ]
    );
}
