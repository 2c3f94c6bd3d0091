use alloc::vec::Vec;
use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::Channel;
use crate::{
    DataByte, StatusByte,
    byte::read_data_byte,
    note::Note,
    reader::{ReadResult, Reader, inv_data},
};

/// The message type encoded in the high nibble of a channel status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum VoiceKind {
    /// `0x8n`
    NoteOff = 0x8,
    /// `0x9n`
    NoteOn = 0x9,
    /// `0xAn`, polyphonic key pressure
    Aftertouch = 0xA,
    /// `0xBn`
    ControlChange = 0xB,
    /// `0xCn`
    ProgramChange = 0xC,
    /// `0xDn`
    ChannelPressure = 0xD,
    /// `0xEn`
    PitchBend = 0xE,
}

impl VoiceKind {
    /// How many data bytes follow the status byte
    pub const fn data_bytes(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

#[doc = r#"
The payload of a [`ChannelVoiceMessage`]
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceEvent {
    /// Release a note
    NoteOff {
        /// The note released
        note: Note,
        /// Release velocity
        velocity: DataByte,
    },
    /// Press a note. A velocity of zero is conventionally a note off.
    NoteOn {
        /// The note pressed
        note: Note,
        /// Attack velocity
        velocity: DataByte,
    },
    /// Pressure applied to a single held note
    Aftertouch {
        /// The held note
        note: Note,
        /// Pressure amount
        pressure: DataByte,
    },
    /// A controller moved
    ControlChange {
        /// Controller number
        controller: DataByte,
        /// New value
        value: DataByte,
    },
    /// Select a patch
    ProgramChange {
        /// Program number
        program: DataByte,
    },
    /// Pressure applied to the whole channel
    ChannelPressure {
        /// Pressure amount
        pressure: DataByte,
    },
    /// Pitch wheel position
    PitchBend(PitchBend),
}

impl VoiceEvent {
    /// The kind of this event
    pub const fn kind(&self) -> VoiceKind {
        match self {
            Self::NoteOff { .. } => VoiceKind::NoteOff,
            Self::NoteOn { .. } => VoiceKind::NoteOn,
            Self::Aftertouch { .. } => VoiceKind::Aftertouch,
            Self::ControlChange { .. } => VoiceKind::ControlChange,
            Self::ProgramChange { .. } => VoiceKind::ProgramChange,
            Self::ChannelPressure { .. } => VoiceKind::ChannelPressure,
            Self::PitchBend(_) => VoiceKind::PitchBend,
        }
    }
}

/// A 14-bit pitch wheel value, `0x2000` is centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchBend {
    lsb: DataByte,
    msb: DataByte,
}

impl PitchBend {
    /// The centered wheel position
    pub const CENTER: u16 = 0x2000;

    /// Create from the two transmitted data bytes
    pub const fn from_bytes(lsb: DataByte, msb: DataByte) -> Self {
        Self { lsb, msb }
    }

    /// The raw 14-bit value, `0`-`16383`
    pub const fn value(&self) -> u16 {
        ((self.msb.value() as u16) << 7) | self.lsb.value() as u16
    }

    /// The value relative to center, `-8192`-`8191`
    pub const fn centered(&self) -> i16 {
        self.value() as i16 - Self::CENTER as i16
    }
}

#[doc = r#"
A message addressed to one of the sixteen channels.

# Example
```rust
# use smfdump::prelude::*;
let msg = ChannelVoiceMessage::new(
    Channel::One,
    VoiceEvent::NoteOn {
        note: Note::from_databyte(60u8).unwrap(),
        velocity: DataByte::new(100).unwrap(),
    },
);
assert_eq!(msg.status(), 0x90);
assert_eq!(msg.to_bytes(), [0x90, 60, 100]);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelVoiceMessage {
    channel: Channel,
    event: VoiceEvent,
}

impl ChannelVoiceMessage {
    /// Create a new channel voice message
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// Reads the data bytes for `status`.
    ///
    /// The status byte itself must already have been consumed, or be implied
    /// by running status.
    pub(crate) fn read(status: StatusByte, reader: &mut Reader<'_>) -> ReadResult<Self> {
        let kind = VoiceKind::try_from(status.high_nibble())
            .map_err(|_| inv_data(reader, crate::ProtocolError::UnrecognizedStatus(status.byte())))?;
        let channel = Channel::from_nibble(status.low_nibble());

        let first = read_data_byte(reader)?;
        let event = match kind {
            VoiceKind::ProgramChange => VoiceEvent::ProgramChange { program: first },
            VoiceKind::ChannelPressure => VoiceEvent::ChannelPressure { pressure: first },
            VoiceKind::NoteOff => VoiceEvent::NoteOff {
                note: Note::new(first),
                velocity: read_data_byte(reader)?,
            },
            VoiceKind::NoteOn => VoiceEvent::NoteOn {
                note: Note::new(first),
                velocity: read_data_byte(reader)?,
            },
            VoiceKind::Aftertouch => VoiceEvent::Aftertouch {
                note: Note::new(first),
                pressure: read_data_byte(reader)?,
            },
            VoiceKind::ControlChange => VoiceEvent::ControlChange {
                controller: first,
                value: read_data_byte(reader)?,
            },
            VoiceKind::PitchBend => {
                VoiceEvent::PitchBend(PitchBend::from_bytes(first, read_data_byte(reader)?))
            }
        };
        Ok(Self { channel, event })
    }

    /// The channel addressed
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The decoded payload
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// The status byte this message is sent with
    pub const fn status(&self) -> u8 {
        ((self.event.kind() as u8) << 4) | self.channel.index()
    }

    /// True for a note on with a non-zero velocity
    pub const fn is_note_start(&self) -> bool {
        matches!(self.event, VoiceEvent::NoteOn { velocity, .. } if velocity.value() > 0)
    }

    /// The status byte followed by the data bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(3);
        bytes.push(self.status());
        match self.event {
            VoiceEvent::NoteOff { note, velocity } | VoiceEvent::NoteOn { note, velocity } => {
                bytes.extend_from_slice(&[note.byte(), velocity.value()])
            }
            VoiceEvent::Aftertouch { note, pressure } => {
                bytes.extend_from_slice(&[note.byte(), pressure.value()])
            }
            VoiceEvent::ControlChange { controller, value } => {
                bytes.extend_from_slice(&[controller.value(), value.value()])
            }
            VoiceEvent::ProgramChange { program } => bytes.push(program.value()),
            VoiceEvent::ChannelPressure { pressure } => bytes.push(pressure.value()),
            VoiceEvent::PitchBend(bend) => {
                bytes.extend_from_slice(&[bend.lsb.value(), bend.msb.value()])
            }
        }
        bytes
    }
}

impl fmt::Display for ChannelVoiceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = self.channel;
        match self.event {
            VoiceEvent::NoteOff { note, velocity } => write!(
                f,
                "note_off channel={channel} note={} velocity={velocity}",
                note.byte()
            ),
            VoiceEvent::NoteOn { note, velocity } => write!(
                f,
                "note_on channel={channel} note={} velocity={velocity}",
                note.byte()
            ),
            VoiceEvent::Aftertouch { note, pressure } => write!(
                f,
                "polytouch channel={channel} note={} value={pressure}",
                note.byte()
            ),
            VoiceEvent::ControlChange { controller, value } => write!(
                f,
                "control_change channel={channel} control={controller} value={value}"
            ),
            VoiceEvent::ProgramChange { program } => {
                write!(f, "program_change channel={channel} program={program}")
            }
            VoiceEvent::ChannelPressure { pressure } => {
                write!(f, "aftertouch channel={channel} value={pressure}")
            }
            VoiceEvent::PitchBend(bend) => {
                write!(f, "pitchwheel channel={channel} pitch={}", bend.centered())
            }
        }
    }
}

#[cfg(test)]
fn decode(status: u8, data: &[u8]) -> ReadResult<ChannelVoiceMessage> {
    let mut reader = Reader::from_byte_slice(data);
    ChannelVoiceMessage::read(StatusByte::new(status).unwrap(), &mut reader)
}

#[test]
fn decode_each_kind() {
    use pretty_assertions::assert_eq;

    let msg = decode(0x93, &[60, 100]).unwrap();
    assert_eq!(msg.channel(), Channel::Four);
    assert!(matches!(msg.event(), VoiceEvent::NoteOn { note, .. } if note.byte() == 60));
    assert!(msg.is_note_start());

    let msg = decode(0x90, &[60, 0]).unwrap();
    assert!(!msg.is_note_start());

    let msg = decode(0xC2, &[5]).unwrap();
    assert_eq!(msg.event().kind(), VoiceKind::ProgramChange);
    assert_eq!(msg.to_bytes(), [0xC2, 5]);

    let msg = decode(0xE0, &[0x00, 0x40]).unwrap();
    let VoiceEvent::PitchBend(bend) = msg.event() else {
        panic!()
    };
    assert_eq!(bend.value(), 0x2000);
    assert_eq!(bend.centered(), 0);

    let msg = decode(0xB0, &[7, 127]).unwrap();
    assert_eq!(msg.to_string(), "control_change channel=0 control=7 value=127");
}

#[test]
fn data_byte_with_leading_bit_is_rejected() {
    let err = decode(0x90, &[0x3C, 0x90]).unwrap_err();
    assert!(err.is_protocol_error());
    assert_eq!(err.position(), 1);
}

#[test]
fn missing_data_byte_is_out_of_bounds() {
    assert!(decode(0x80, &[0x3C]).unwrap_err().is_out_of_bounds());
}
