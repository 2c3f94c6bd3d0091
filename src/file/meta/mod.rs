#![doc = r#"
Meta events (`FF type length data`)

Meta events carry non-musical information: names, tempo, signatures,
and the end-of-track marker. They never take part in running status.
"#]

mod smpte_offset;
pub use smpte_offset::*;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::fmt;

use num_enum::{FromPrimitive, IntoPrimitive};

use crate::{
    message::Channel,
    reader::{ReadResult, Reader},
    vlq::{self, Vlq},
};

/// The type byte following `FF`
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MetaType {
    SequenceNumber = 0x00,
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ProgramName = 0x08,
    DeviceName = 0x09,
    ChannelPrefix = 0x20,
    Port = 0x21,
    EndOfTrack = 0x2F,
    Tempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    KeySignature = 0x59,
    SequencerSpecific = 0x7F,
    /// A type byte this crate does not know
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl MetaType {
    /// True for the `0x01`-`0x0F` text event family
    pub fn is_text(&self) -> bool {
        matches!(u8::from(*self), 0x01..=0x0F)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::SequenceNumber => "sequence_number",
            Self::Text => "text",
            Self::Copyright => "copyright",
            Self::TrackName => "track_name",
            Self::InstrumentName => "instrument_name",
            Self::Lyric => "lyrics",
            Self::Marker => "marker",
            Self::CuePoint => "cue_marker",
            Self::ProgramName => "program_name",
            Self::DeviceName => "device_name",
            Self::ChannelPrefix => "channel_prefix",
            Self::Port => "midi_port",
            Self::EndOfTrack => "end_of_track",
            Self::Tempo => "set_tempo",
            Self::SmpteOffset => "smpte_offset",
            Self::TimeSignature => "time_signature",
            Self::KeySignature => "key_signature",
            Self::SequencerSpecific => "sequencer_specific",
            Self::Unknown(_) => "unknown_meta",
        }
    }
}

#[doc = r#"
A meta event exactly as stored: its type and raw payload.

Use [`MetaMessage::event`] for a typed view of the payload.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetaMessage<'a> {
    meta_type: MetaType,
    data: &'a [u8],
}

impl<'a> MetaMessage<'a> {
    /// Create a meta message from its type and payload
    pub const fn new(meta_type: MetaType, data: &'a [u8]) -> Self {
        Self { meta_type, data }
    }

    /// Reads the type byte, length and payload following an `FF` status byte.
    pub(crate) fn read(reader: &mut Reader<'a>) -> ReadResult<Self> {
        let meta_type = MetaType::from(reader.read_next()?);
        let len = vlq::decode(reader)?;
        let data = reader.read_exact(len as usize)?;
        Ok(Self { meta_type, data })
    }

    /// The type byte
    pub const fn meta_type(&self) -> MetaType {
        self.meta_type
    }

    /// The raw payload
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// True for `FF 2F`
    pub fn is_end_of_track(&self) -> bool {
        self.meta_type == MetaType::EndOfTrack
    }

    /// `FF`, type, length and payload
    pub fn to_bytes(&self) -> Vec<u8> {
        let len = Vlq::new_saturating(self.data.len() as u32).encode();
        let mut bytes = Vec::with_capacity(2 + len.len() + self.data.len());
        bytes.push(0xFF);
        bytes.push(self.meta_type.into());
        bytes.extend_from_slice(&len);
        bytes.extend_from_slice(self.data);
        bytes
    }

    /// Interpret the payload.
    ///
    /// Payloads with the wrong size for their type come back as
    /// [`MetaEvent::Other`].
    pub fn event(&self) -> MetaEvent<'a> {
        use MetaType as T;
        let data = self.data;
        let event = match (self.meta_type, data) {
            (T::SequenceNumber, []) => Some(MetaEvent::SequenceNumber(None)),
            (T::SequenceNumber, &[hi, lo]) => {
                Some(MetaEvent::SequenceNumber(Some(u16::from_be_bytes([hi, lo]))))
            }
            (t, _) if t.is_text() => Some(MetaEvent::Text(t, data)),
            (T::ChannelPrefix, &[channel]) if channel < 16 => {
                Some(MetaEvent::ChannelPrefix(Channel::from_nibble(channel)))
            }
            (T::Port, &[port]) => Some(MetaEvent::Port(port)),
            (T::EndOfTrack, _) => Some(MetaEvent::EndOfTrack),
            (T::Tempo, &[a, b, c]) => Some(MetaEvent::Tempo(Tempo::from_bytes([a, b, c]))),
            (T::SmpteOffset, _) => SmpteOffset::parse(data).ok().map(MetaEvent::SmpteOffset),
            (T::TimeSignature, &[numerator, denominator_pow, clocks_per_click, notated_32nds]) => {
                Some(MetaEvent::TimeSignature(TimeSignature {
                    numerator,
                    denominator_pow,
                    clocks_per_click,
                    notated_32nds,
                }))
            }
            (T::KeySignature, &[sharps, mode]) if mode < 2 => {
                Some(MetaEvent::KeySignature(KeySignature {
                    sharps_flats: sharps as i8,
                    minor: mode == 1,
                }))
            }
            (T::SequencerSpecific, _) => Some(MetaEvent::SequencerSpecific(data)),
            _ => None,
        };
        event.unwrap_or(MetaEvent::Other {
            meta_type: self.meta_type,
            data,
        })
    }
}

impl fmt::Display for MetaMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.meta_type.label();
        match self.event() {
            MetaEvent::SequenceNumber(n) => write!(f, "{label} number={}", n.unwrap_or(0)),
            MetaEvent::Text(_, _) => write!(f, "{label} text={:?}", text_lossy(self.data)),
            MetaEvent::ChannelPrefix(c) => write!(f, "{label} channel={c}"),
            MetaEvent::Port(p) => write!(f, "{label} port={p}"),
            MetaEvent::EndOfTrack => f.write_str(label),
            MetaEvent::Tempo(t) => write!(f, "{label} tempo={}", t.micros_per_quarter_note()),
            MetaEvent::SmpteOffset(o) => fmt::Display::fmt(&o, f),
            MetaEvent::TimeSignature(t) => write!(
                f,
                "{label} numerator={} denominator={} clocks_per_click={} notated_32nd_notes_per_beat={}",
                t.numerator,
                t.denominator(),
                t.clocks_per_click,
                t.notated_32nds
            ),
            MetaEvent::KeySignature(k) => write!(f, "{label} key={k}"),
            MetaEvent::SequencerSpecific(d) => write!(f, "{label} data={d:?}"),
            MetaEvent::Other { meta_type, data } => {
                write!(f, "{label} type={:#04x} data={data:?}", u8::from(meta_type))
            }
        }
    }
}

/// Decode a text payload, replacing invalid UTF-8.
///
/// Files in the wild use Latin-1 and Shift-JIS as often as UTF-8.
pub fn text_lossy(data: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(data)
}

/// A typed view of a [`MetaMessage`] payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaEvent<'a> {
    /// `FF 00`: pattern number, or `None` when the payload is empty
    SequenceNumber(Option<u16>),
    /// `FF 01`-`FF 0F`: one of the text events
    Text(MetaType, &'a [u8]),
    /// `FF 20`: channel that following meta and sysex events refer to
    ChannelPrefix(Channel),
    /// `FF 21`: output port
    Port(u8),
    /// `FF 2F`
    EndOfTrack,
    /// `FF 51`
    Tempo(Tempo),
    /// `FF 54`
    SmpteOffset(SmpteOffset),
    /// `FF 58`
    TimeSignature(TimeSignature),
    /// `FF 59`
    KeySignature(KeySignature),
    /// `FF 7F`
    SequencerSpecific(&'a [u8]),
    /// An unknown type, or a payload of the wrong size for its type
    Other {
        /// The type byte
        meta_type: MetaType,
        /// The raw payload
        data: &'a [u8],
    },
}

/// Microseconds per quarter note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Default for Tempo {
    /// 120 beats per minute
    fn default() -> Self {
        Self(500_000)
    }
}

impl Tempo {
    /// Create a tempo from microseconds per quarter note
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note & 0x00FF_FFFF)
    }

    const fn from_bytes([a, b, c]: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, a, b, c]))
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Quarter notes per minute
    pub fn bpm(&self) -> f64 {
        60_000_000. / self.0 as f64
    }
}

/// `FF 58 04 nn dd cc bb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// The beat unit as a power of two
    pub denominator_pow: u8,
    /// MIDI clocks per metronome click
    pub clocks_per_click: u8,
    /// Notated 32nd notes per MIDI quarter note
    pub notated_32nds: u8,
}

impl TimeSignature {
    /// The beat unit, `2^denominator_pow`. Saturates for absurd exponents.
    pub const fn denominator(&self) -> u32 {
        match 1u32.checked_shl(self.denominator_pow as u32) {
            Some(d) => d,
            None => u32::MAX,
        }
    }
}

/// `FF 59 02 sf mi`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySignature {
    /// Positive for sharps, negative for flats
    pub sharps_flats: i8,
    /// Minor rather than major
    pub minor: bool,
}

impl KeySignature {
    /// The tonic, e.g. `"Eb"` for three flats major.
    ///
    /// `None` when more than seven sharps or flats are declared.
    pub const fn tonic(&self) -> Option<&'static str> {
        const MAJOR: [&str; 15] = [
            "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
        ];
        const MINOR: [&str; 15] = [
            "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#", "A#",
        ];
        if self.sharps_flats < -7 || self.sharps_flats > 7 {
            return None;
        }
        let i = (self.sharps_flats + 7) as usize;
        Some(if self.minor { MINOR[i] } else { MAJOR[i] })
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tonic() {
            Some(tonic) if self.minor => write!(f, "{tonic}m"),
            Some(tonic) => f.write_str(tonic),
            None => write!(f, "{}/{}", self.sharps_flats, self.minor as u8),
        }
    }
}

#[cfg(test)]
fn meta(bytes: &[u8]) -> MetaMessage<'_> {
    MetaMessage::read(&mut Reader::from_byte_slice(bytes)).unwrap()
}

#[test]
fn typed_events() {
    use pretty_assertions::assert_eq;

    assert_eq!(meta(&[0x2F, 0x00]).event(), MetaEvent::EndOfTrack);
    assert_eq!(
        meta(&[0x51, 0x03, 0x07, 0xA1, 0x20]).event(),
        MetaEvent::Tempo(Tempo::new(500_000))
    );
    assert_eq!(
        meta(&[0x03, 0x05, b'P', b'i', b'a', b'n', b'o']).event(),
        MetaEvent::Text(MetaType::TrackName, b"Piano")
    );
    let MetaEvent::TimeSignature(sig) = meta(&[0x58, 0x04, 0x06, 0x03, 0x24, 0x08]).event()
    else {
        panic!()
    };
    assert_eq!((sig.numerator, sig.denominator()), (6, 8));

    let MetaEvent::KeySignature(key) = meta(&[0x59, 0x02, 0xFD, 0x00]).event() else {
        panic!()
    };
    assert_eq!(key.to_string(), "Eb");
}

#[test]
fn wrong_size_payload_is_other() {
    let msg = meta(&[0x51, 0x02, 0x07, 0xA1]);
    assert!(matches!(
        msg.event(),
        MetaEvent::Other {
            meta_type: MetaType::Tempo,
            ..
        }
    ));
}

#[test]
fn unknown_type_round_trips() {
    use pretty_assertions::assert_eq;
    let msg = meta(&[0x60, 0x01, 0x05]);
    assert_eq!(msg.meta_type(), MetaType::Unknown(0x60));
    assert_eq!(msg.to_bytes(), [0xFF, 0x60, 0x01, 0x05]);
}

#[test]
fn display() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        meta(&[0x51, 0x03, 0x07, 0xA1, 0x20]).to_string(),
        "set_tempo tempo=500000"
    );
    assert_eq!(meta(&[0x2F, 0x00]).to_string(), "end_of_track");
}
