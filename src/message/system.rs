use alloc::vec::Vec;
use core::fmt;

use crate::{
    DataByte,
    byte::read_data_byte,
    reader::{ReadResult, Reader},
    vlq::{self, Vlq},
};

/// Which byte introduced a system exclusive packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SysExKind {
    /// `F0`: the start of a system exclusive message
    Begin,
    /// `F7`: a continuation packet or an escaped block of arbitrary bytes
    Escape,
}

impl SysExKind {
    /// The status byte for this kind
    pub const fn status(&self) -> u8 {
        match self {
            Self::Begin => 0xF0,
            Self::Escape => 0xF7,
        }
    }
}

#[doc = r#"
A system exclusive packet as stored in a file.

In a file, both `F0` and `F7` are followed by a variable length quantity
and exactly that many bytes. A complete `F0` message normally ends its
payload with `F7`; one split over several packets does not, and the rest
arrives in later `F7` packets.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SysEx<'a> {
    kind: SysExKind,
    data: &'a [u8],
}

impl<'a> SysEx<'a> {
    /// Create a packet from its introducing kind and payload
    pub const fn new(kind: SysExKind, data: &'a [u8]) -> Self {
        Self { kind, data }
    }

    pub(crate) fn read(kind: SysExKind, reader: &mut Reader<'a>) -> ReadResult<Self> {
        let len = vlq::decode(reader)?;
        let data = reader.read_exact(len as usize)?;
        Ok(Self { kind, data })
    }

    /// `F0` or `F7`
    pub const fn kind(&self) -> SysExKind {
        self.kind
    }

    /// The payload, including any trailing `F7`
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// True for an `F0` packet whose payload ends with `F7`
    pub fn is_terminated(&self) -> bool {
        self.kind == SysExKind::Begin && self.data.last() == Some(&0xF7)
    }

    /// The status byte, length and payload
    pub fn to_bytes(&self) -> Vec<u8> {
        let len = Vlq::new_saturating(self.data.len() as u32).encode();
        let mut bytes = Vec::with_capacity(1 + len.len() + self.data.len());
        bytes.push(self.kind.status());
        bytes.extend_from_slice(&len);
        bytes.extend_from_slice(self.data);
        bytes
    }
}

impl fmt::Display for SysEx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SysExKind::Begin => write!(f, "sysex length={}", self.data.len())?,
            SysExKind::Escape => write!(f, "sysex_escape length={}", self.data.len())?,
        }
        write!(f, " data=(")?;
        for (i, byte) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{byte}")?;
        }
        f.write_str(")")
    }
}

#[doc = r#"
System common messages.

These are not expected in files, but are decoded when present.
Undefined (`F4`, `F5`) and real-time (`F8`-`FE`) status bytes are rejected.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemCommonMessage {
    /// `F1`: MIDI time code quarter frame
    TimeCodeQuarterFrame(DataByte),
    /// `F2`: song position pointer, in sixteenth notes
    SongPosition {
        /// Low 7 bits
        lsb: DataByte,
        /// High 7 bits
        msb: DataByte,
    },
    /// `F3`: select a song
    SongSelect(DataByte),
    /// `F6`: ask analog synths to tune
    TuneRequest,
}

impl SystemCommonMessage {
    /// Reads the data bytes following a system common status byte.
    ///
    /// Returns `None` if `status` is not a system common status.
    pub(crate) fn read(status: u8, reader: &mut Reader<'_>) -> ReadResult<Option<Self>> {
        let msg = match status {
            0xF1 => Self::TimeCodeQuarterFrame(read_data_byte(reader)?),
            0xF2 => Self::SongPosition {
                lsb: read_data_byte(reader)?,
                msb: read_data_byte(reader)?,
            },
            0xF3 => Self::SongSelect(read_data_byte(reader)?),
            0xF6 => Self::TuneRequest,
            _ => return Ok(None),
        };
        Ok(Some(msg))
    }

    /// The status byte
    pub const fn status(&self) -> u8 {
        match self {
            Self::TimeCodeQuarterFrame(_) => 0xF1,
            Self::SongPosition { .. } => 0xF2,
            Self::SongSelect(_) => 0xF3,
            Self::TuneRequest => 0xF6,
        }
    }

    /// The status byte followed by the data bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(3);
        bytes.push(self.status());
        match self {
            Self::TimeCodeQuarterFrame(b) | Self::SongSelect(b) => bytes.push(b.value()),
            Self::SongPosition { lsb, msb } => bytes.extend_from_slice(&[lsb.value(), msb.value()]),
            Self::TuneRequest => {}
        }
        bytes
    }
}

impl fmt::Display for SystemCommonMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeCodeQuarterFrame(b) => {
                write!(f, "quarter_frame frame_type={} frame_value={}", b.value() >> 4, b.value() & 0x0F)
            }
            Self::SongPosition { lsb, msb } => write!(
                f,
                "songpos pos={}",
                ((msb.value() as u16) << 7) | lsb.value() as u16
            ),
            Self::SongSelect(b) => write!(f, "song_select song={b}"),
            Self::TuneRequest => f.write_str("tune_request"),
        }
    }
}

#[test]
fn sysex_framing() {
    let bytes = [0x04, 0x43, 0x12, 0x00, 0xF7, 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);
    let sysex = SysEx::read(SysExKind::Begin, &mut reader).unwrap();
    assert_eq!(sysex.data(), &[0x43, 0x12, 0x00, 0xF7]);
    assert!(sysex.is_terminated());
    assert_eq!(reader.remaining(), 1);
    assert_eq!(sysex.to_bytes(), [0xF0, 0x04, 0x43, 0x12, 0x00, 0xF7]);

    let mut reader = Reader::from_byte_slice(&[0x01, 0xF7]);
    let escape = SysEx::read(SysExKind::Escape, &mut reader).unwrap();
    assert!(!escape.is_terminated());
}

#[test]
fn sysex_declared_length_past_end() {
    let mut reader = Reader::from_byte_slice(&[0x05, 0x43]);
    let err = SysEx::read(SysExKind::Begin, &mut reader).unwrap_err();
    assert!(err.is_out_of_bounds());
}

#[test]
fn system_common() {
    let mut reader = Reader::from_byte_slice(&[0x10, 0x02]);
    let msg = SystemCommonMessage::read(0xF2, &mut reader).unwrap().unwrap();
    assert_eq!(msg.to_bytes(), [0xF2, 0x10, 0x02]);

    let mut reader = Reader::from_byte_slice(&[]);
    assert_eq!(
        SystemCommonMessage::read(0xF6, &mut reader).unwrap(),
        Some(SystemCommonMessage::TuneRequest)
    );
    assert_eq!(SystemCommonMessage::read(0xF8, &mut reader).unwrap(), None);
}
