mod smpte;
pub use smpte::*;

use core::fmt;

use crate::{
    FormatError,
    reader::{ReadResult, Reader, ReaderError},
};

/// The header timing type, decoded from the division word.
///
/// This is either the number of ticks per quarter note or
/// an SMPTE frame rate with a number of ticks per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(u16),

    /// The midi file's delta times are defined using SMPTE frames
    Smpte(SmpteHeader),
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(tpqn & 0x7FFF)
    }

    /// Define the timing in terms of fps and ticks per frame
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame,
        })
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let position = reader.buffer_position();
        let [hi, lo] = reader.read_exact_size()?;
        if hi & 0x80 == 0 {
            return Ok(Self::TicksPerQuarterNote(u16::from_be_bytes([hi, lo])));
        }
        let frame = hi as i8;
        let fps = SmpteFps::from_division(frame)
            .ok_or(ReaderError::format(position, FormatError::InvalidTiming(frame)))?;
        Ok(Self::new_smpte(fps, lo))
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(*t),
            _ => None,
        }
    }

    /// The division word as it is stored in the header
    pub const fn division(&self) -> u16 {
        match self {
            Self::TicksPerQuarterNote(t) => *t,
            Self::Smpte(s) => {
                let hi = -(s.fps.as_division() as i8) as u8;
                u16::from_be_bytes([hi, s.ticks_per_frame])
            }
        }
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TicksPerQuarterNote(t) => write!(f, "{t} ticks per quarter note"),
            Self::Smpte(s) => write!(f, "{} fps, {} ticks per frame", s.fps, s.ticks_per_frame),
        }
    }
}

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct SmpteHeader {
    fps: SmpteFps,
    ticks_per_frame: u8,
}

impl SmpteHeader {
    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }
}

#[test]
fn read_division() {
    let mut reader = Reader::from_byte_slice(&[0x01, 0xE0]);
    assert_eq!(Timing::read(&mut reader).unwrap().ticks_per_quarter_note(), Some(480));

    // -25 fps, 40 ticks per frame
    let mut reader = Reader::from_byte_slice(&[0xE7, 0x28]);
    let timing = Timing::read(&mut reader).unwrap();
    assert_eq!(timing, Timing::new_smpte(SmpteFps::TwentyFive, 40));
    assert_eq!(timing.division(), 0xE728);

    let mut reader = Reader::from_byte_slice(&[0xE6, 0x28]);
    let err = Timing::read(&mut reader).unwrap_err();
    assert!(err.is_format_error());
    assert_eq!(err.position(), 0);
}
