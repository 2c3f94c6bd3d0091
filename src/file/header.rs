use super::{FormatType, Timing, chunk::HEADER_TAG};
use crate::{
    FormatError,
    reader::{ReadResult, Reader, ReaderError},
};

const HEADER_LEN: u32 = 6;

#[doc = r#"
The contents of the `MThd` chunk

```text
"MThd" 00 00 00 06 <format: u16> <track count: u16> <division: u16>
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiFileHeader {
    format: FormatType,
    track_count: u16,
    timing: Timing,
}

impl MidiFileHeader {
    /// Create a new header
    pub fn new(format: FormatType, track_count: u16, timing: Timing) -> Self {
        Self {
            format,
            track_count,
            timing,
        }
    }

    /// Reads the header chunk from the start of a file.
    ///
    /// # Errors
    /// - [`FormatError::HeaderTag`] if the file does not start with `MThd`
    /// - [`FormatError::HeaderLength`] if the chunk is not six bytes long
    /// - [`FormatError::FormatType`] if the format is not 0, 1 or 2
    /// - [`FormatError::InvalidTiming`] for an unknown SMPTE frame rate
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        // tag first: four bytes of anything else is a format error, not a truncation
        let position = reader.buffer_position();
        let tag = reader.read_exact_size()?;
        if tag != HEADER_TAG {
            return Err(ReaderError::format(position, FormatError::HeaderTag(tag)));
        }
        let len = reader.read_u32_be()?;
        if len != HEADER_LEN {
            return Err(ReaderError::format(
                position + 4,
                FormatError::HeaderLength(len),
            ));
        }

        let position = reader.buffer_position();
        let word = reader.read_u16_be()?;
        let format = FormatType::try_from(word)
            .map_err(|_| ReaderError::format(position, FormatError::FormatType(word)))?;
        let track_count = reader.read_u16_be()?;
        let timing = Timing::read(reader)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(?format, track_count, %timing, "read header chunk");

        Ok(Self {
            format,
            track_count,
            timing,
        })
    }

    /// The format word
    pub fn format_type(&self) -> FormatType {
        self.format
    }
    /// Number of track chunks the file declares
    pub fn track_count(&self) -> u16 {
        self.track_count
    }
    /// Get the timing props
    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

#[test]
fn header_is_read() {
    let bytes = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 2, 0x01, 0xE0,
    ];
    let header = MidiFileHeader::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(header.format_type(), FormatType::Simultaneous);
    assert_eq!(header.track_count(), 2);
    assert_eq!(header.timing().ticks_per_quarter_note(), Some(480));
}

#[test]
fn header_length_must_be_six() {
    let bytes = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 7, 0, 1, 0, 2, 0x01, 0xE0, 0,
    ];
    let err = MidiFileHeader::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &crate::reader::ReaderErrorKind::Format(FormatError::HeaderLength(7))
    );
}

#[test]
fn header_format_must_be_known() {
    let bytes = [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 3, 0, 1, 0, 96];
    let err = MidiFileHeader::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(err.position(), 8);
    assert!(err.is_format_error());
}
