#![doc = r#"
Rusty representation of a [`MidiFile`]

A Standard MIDI File is one `MThd` header chunk followed by chunks of
which the `MTrk` ones carry the music. Everything is read straight out
of the caller's buffer: messages borrow their payloads instead of copying.
"#]

pub mod chunk;
use chunk::{ChunkHeader, UnknownChunk};

mod format;
pub use format::*;

mod header;
pub use header::*;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

mod meta;
pub use meta::*;

use crate::{
    FormatError,
    reader::{ReadResult, Reader, ReaderError},
};
use alloc::vec::Vec;

#[doc = r#"
A decoded Standard MIDI File.

# Example
```rust
# use smfdump::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
];
let file = MidiFile::parse(&bytes).unwrap();

assert_eq!(file.format_type(), FormatType::SingleMultiChannel);
assert_eq!(file.timing().ticks_per_quarter_note(), Some(96));
assert_eq!(file.tracks().len(), 1);
```
"#]
#[derive(Clone, Debug, PartialEq)]
pub struct MidiFile<'a> {
    header: MidiFileHeader,
    tracks: Vec<Track<'a>>,
    unknown_chunks: Vec<UnknownChunk<'a>>,
}

impl<'a> MidiFile<'a> {
    /// Parse a set of bytes into a file struct.
    ///
    /// Reads the header, then chunks until as many tracks as the header
    /// declares have been read. Chunks that are not tracks are skipped.
    /// Bytes after the last declared track are ignored.
    ///
    /// # Errors
    /// - out of bounds if a chunk is cut short
    /// - [`FormatError::MissingTracks`] if the buffer ends cleanly between
    ///   chunks before every declared track was read
    /// - any error from [`MidiFileHeader::read`] or [`Track::read_body`]
    pub fn parse(bytes: &'a [u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = MidiFileHeader::read(&mut reader)?;
        let declared = header.track_count();

        let mut tracks = Vec::with_capacity(declared as usize);
        let mut unknown_chunks = Vec::new();

        while tracks.len() < declared as usize {
            if reader.is_empty() {
                return Err(ReaderError::format(
                    reader.buffer_position(),
                    FormatError::MissingTracks {
                        declared,
                        found: tracks.len() as u16,
                    },
                ));
            }
            let chunk = ChunkHeader::read(&mut reader)?;
            if chunk.is_track() {
                tracks.push(Track::read_body(chunk, &mut reader)?);
            } else {
                unknown_chunks.push(UnknownChunk::read_body(chunk, &mut reader)?);
            }
        }

        #[cfg(feature = "tracing")]
        if !reader.is_empty() {
            tracing::debug!(
                position = reader.buffer_position(),
                remaining = reader.remaining(),
                "ignoring bytes after the last declared track"
            );
        }

        Ok(Self {
            header,
            tracks,
            unknown_chunks,
        })
    }

    /// The decoded header chunk
    pub fn header(&self) -> &MidiFileHeader {
        &self.header
    }

    /// Returns the format type for the file.
    pub fn format_type(&self) -> FormatType {
        self.header.format_type()
    }

    /// Returns header info
    pub fn timing(&self) -> &Timing {
        self.header.timing()
    }

    /// Tracks in file order
    pub fn tracks(&self) -> &[Track<'a>] {
        &self.tracks
    }

    /// Chunks that were skipped, in file order
    pub fn unknown_chunks(&self) -> &[UnknownChunk<'a>] {
        &self.unknown_chunks
    }

    /// Every event of every track, in file order.
    pub fn events(&self) -> impl Iterator<Item = &TrackEvent<'a>> {
        self.tracks.iter().flat_map(|track| track.events())
    }
}

#[cfg(test)]
fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut bytes = tag.to_vec();
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

#[cfg(test)]
fn header(format: u16, tracks: u16) -> Vec<u8> {
    let mut body = format.to_be_bytes().to_vec();
    body.extend_from_slice(&tracks.to_be_bytes());
    body.extend_from_slice(&480u16.to_be_bytes());
    chunk(b"MThd", &body)
}

#[test]
fn unknown_chunks_are_skipped() {
    let mut bytes = header(1, 2);
    bytes.extend(chunk(b"XFIH", &[1, 2, 3]));
    bytes.extend(chunk(b"MTrk", &[0x00, 0xFF, 0x2F, 0x00]));
    bytes.extend(chunk(b"MTrk", &[0x00, 0xFF, 0x2F, 0x00]));
    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.tracks().len(), 2);
    assert_eq!(file.unknown_chunks().len(), 1);
    assert_eq!(file.unknown_chunks()[0].tag(), *b"XFIH");
    assert_eq!(file.unknown_chunks()[0].data(), &[1, 2, 3]);
}

#[test]
fn missing_tracks() {
    let mut bytes = header(1, 3);
    bytes.extend(chunk(b"MTrk", &[0x00, 0xFF, 0x2F, 0x00]));
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &crate::reader::ReaderErrorKind::Format(FormatError::MissingTracks {
            declared: 3,
            found: 1
        })
    );
    assert_eq!(err.position(), bytes.len());
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut bytes = header(0, 1);
    bytes.extend(chunk(b"MTrk", &[0x00, 0xFF, 0x2F, 0x00]));
    bytes.extend_from_slice(&[0xDE, 0xAD]);
    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.events().count(), 1);
}

#[test]
fn truncated_track_is_out_of_bounds() {
    let mut bytes = header(0, 1);
    bytes.extend(chunk(b"MTrk", &[0x00, 0x90, 0x3C, 0x64, 0x00, 0xFF, 0x2F, 0x00]));
    bytes.pop();
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
}
