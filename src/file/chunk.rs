#![doc = r#"
MIDI file chunks

MIDI files are organized into chunks, each identified by a 4-character ASCII
type identifier followed by a 32-bit big-endian length and then the chunk data.

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
[Track Chunk 2: "MTrk"]
...
[Track Chunk N: "MTrk"]
```

Anything that is neither `MThd` nor `MTrk` is an [`UnknownChunk`], which
readers are expected to skip.
"#]

use crate::reader::{ReadResult, Reader};

/// `MThd`
pub const HEADER_TAG: [u8; 4] = *b"MThd";
/// `MTrk`
pub const TRACK_TAG: [u8; 4] = *b"MTrk";

/// The eight bytes that open every chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    tag: [u8; 4],
    len: u32,
    position: usize,
}

impl ChunkHeader {
    /// Reads the type identifier and length.
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let position = reader.buffer_position();
        let tag = reader.read_exact_size()?;
        let len = reader.read_u32_be()?;
        Ok(Self { tag, len, position })
    }

    /// The 4-character type identifier
    pub const fn tag(&self) -> [u8; 4] {
        self.tag
    }

    /// Length of the chunk data, excluding these eight bytes
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// True if the chunk has no data
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset of the tag in the file
    pub const fn position(&self) -> usize {
        self.position
    }

    /// True for `MTrk`
    pub fn is_track(&self) -> bool {
        self.tag == TRACK_TAG
    }
}

/// A chunk whose type this crate does not interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownChunk<'a> {
    tag: [u8; 4],
    data: &'a [u8],
}

impl<'a> UnknownChunk<'a> {
    pub(crate) fn read_body(header: ChunkHeader, reader: &mut Reader<'a>) -> ReadResult<Self> {
        let data = reader.read_exact(header.len() as usize)?;
        #[cfg(feature = "tracing")]
        tracing::warn!(
            tag = ?header.tag(),
            len = header.len(),
            position = header.position(),
            "skipping unknown chunk"
        );
        Ok(Self {
            tag: header.tag(),
            data,
        })
    }

    /// The 4-character type identifier
    pub const fn tag(&self) -> [u8; 4] {
        self.tag
    }

    /// The chunk data
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }
}

#[test]
fn read_chunk_header() {
    let bytes = [b'M', b'T', b'r', b'k', 0x00, 0x00, 0x01, 0x02];
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = ChunkHeader::read(&mut reader).unwrap();
    assert!(header.is_track());
    assert_eq!(header.len(), 0x0102);
    assert!(reader.is_empty());
}
