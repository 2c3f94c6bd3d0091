#![doc = r#"
A forward-only, bounds-checked cursor over a byte buffer.

Every read either returns exactly the requested bytes or fails with
[`ReaderErrorKind::OutOfBounds`] at the position where the buffer ran out.
Positions reported by a [`Reader`] are always absolute offsets into the
original file, including for readers carved out with [`Reader::sub_reader`].

# Example
```rust
# use smfdump::reader::Reader;
let mut reader = Reader::from_byte_slice(&[0x4D, 0x54, 0x68, 0x64, 0x00]);

assert_eq!(&reader.read_exact_size::<4>().unwrap(), b"MThd");
assert_eq!(reader.buffer_position(), 4);
assert_eq!(reader.remaining(), 1);
assert!(reader.read_exact(2).unwrap_err().is_out_of_bounds());
```
"#]

mod error;
pub use error::*;

/// Sequential reader over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
    offset: usize,
}

impl<'slc> Reader<'slc> {
    /// Create a reader positioned at the start of `data`.
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self {
            data,
            position: 0,
            offset: 0,
        }
    }

    /// The absolute offset of the next byte to be read.
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.offset + self.position
    }

    /// Number of unread bytes.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True if every byte has been consumed.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next byte without advancing.
    pub fn peek(&self) -> ReadResult<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(ReaderError::oob(self.buffer_position()))
    }

    /// Reads one byte and advances past it.
    pub fn read_next(&mut self) -> ReadResult<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads the next `len` bytes and advances past them.
    pub fn read_exact(&mut self, len: usize) -> ReadResult<&'slc [u8]> {
        if len > self.remaining() {
            return Err(ReaderError::oob(self.data.len() + self.offset));
        }
        let start = self.position;
        self.position += len;
        Ok(&self.data[start..self.position])
    }

    /// Reads a fixed number of bytes into an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut bytes = [0; N];
        bytes.copy_from_slice(self.read_exact(N)?);
        Ok(bytes)
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Consumes the next `len` bytes and returns a reader limited to them.
    ///
    /// The child reports positions relative to the same file as `self`.
    pub fn sub_reader(&mut self, len: usize) -> ReadResult<Reader<'slc>> {
        let offset = self.buffer_position();
        let data = self.read_exact(len)?;
        Ok(Reader {
            data,
            position: 0,
            offset,
        })
    }

    /// The bytes consumed between the absolute position `start` and now.
    ///
    /// `start` must be a position previously returned by
    /// [`Reader::buffer_position`] on this reader.
    pub(crate) fn consumed_since(&self, start: usize) -> &'slc [u8] {
        &self.data[start - self.offset..self.position]
    }
}

#[test]
fn sub_reader_keeps_absolute_positions() {
    let bytes = [0, 1, 2, 3, 4, 5];
    let mut reader = Reader::from_byte_slice(&bytes);
    reader.read_next().unwrap();

    let mut sub = reader.sub_reader(3).unwrap();
    assert_eq!(reader.buffer_position(), 4);
    assert_eq!(sub.buffer_position(), 1);
    assert_eq!(sub.read_u16_be().unwrap(), 0x0102);

    let err = sub.read_exact(2).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 4);
}

#[test]
fn peek_does_not_advance() {
    let mut reader = Reader::from_byte_slice(&[0x90]);
    assert_eq!(reader.peek().unwrap(), 0x90);
    assert_eq!(reader.read_next().unwrap(), 0x90);
    assert!(reader.is_empty());
    assert!(reader.peek().unwrap_err().is_out_of_bounds());
}

#[test]
fn consumed_since_returns_span() {
    let bytes = [0xAA, 0xBB, 0xCC];
    let mut reader = Reader::from_byte_slice(&bytes);
    let mut sub = reader.sub_reader(3).unwrap();
    sub.read_next().unwrap();
    let start = sub.buffer_position();
    sub.read_exact(2).unwrap();
    assert_eq!(sub.consumed_since(start), &[0xBB, 0xCC]);
}
