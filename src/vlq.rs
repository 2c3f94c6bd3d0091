#![doc = r#"
Variable Length Quantities

Delta-times and meta/sysex lengths in a MIDI file are written as big-endian
groups of 7 bits. Every byte except the last has its leading bit set.

```text
        0x00 -> 00000000
        0x7F -> 01111111
        0x80 -> 10000001 00000000
  0x0FFFFFFF -> 11111111 11111111 11111111 01111111
```

A quantity may use at most four bytes, so the largest value is `0x0FFF_FFFF`.

# Example
```rust
# use smfdump::{reader::Reader, vlq};
let bytes = vlq::encode(0x2000).unwrap();
assert_eq!(bytes.as_slice(), &[0xC0, 0x00]);

let mut reader = Reader::from_byte_slice(&bytes);
assert_eq!(vlq::decode(&mut reader).unwrap(), 0x2000);
```
"#]

use core::{fmt, ops::Deref};

use crate::{
    ArgumentError, ProtocolError,
    reader::{ReadResult, Reader, inv_data},
};

/// The most bytes a quantity may occupy
pub const MAX_LEN: usize = 4;

/// A delta-time or length that fits in four 7-bit groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vlq(u32);

impl Vlq {
    /// Zero.
    pub const ZERO: Self = Self(0);
    /// The largest representable quantity, `0x0FFF_FFFF`
    pub const MAX: Self = Self(0x0FFF_FFFF);

    /// Fails if `value` does not fit into [`MAX_LEN`] bytes.
    pub const fn new(value: u32) -> Result<Self, ArgumentError> {
        if value > Self::MAX.0 {
            return Err(ArgumentError::VlqRange(value));
        }
        Ok(Self(value))
    }

    /// Clamps `value` to [`Vlq::MAX`].
    pub const fn new_saturating(value: u32) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// The decoded value
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Reads a quantity and advances the reader past it
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        decode(reader).map(Self)
    }

    /// The minimal encoding of this quantity
    pub const fn encode(&self) -> VlqBytes {
        let value = self.0;
        let mut len = 1;
        while len < MAX_LEN && value >> (7 * len) != 0 {
            len += 1;
        }

        let mut buf = [0; MAX_LEN];
        let mut i = 0;
        while i < len {
            let shift = 7 * (len - 1 - i);
            let mut byte = ((value >> shift) & 0x7F) as u8;
            if i + 1 < len {
                byte |= 0x80;
            }
            buf[i] = byte;
            i += 1;
        }
        VlqBytes {
            buf,
            len: len as u8,
        }
    }
}

impl TryFrom<u32> for Vlq {
    type Error = ArgumentError;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Vlq> for u32 {
    fn from(value: Vlq) -> Self {
        value.0
    }
}

impl fmt::Display for Vlq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The encoded bytes of a [`Vlq`], stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VlqBytes {
    buf: [u8; MAX_LEN],
    len: u8,
}

impl VlqBytes {
    /// The encoded bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl Deref for VlqBytes {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[u8]> for VlqBytes {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

/// Encode `value` using the fewest possible 7-bit groups.
///
/// # Errors
/// [`ArgumentError::VlqRange`] if `value` is above `0x0FFF_FFFF`.
pub const fn encode(value: u32) -> Result<VlqBytes, ArgumentError> {
    match Vlq::new(value) {
        Ok(vlq) => Ok(vlq.encode()),
        Err(e) => Err(e),
    }
}

/// Decode a quantity, advancing the reader past every consumed byte.
///
/// # Errors
/// - out of bounds if the buffer ends before a byte with a clear leading bit
/// - [`ProtocolError::VlqOverflow`] if the fourth byte still has its leading bit set
pub fn decode(reader: &mut Reader<'_>) -> ReadResult<u32> {
    let mut value: u32 = 0;
    for _ in 0..MAX_LEN {
        let byte = reader.read_next()?;
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(inv_data(reader, ProtocolError::VlqOverflow))
}

#[cfg(test)]
fn decode_slice(bytes: &[u8]) -> ReadResult<u32> {
    decode(&mut Reader::from_byte_slice(bytes))
}

#[test]
fn known_encodings() {
    use pretty_assertions::assert_eq;
    let cases: [(u32, &[u8]); 12] = [
        (0x00, &[0x00]),
        (0x40, &[0x40]),
        (0x7F, &[0x7F]),
        (0x80, &[0x81, 0x00]),
        (0x2000, &[0xC0, 0x00]),
        (0x3FFF, &[0xFF, 0x7F]),
        (0x4000, &[0x81, 0x80, 0x00]),
        (0x10_0000, &[0xC0, 0x80, 0x00]),
        (0x1F_FFFF, &[0xFF, 0xFF, 0x7F]),
        (0x20_0000, &[0x81, 0x80, 0x80, 0x00]),
        (0x800_0000, &[0xC0, 0x80, 0x80, 0x00]),
        (0xFFF_FFFF, &[0xFF, 0xFF, 0xFF, 0x7F]),
    ];
    for (value, bytes) in cases {
        assert_eq!(encode(value).unwrap().as_slice(), bytes);
        assert_eq!(decode_slice(bytes).unwrap(), value);
    }
}

#[test]
fn round_trip_is_minimal() {
    let mut value = 0u32;
    while value <= Vlq::MAX.value() {
        let bytes = encode(value).unwrap();
        assert_eq!(decode_slice(&bytes).unwrap(), value);

        let (last, rest) = bytes.split_last().unwrap();
        assert_eq!(last & 0x80, 0);
        assert!(rest.iter().all(|b| b & 0x80 != 0));
        // no leading group of only a continuation bit
        if bytes.len() > 1 {
            assert_ne!(bytes[0], 0x80);
        }
        value = value * 3 + 1;
    }
}

#[test]
fn encode_rejects_out_of_range() {
    assert_eq!(
        encode(0x1000_0000).unwrap_err(),
        ArgumentError::VlqRange(0x1000_0000)
    );
    assert_eq!(Vlq::new_saturating(u32::MAX), Vlq::MAX);
}

#[test]
fn decode_truncated() {
    let err = decode_slice(&[0x81, 0x80]).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 2);
}

#[test]
fn decode_too_long() {
    let err = decode_slice(&[0x80, 0x80, 0x80, 0x80, 0x00]).unwrap_err();
    assert!(err.is_protocol_error());
}

#[test]
fn decode_stops_after_terminator() {
    let mut reader = Reader::from_byte_slice(&[0x81, 0x00, 0x90]);
    assert_eq!(decode(&mut reader).unwrap(), 0x80);
    assert_eq!(reader.buffer_position(), 2);
}
