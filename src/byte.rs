use core::fmt;

use crate::{
    ProtocolError,
    reader::{ReadResult, Reader, inv_data},
};

#[doc = r#"
A 7-bit value carried in a MIDI data byte (leading bit clear).
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// Checks for correctness (leading 0 bit).
    pub const fn new(byte: u8) -> Result<Self, ProtocolError> {
        if byte & 0x80 != 0 {
            return Err(ProtocolError::InvalidDataByte(byte));
        }
        Ok(Self(byte))
    }

    /// Create a data byte without checking the leading bit
    pub const fn new_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    /// The 7-bit value
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ProtocolError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DataByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Reads one data byte, rejecting it without advancing if its leading bit is set.
pub(crate) fn read_data_byte(reader: &mut Reader<'_>) -> ReadResult<DataByte> {
    let data = DataByte::new(reader.peek()?).map_err(|e| inv_data(reader, e))?;
    reader.read_next()?;
    Ok(data)
}

#[doc = r#"
A byte with its leading bit set, starting a message.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct StatusByte(u8);

impl StatusByte {
    /// Checks for correctness (leading 1 bit).
    pub const fn new(byte: u8) -> Result<Self, ProtocolError> {
        if byte & 0x80 == 0 {
            return Err(ProtocolError::InvalidStatusByte(byte));
        }
        Ok(Self(byte))
    }

    /// The raw status byte
    #[inline]
    pub const fn byte(&self) -> u8 {
        self.0
    }

    /// The message type nibble (`0x8`-`0xF`)
    #[inline]
    pub const fn high_nibble(&self) -> u8 {
        self.0 >> 4
    }

    /// The channel nibble
    #[inline]
    pub const fn low_nibble(&self) -> u8 {
        self.0 & 0x0F
    }
}

#[test]
fn data_byte_rejects_leading_bit() {
    assert_eq!(DataByte::new(0x7F).unwrap().value(), 0x7F);
    assert_eq!(
        DataByte::new(0x80).unwrap_err(),
        ProtocolError::InvalidDataByte(0x80)
    );
}

#[test]
fn status_byte_nibbles() {
    let status = StatusByte::new(0x9A).unwrap();
    assert_eq!(status.high_nibble(), 0x9);
    assert_eq!(status.low_nibble(), 0xA);
    assert!(StatusByte::new(0x3C).is_err());
}
