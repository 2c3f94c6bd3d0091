use thiserror::Error;

/// Structural problems with the chunk container.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The file does not start with an `MThd` chunk
    #[error("Expected header tag MThd, found {0:?}")]
    HeaderTag([u8; 4]),
    /// The header chunk must be exactly six bytes long
    #[error("Header chunk declared length {0}, expected 6")]
    HeaderLength(u32),
    /// The format word was not 0, 1 or 2
    #[error("Invalid file format {0}")]
    FormatType(u16),
    /// The SMPTE frame rate in the division word was not -24, -25, -29 or -30
    #[error("Invalid SMPTE division frame rate {0}")]
    InvalidTiming(i8),
    /// A track was expected but a different chunk tag was found
    #[error("Expected track tag MTrk, found {0:?}")]
    TrackTag([u8; 4]),
    /// An event ran past the track chunk's declared length
    #[error("Event overruns the declared track length of {declared} bytes")]
    TrackOverrun {
        /// Length stated by the chunk header
        declared: u32,
    },
    /// The buffer ended cleanly before all declared tracks were read
    #[error("Header declared {declared} tracks, found {found}")]
    MissingTracks {
        /// Track count from the header
        declared: u16,
        /// Track chunks actually present
        found: u16,
    },
}

/// Byte values that are not valid under the message grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A data byte appeared with no previous channel status to imply
    #[error("Data byte {0:#04X} with no running status")]
    NoRunningStatus(u8),
    /// A status byte that cannot begin a message in a file
    #[error("Unrecognized status byte {0:#04X}")]
    UnrecognizedStatus(u8),
    /// A data byte had its top bit set
    #[error("Invalid data byte {0:#04X} (leading bit set)")]
    InvalidDataByte(u8),
    /// A status byte had its top bit clear
    #[error("Invalid status byte {0:#04X} (leading bit clear)")]
    InvalidStatusByte(u8),
    /// A variable length quantity did not terminate within four bytes
    #[error("Variable length quantity longer than 4 bytes")]
    VlqOverflow,
}

/// Caller misuse of an encoding function.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Only values up to `0x0FFF_FFFF` fit into four 7-bit groups
    #[error("{0:#X} does not fit in a 4 byte variable length quantity")]
    VlqRange(u32),
}

#[doc = r#"
Errors for the SMPTE offset meta event.
"#]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SmpteError {
    /// The payload was not five bytes long
    #[error("Invalid SMPTE offset length: {0}")]
    Length(usize),
    /// Frame type bits outside of 0-3
    #[error("Invalid frame type: {0}")]
    TrackFrame(u8),
    /// Hours above 23
    #[error("Invalid hour offset: {0}")]
    HourOffset(u8),
    /// Minutes above 59
    #[error("Invalid minute offset: {0}")]
    MinuteOffset(u8),
    /// Seconds above 59
    #[error("Invalid second offset: {0}")]
    SecondOffset(u8),
    /// Subframes above 99
    #[error("Invalid subframe: {0}")]
    Subframe(u8),
}
