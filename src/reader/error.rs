use super::Reader;
use crate::{ArgumentError, FormatError, ProtocolError};
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while reading a Standard MIDI File.

Every error carries the absolute buffer offset at which it was detected.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// The buffer ended before a required field or length completed.
    #[error("Read out of bounds!")]
    OutOfBounds,
    /// Well-formed bytes holding an invalid structural value
    #[error("Format {0}")]
    Format(#[from] FormatError),
    /// A byte that is not valid under the message grammar
    #[error("Protocol {0}")]
    Protocol(#[from] ProtocolError),
    /// Caller misuse
    #[error("Invalid argument {0}")]
    InvalidArgument(#[from] ArgumentError),
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if out of bounds or unexpected end of file
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }
    /// True if the file structure was invalid
    pub const fn is_format_error(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::Format(_))
    }
    /// True if a message could not be decoded
    pub const fn is_protocol_error(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::Protocol(_))
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new structural error
    pub const fn format(position: usize, error: FormatError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::Format(error),
        }
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }

    /// Out of bounds inside a track body becomes [`FormatError::TrackOverrun`].
    pub(crate) fn into_overrun(self, declared: u32) -> Self {
        if self.is_out_of_bounds() {
            Self::format(self.position, FormatError::TrackOverrun { declared })
        } else {
            self
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

pub(crate) fn inv_data(reader: &Reader<'_>, v: impl Into<ReaderErrorKind>) -> ReaderError {
    ReaderError::new(reader.buffer_position(), v.into())
}
