#![doc = r#"
A Standard MIDI File decoder that keeps every message next to the bytes it
was read from.

# Overview

A file is read in one pass from a borrowed byte slice:

- [`MidiFile::parse`](file::MidiFile::parse) checks the `MThd` header and reads
  as many `MTrk` chunks as it declares, skipping chunks it does not know.
- [`Track`](file::Track) decodes delta-times and messages until end-of-track
  or its declared length, with running status scoped to the track.
- [`MidiMessage::read`](message::MidiMessage::read) decodes exactly one
  channel voice, system exclusive, system common or meta message.
- [`vlq`] encodes and decodes variable length quantities.
- [`dump`] renders each message as bits beside its delta-time.

Every failure is a [`ReaderError`](reader::ReaderError) carrying the absolute
offset in the buffer where it was found.

# Example
```rust
use smfdump::prelude::*;

let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 12,
    0x00, 0x90, 0x3C, 0x64,
    0x83, 0x60, 0x3C, 0x00,
    0x00, 0xFF, 0x2F, 0x00,
];
let file = MidiFile::parse(&bytes).unwrap();
let track = &file.tracks()[0];

let (ticks, last) = track.ticked_events().last().unwrap();
assert_eq!(ticks, 480);
assert!(last.message().is_end_of_track());
assert_eq!(smfdump::dump::note_sequence(&file), [Note::from_databyte(60u8).unwrap()]);
```

# Features
- `std` (default): `std::error::Error` for all error types
- `tracing` (default): `debug`/`trace` spans of the parse, `warn` on skipped data
- `cli` (default): the `smfdump` binary
- `serde`: `Serialize`/`Deserialize` for plain value types
"#]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod byte;
pub use byte::*;

mod error;
pub use error::*;

pub mod dump;
pub mod file;
pub mod message;
pub mod note;
pub mod reader;
pub mod vlq;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        ArgumentError, DataByte, FormatError, ProtocolError, SmpteError, StatusByte,
        file::{
            FormatType, KeySignature, MetaEvent, MetaMessage, MetaType, MidiFile,
            MidiFileHeader, SmpteFps, SmpteHeader, SmpteOffset, Tempo, TimeSignature, Timing,
            Track, TrackEvent,
        },
        message::{
            Channel, ChannelVoiceMessage, MidiMessage, PitchBend, RunningStatus, SysEx,
            SysExKind, SystemCommonMessage, VoiceEvent, VoiceKind,
        },
        note::{Key, Note, Octave},
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
        vlq::Vlq,
    };
}
