#![doc = r#"
Human readable rendering of a decoded file

Each message is printed next to the bytes it came from, written out as
bits, and the bits of its delta-time's variable length quantity.

```text
Raw Msg: note_on channel=0 note=60 velocity=100 time=0 -> 10010000 00111100 01100100, VLQ DeltaT: 00000000. Note: C4
```
"#]

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write};

use crate::{
    file::{MidiFile, Track, TrackEvent},
    message::MidiMessage,
    note::Note,
};

/// Writes each byte as eight binary digits, separated by single spaces.
pub fn bits(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 9);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // writing to a String cannot fail
        let _ = write!(out, "{byte:08b}");
    }
    out
}

/// The pitch of every note on with a non-zero velocity, tracks in file order.
pub fn note_sequence(file: &MidiFile<'_>) -> Vec<Note> {
    file.events().filter_map(|event| note_start(event.message())).collect()
}

fn note_start(message: &MidiMessage<'_>) -> Option<Note> {
    let MidiMessage::ChannelVoice(cv) = message else {
        return None;
    };
    match cv.event() {
        crate::message::VoiceEvent::NoteOn { note, .. } if cv.is_note_start() => Some(*note),
        _ => None,
    }
}

/// Which bytes an [`EventLine`] renders for the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteSource {
    /// The span the message was read from. Running status events show no
    /// status byte.
    #[default]
    Raw,
    /// The message re-encoded with its status byte and minimal lengths.
    Canonical,
}

/// A single `Raw Msg:` line
#[derive(Debug, Clone, Copy)]
pub struct EventLine<'e, 'a> {
    event: &'e TrackEvent<'a>,
    source: ByteSource,
}

impl<'e, 'a> EventLine<'e, 'a> {
    /// Render `event` with the bytes selected by `source`
    pub fn new(event: &'e TrackEvent<'a>, source: ByteSource) -> Self {
        Self { event, source }
    }
}

impl fmt::Display for EventLine<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.event.message();
        let bytes = match self.source {
            ByteSource::Raw => bits(self.event.raw()),
            ByteSource::Canonical => bits(&message.to_bytes()),
        };
        write!(
            f,
            "Raw Msg: {message} time={} -> {bytes}, VLQ DeltaT: {}.",
            self.event.delta_ticks(),
            bits(&self.event.delta_bytes())
        )?;
        if let Some(note) = note_start(message) {
            write!(f, " Note: {note}")?;
        }
        Ok(())
    }
}

#[doc = r#"
A whole file: the header, every track's event lines and the note sequence.

# Example
```rust
# use smfdump::{dump::FileDump, prelude::*};
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 8, 0x00, 0x90, 0x45, 0x40, 0x00, 0xFF, 0x2F, 0x00,
];
let file = MidiFile::parse(&bytes).unwrap();
let dump = FileDump::new(&file).to_string();

assert!(dump.contains("Track 0 contains 2 events."));
assert!(dump.ends_with("Note sequence: [A4]\n"));
```
"#]
#[derive(Debug, Clone, Copy)]
pub struct FileDump<'f, 'a> {
    file: &'f MidiFile<'a>,
    source: ByteSource,
    notes: bool,
}

impl<'f, 'a> FileDump<'f, 'a> {
    /// Dump raw spans and the note sequence
    pub fn new(file: &'f MidiFile<'a>) -> Self {
        Self {
            file,
            source: ByteSource::Raw,
            notes: true,
        }
    }

    /// Choose which bytes each line shows
    pub fn with_source(mut self, source: ByteSource) -> Self {
        self.source = source;
        self
    }

    /// Toggle the trailing note sequence line
    pub fn with_notes(mut self, notes: bool) -> Self {
        self.notes = notes;
        self
    }

    fn write_track(&self, f: &mut fmt::Formatter<'_>, index: usize, track: &Track<'_>) -> fmt::Result {
        writeln!(f, "Track {index} contains {} events.", track.events().len())?;
        for event in track.events() {
            writeln!(f, "{}", EventLine::new(event, self.source))?;
        }
        Ok(())
    }
}

impl fmt::Display for FileDump<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.file.header();
        writeln!(
            f,
            "Format {}, {} tracks, {}",
            header.format_type(),
            header.track_count(),
            header.timing()
        )?;
        for chunk in self.file.unknown_chunks() {
            writeln!(
                f,
                "Skipped chunk {} ({} bytes)",
                chunk.tag().escape_ascii(),
                chunk.data().len()
            )?;
        }
        for (index, track) in self.file.tracks().iter().enumerate() {
            self.write_track(f, index, track)?;
        }
        if self.notes {
            let names: Vec<String> = note_sequence(self.file)
                .iter()
                .map(alloc::string::ToString::to_string)
                .collect();
            writeln!(f, "Note sequence: [{}]", names.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
const TWO_TRACKS: &[u8] = &[
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 2, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 11,
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20,
    0x00, 0xFF, 0x2F, 0x00,
    b'M', b'T', b'r', b'k', 0, 0, 0, 19,
    0x00, 0x90, 0x3C, 0x64,
    0x00, 0x40, 0x50,
    0x83, 0x60, 0x3C, 0x00,
    0x00, 0x90, 0x40, 0x00,
    0x00, 0xFF, 0x2F, 0x00,
];

#[test]
fn bits_are_space_separated() {
    assert_eq!(bits(&[]), "");
    assert_eq!(bits(&[0x90, 0x3C]), "10010000 00111100");
}

#[test]
fn note_sequence_skips_zero_velocity() {
    use pretty_assertions::assert_eq;
    let file = MidiFile::parse(TWO_TRACKS).unwrap();
    let names: Vec<String> = note_sequence(&file).iter().map(|n| alloc::format!("{n}")).collect();
    assert_eq!(names, ["C4", "E4"]);
}

#[test]
fn event_line_raw_and_canonical() {
    use pretty_assertions::assert_eq;
    let file = MidiFile::parse(TWO_TRACKS).unwrap();
    let event = &file.tracks()[1].events()[1];
    assert!(event.running_status());

    assert_eq!(
        alloc::format!("{}", EventLine::new(event, ByteSource::Raw)),
        "Raw Msg: note_on channel=0 note=64 velocity=80 time=0 -> 01000000 01010000, VLQ DeltaT: 00000000. Note: E4"
    );
    assert_eq!(
        alloc::format!("{}", EventLine::new(event, ByteSource::Canonical)),
        "Raw Msg: note_on channel=0 note=64 velocity=80 time=0 -> 10010000 01000000 01010000, VLQ DeltaT: 00000000. Note: E4"
    );

    let note_off = &file.tracks()[1].events()[2];
    assert_eq!(
        alloc::format!("{}", EventLine::new(note_off, ByteSource::Raw)),
        "Raw Msg: note_on channel=0 note=60 velocity=0 time=480 -> 00111100 00000000, VLQ DeltaT: 10000011 01100000."
    );
}

#[test]
fn file_dump_layout() {
    let file = MidiFile::parse(TWO_TRACKS).unwrap();
    let dump = alloc::format!("{}", FileDump::new(&file));
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 1 + 3 + 6 + 1);
    assert_eq!(lines[1], "Track 0 contains 2 events.");
    assert_eq!(lines[4], "Track 1 contains 5 events.");
    assert_eq!(lines[10], "Note sequence: [C4, E4]");

    let dump = alloc::format!("{}", FileDump::new(&file).with_notes(false));
    assert!(!dump.contains("Note sequence"));
}
