use pretty_assertions::assert_eq;
use smfdump::{dump, prelude::*};

fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut bytes = tag.to_vec();
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

fn smf(format: u16, division: u16, tracks: &[&[u8]]) -> Vec<u8> {
    let mut header = format.to_be_bytes().to_vec();
    header.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    header.extend_from_slice(&division.to_be_bytes());

    let mut bytes = chunk(b"MThd", &header);
    for track in tracks {
        bytes.extend(chunk(b"MTrk", track));
    }
    bytes
}

const CONDUCTOR: &[u8] = &[
    0x00, 0xFF, 0x03, 0x05, b'T', b'e', b'm', b'p', b'o',
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20,
    0x00, 0xFF, 0x58, 0x04, 0x03, 0x02, 0x18, 0x08,
    0x00, 0xFF, 0x59, 0x02, 0xFE, 0x00,
    0x00, 0xFF, 0x2F, 0x00,
];

const PIANO: &[u8] = &[
    0x00, 0xC0, 0x00,
    0x00, 0x90, 0x3C, 0x64,
    0x00, 0x40, 0x64,
    0x00, 0x43, 0x64,
    0x83, 0x60, 0x80, 0x3C, 0x40,
    0x00, 0x40, 0x40,
    0x00, 0x43, 0x40,
    0x00, 0xE0, 0x00, 0x40,
    0x00, 0xF0, 0x05, 0x7E, 0x7F, 0x09, 0x01, 0xF7,
    0x00, 0xFF, 0x2F, 0x00,
];

#[test]
fn format_one_file() {
    let bytes = smf(1, 480, &[CONDUCTOR, PIANO]);
    let file = MidiFile::parse(&bytes).unwrap();

    assert_eq!(file.format_type(), FormatType::Simultaneous);
    assert_eq!(file.timing(), &Timing::TicksPerQuarterNote(480));
    assert_eq!(file.tracks().len(), 2);
    assert!(file.tracks().iter().all(Track::is_terminated));

    let conductor: Vec<String> = file.tracks()[0]
        .events()
        .iter()
        .map(|e| e.message().to_string())
        .collect();
    assert_eq!(
        conductor,
        [
            "track_name text=\"Tempo\"",
            "set_tempo tempo=500000",
            "time_signature numerator=3 denominator=4 clocks_per_click=24 notated_32nd_notes_per_beat=8",
            "key_signature key=Bb",
            "end_of_track",
        ]
    );

    let piano = &file.tracks()[1];
    assert_eq!(piano.events().len(), 10);
    assert_eq!(piano.duration_ticks(), 480);
    let running: Vec<bool> = piano.events().iter().map(TrackEvent::running_status).collect();
    assert_eq!(
        running,
        [false, false, true, true, false, true, true, false, false, false]
    );

    let MidiMessage::SystemExclusive(sysex) = piano.events()[8].message() else {
        panic!("expected system exclusive");
    };
    assert!(sysex.is_terminated());
    assert_eq!(sysex.data(), &[0x7E, 0x7F, 0x09, 0x01, 0xF7]);

    let notes: Vec<String> = dump::note_sequence(&file).iter().map(Note::to_string).collect();
    assert_eq!(notes, ["C4", "E4", "G4"]);
}

#[test]
fn ticked_events_accumulate() {
    let bytes = smf(0, 96, &[PIANO]);
    let file = MidiFile::parse(&bytes).unwrap();
    let ticks: Vec<u64> = file.tracks()[0].ticked_events().map(|(t, _)| t).collect();
    assert_eq!(ticks, [0, 0, 0, 0, 480, 480, 480, 480, 480, 480]);
}

#[test]
fn raw_spans_cover_the_whole_track() {
    let bytes = smf(0, 96, &[PIANO]);
    let file = MidiFile::parse(&bytes).unwrap();

    let mut rebuilt = Vec::new();
    for event in file.tracks()[0].events() {
        rebuilt.extend_from_slice(&event.delta_bytes());
        rebuilt.extend_from_slice(event.raw());
    }
    assert_eq!(rebuilt, PIANO);
}

#[test]
fn every_truncation_is_out_of_bounds() {
    let bytes = smf(1, 480, &[CONDUCTOR, PIANO]);
    for len in 0..bytes.len() {
        let err = MidiFile::parse(&bytes[..len]).unwrap_err();
        // cut exactly between chunks
        if len == 14 || len == 14 + 8 + CONDUCTOR.len() {
            let found = if len == 14 { 0 } else { 1 };
            assert_eq!(
                err.error_kind(),
                &ReaderErrorKind::Format(FormatError::MissingTracks { declared: 2, found })
            );
        } else {
            assert!(err.is_out_of_bounds(), "length {len}: {err}");
        }
    }
}

#[test]
fn one_byte_short() {
    let bytes = smf(0, 480, &[PIANO]);
    let err = MidiFile::parse(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), bytes.len() - 1);
}

#[test]
fn wrong_header_tag() {
    let mut bytes = smf(0, 480, &[PIANO]);
    bytes[..4].copy_from_slice(b"RIFF");
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::Format(FormatError::HeaderTag(*b"RIFF"))
    );
    assert_eq!(err.position(), 0);
}

#[test]
fn smpte_division_must_be_known() {
    // -28 fps
    let bytes = smf(0, 0xE428, &[PIANO]);
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn running_status_in_a_file() {
    let track = [0x00, 0x91, 0x3C, 0x64, 0x00, 0x3E, 0x64, 0x00, 0xFF, 0x2F, 0x00];
    let bytes = smf(0, 96, &[&track]);
    let file = MidiFile::parse(&bytes).unwrap();
    let events = file.tracks()[0].events();

    assert_eq!(events[1].raw(), &[0x3E, 0x64]);
    assert_eq!(events[1].message().to_bytes(), [0x91, 0x3E, 0x64]);
    assert_eq!(
        events[1].message().to_string(),
        "note_on channel=1 note=62 velocity=100"
    );
}

#[test]
fn error_positions_are_absolute() {
    // F4 is undefined, it sits at header (14) + chunk header (8) + delta (1)
    let track = [0x00, 0xF4, 0x00, 0xFF, 0x2F, 0x00];
    let bytes = smf(0, 96, &[&track]);
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::Protocol(ProtocolError::UnrecognizedStatus(0xF4))
    );
    assert_eq!(err.position(), 23);
}

#[test]
fn overlong_delta_time() {
    let track = [0x80, 0x80, 0x80, 0x80, 0x00, 0xFF, 0x2F, 0x00];
    let bytes = smf(0, 96, &[&track]);
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::Protocol(ProtocolError::VlqOverflow));
}

#[test]
fn format_two_keeps_tracks_apart() {
    let bytes = smf(2, 96, &[PIANO, CONDUCTOR, PIANO]);
    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.format_type(), FormatType::SequentiallyIndependent);
    let messages = |track: &Track<'_>| -> Vec<Vec<u8>> {
        track.events().iter().map(|e| e.message().to_bytes()).collect()
    };
    assert_eq!(messages(&file.tracks()[0]), messages(&file.tracks()[2]));
    assert_ne!(file.tracks()[0], file.tracks()[2]);
    assert_eq!(file.events().count(), 10 + 5 + 10);
}
