use pretty_assertions::assert_eq;
use smfdump::prelude::*;

/// A format 0 file with SMPTE timing whose only track starts with an
/// SMPTE offset meta event, followed by one note.
fn file_with_smpte_offset(fps: SmpteFps, offset: [u8; 4]) -> Vec<u8> {
    let mut bytes = Vec::new();

    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]);
    // negative frame rate in the high byte, ticks per frame in the low byte
    bytes.push((fps.as_division() as i8).wrapping_neg() as u8);
    bytes.push(40);

    let rate_bits = match fps {
        SmpteFps::TwentyFour => 0b00,
        SmpteFps::TwentyFive => 0b01,
        SmpteFps::TwentyNine => 0b10,
        SmpteFps::Thirty => 0b11,
    };
    let [hour, minute, second, frame] = offset;
    let track = [
        0x00, 0xFF, 0x54, 0x05, (rate_bits << 5) | hour, minute, second, frame, 50,
        0x00, 0x90, 0x3C, 0x64,
        0x60, 0x80, 0x3C, 0x40,
        0x00, 0xFF, 0x2F, 0x00,
    ];
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(track.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&track);
    bytes
}

fn first_offset(file: &MidiFile<'_>) -> SmpteOffset {
    let MidiMessage::Meta(meta) = file.tracks()[0].events()[0].message() else {
        panic!("expected a meta event first");
    };
    let MetaEvent::SmpteOffset(offset) = meta.event() else {
        panic!("expected an SMPTE offset, got {meta}");
    };
    offset
}

#[test]
fn smpte_offset_in_each_frame_rate() {
    for fps in [
        SmpteFps::TwentyFour,
        SmpteFps::TwentyFive,
        SmpteFps::TwentyNine,
        SmpteFps::Thirty,
    ] {
        let bytes = file_with_smpte_offset(fps, [12, 30, 15, 18]);
        let file = MidiFile::parse(&bytes).unwrap();

        let Timing::Smpte(header) = file.timing() else {
            panic!("expected SMPTE timing");
        };
        assert_eq!(header.fps(), fps);
        assert_eq!(header.ticks_per_frame(), 40);

        let offset = first_offset(&file);
        assert_eq!(offset.fps, fps);
        assert_eq!(
            (offset.hour, offset.minute, offset.second, offset.frame, offset.subframe),
            (12, 30, 15, 18, 50)
        );
    }
}

#[test]
fn smpte_offset_microseconds() {
    let bytes = file_with_smpte_offset(SmpteFps::TwentyFour, [0, 0, 10, 12]);
    let offset = first_offset(&MidiFile::parse(&bytes).unwrap());

    let expected = 10_000_000. + (12.5 / 24.) * 1_000_000.;
    assert!((offset.as_micros() - expected).abs() < 0.01);

    let at_thirty = offset.as_micros_with_override(SmpteFps::Thirty);
    assert!((at_thirty - (10_000_000. + (12.5 / 30.) * 1_000_000.)).abs() < 0.01);
}

#[test]
fn drop_frame_duration() {
    let offset = SmpteOffset::parse(&[0b0100_0000, 0, 0, 1, 0]).unwrap();
    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert!((offset.as_micros() - 1_001_000. / 30.).abs() < 0.001);
}

#[test]
fn smpte_offset_is_displayed() {
    let bytes = file_with_smpte_offset(SmpteFps::TwentyFive, [1, 2, 3, 4]);
    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(
        file.tracks()[0].events()[0].message().to_string(),
        "smpte_offset frame_rate=25 hours=1 minutes=2 seconds=3 frames=4 sub_frames=50"
    );
}

#[test]
fn out_of_range_fields() {
    let cases: [(&[u8], SmpteError); 7] = [
        (&[], SmpteError::Length(0)),
        (&[0, 0, 0, 0, 0, 0], SmpteError::Length(6)),
        (&[0b1000_0000, 0, 0, 0, 0], SmpteError::TrackFrame(4)),
        (&[24, 0, 0, 0, 0], SmpteError::HourOffset(24)),
        (&[0, 60, 0, 0, 0], SmpteError::MinuteOffset(60)),
        (&[0, 0, 255, 0, 0], SmpteError::SecondOffset(255)),
        (&[0, 0, 0, 0, 100], SmpteError::Subframe(100)),
    ];
    for (data, expected) in cases {
        assert_eq!(SmpteOffset::parse(data), Err(expected), "{data:?}");
    }
}

#[test]
fn hour_is_checked_before_minute() {
    let err = SmpteOffset::parse(&[25, 61, 0, 0, 0]).unwrap_err();
    assert_eq!(err, SmpteError::HourOffset(25));
}

#[test]
fn invalid_offset_payload_stays_raw() {
    let mut bytes = file_with_smpte_offset(SmpteFps::Thirty, [0, 0, 0, 0]);
    // minute byte of the offset payload
    let minute = 14 + 8 + 5;
    bytes[minute] = 99;
    let file = MidiFile::parse(&bytes).unwrap();
    let MidiMessage::Meta(meta) = file.tracks()[0].events()[0].message() else {
        panic!("expected a meta event first");
    };
    assert_eq!(meta.meta_type(), MetaType::SmpteOffset);
    assert!(matches!(meta.event(), MetaEvent::Other { .. }));
}
