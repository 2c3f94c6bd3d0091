#![doc = r#"
SMPTE Offset (`FF 54 05 hr mn se fr ff`)

The SMPTE time at which a track is supposed to start. It should appear
before any non-zero delta-time and before any channel event.
"#]

use core::fmt;

use crate::{SmpteError, file::SmpteFps};

/// A track's starting position in SMPTE time code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SmpteOffset {
    /// Frame rate the position is counted in
    pub fps: SmpteFps,
    /// `0`-`23`
    pub hour: u8,
    /// `0`-`59`
    pub minute: u8,
    /// `0`-`59`
    pub second: u8,
    /// Frame within the second
    pub frame: u8,
    /// Hundredths of a frame, `0`-`99`
    pub subframe: u8,
}

impl SmpteOffset {
    /// Parse the five payload bytes of the meta event.
    ///
    /// The first byte is `0rrhhhhh`: `rr` selects the frame rate
    /// (24, 25, 29.97, 30) and `hhhhh` holds the hours.
    ///
    /// # Errors
    /// - `SmpteError::Length` if data is not exactly 5 bytes
    /// - `SmpteError::TrackFrame` if the rate bits are not `0`-`3`
    /// - `SmpteError::HourOffset`, `MinuteOffset`, `SecondOffset`, `Subframe`
    ///   when a field is out of its range
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        let [rate_hour, minute, second, frame, subframe] = match data {
            [a, b, c, d, e] => [*a, *b, *c, *d, *e],
            _ => return Err(SmpteError::Length(data.len())),
        };

        let fps = match rate_hour >> 5 {
            0 => SmpteFps::TwentyFour,
            1 => SmpteFps::TwentyFive,
            2 => SmpteFps::TwentyNine,
            3 => SmpteFps::Thirty,
            v => return Err(SmpteError::TrackFrame(v)),
        };
        let hour = rate_hour & 0b0001_1111;
        if hour > 23 {
            return Err(SmpteError::HourOffset(hour));
        }
        if minute > 59 {
            return Err(SmpteError::MinuteOffset(minute));
        }
        if second > 59 {
            return Err(SmpteError::SecondOffset(second));
        }
        if subframe > 99 {
            return Err(SmpteError::Subframe(subframe));
        }
        Ok(Self {
            fps,
            hour,
            minute,
            second,
            frame,
            subframe,
        })
    }

    /// The rate bits and hours packed back into the first payload byte
    pub const fn rate_hour_byte(&self) -> u8 {
        let rate = match self.fps {
            SmpteFps::TwentyFour => 0,
            SmpteFps::TwentyFive => 1,
            SmpteFps::TwentyNine => 2,
            SmpteFps::Thirty => 3,
        };
        (rate << 5) | self.hour
    }

    /// Microseconds from `00:00:00:00` counted at the offset's own frame rate
    pub fn as_micros(&self) -> f64 {
        self.as_micros_with_override(self.fps)
    }

    /// Microseconds from `00:00:00:00` counted at `fps`.
    ///
    /// Some writers leave the rate bits at zero and expect the header's
    /// SMPTE division to apply.
    pub fn as_micros_with_override(&self, fps: SmpteFps) -> f64 {
        let seconds = self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32;
        let frames = self.frame as f64 + self.subframe as f64 / 100.;
        (seconds as f64 + frames / fps.as_f64()) * 1_000_000.
    }
}

impl fmt::Display for SmpteOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "smpte_offset frame_rate={} hours={} minutes={} seconds={} frames={} sub_frames={}",
            self.fps, self.hour, self.minute, self.second, self.frame, self.subframe
        )
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // payload after 00 FF 54 05
    let bytes = [0x41, 0x17, 0x2D, 0x0C, 0x22];
    let offset = SmpteOffset::parse(&bytes).unwrap();

    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);
    assert_eq!(offset.rate_hour_byte(), 0x41);
}

#[test]
fn parse_invalid_smpte_offset() {
    use pretty_assertions::assert_eq;
    let err = SmpteOffset::parse(&[0x7F, 0x17, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::HourOffset(31));

    let err = SmpteOffset::parse(&[0x41, 0x50, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::MinuteOffset(80));

    let err = SmpteOffset::parse(&[0x00, 0x00, 0x00]).unwrap_err();
    assert_eq!(err, SmpteError::Length(3));

    let err = SmpteOffset::parse(&[0x80, 0x00, 0x00, 0x00, 0x00]).unwrap_err();
    assert_eq!(err, SmpteError::TrackFrame(4));
}
