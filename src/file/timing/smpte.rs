use core::fmt;

/// The possible FPS (Frames Per Second) for MIDI tracks and files
///
/// The MIDI specification defines only four possible frame types.
/// [`SmpteFps::TwentyNine`] is 29.97 fps drop-frame timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (30000/1001), drop-frame
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// The nominal rate written in a header's division word.
    ///
    /// Drop-frame 29.97 is written as 29.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 29,
            Self::Thirty => 30,
        }
    }

    /// The exact frame rate
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }

    /// Interprets the signed high byte of a header's division word
    pub(crate) const fn from_division(byte: i8) -> Option<Self> {
        match byte {
            -24 => Some(Self::TwentyFour),
            -25 => Some(Self::TwentyFive),
            -29 => Some(Self::TwentyNine),
            -30 => Some(Self::Thirty),
            _ => None,
        }
    }
}

impl fmt::Display for SmpteFps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwentyNine => f.write_str("29.97"),
            other => fmt::Display::fmt(&other.as_division(), f),
        }
    }
}

const DROP_FRAME: f64 = 30_000. / 1001.;

#[test]
fn division_bytes() {
    assert_eq!(SmpteFps::from_division(-25), Some(SmpteFps::TwentyFive));
    assert_eq!(SmpteFps::from_division(-29), Some(SmpteFps::TwentyNine));
    assert_eq!(SmpteFps::from_division(-28), None);
    assert_eq!(SmpteFps::TwentyNine.as_division(), 29);
}
