use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The format word of the header chunk.

- Format 0: a single track holding every channel
- Format 1: several tracks played simultaneously
- Format 2: several independent single-track patterns
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, name) = match self {
            Self::SingleMultiChannel => (0, "single multi-channel track"),
            Self::Simultaneous => (1, "simultaneous tracks"),
            Self::SequentiallyIndependent => (2, "sequentially independent tracks"),
        };
        write!(f, "{n} ({name})")
    }
}

#[test]
fn format_words() {
    assert_eq!(FormatType::try_from(1u16).unwrap(), FormatType::Simultaneous);
    assert!(FormatType::try_from(3u16).is_err());
    assert_eq!(u16::from(FormatType::SequentiallyIndependent), 2);
}
