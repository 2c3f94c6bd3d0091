#![doc = r#"
Contains all Channel Voice Message types

# Layout
```text
 status byte        data bytes
|----|----|      |------------|------------|
|kind|chan|      | 0ddddddd   | 0ddddddd   |
|----|----|      |------------|------------|
```
The high nibble of the status byte picks the [`VoiceKind`], the low
nibble the [`Channel`]. The kind fixes how many data bytes follow.
"#]
mod voice;
pub use voice::*;

use core::fmt;

#[doc = r#"
The channel a voice message is addressed to.

Channels are transmitted as `0`-`15`; [`Channel::One`] is `0`.
"#]
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// Identify the channel from the low nibble of a byte
    pub const fn from_nibble(byte: u8) -> Self {
        use Channel::*;
        match byte & 0x0F {
            0 => One,
            1 => Two,
            2 => Three,
            3 => Four,
            4 => Five,
            5 => Six,
            6 => Seven,
            7 => Eight,
            8 => Nine,
            9 => Ten,
            10 => Eleven,
            11 => Twelve,
            12 => Thirteen,
            13 => Fourteen,
            14 => Fifteen,
            _ => Sixteen,
        }
    }

    /// The transmitted channel number, `0`-`15`
    pub const fn index(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.index(), f)
    }
}

#[test]
fn channel_nibbles() {
    assert_eq!(Channel::from_nibble(0x90), Channel::One);
    assert_eq!(Channel::from_nibble(0x9F), Channel::Sixteen);
    assert_eq!(Channel::from_nibble(0xB9).index(), 9);
}
