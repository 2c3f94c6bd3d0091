use alloc::string::{String, ToString};
use core::fmt;

use crate::{DataByte, ProtocolError};

#[doc = r#"
Identifies the pitch of a note message.

Notes are interpeted as a 7-bit number.

Each value corresponds to some [`Key`] and [`Octave`].

[`Note`] `0` is `C-1`, [`Note`] `60` is middle C (`C4`), and [`Note`] `127` is `G9`.

# Example
```rust
# use smfdump::prelude::*;

let note = Note::from_databyte(63u8).unwrap(); // 63 is between 0-127

assert_eq!(note.key(), Key::DSharp);
assert_eq!(note.octave(), Octave::new(4));
assert_eq!(note.to_string(), "D#4");
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note(DataByte);

impl Note {
    /// Create a new note.
    ///
    /// Checks for correctness (leading 0 bit).
    pub fn from_databyte<B>(rep: B) -> Result<Self, ProtocolError>
    where
        B: TryInto<DataByte, Error = ProtocolError>,
    {
        rep.try_into().map(Self)
    }

    /// Create a note from an already validated data byte
    pub const fn new(byte: DataByte) -> Self {
        Self(byte)
    }

    /// Identifies the key of the note pressed
    #[inline]
    pub const fn key(&self) -> Key {
        Key::from_data_byte(&self.0)
    }

    /// Identifies the octave of the note pressed
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave::from_data_byte(&self.0)
    }

    /// Returns the underlying byte of the note
    pub const fn byte(&self) -> u8 {
        self.0.0
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key(), self.octave())
    }
}

/// Name a MIDI note number, e.g. `60` is `"C4"`.
///
/// # Panics
/// if `note` is above 127.
pub fn name_of(note: u8) -> String {
    match Note::from_databyte(note) {
        Ok(note) => note.to_string(),
        Err(_) => panic!("note number {note} is outside of 0-127"),
    }
}

#[test]
fn names() {
    assert_eq!(name_of(60), "C4");
    assert_eq!(name_of(69), "A4");
    assert_eq!(name_of(0), "C-1");
    assert_eq!(name_of(127), "G9");
    assert_eq!(name_of(61), "C#4");
}

#[test]
#[should_panic]
fn name_out_of_range() {
    name_of(128);
}

#[test]
fn test_note() {
    let c = Note::from_databyte(12u8).unwrap();

    assert_eq!(Key::C, c.key());

    let a_sharp = Note::from_databyte(94u8).unwrap();
    assert_eq!(Key::ASharp, a_sharp.key());
}

#[test]
fn test_octave() {
    let c = Note::from_databyte(12u8).unwrap();

    assert_eq!(0, c.octave().value());

    let a_sharp = Note::from_databyte(94u8).unwrap();
    assert_eq!(6, a_sharp.octave().value());
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[doc = r#"
The pitch class of a [`Note`]
"#]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}
impl Key {
    /// Returns an array beginning with [`Key::C`] to [`Key::B`]
    pub fn all() -> [Key; 12] {
        use Key::*;
        [C, CSharp, D, DSharp, E, F, FSharp, G, GSharp, A, ASharp, B]
    }

    /// Returns true if the key is sharp
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        use Key::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }

    /// Identify the key from a note byte.
    #[inline]
    pub const fn from_data_byte(key: &DataByte) -> Self {
        use Key::*;
        match key.value() % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }

    /// The name used in note labels
    pub const fn name(&self) -> &'static str {
        use Key::*;
        match self {
            C => "C",
            CSharp => "C#",
            D => "D",
            DSharp => "D#",
            E => "E",
            F => "F",
            FSharp => "F#",
            G => "G",
            GSharp => "G#",
            A => "A",
            ASharp => "A#",
            B => "B",
        }
    }
}
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[doc = r#"
Identifies the octave of a [`Note`]. Values range from -1 to 9.
"#]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Octave(i8);

impl Octave {
    /// Identify an octave from a note byte.
    pub const fn from_data_byte(key: &DataByte) -> Self {
        let octave = key.value() / 12;

        Self(octave as i8 - 1)
    }
    /// Should be a value between [-1, 9]. Clamps between these two values.
    pub const fn new(mut octave: i8) -> Self {
        if octave < -1 {
            octave = -1
        } else if octave > 9 {
            octave = 9;
        }
        Self(octave)
    }

    /// The octave, from `[-1,9]`
    pub const fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[test]
fn every_note_has_a_label() {
    for byte in 0..128u8 {
        let note = Note::from_databyte(byte).unwrap();
        let label = note.to_string();
        assert!(label.starts_with(note.key().name()));
        assert!(label.ends_with(&note.octave().to_string()));
    }
}
