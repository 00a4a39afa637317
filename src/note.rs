//! Diatonically spelled notes: a letter with an accidental.

use std::collections::HashMap;
use std::fmt::Display;
use std::ops::Sub;

use lazy_static::lazy_static;

use crate::accidental::Accidental;
use crate::error::Error;
use crate::semitone::Semitone;

// -------------------------------------------------------------------------------------------------

/// One of the 7 diatonic note letters, valued at its natural semitone
/// distance from C.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteLetter {
    C = 0,
    D = 2,
    E = 4,
    F = 5,
    G = 7,
    A = 9,
    B = 11,
}

impl NoteLetter {
    /// The letters in ascending order from C.
    pub const VALUES: [NoteLetter; 7] = [
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::A,
        Self::B,
    ];

    /// Natural semitone distance from C.
    pub const fn semitones_from_c(self) -> Semitone {
        Semitone::new(self as i8)
    }

    /// 0-based position in letter order (C = 0 .. B = 6).
    pub const fn index(self) -> usize {
        match self {
            Self::C => 0,
            Self::D => 1,
            Self::E => 2,
            Self::F => 3,
            Self::G => 4,
            Self::A => 5,
            Self::B => 6,
        }
    }

    pub const fn from_index(index: usize) -> Self {
        Self::VALUES[index % 7]
    }

    /// The next letter up, wrapping from B back to C.
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Ascending natural distance to another letter (B to C is one
    /// half-step, not eleven down).
    pub fn natural_distance_to(self, other: NoteLetter) -> Semitone {
        Semitone::new((other as i8 - self as i8).rem_euclid(12))
    }
}

impl TryFrom<char> for NoteLetter {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Error> {
        match c.to_ascii_uppercase() {
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            'E' => Ok(Self::E),
            'F' => Ok(Self::F),
            'G' => Ok(Self::G),
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            _ => Err(Error::InvalidNote(c.to_string())),
        }
    }
}

impl Display for NoteLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::A => "A",
            Self::B => "B",
        };
        write!(f, "{}", letter)
    }
}

// -------------------------------------------------------------------------------------------------

/// A pitch class with a diatonic spelling: a letter plus an accidental.
///
/// Equality is by the (letter, accidental) pair; differently spelled notes
/// of the same pitch class are enharmonic, not equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    letter: NoteLetter,
    accidental: Accidental,
}

impl Note {
    pub const C: Note = Note::natural(NoteLetter::C);
    pub const D: Note = Note::natural(NoteLetter::D);
    pub const E: Note = Note::natural(NoteLetter::E);
    pub const F: Note = Note::natural(NoteLetter::F);
    pub const G: Note = Note::natural(NoteLetter::G);
    pub const A: Note = Note::natural(NoteLetter::A);
    pub const B: Note = Note::natural(NoteLetter::B);
    pub const C_SHARP: Note = Note::new(NoteLetter::C, Accidental::Sharp);
    pub const D_SHARP: Note = Note::new(NoteLetter::D, Accidental::Sharp);
    pub const F_SHARP: Note = Note::new(NoteLetter::F, Accidental::Sharp);
    pub const G_SHARP: Note = Note::new(NoteLetter::G, Accidental::Sharp);
    pub const A_SHARP: Note = Note::new(NoteLetter::A, Accidental::Sharp);
    pub const D_FLAT: Note = Note::new(NoteLetter::D, Accidental::Flat);
    pub const E_FLAT: Note = Note::new(NoteLetter::E, Accidental::Flat);
    pub const G_FLAT: Note = Note::new(NoteLetter::G, Accidental::Flat);
    pub const A_FLAT: Note = Note::new(NoteLetter::A, Accidental::Flat);
    pub const B_FLAT: Note = Note::new(NoteLetter::B, Accidental::Flat);

    pub const fn new(letter: NoteLetter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    /// The unaccidented note for a letter.
    pub const fn natural(letter: NoteLetter) -> Self {
        Self::new(letter, Accidental::None)
    }

    pub const fn letter(&self) -> NoteLetter {
        self.letter
    }

    pub const fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// Signed semitone distance from C: the letter's natural distance plus
    /// the alteration (Cb is -1, B# is 12).
    pub const fn distance_from_c(&self) -> Semitone {
        Semitone::new(self.letter.semitones_from_c().distance() + self.accidental.distance())
    }

    /// The note's pitch class in [0, 11].
    pub fn pitch_class(&self) -> u8 {
        self.distance_from_c().distance().rem_euclid(12) as u8
    }

    /// True if both notes resolve to the same pitch class, regardless of
    /// spelling.
    pub fn is_enharmonic_with(&self, other: &Note) -> bool {
        self.pitch_class() == other.pitch_class()
    }

    /// All differently spelled notes of this note's pitch class, over one
    /// octave of letters and all 7 accidentals.
    pub fn enharmonics(&self) -> Vec<Note> {
        ENHARMONICS
            .get(&self.pitch_class())
            .map(|notes| {
                notes
                    .iter()
                    .filter(|note| *note != self)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The note with an accidental added on top of its own. Fails when the
    /// sum leaves the accidental range.
    pub fn altered(&self, accidental: Accidental) -> Result<Note, Error> {
        Ok(Note::new(
            self.letter,
            self.accidental.checked_add(accidental)?,
        ))
    }
}

lazy_static! {
    /// Note spellings per pitch class.
    static ref ENHARMONICS: HashMap<u8, Vec<Note>> = {
        let mut lookup: HashMap<u8, Vec<Note>> = HashMap::new();
        for letter in NoteLetter::VALUES {
            for accidental in Accidental::VALUES {
                let note = Note::new(letter, accidental);
                lookup.entry(note.pitch_class()).or_default().push(note);
            }
        }
        lookup
    };
}

/// Ascending pitch class distance between two notes, normalized to [0, 11].
impl Sub for Note {
    type Output = Semitone;

    fn sub(self, rhs: Note) -> Semitone {
        let distance = self.distance_from_c() - rhs.distance_from_c();
        Semitone::new(distance.distance().rem_euclid(12))
    }
}

impl TryFrom<&str> for Note {
    type Error = Error;

    /// Try converting the given string to a note: one letter A..G followed
    /// by an optional accidental symbol (e.g. "Bb", "F#", "Ebb").
    fn try_from(s: &str) -> Result<Self, Error> {
        let mut chars = s.trim().chars();
        let letter = chars
            .next()
            .ok_or_else(|| Error::InvalidNote(s.to_string()))
            .and_then(NoteLetter::try_from)
            .map_err(|_| Error::InvalidNote(s.to_string()))?;
        let accidental = Accidental::try_from(chars.as_str())
            .map_err(|_| Error::InvalidNote(s.to_string()))?;
        Ok(Note::new(letter, accidental))
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental)
    }
}

// --------------------------------------------------------------------------------------------------
