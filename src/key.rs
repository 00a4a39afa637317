//! Keys and key signatures over the circle of fifths.

use std::collections::HashMap;
use std::fmt::Display;

use lazy_static::lazy_static;

use crate::accidental::Accidental;
use crate::diatonic::DiatonicInterval;
use crate::error::Error;
use crate::interval::Interval;
use crate::note::Note;
use crate::scale::ScaleDefinition;
use crate::semitone::AccidentalKind;

// -------------------------------------------------------------------------------------------------

/// Major keys, valued at their signed accidental count (negative flats,
/// positive sharps).
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorKey {
    CFlat = -7,
    GFlat = -6,
    DFlat = -5,
    AFlat = -4,
    EFlat = -3,
    BFlat = -2,
    F = -1,
    C = 0,
    G = 1,
    D = 2,
    A = 3,
    E = 4,
    B = 5,
    FSharp = 6,
    CSharp = 7,
}

impl MajorKey {
    /// The keys in circle-of-fifths order, from 7 flats to 7 sharps.
    pub const VALUES: [MajorKey; 15] = [
        Self::CFlat,
        Self::GFlat,
        Self::DFlat,
        Self::AFlat,
        Self::EFlat,
        Self::BFlat,
        Self::F,
        Self::C,
        Self::G,
        Self::D,
        Self::A,
        Self::E,
        Self::B,
        Self::FSharp,
        Self::CSharp,
    ];

    /// Signed accidental count of the key signature.
    pub const fn accidentals(self) -> i8 {
        self as i8
    }

    /// The key for a signed accidental count in [-7, 7].
    pub fn from_accidentals(count: i8) -> Result<Self, Error> {
        match count {
            -7..=7 => Ok(Self::VALUES[(count + 7) as usize]),
            count => Err(Error::KeySignatureOutOfRange(count as i32)),
        }
    }

    /// Display name of the key (e.g. "Bb", "F#").
    pub fn name(self) -> &'static str {
        match self {
            Self::CFlat => "Cb",
            Self::GFlat => "Gb",
            Self::DFlat => "Db",
            Self::AFlat => "Ab",
            Self::EFlat => "Eb",
            Self::BFlat => "Bb",
            Self::F => "F",
            Self::C => "C",
            Self::G => "G",
            Self::D => "D",
            Self::A => "A",
            Self::E => "E",
            Self::B => "B",
            Self::FSharp => "F#",
            Self::CSharp => "C#",
        }
    }

    /// The key's tonic note.
    pub fn root(self) -> Note {
        MAJOR_ROOTS[&self]
    }

    /// The key whose tonic is the given note, when there is one.
    pub fn from_root(root: Note) -> Option<Self> {
        Self::VALUES.iter().copied().find(|key| key.root() == root)
    }
}

impl TryFrom<&str> for MajorKey {
    type Error = Error;

    /// Try converting a case-insensitive key name (e.g. "Bb", "f#").
    fn try_from(s: &str) -> Result<Self, Error> {
        let name = s.trim();
        Self::VALUES
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownKey(s.to_string()))
    }
}

impl Display for MajorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// -------------------------------------------------------------------------------------------------

/// Minor keys, valued at the signed accidental count of their relative
/// major's signature.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinorKey {
    AFlat = -7,
    EFlat = -6,
    BFlat = -5,
    F = -4,
    C = -3,
    G = -2,
    D = -1,
    A = 0,
    E = 1,
    B = 2,
    FSharp = 3,
    CSharp = 4,
    GSharp = 5,
    DSharp = 6,
    ASharp = 7,
}

impl MinorKey {
    /// The keys in circle-of-fifths order, from 7 flats to 7 sharps.
    pub const VALUES: [MinorKey; 15] = [
        Self::AFlat,
        Self::EFlat,
        Self::BFlat,
        Self::F,
        Self::C,
        Self::G,
        Self::D,
        Self::A,
        Self::E,
        Self::B,
        Self::FSharp,
        Self::CSharp,
        Self::GSharp,
        Self::DSharp,
        Self::ASharp,
    ];

    /// Signed accidental count of the key signature.
    pub const fn accidentals(self) -> i8 {
        self as i8
    }

    /// The key for a signed accidental count in [-7, 7].
    pub fn from_accidentals(count: i8) -> Result<Self, Error> {
        match count {
            -7..=7 => Ok(Self::VALUES[(count + 7) as usize]),
            count => Err(Error::KeySignatureOutOfRange(count as i32)),
        }
    }

    /// Display name of the key (e.g. "Bbm", "F#m").
    pub fn name(self) -> &'static str {
        match self {
            Self::AFlat => "Abm",
            Self::EFlat => "Ebm",
            Self::BFlat => "Bbm",
            Self::F => "Fm",
            Self::C => "Cm",
            Self::G => "Gm",
            Self::D => "Dm",
            Self::A => "Am",
            Self::E => "Em",
            Self::B => "Bm",
            Self::FSharp => "F#m",
            Self::CSharp => "C#m",
            Self::GSharp => "G#m",
            Self::DSharp => "D#m",
            Self::ASharp => "A#m",
        }
    }

    /// The key's tonic note.
    pub fn root(self) -> Note {
        MINOR_ROOTS[&self]
    }

    /// The key whose tonic is the given note, when there is one.
    pub fn from_root(root: Note) -> Option<Self> {
        Self::VALUES.iter().copied().find(|key| key.root() == root)
    }
}

impl TryFrom<&str> for MinorKey {
    type Error = Error;

    /// Try converting a case-insensitive key name (e.g. "Bbm", "f#m").
    fn try_from(s: &str) -> Result<Self, Error> {
        let name = s.trim();
        Self::VALUES
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownKey(s.to_string()))
    }
}

impl Display for MinorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// -------------------------------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyMode {
    #[default]
    Major,
    Minor,
}

// -------------------------------------------------------------------------------------------------

/// A key: a signed accidental count plus a major or minor mode.
///
/// The 7 diatonically spelled notes of every signature are computed once at
/// first use and shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    accidentals: i8,
    mode: KeyMode,
}

impl Key {
    /// A major-mode key for a signed accidental count in [-7, 7].
    pub fn new(accidentals: i8) -> Result<Self, Error> {
        if !(-7..=7).contains(&accidentals) {
            return Err(Error::KeySignatureOutOfRange(accidentals as i32));
        }
        Ok(Self {
            accidentals,
            mode: KeyMode::Major,
        })
    }

    pub fn major(key: MajorKey) -> Self {
        Self {
            accidentals: key.accidentals(),
            mode: KeyMode::Major,
        }
    }

    pub fn minor(key: MinorKey) -> Self {
        Self {
            accidentals: key.accidentals(),
            mode: KeyMode::Minor,
        }
    }

    /// Signed accidental count (negative flats, positive sharps).
    pub const fn accidentals(&self) -> i8 {
        self.accidentals
    }

    pub const fn mode(&self) -> KeyMode {
        self.mode
    }

    /// Whether the signature spells with sharps or flats. Signatures without
    /// accidentals count as sharp-side.
    pub const fn accidental_kind(&self) -> AccidentalKind {
        if self.accidentals >= 0 {
            AccidentalKind::Sharp
        } else {
            AccidentalKind::Flat
        }
    }

    /// The major key of this signature.
    pub fn major_key(&self) -> MajorKey {
        MajorKey::VALUES[(self.accidentals + 7) as usize]
    }

    /// The minor key of this signature.
    pub fn minor_key(&self) -> MinorKey {
        MinorKey::VALUES[(self.accidentals + 7) as usize]
    }

    /// The key's tonic note, per mode.
    pub fn root(&self) -> Note {
        match self.mode {
            KeyMode::Major => self.major_key().root(),
            KeyMode::Minor => self.minor_key().root(),
        }
    }

    /// The 7 diatonically spelled notes of the signature, each letter used
    /// exactly once, starting from the major tonic.
    pub fn notes(&self) -> &'static [Note; 7] {
        &KEY_NOTES[(self.accidentals + 7) as usize]
    }

    /// The conventionally spelled interval from the key's root to a note.
    ///
    /// The note's letter selects the key-spelled scale degree; the interval
    /// accidental is the difference from that spelling. In F major, B is an
    /// augmented fourth (`#4`), not a flat fifth.
    pub fn interval_from_root(&self, note: Note) -> Result<Interval, Error> {
        let notes = self.notes();
        let major_root = self.major_key().root();
        let spelled_index = (note.letter().index() + 7 - major_root.letter().index()) % 7;
        let key_note = notes[spelled_index];
        let root = self.root();
        let degree_offset = (note.letter().index() + 7 - root.letter().index()) % 7;
        let diatonic = DiatonicInterval::from_number(degree_offset as u8 + 1)?;
        let alteration = note.accidental().semitones() - key_note.accidental().semitones();
        let accidental = Accidental::from_semitones(alteration)?;
        Ok(Interval::new(diatonic, accidental))
    }
}

impl TryFrom<&str> for Key {
    type Error = Error;

    /// Try converting a case-insensitive key name, major ("Bb") or minor
    /// ("Bbm").
    fn try_from(s: &str) -> Result<Self, Error> {
        if let Ok(key) = MajorKey::try_from(s) {
            return Ok(Self::major(key));
        }
        MinorKey::try_from(s).map(Self::minor)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mode {
            KeyMode::Major => write!(f, "{}", self.major_key()),
            KeyMode::Minor => write!(f, "{}", self.minor_key()),
        }
    }
}

// -------------------------------------------------------------------------------------------------

lazy_static! {
    /// Major key tonics, parsed once from the key names.
    static ref MAJOR_ROOTS: HashMap<MajorKey, Note> = MajorKey::VALUES
        .iter()
        .map(|key| {
            let root = Note::try_from(key.name()).expect("parsable major key name");
            (*key, root)
        })
        .collect();

    /// Minor key tonics, parsed once from the key names without their
    /// trailing 'm'.
    static ref MINOR_ROOTS: HashMap<MinorKey, Note> = MinorKey::VALUES
        .iter()
        .map(|key| {
            let name = key.name().trim_end_matches('m');
            let root = Note::try_from(name).expect("parsable minor key name");
            (*key, root)
        })
        .collect();

    /// The spelled notes of all 15 signatures.
    static ref KEY_NOTES: [[Note; 7]; 15] = {
        let mut signatures = [[Note::C; 7]; 15];
        for key in MajorKey::VALUES {
            signatures[(key.accidentals() + 7) as usize] =
                spelled_notes(key.root()).expect("spellable key signature");
        }
        log::debug!("built note spellings for {} key signatures", signatures.len());
        signatures
    };
}

/// Spell the 7 notes of a signature: walk up the diatonic letters from the
/// root, correcting each letter's natural step to the major scale step.
fn spelled_notes(root: Note) -> Result<[Note; 7], Error> {
    let steps = ScaleDefinition::major().steps();
    let mut notes = [root; 7];
    for index in 1..7 {
        let previous = notes[index - 1];
        let letter = previous.letter().next();
        let natural = previous.letter().natural_distance_to(letter);
        let alteration = previous.accidental().semitones() + steps[index - 1] - natural;
        notes[index] = Note::new(letter, Accidental::from_semitones(alteration)?);
    }
    Ok(notes)
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::note::NoteLetter;

    fn note_names(notes: &[Note]) -> Vec<String> {
        notes.iter().map(Note::to_string).collect()
    }

    #[test]
    fn signature_range() {
        assert!(Key::new(0).is_ok());
        assert!(Key::new(-7).is_ok());
        assert!(Key::new(7).is_ok());
        assert_eq!(Key::new(8), Err(Error::KeySignatureOutOfRange(8)));
        assert_eq!(Key::new(-8), Err(Error::KeySignatureOutOfRange(-8)));
    }

    #[test]
    fn key_tags() {
        let key = Key::new(-2).unwrap();
        assert_eq!(key.major_key(), MajorKey::BFlat);
        assert_eq!(key.minor_key(), MinorKey::G);
        assert_eq!(key.accidental_kind(), AccidentalKind::Flat);
        assert_eq!(Key::new(0).unwrap().accidental_kind(), AccidentalKind::Sharp);
        assert_eq!(Key::major(MajorKey::BFlat).root(), Note::B_FLAT);
        assert_eq!(Key::minor(MinorKey::FSharp).root(), Note::F_SHARP);
    }

    #[test]
    fn roots_parse_from_names() {
        assert_eq!(MajorKey::CFlat.root().to_string(), "Cb");
        assert_eq!(MajorKey::FSharp.root(), Note::F_SHARP);
        assert_eq!(MinorKey::AFlat.root(), Note::A_FLAT);
        assert_eq!(MajorKey::from_root(Note::D), Some(MajorKey::D));
        assert_eq!(MajorKey::from_root(Note::D_SHARP), None);
    }

    #[test]
    fn reference_signatures() {
        assert_eq!(
            note_names(Key::new(0).unwrap().notes()),
            ["C", "D", "E", "F", "G", "A", "B"]
        );
        assert_eq!(
            note_names(Key::new(1).unwrap().notes()),
            ["G", "A", "B", "C", "D", "E", "F#"]
        );
        assert_eq!(
            note_names(Key::new(-1).unwrap().notes()),
            ["F", "G", "A", "Bb", "C", "D", "E"]
        );
        assert_eq!(
            note_names(Key::new(7).unwrap().notes()),
            ["C#", "D#", "E#", "F#", "G#", "A#", "B#"]
        );
        assert_eq!(
            note_names(Key::new(-7).unwrap().notes()),
            ["Cb", "Db", "Eb", "Fb", "Gb", "Ab", "Bb"]
        );
    }

    #[test]
    fn every_signature_uses_each_letter_once() {
        for accidentals in -7..=7 {
            let key = Key::new(accidentals).unwrap();
            let notes = key.notes();
            for letter in NoteLetter::VALUES {
                assert_eq!(
                    notes.iter().filter(|note| note.letter() == letter).count(),
                    1,
                    "letter {} in signature {}",
                    letter,
                    accidentals
                );
            }
            // The number of altered notes matches the signature.
            let altered = notes
                .iter()
                .filter(|note| note.accidental() != Accidental::None)
                .count();
            assert_eq!(altered, accidentals.unsigned_abs() as usize);
        }
    }

    #[test]
    fn interval_from_root() {
        let f_major = Key::major(MajorKey::F);
        assert_eq!(f_major.interval_from_root(Note::B), Ok(Interval::A4));
        assert_eq!(f_major.interval_from_root(Note::B_FLAT), Ok(Interval::P4));
        assert_eq!(f_major.interval_from_root(Note::F), Ok(Interval::P1));
        assert_eq!(f_major.interval_from_root(Note::E), Ok(Interval::M7));

        let c_major = Key::major(MajorKey::C);
        assert_eq!(c_major.interval_from_root(Note::E_FLAT), Ok(Interval::m3));
        assert_eq!(c_major.interval_from_root(Note::F_SHARP), Ok(Interval::A4));
        assert_eq!(c_major.interval_from_root(Note::G), Ok(Interval::P5));
    }

    #[test]
    fn interval_from_root_fails_outside_accidental_range() {
        // Against C# major's B#, a Bbbb would need a quadruple flat.
        let key = Key::major(MajorKey::CSharp);
        let note = Note::new(NoteLetter::B, Accidental::TripleFlat);
        assert!(key.interval_from_root(note).is_err());
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::try_from("Bb"), Ok(Key::major(MajorKey::BFlat)));
        assert_eq!(Key::try_from("f#"), Ok(Key::major(MajorKey::FSharp)));
        assert_eq!(Key::try_from("F#m"), Ok(Key::minor(MinorKey::FSharp)));
        assert_eq!(Key::try_from("am"), Ok(Key::minor(MinorKey::A)));
        assert!(Key::try_from("Hb").is_err());
        assert_eq!(Key::major(MajorKey::CSharp).to_string(), "C#");
        assert_eq!(Key::minor(MinorKey::DSharp).to_string(), "D#m");
    }
}
