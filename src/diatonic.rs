//! Diatonic interval degrees over a two-octave range.

use std::fmt::Display;

use crate::error::Error;
use crate::semitone::Semitone;

// -------------------------------------------------------------------------------------------------

/// Semitone distance of each degree, taken from the major scale's cumulative
/// step pattern over two octaves.
const DEGREE_SEMITONES: [i8; 14] = [0, 2, 4, 5, 7, 9, 11, 12, 14, 16, 17, 19, 21, 23];

// -------------------------------------------------------------------------------------------------

/// A diatonic scale degree, from a unison up to a fourteenth.
///
/// Degrees count in their own 1-based numeric space, independent from
/// semitones; `semitones` converts through the major-scale step table.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiatonicInterval {
    Unison = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
    Fifth = 5,
    Sixth = 6,
    Seventh = 7,
    Octave = 8,
    Ninth = 9,
    Tenth = 10,
    Eleventh = 11,
    Twelfth = 12,
    Thirteenth = 13,
    Fourteenth = 14,
}

impl DiatonicInterval {
    /// All degrees within one octave.
    pub const ONE_OCTAVE: [DiatonicInterval; 7] = [
        Self::Unison,
        Self::Second,
        Self::Third,
        Self::Fourth,
        Self::Fifth,
        Self::Sixth,
        Self::Seventh,
    ];

    /// All degrees over the full two-octave range.
    pub const TWO_OCTAVES: [DiatonicInterval; 14] = [
        Self::Unison,
        Self::Second,
        Self::Third,
        Self::Fourth,
        Self::Fifth,
        Self::Sixth,
        Self::Seventh,
        Self::Octave,
        Self::Ninth,
        Self::Tenth,
        Self::Eleventh,
        Self::Twelfth,
        Self::Thirteenth,
        Self::Fourteenth,
    ];

    /// The degree for a 1-based number in [1, 14].
    pub fn from_number(number: u8) -> Result<Self, Error> {
        match number {
            n @ 1..=14 => Ok(Self::TWO_OCTAVES[n as usize - 1]),
            n => Err(Error::DegreeOutOfRange(n as i32)),
        }
    }

    /// 1-based degree number as written (2nd = 2, 9th = 9, ...).
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// 0-based position in the two-octave degree space.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Semitone distance of the unaltered degree.
    pub const fn semitones(self) -> Semitone {
        Semitone::new(DEGREE_SEMITONES[self.index()])
    }

    /// The corresponding degree within one octave.
    pub const fn to_simple(self) -> Self {
        Self::TWO_OCTAVES[self.index() % 7]
    }

    /// The corresponding degree in the second octave.
    pub const fn to_compound(self) -> Self {
        Self::TWO_OCTAVES[self.index() % 7 + 7]
    }

    /// The interval inversion of the degree.
    ///
    /// Unisons and octaves invert onto themselves; simple degrees invert
    /// within the first octave (a second becomes a seventh), compound
    /// degrees within the second.
    pub const fn to_inversion(self) -> Self {
        let index = self.index();
        let simple = index % 7;
        if simple == 0 {
            return self;
        }
        if index > 7 {
            Self::TWO_OCTAVES[14 - simple]
        } else {
            Self::TWO_OCTAVES[7 - index]
        }
    }

    /// The next degree up. Fails past `Fourteenth`.
    pub fn raised(self) -> Result<Self, Error> {
        Self::from_number(self.number() + 1)
    }

    /// The next degree down. Fails past `Unison`.
    pub fn lowered(self) -> Result<Self, Error> {
        Self::from_number(self.number() - 1)
    }
}

impl TryFrom<&str> for DiatonicInterval {
    type Error = Error;

    /// Try converting the given string to a degree, ignoring any non-digit
    /// characters around the degree number.
    fn try_from(s: &str) -> Result<Self, Error> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        let number = digits
            .parse::<u8>()
            .map_err(|_| Error::InvalidInterval(s.to_string()))?;
        Self::from_number(number)
    }
}

impl Display for DiatonicInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn degree_semitones() {
        assert_eq!(DiatonicInterval::Unison.semitones(), Semitone::UNISON);
        assert_eq!(DiatonicInterval::Third.semitones(), Semitone::new(4));
        assert_eq!(DiatonicInterval::Octave.semitones(), Semitone::new(12));
        assert_eq!(DiatonicInterval::Ninth.semitones(), Semitone::new(14));
        assert_eq!(DiatonicInterval::Fourteenth.semitones(), Semitone::new(23));
    }

    #[test]
    fn simple_and_compound() {
        assert_eq!(
            DiatonicInterval::Ninth.to_simple(),
            DiatonicInterval::Second
        );
        assert_eq!(
            DiatonicInterval::Octave.to_simple(),
            DiatonicInterval::Unison
        );
        assert_eq!(
            DiatonicInterval::Second.to_compound(),
            DiatonicInterval::Ninth
        );
        assert_eq!(
            DiatonicInterval::Tenth.to_compound(),
            DiatonicInterval::Tenth
        );
    }

    #[test]
    fn inversion() {
        assert_eq!(
            DiatonicInterval::Unison.to_inversion(),
            DiatonicInterval::Unison
        );
        assert_eq!(
            DiatonicInterval::Octave.to_inversion(),
            DiatonicInterval::Octave
        );
        assert_eq!(
            DiatonicInterval::Second.to_inversion(),
            DiatonicInterval::Seventh
        );
        assert_eq!(
            DiatonicInterval::Fourth.to_inversion(),
            DiatonicInterval::Fifth
        );
        assert_eq!(
            DiatonicInterval::Ninth.to_inversion(),
            DiatonicInterval::Fourteenth
        );
        assert_eq!(
            DiatonicInterval::Twelfth.to_inversion(),
            DiatonicInterval::Eleventh
        );
    }

    #[test]
    fn stepping_bounds() {
        assert_eq!(
            DiatonicInterval::Unison.raised(),
            Ok(DiatonicInterval::Second)
        );
        assert!(DiatonicInterval::Fourteenth.raised().is_err());
        assert!(DiatonicInterval::Unison.lowered().is_err());
    }

    #[test]
    fn string_conversion() {
        assert_eq!(DiatonicInterval::try_from("3"), Ok(DiatonicInterval::Third));
        assert_eq!(
            DiatonicInterval::try_from("(11)"),
            Ok(DiatonicInterval::Eleventh)
        );
        assert!(DiatonicInterval::try_from("0").is_err());
        assert!(DiatonicInterval::try_from("15").is_err());
        assert!(DiatonicInterval::try_from("x").is_err());
    }
}
