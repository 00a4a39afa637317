//! Note and interval accidentals, from triple flat up to double sharp.

use std::fmt::Display;

use crate::error::Error;
use crate::semitone::{AccidentalKind, Semitone};

// -------------------------------------------------------------------------------------------------

/// A pitch alteration of up to three half-steps down or two up.
///
/// `Natural` is numerically a unison, like `None`, but stays a distinct
/// value: an explicit natural sign is printed (and parsed) as `♮` while the
/// absence of an accidental is the empty string.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Accidental {
    TripleFlat,
    DoubleFlat,
    Flat,
    #[default]
    None,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// The 7 canonical accidentals.
    pub const VALUES: [Accidental; 7] = [
        Self::TripleFlat,
        Self::DoubleFlat,
        Self::Flat,
        Self::None,
        Self::Natural,
        Self::Sharp,
        Self::DoubleSharp,
    ];

    /// Alteration as a signed semitone distance (`Natural` is a unison).
    pub const fn semitones(self) -> Semitone {
        Semitone::new(self.distance())
    }

    /// Alteration in half-steps, in [-3, 2].
    pub const fn distance(self) -> i8 {
        match self {
            Self::TripleFlat => -3,
            Self::DoubleFlat => -2,
            Self::Flat => -1,
            Self::None | Self::Natural => 0,
            Self::Sharp => 1,
            Self::DoubleSharp => 2,
        }
    }

    /// The accidental for a signed half-step alteration.
    ///
    /// A zero distance maps to `None`, never to `Natural`; distances outside
    /// [-3, 2] fail.
    pub fn from_semitones<S: Into<Semitone>>(semitones: S) -> Result<Self, Error> {
        match semitones.into().distance() {
            -3 => Ok(Self::TripleFlat),
            -2 => Ok(Self::DoubleFlat),
            -1 => Ok(Self::Flat),
            0 => Ok(Self::None),
            1 => Ok(Self::Sharp),
            2 => Ok(Self::DoubleSharp),
            d => Err(Error::AccidentalOutOfRange(d as i32)),
        }
    }

    /// Whether the alteration lowers or raises, or `None` when it does neither.
    pub const fn kind(self) -> Option<AccidentalKind> {
        self.semitones().direction()
    }

    /// The accidental raised by one half-step. Fails past `DoubleSharp`.
    pub fn raised(self) -> Result<Self, Error> {
        Self::from_semitones(self.distance() + 1)
    }

    /// The accidental lowered by one half-step. Fails past `TripleFlat`.
    pub fn lowered(self) -> Result<Self, Error> {
        Self::from_semitones(self.distance() - 1)
    }

    /// The alteration in the opposite direction.
    ///
    /// `Natural` inverts to `None`; `TripleFlat` has no representable
    /// inversion and fails.
    pub fn inverted(self) -> Result<Self, Error> {
        Self::from_semitones(-self.distance())
    }

    /// The sum of two alterations, if it stays representable.
    pub fn checked_add(self, other: Self) -> Result<Self, Error> {
        Self::from_semitones(self.distance() + other.distance())
    }
}

/// The single-step alteration for a direction: `b` or `#`.
impl From<AccidentalKind> for Accidental {
    fn from(kind: AccidentalKind) -> Self {
        match kind {
            AccidentalKind::Flat => Self::Flat,
            AccidentalKind::Sharp => Self::Sharp,
        }
    }
}

impl TryFrom<&str> for Accidental {
    type Error = Error;

    /// Try converting the given string to an accidental.
    ///
    /// Recognizes the ASCII forms (`bbb`, `bb`, `b`, the empty string, `#`,
    /// `S`, `x`) and the equivalent Unicode glyph runs, plus the explicit
    /// natural sign `♮` which is distinct from the empty string.
    fn try_from(s: &str) -> Result<Self, Error> {
        match s {
            "bbb" | "\u{266D}\u{266D}\u{266D}" => Ok(Self::TripleFlat),
            "bb" | "\u{266D}\u{266D}" => Ok(Self::DoubleFlat),
            "b" | "\u{266D}" => Ok(Self::Flat),
            "" => Ok(Self::None),
            "\u{266E}" => Ok(Self::Natural),
            "#" | "\u{266F}" | "S" => Ok(Self::Sharp),
            "x" | "\u{266F}\u{266F}" => Ok(Self::DoubleSharp),
            _ => Err(Error::InvalidAccidental(s.to_string())),
        }
    }
}

impl Display for Accidental {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::TripleFlat => "bbb",
            Self::DoubleFlat => "bb",
            Self::Flat => "b",
            Self::None => "",
            Self::Natural => "\u{266E}",
            Self::Sharp => "#",
            Self::DoubleSharp => "x",
        };
        write!(f, "{}", symbol)
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn string_round_trip() {
        for accidental in Accidental::VALUES {
            assert_eq!(
                Accidental::try_from(accidental.to_string().as_str()),
                Ok(accidental)
            );
        }
    }

    #[test]
    fn parse_alternate_symbols() {
        assert_eq!(Accidental::try_from("\u{266D}"), Ok(Accidental::Flat));
        assert_eq!(
            Accidental::try_from("\u{266D}\u{266D}"),
            Ok(Accidental::DoubleFlat)
        );
        assert_eq!(Accidental::try_from("\u{266F}"), Ok(Accidental::Sharp));
        assert_eq!(Accidental::try_from("S"), Ok(Accidental::Sharp));
        assert_eq!(
            Accidental::try_from("\u{266F}\u{266F}"),
            Ok(Accidental::DoubleSharp)
        );
        assert!(Accidental::try_from("n").is_err());
        assert!(Accidental::try_from("##").is_err());
    }

    #[test]
    fn natural_is_not_none() {
        assert_ne!(Accidental::Natural, Accidental::None);
        assert_eq!(Accidental::Natural.distance(), Accidental::None.distance());
        assert_eq!(Accidental::Natural.to_string(), "\u{266E}");
        assert_eq!(Accidental::None.to_string(), "");
    }

    #[test]
    fn arithmetic_bounds() {
        assert_eq!(Accidental::Flat.raised(), Ok(Accidental::None));
        assert_eq!(Accidental::Natural.raised(), Ok(Accidental::Sharp));
        assert_eq!(Accidental::Sharp.raised(), Ok(Accidental::DoubleSharp));
        assert_eq!(
            Accidental::DoubleSharp.raised(),
            Err(Error::AccidentalOutOfRange(3))
        );
        assert_eq!(
            Accidental::TripleFlat.lowered(),
            Err(Error::AccidentalOutOfRange(-4))
        );
    }

    #[test]
    fn inversion() {
        assert_eq!(Accidental::Flat.inverted(), Ok(Accidental::Sharp));
        assert_eq!(Accidental::DoubleSharp.inverted(), Ok(Accidental::DoubleFlat));
        assert_eq!(Accidental::Natural.inverted(), Ok(Accidental::None));
        assert!(Accidental::TripleFlat.inverted().is_err());
    }

    #[test]
    fn addition() {
        assert_eq!(
            Accidental::Flat.checked_add(Accidental::Flat),
            Ok(Accidental::DoubleFlat)
        );
        assert_eq!(
            Accidental::Sharp.checked_add(Accidental::Flat),
            Ok(Accidental::None)
        );
        assert!(Accidental::DoubleSharp
            .checked_add(Accidental::Sharp)
            .is_err());
    }

    #[test]
    fn from_direction() {
        assert_eq!(Accidental::from(AccidentalKind::Flat), Accidental::Flat);
        assert_eq!(Accidental::from(AccidentalKind::Sharp), Accidental::Sharp);
    }
}
