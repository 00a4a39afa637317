//! Signed semitone distances, the arithmetic substrate for all interval math.

use std::fmt::Display;
use std::ops::{Add, Neg, Sub};

use derive_more::{From, Into};

use crate::error::Error;

// -------------------------------------------------------------------------------------------------

/// The accidental kind: whether an alteration lowers or raises a pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccidentalKind {
    Flat,
    Sharp,
}

// -------------------------------------------------------------------------------------------------

/// A signed pitch distance in half-steps.
///
/// Equality and ordering are by numeric distance only. All other theory
/// values (accidentals, intervals, scale steps) resolve to this type when
/// they are measured rather than named.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct Semitone(i8);

impl Semitone {
    /// No distance at all.
    pub const UNISON: Semitone = Semitone(0);
    /// A half-step.
    pub const HALF: Semitone = Semitone(1);
    /// A whole step.
    pub const WHOLE: Semitone = Semitone(2);

    pub const fn new(distance: i8) -> Self {
        Self(distance)
    }

    /// Signed distance in half-steps.
    pub const fn distance(self) -> i8 {
        self.0
    }

    /// Absolute distance in half-steps.
    pub const fn abs_distance(self) -> i8 {
        self.0.abs()
    }

    /// Direction of the distance, or `None` for a unison.
    pub const fn direction(self) -> Option<AccidentalKind> {
        if self.0 == 0 {
            None
        } else if self.0 < 0 {
            Some(AccidentalKind::Flat)
        } else {
            Some(AccidentalKind::Sharp)
        }
    }

    /// True if the distance stays below one octave.
    pub const fn is_simple(self) -> bool {
        self.0.abs() < 12
    }

    /// True if the distance spans one octave or more.
    pub const fn is_compound(self) -> bool {
        self.0.abs() >= 12
    }

    /// The distance folded into a single octave.
    pub const fn simple(self) -> Semitone {
        Semitone(self.0 % 12)
    }

    /// Number of whole octaves the distance spans.
    pub const fn octaves(self) -> i8 {
        self.0 / 12
    }

    /// The same distance in the opposite direction.
    pub const fn inverted(self) -> Semitone {
        Semitone(-self.0)
    }
}

impl Add for Semitone {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Semitone(self.0 + rhs.0)
    }
}

impl Sub for Semitone {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Semitone(self.0 - rhs.0)
    }
}

impl Neg for Semitone {
    type Output = Self;
    fn neg(self) -> Self {
        self.inverted()
    }
}

impl Display for Semitone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Semitone {
    type Error = Error;

    /// Try converting the given string to a semitone distance.
    fn try_from(s: &str) -> Result<Self, Error> {
        s.trim()
            .parse::<i8>()
            .map(Semitone)
            .map_err(|_| Error::InvalidSemitones(s.to_string()))
    }
}

// --------------------------------------------------------------------------------------------------
