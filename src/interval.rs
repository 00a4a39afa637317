//! Named chromatic intervals: a diatonic degree combined with an accidental.

use std::collections::HashMap;
use std::fmt::Display;

use lazy_static::lazy_static;

use crate::accidental::Accidental;
use crate::diatonic::DiatonicInterval;
use crate::error::Error;
use crate::semitone::{AccidentalKind, Semitone};

// -------------------------------------------------------------------------------------------------

/// Interval consonance, on a six-point scale from perfect dissonance to
/// perfect consonance.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Consonance {
    PerfectDissonance = -3,
    MediocreDissonance = -2,
    ImperfectDissonance = -1,
    ImperfectConsonance = 1,
    MediocreConsonance = 2,
    PerfectConsonance = 3,
}

impl Consonance {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::PerfectDissonance => "---",
            Self::MediocreDissonance => "--",
            Self::ImperfectDissonance => "-",
            Self::ImperfectConsonance => "+",
            Self::MediocreConsonance => "++",
            Self::PerfectConsonance => "+++",
        }
    }

    pub fn is_consonant(self) -> bool {
        self as i8 > 0
    }
}

impl Display for Consonance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Consonance per pitch class distance from the root.
const CONSONANCES: [Consonance; 12] = [
    Consonance::PerfectConsonance,   // 1
    Consonance::PerfectDissonance,   // b2
    Consonance::MediocreDissonance,  // 2
    Consonance::ImperfectConsonance, // b3
    Consonance::ImperfectConsonance, // 3
    Consonance::MediocreConsonance,  // 4
    Consonance::PerfectDissonance,   // #4
    Consonance::MediocreConsonance,  // 5
    Consonance::MediocreDissonance,  // b6
    Consonance::ImperfectDissonance, // 6
    Consonance::ImperfectDissonance, // b7
    Consonance::PerfectDissonance,   // 7
];

// -------------------------------------------------------------------------------------------------

/// A chromatic interval with a conventional spelling: a diatonic degree plus
/// an accidental (e.g. a minor third is a flattened third).
///
/// Equality is by the (degree, accidental) pair; two distinct spellings can
/// share a semitone distance without being equal (see
/// [`Interval::is_enharmonic_with`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    diatonic: DiatonicInterval,
    accidental: Accidental,
}

#[allow(non_upper_case_globals)]
impl Interval {
    pub const P1: Interval = Interval::new(DiatonicInterval::Unison, Accidental::None);
    pub const A1: Interval = Interval::new(DiatonicInterval::Unison, Accidental::Sharp);
    pub const m2: Interval = Interval::new(DiatonicInterval::Second, Accidental::Flat);
    pub const M2: Interval = Interval::new(DiatonicInterval::Second, Accidental::None);
    pub const A2: Interval = Interval::new(DiatonicInterval::Second, Accidental::Sharp);
    pub const d3: Interval = Interval::new(DiatonicInterval::Third, Accidental::DoubleFlat);
    pub const m3: Interval = Interval::new(DiatonicInterval::Third, Accidental::Flat);
    pub const M3: Interval = Interval::new(DiatonicInterval::Third, Accidental::None);
    pub const A3: Interval = Interval::new(DiatonicInterval::Third, Accidental::Sharp);
    pub const d4: Interval = Interval::new(DiatonicInterval::Fourth, Accidental::Flat);
    pub const P4: Interval = Interval::new(DiatonicInterval::Fourth, Accidental::None);
    pub const A4: Interval = Interval::new(DiatonicInterval::Fourth, Accidental::Sharp);
    pub const d5: Interval = Interval::new(DiatonicInterval::Fifth, Accidental::Flat);
    pub const P5: Interval = Interval::new(DiatonicInterval::Fifth, Accidental::None);
    pub const A5: Interval = Interval::new(DiatonicInterval::Fifth, Accidental::Sharp);
    pub const m6: Interval = Interval::new(DiatonicInterval::Sixth, Accidental::Flat);
    pub const M6: Interval = Interval::new(DiatonicInterval::Sixth, Accidental::None);
    pub const A6: Interval = Interval::new(DiatonicInterval::Sixth, Accidental::Sharp);
    pub const d7: Interval = Interval::new(DiatonicInterval::Seventh, Accidental::DoubleFlat);
    pub const m7: Interval = Interval::new(DiatonicInterval::Seventh, Accidental::Flat);
    pub const M7: Interval = Interval::new(DiatonicInterval::Seventh, Accidental::None);
    pub const P8: Interval = Interval::new(DiatonicInterval::Octave, Accidental::None);
    pub const m9: Interval = Interval::new(DiatonicInterval::Ninth, Accidental::Flat);
    pub const M9: Interval = Interval::new(DiatonicInterval::Ninth, Accidental::None);
    pub const A9: Interval = Interval::new(DiatonicInterval::Ninth, Accidental::Sharp);
    pub const m10: Interval = Interval::new(DiatonicInterval::Tenth, Accidental::Flat);
    pub const M10: Interval = Interval::new(DiatonicInterval::Tenth, Accidental::None);
    pub const P11: Interval = Interval::new(DiatonicInterval::Eleventh, Accidental::None);
    pub const A11: Interval = Interval::new(DiatonicInterval::Eleventh, Accidental::Sharp);
    pub const P12: Interval = Interval::new(DiatonicInterval::Twelfth, Accidental::None);
    pub const m13: Interval = Interval::new(DiatonicInterval::Thirteenth, Accidental::Flat);
    pub const M13: Interval = Interval::new(DiatonicInterval::Thirteenth, Accidental::None);
    pub const m14: Interval = Interval::new(DiatonicInterval::Fourteenth, Accidental::Flat);
    pub const M14: Interval = Interval::new(DiatonicInterval::Fourteenth, Accidental::None);
}

/// All named intervals, keyed by their constant name (e.g. "m3").
static NAMED: [(&str, Interval); 34] = [
    ("P1", Interval::P1),
    ("A1", Interval::A1),
    ("m2", Interval::m2),
    ("M2", Interval::M2),
    ("A2", Interval::A2),
    ("d3", Interval::d3),
    ("m3", Interval::m3),
    ("M3", Interval::M3),
    ("A3", Interval::A3),
    ("d4", Interval::d4),
    ("P4", Interval::P4),
    ("A4", Interval::A4),
    ("d5", Interval::d5),
    ("P5", Interval::P5),
    ("A5", Interval::A5),
    ("m6", Interval::m6),
    ("M6", Interval::M6),
    ("A6", Interval::A6),
    ("d7", Interval::d7),
    ("m7", Interval::m7),
    ("M7", Interval::M7),
    ("P8", Interval::P8),
    ("m9", Interval::m9),
    ("M9", Interval::M9),
    ("A9", Interval::A9),
    ("m10", Interval::m10),
    ("M10", Interval::M10),
    ("P11", Interval::P11),
    ("A11", Interval::A11),
    ("P12", Interval::P12),
    ("m13", Interval::m13),
    ("M13", Interval::M13),
    ("m14", Interval::m14),
    ("M14", Interval::M14),
];

lazy_static! {
    /// Named intervals by constant name (e.g. "m3").
    static ref BY_CONSTANT_NAME: HashMap<&'static str, Interval> =
        NAMED.iter().copied().collect();

    /// Named intervals by printable name (e.g. "b3").
    static ref BY_NAME: HashMap<String, Interval> = NAMED
        .iter()
        .map(|(_, interval)| (interval.to_string(), *interval))
        .collect();

    /// Full display names of the named intervals.
    static ref FULL_NAMES: HashMap<Interval, &'static str> = HashMap::from([
        (Interval::P1, "perfect unison"),
        (Interval::A1, "augmented unison"),
        (Interval::m2, "minor 2nd"),
        (Interval::M2, "major 2nd"),
        (Interval::A2, "augmented 2nd"),
        (Interval::m3, "minor 3rd"),
        (Interval::M3, "major 3rd"),
        (Interval::d4, "diminished 4th"),
        (Interval::P4, "perfect 4th"),
        (Interval::A4, "augmented 4th"),
        (Interval::d5, "diminished 5th"),
        (Interval::P5, "perfect 5th"),
        (Interval::A5, "augmented 5th"),
        (Interval::m6, "minor 6th"),
        (Interval::M6, "major 6th"),
        (Interval::A6, "augmented 6th"),
        (Interval::d7, "diminished 7th"),
        (Interval::m7, "minor 7th"),
        (Interval::M7, "major 7th"),
        (Interval::P8, "octave"),
        (Interval::m9, "minor 9th"),
        (Interval::M9, "major 9th"),
        (Interval::A9, "augmented 9th"),
        (Interval::M10, "major 10th"),
        (Interval::P11, "perfect 11th"),
        (Interval::A11, "augmented 11th"),
        (Interval::P12, "perfect 12th"),
        (Interval::m13, "minor 13th"),
        (Interval::M13, "major 13th"),
        (Interval::m14, "minor 14th"),
        (Interval::M14, "major 14th"),
    ]);

    /// Preferred flat-side spelling per semitone distance.
    static ref FLAT_BY_DISTANCE: HashMap<i8, Interval> =
        preferred_spellings(AccidentalKind::Flat);

    /// Preferred sharp-side spelling per semitone distance.
    static ref SHARP_BY_DISTANCE: HashMap<i8, Interval> =
        preferred_spellings(AccidentalKind::Sharp);

    /// All distinct spellings sharing a distance, over the full two-octave
    /// space of 14 degrees and 7 accidentals.
    static ref ENHARMONICS: HashMap<Interval, Vec<Interval>> = {
        let mut all = Vec::new();
        for diatonic in DiatonicInterval::TWO_OCTAVES {
            for accidental in Accidental::VALUES {
                all.push(Interval::new(diatonic, accidental));
            }
        }
        let mut lookup: HashMap<Interval, Vec<Interval>> = HashMap::new();
        for interval in &all {
            let enharmonics = all
                .iter()
                .filter(|other| interval.is_enharmonic_with(other) && *other != interval)
                .copied()
                .collect::<Vec<_>>();
            if !enharmonics.is_empty() {
                lookup.insert(*interval, enharmonics);
            }
        }
        log::debug!("built enharmonic interval lookup with {} entries", lookup.len());
        lookup
    };
}

/// Index the named intervals by distance for one accidental kind.
///
/// Candidates are the intervals with no accidental or a single-step
/// accidental of the requested kind; per distance the unaccidented spelling
/// wins, then the lowest (degree, accidental) spelling with the smallest
/// alteration.
fn preferred_spellings(kind: AccidentalKind) -> HashMap<i8, Interval> {
    let mut candidates = NAMED
        .iter()
        .map(|(_, interval)| *interval)
        .filter(|interval| {
            interval.accidental() == Accidental::None
                || (interval.accidental().kind() == Some(kind)
                    && interval.accidental().semitones().abs_distance() <= 1)
        })
        .collect::<Vec<_>>();
    candidates.sort_by_key(|interval| {
        (
            interval.accidental() != Accidental::None,
            *interval,
            interval.accidental().semitones().abs_distance(),
        )
    });
    let mut index = HashMap::new();
    for interval in candidates {
        index
            .entry(interval.semitones().distance())
            .or_insert(interval);
    }
    index
}

impl Interval {
    pub const fn new(diatonic: DiatonicInterval, accidental: Accidental) -> Self {
        Self {
            diatonic,
            accidental,
        }
    }

    pub const fn diatonic(&self) -> DiatonicInterval {
        self.diatonic
    }

    pub const fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// Semitone distance: the unaltered degree distance plus the alteration.
    pub const fn semitones(&self) -> Semitone {
        Semitone::new(self.diatonic.semitones().distance() + self.accidental.distance())
    }

    /// The printable name, accidental symbol first (e.g. "b3", "#11", "7").
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// The full display name (e.g. "minor 3rd"), when the interval is one of
    /// the named constants that carry one.
    pub fn full_name(&self) -> Option<&'static str> {
        FULL_NAMES.get(self).copied()
    }

    /// All named intervals.
    pub fn all() -> impl Iterator<Item = Interval> {
        NAMED.iter().map(|(_, interval)| *interval)
    }

    /// The preferred spelling of a distance for the requested accidental
    /// kind, or `None` when the two-octave tables carry no spelling for it.
    pub fn spelled(semitones: Semitone, kind: AccidentalKind) -> Option<Interval> {
        let index = match kind {
            AccidentalKind::Flat => &*FLAT_BY_DISTANCE,
            AccidentalKind::Sharp => &*SHARP_BY_DISTANCE,
        };
        index.get(&semitones.distance()).copied()
    }

    /// The preferred flat-side spelling of a distance (6 → b5).
    pub fn flat(semitones: Semitone) -> Option<Interval> {
        Self::spelled(semitones, AccidentalKind::Flat)
    }

    /// The preferred sharp-side spelling of a distance (6 → #4).
    pub fn sharp(semitones: Semitone) -> Option<Interval> {
        Self::spelled(semitones, AccidentalKind::Sharp)
    }

    /// True if both intervals resolve to the same semitone distance,
    /// regardless of spelling.
    pub fn is_enharmonic_with(&self, other: &Interval) -> bool {
        self.semitones() == other.semitones()
    }

    /// All distinct spellings of this interval's distance, excluding itself.
    pub fn enharmonics(&self) -> &'static [Interval] {
        ENHARMONICS
            .get(self)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Consonance of the interval's pitch class distance.
    pub fn consonance(&self) -> Consonance {
        CONSONANCES[(self.semitones().abs_distance() % 12) as usize]
    }

    /// The interval inversion: the degree inverts diatonically and the
    /// accidental flips. Fails when the flipped accidental is not
    /// representable (a triple flat).
    pub fn to_inversion(&self) -> Result<Interval, Error> {
        Ok(Interval::new(
            self.diatonic.to_inversion(),
            self.accidental.inverted()?,
        ))
    }

    /// The interval with its accidental raised one half-step. Fails past a
    /// double sharp.
    pub fn raised(&self) -> Result<Interval, Error> {
        Ok(Interval::new(self.diatonic, self.accidental.raised()?))
    }

    /// The interval with its accidental lowered one half-step. Fails past a
    /// triple flat.
    pub fn lowered(&self) -> Result<Interval, Error> {
        Ok(Interval::new(self.diatonic, self.accidental.lowered()?))
    }

    /// Parse a separated list of intervals (space, `,` or `;`).
    pub fn parse_list(s: &str) -> Result<Vec<Interval>, Error> {
        s.split([' ', ',', ';'])
            .filter(|part| !part.is_empty())
            .map(Interval::try_from)
            .collect()
    }
}

impl TryFrom<&str> for Interval {
    type Error = Error;

    /// Try converting the given string to an interval.
    ///
    /// Constant names ("m3") and printable names ("b3") resolve through the
    /// name tables; anything else is split into a leading accidental-symbol
    /// run and a trailing degree number and parsed part by part.
    /// Parentheses are stripped before parsing.
    fn try_from(s: &str) -> Result<Self, Error> {
        let cleaned = s.trim().replace(['(', ')'], "");
        if let Some(interval) = BY_CONSTANT_NAME.get(cleaned.as_str()) {
            return Ok(*interval);
        }
        if let Some(interval) = BY_NAME.get(cleaned.as_str()) {
            return Ok(*interval);
        }
        let digits_at = cleaned
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| Error::InvalidInterval(s.to_string()))?;
        let (accidental_part, degree_part) = cleaned.split_at(digits_at);
        if !degree_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidInterval(s.to_string()));
        }
        let accidental = Accidental::try_from(accidental_part)
            .map_err(|_| Error::InvalidInterval(s.to_string()))?;
        let diatonic = DiatonicInterval::try_from(degree_part)
            .map_err(|_| Error::InvalidInterval(s.to_string()))?;
        Ok(Interval::new(diatonic, accidental))
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.accidental, self.diatonic.number())
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn distances() {
        assert_eq!(Interval::P1.semitones(), Semitone::new(0));
        assert_eq!(Interval::m3.semitones(), Semitone::new(3));
        assert_eq!(Interval::A4.semitones(), Semitone::new(6));
        assert_eq!(Interval::d5.semitones(), Semitone::new(6));
        assert_eq!(Interval::P8.semitones(), Semitone::new(12));
        assert_eq!(Interval::m9.semitones(), Semitone::new(13));
        assert_eq!(Interval::M14.semitones(), Semitone::new(23));
    }

    #[test]
    fn name_round_trip() {
        for (constant_name, interval) in NAMED {
            assert_eq!(Interval::try_from(constant_name), Ok(interval));
            assert_eq!(
                Interval::try_from(interval.to_string().as_str()),
                Ok(interval)
            );
            assert_eq!(
                Interval::try_from(interval.to_string().as_str())
                    .unwrap()
                    .to_string(),
                interval.to_string()
            );
        }
    }

    #[test]
    fn parsing() {
        assert_eq!(Interval::try_from("b3"), Ok(Interval::m3));
        assert_eq!(Interval::try_from("#11"), Ok(Interval::A11));
        assert_eq!(Interval::try_from("7"), Ok(Interval::M7));
        assert_eq!(Interval::try_from("(b5)"), Ok(Interval::d5));
        assert_eq!(Interval::try_from("bb7"), Ok(Interval::d7));
        assert_eq!(
            Interval::try_from("\u{266D}3"),
            Ok(Interval::m3)
        );
        assert!(Interval::try_from("q3").is_err());
        assert!(Interval::try_from("b").is_err());
        assert!(Interval::try_from("15").is_err());
    }

    #[test]
    fn parse_list() {
        assert_eq!(
            Interval::parse_list("1 b3 5"),
            Ok(vec![Interval::P1, Interval::m3, Interval::P5])
        );
        assert_eq!(
            Interval::parse_list("1,3;5"),
            Ok(vec![Interval::P1, Interval::M3, Interval::P5])
        );
        assert!(Interval::parse_list("1 q3").is_err());
    }

    #[test]
    fn enharmonics() {
        assert!(Interval::m3.is_enharmonic_with(&Interval::A2));
        assert_ne!(Interval::m3, Interval::A2);
        assert!(Interval::m3.enharmonics().contains(&Interval::A2));
        assert!(Interval::A2.enharmonics().contains(&Interval::m3));
        assert!(!Interval::m3.enharmonics().contains(&Interval::m3));
        assert!(Interval::A4.enharmonics().contains(&Interval::d5));
    }

    #[test]
    fn preferred_spellings() {
        assert_eq!(Interval::flat(Semitone::new(6)), Some(Interval::d5));
        assert_eq!(Interval::sharp(Semitone::new(6)), Some(Interval::A4));
        assert_eq!(Interval::flat(Semitone::new(3)), Some(Interval::m3));
        assert_eq!(Interval::sharp(Semitone::new(3)), Some(Interval::A2));
        // Unaccidented spellings win over accidented ones of equal distance.
        assert_eq!(Interval::flat(Semitone::new(4)), Some(Interval::M3));
        assert_eq!(Interval::sharp(Semitone::new(5)), Some(Interval::P4));
        assert_eq!(Interval::sharp(Semitone::new(8)), Some(Interval::A5));
        assert_eq!(Interval::flat(Semitone::new(8)), Some(Interval::m6));
        assert_eq!(Interval::flat(Semitone::new(12)), Some(Interval::P8));
        // Distances without a named spelling on the requested side miss.
        assert_eq!(Interval::flat(Semitone::new(18)), None);
        assert_eq!(Interval::sharp(Semitone::new(13)), None);
    }

    #[test]
    fn inversion() {
        assert_eq!(Interval::A4.to_inversion(), Ok(Interval::d5));
        assert_eq!(Interval::d5.to_inversion(), Ok(Interval::A4));
        assert_eq!(Interval::P4.to_inversion(), Ok(Interval::P5));
        assert_eq!(Interval::P1.to_inversion(), Ok(Interval::P1));
        assert_eq!(Interval::P8.to_inversion(), Ok(Interval::P8));
        // The degree inverts diatonically and the accidental flips.
        assert_eq!(Interval::m3.to_inversion(), Ok(Interval::A6));
        assert_eq!(
            Interval::m9.to_inversion(),
            Ok(Interval::new(
                DiatonicInterval::Fourteenth,
                Accidental::Sharp
            ))
        );
    }

    #[test]
    fn accidental_bounds() {
        assert_eq!(Interval::m3.raised(), Ok(Interval::M3));
        assert!(Interval::new(DiatonicInterval::Third, Accidental::DoubleSharp)
            .raised()
            .is_err());
        assert!(Interval::new(DiatonicInterval::Third, Accidental::TripleFlat)
            .lowered()
            .is_err());
    }

    #[test]
    fn consonances() {
        assert_eq!(Interval::P1.consonance(), Consonance::PerfectConsonance);
        assert_eq!(Interval::P5.consonance(), Consonance::MediocreConsonance);
        assert_eq!(Interval::m3.consonance(), Consonance::ImperfectConsonance);
        assert_eq!(Interval::A4.consonance(), Consonance::PerfectDissonance);
        assert_eq!(Interval::M7.consonance(), Consonance::PerfectDissonance);
        // Compound intervals fold onto their pitch class.
        assert_eq!(Interval::P12.consonance(), Consonance::MediocreConsonance);
        assert!(Interval::P5.consonance().is_consonant());
        assert!(!Interval::M7.consonance().is_consonant());
    }

    #[test]
    fn full_names() {
        assert_eq!(Interval::m3.full_name(), Some("minor 3rd"));
        assert_eq!(Interval::A4.full_name(), Some("augmented 4th"));
        assert_eq!(Interval::d3.full_name(), None);
        assert_eq!(
            Interval::new(DiatonicInterval::Third, Accidental::Natural).full_name(),
            None
        );
    }
}
