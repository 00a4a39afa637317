//! Scale definitions, modal scale families and their derived modes.

use std::collections::HashMap;
use std::fmt::Display;
use std::ops::Index;

use derive_more::Deref;
use lazy_static::lazy_static;

use crate::accidental::Accidental;
use crate::error::Error;
use crate::interval::Interval;
use crate::key::{Key, MajorKey};
use crate::note::{Note, NoteLetter};
use crate::semitone::{AccidentalKind, Semitone};
use crate::semitones::{AbsoluteSemitones, RelativeSemitones, Symmetry};

// -------------------------------------------------------------------------------------------------

/// The tonal families with modal derivations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TonalFamily {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
}

impl TonalFamily {
    pub const VALUES: [TonalFamily; 4] = [
        Self::Major,
        Self::NaturalMinor,
        Self::HarmonicMinor,
        Self::MelodicMinor,
    ];

    /// Display name of the family, also its registry name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::NaturalMinor => "natural minor",
            Self::HarmonicMinor => "harmonic minor",
            Self::MelodicMinor => "melodic minor",
        }
    }

    /// The family's modal scale definition.
    pub fn scale(self) -> &'static ModalScaleDefinition {
        match self {
            Self::Major => &MAJOR,
            Self::NaturalMinor => &NATURAL_MINOR,
            Self::HarmonicMinor => &HARMONIC_MINOR,
            Self::MelodicMinor => &MELODIC_MINOR,
        }
    }
}

impl Display for TonalFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// -------------------------------------------------------------------------------------------------

/// The 7 named modes of a modal scale family, in rotation order.
pub trait ScaleMode: Copy {
    /// The modes in rotation order.
    const MODES: [Self; 7];

    /// 1-based mode number.
    fn number(self) -> usize;

    /// Display name of the mode.
    fn name(self) -> &'static str;
}

/// Modes of the major scale.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorScaleMode {
    Ionian = 1,
    Dorian = 2,
    Phrygian = 3,
    Lydian = 4,
    Mixolydian = 5,
    Aeolian = 6,
    Locrian = 7,
}

impl ScaleMode for MajorScaleMode {
    const MODES: [Self; 7] = [
        Self::Ionian,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Aeolian,
        Self::Locrian,
    ];

    fn number(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Ionian => "Ionian",
            Self::Dorian => "Dorian",
            Self::Phrygian => "Phrygian",
            Self::Lydian => "Lydian",
            Self::Mixolydian => "Mixolydian",
            Self::Aeolian => "Aeolian",
            Self::Locrian => "Locrian",
        }
    }
}

/// Modes of the natural minor scale.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaturalMinorScaleMode {
    Aeolian = 1,
    Locrian = 2,
    Ionian = 3,
    Dorian = 4,
    Phrygian = 5,
    Lydian = 6,
    Mixolydian = 7,
}

impl ScaleMode for NaturalMinorScaleMode {
    const MODES: [Self; 7] = [
        Self::Aeolian,
        Self::Locrian,
        Self::Ionian,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
    ];

    fn number(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Aeolian => "Aeolian",
            Self::Locrian => "Locrian",
            Self::Ionian => "Ionian",
            Self::Dorian => "Dorian",
            Self::Phrygian => "Phrygian",
            Self::Lydian => "Lydian",
            Self::Mixolydian => "Mixolydian",
        }
    }
}

/// Modes of the harmonic minor scale.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmonicMinorScaleMode {
    HarmonicMinor = 1,
    LocrianNaturalSixth = 2,
    IonianAugmented = 3,
    DorianSharpFourth = 4,
    PhrygianDominant = 5,
    LydianSharpSecond = 6,
    AlteredDoubleFlatSeventh = 7,
}

impl ScaleMode for HarmonicMinorScaleMode {
    const MODES: [Self; 7] = [
        Self::HarmonicMinor,
        Self::LocrianNaturalSixth,
        Self::IonianAugmented,
        Self::DorianSharpFourth,
        Self::PhrygianDominant,
        Self::LydianSharpSecond,
        Self::AlteredDoubleFlatSeventh,
    ];

    fn number(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::HarmonicMinor => "harmonic minor",
            Self::LocrianNaturalSixth => "locrian \u{266E}6",
            Self::IonianAugmented => "ionian augmented",
            Self::DorianSharpFourth => "dorian \u{266F}4",
            Self::PhrygianDominant => "phrygian dominant",
            Self::LydianSharpSecond => "lydian \u{266F}2",
            Self::AlteredDoubleFlatSeventh => "altered bb7",
        }
    }
}

/// Modes of the melodic minor scale.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MelodicMinorScaleMode {
    MelodicMinor = 1,
    DorianFlatSecond = 2,
    LydianAugmented = 3,
    LydianDominant = 4,
    MixolydianFlatSixth = 5,
    LocrianNaturalSecond = 6,
    Altered = 7,
}

impl ScaleMode for MelodicMinorScaleMode {
    const MODES: [Self; 7] = [
        Self::MelodicMinor,
        Self::DorianFlatSecond,
        Self::LydianAugmented,
        Self::LydianDominant,
        Self::MixolydianFlatSixth,
        Self::LocrianNaturalSecond,
        Self::Altered,
    ];

    fn number(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::MelodicMinor => "Melodic minor",
            Self::DorianFlatSecond => "Dorian \u{266D}2",
            Self::LydianAugmented => "Lydian \u{266F}5",
            Self::LydianDominant => "Lydian dominant",
            Self::MixolydianFlatSixth => "Mixolydian \u{266D}6",
            Self::LocrianNaturalSecond => "Locrian \u{266E}2",
            Self::Altered => "Altered",
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// A named interval pattern over one octave.
///
/// Construction checks that the steps sum to exactly 12; the absolute form
/// and symmetry are derived eagerly and shared through references.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleDefinition {
    name: Option<String>,
    steps: RelativeSemitones,
    absolute: AbsoluteSemitones,
    symmetry: Symmetry,
}

impl ScaleDefinition {
    pub fn new(steps: RelativeSemitones, name: Option<&str>) -> Result<Self, Error> {
        let sum = steps.total().distance() as i32;
        if sum != 12 {
            return Err(Error::InvalidScaleDefinition { sum });
        }
        let absolute = steps.to_absolute();
        let symmetry = steps.symmetry();
        Ok(Self {
            name: name.map(str::to_string),
            steps,
            absolute,
            symmetry,
        })
    }

    /// Parse an unnamed definition from a `-`-separated step string.
    pub fn parse(s: &str) -> Result<Self, Error> {
        Self::new(RelativeSemitones::try_from(s)?, None)
    }

    /// The scale name, when the definition carries one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn steps(&self) -> &RelativeSemitones {
        &self.steps
    }

    /// The steps as a `-`-separated string.
    pub fn steps_string(&self) -> String {
        self.steps.to_string()
    }

    /// The absolute scale-degree positions, unison through octave.
    pub fn absolute(&self) -> &AbsoluteSemitones {
        &self.absolute
    }

    pub fn symmetry(&self) -> &Symmetry {
        &self.symmetry
    }

    /// True if the scale contains a minor third.
    pub fn is_minor(&self) -> bool {
        self.absolute.is_minor()
    }

    /// Flat-preferred interval spellings of the scale degrees.
    pub fn intervals(&self) -> Vec<Interval> {
        self.spelled_intervals(AccidentalKind::Flat)
    }

    /// Interval spellings of the scale degrees for one accidental kind.
    pub fn spelled_intervals(&self, kind: AccidentalKind) -> Vec<Interval> {
        self.absolute
            .iter()
            .filter_map(|semitones| Interval::spelled(semitones, kind))
            .collect()
    }

    /// Look up a scale definition by its case-insensitive display name.
    pub fn by_name(name: &str) -> Option<&'static ScaleDefinition> {
        BY_NAME.get(name.trim().to_lowercase().as_str()).copied()
    }

    /// The registered scale names, sorted.
    pub fn names() -> Vec<&'static str> {
        let mut names = BY_NAME
            .values()
            .filter_map(|scale| scale.name())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn major() -> &'static ModalScaleDefinition {
        &MAJOR
    }

    pub fn natural_minor() -> &'static ModalScaleDefinition {
        &NATURAL_MINOR
    }

    pub fn harmonic_minor() -> &'static ModalScaleDefinition {
        &HARMONIC_MINOR
    }

    pub fn melodic_minor() -> &'static ModalScaleDefinition {
        &MELODIC_MINOR
    }

    pub fn augmented() -> &'static ScaleDefinition {
        &AUGMENTED
    }

    pub fn diminished_half_whole() -> &'static ScaleDefinition {
        &DIMINISHED_HALF_WHOLE
    }

    pub fn diminished_whole_half() -> &'static ScaleDefinition {
        &DIMINISHED_WHOLE_HALF
    }

    pub fn whole_tone() -> &'static ScaleDefinition {
        &WHOLE_TONE
    }

    pub fn pentatonic_major() -> &'static ScaleDefinition {
        &PENTATONIC_MAJOR
    }

    pub fn pentatonic_minor() -> &'static ScaleDefinition {
        &PENTATONIC_MINOR
    }

    /// Derive the modal view of this pattern for a tonal family, with one
    /// mode per value of the family's mode enumeration.
    ///
    /// The modal scale takes the family's name; mode `parent()` lookups
    /// resolve through the family's registered scale.
    pub fn as_modal<M: ScaleMode>(&self, family: TonalFamily) -> Result<ModalScaleDefinition, Error> {
        let scale = Self {
            name: Some(family.name().to_string()),
            steps: self.steps.clone(),
            absolute: self.absolute.clone(),
            symmetry: self.symmetry.clone(),
        };
        ModalScaleDefinition::from_scale::<M>(scale, family)
    }
}

impl TryFrom<&str> for ScaleDefinition {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Error> {
        Self::parse(s)
    }
}

impl Display for ScaleDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.steps)?;
        if let Some(name) = &self.name {
            write!(f, " - {} scale", name)?;
        }
        if self.symmetry.is_symmetric() {
            write!(f, " ({})", self.symmetry)?;
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

/// A scale definition with a tonal family tag and its 7 derived modes, one
/// per rotation offset.
#[derive(Debug, Clone, PartialEq, Deref)]
pub struct ModalScaleDefinition {
    #[deref]
    scale: ScaleDefinition,
    family: TonalFamily,
    modes: Vec<ModeDefinition>,
}

impl ModalScaleDefinition {
    fn create<M: ScaleMode>(family: TonalFamily, steps: &str) -> Result<Self, Error> {
        let scale = ScaleDefinition::new(RelativeSemitones::try_from(steps)?, Some(family.name()))?;
        Self::from_scale::<M>(scale, family)
    }

    fn from_scale<M: ScaleMode>(scale: ScaleDefinition, family: TonalFamily) -> Result<Self, Error> {
        let modes = M::MODES
            .iter()
            .map(|mode| ModeDefinition::derive(&scale, family, mode.name(), mode.number() - 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            scale,
            family,
            modes,
        })
    }

    pub fn family(&self) -> TonalFamily {
        self.family
    }

    /// The 7 modes in rotation order.
    pub fn modes(&self) -> &[ModeDefinition] {
        &self.modes
    }

    /// The mode definition for a named mode of this family.
    pub fn mode<M: ScaleMode>(&self, mode: M) -> &ModeDefinition {
        &self.modes[mode.number() - 1]
    }
}

impl<M: ScaleMode> Index<M> for ModalScaleDefinition {
    type Output = ModeDefinition;

    fn index(&self, mode: M) -> &ModeDefinition {
        self.mode(mode)
    }
}

impl Display for ModalScaleDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (modal)", self.scale)
    }
}

// -------------------------------------------------------------------------------------------------

/// A mode: a scale definition derived by rotating a parent scale's steps,
/// re-based on the rotation's starting degree.
#[derive(Debug, Clone, PartialEq, Deref)]
pub struct ModeDefinition {
    #[deref]
    scale: ScaleDefinition,
    family: TonalFamily,
    distance_from_parent: Semitone,
    mode_name: String,
    mode_index: usize,
}

impl ModeDefinition {
    fn derive(
        parent: &ScaleDefinition,
        family: TonalFamily,
        name: &str,
        mode_index: usize,
    ) -> Result<Self, Error> {
        let steps = parent.steps().rotated(mode_index as isize);
        let scale = ScaleDefinition::new(steps, None)?;
        // The new tonic's absolute position in the parent scale.
        let distance_from_parent = parent.steps().steps()[..mode_index]
            .iter()
            .fold(Semitone::UNISON, |sum, step| sum + *step);
        let mode_name = format!(
            "{} mode (Mode #{} of {} scale)",
            name,
            mode_index + 1,
            parent.name().unwrap_or_default()
        );
        Ok(Self {
            scale,
            family,
            distance_from_parent,
            mode_name,
            mode_index,
        })
    }

    /// The modal scale this mode was derived from.
    pub fn parent(&self) -> &'static ModalScaleDefinition {
        self.family.scale()
    }

    /// Semitone distance of the mode's tonic from the parent's root.
    pub fn distance_from_parent(&self) -> Semitone {
        self.distance_from_parent
    }

    pub fn mode_name(&self) -> &str {
        &self.mode_name
    }

    /// 0-based rotation offset within the parent scale.
    pub fn mode_index(&self) -> usize {
        self.mode_index
    }

    /// The mode's diatonic spelling: the C major letters rotated to the
    /// mode's starting position, each altered to the mode's own steps.
    pub fn notes(&self) -> Result<Vec<Note>, Error> {
        let root_letter = NoteLetter::from_index(self.mode_index);
        let root = Note::natural(root_letter);
        self.absolute()
            .iter()
            .take(self.steps().len())
            .enumerate()
            .map(|(degree, position)| {
                let letter = NoteLetter::from_index(root_letter.index() + degree);
                let target = root.distance_from_c() + position;
                let mut alteration =
                    (target.distance() - letter.semitones_from_c().distance()).rem_euclid(12);
                if alteration > 6 {
                    alteration -= 12;
                }
                Ok(Note::new(letter, Accidental::from_semitones(alteration)?))
            })
            .collect()
    }

    /// Each mode note's interval from the mode's own root, resolved through
    /// the major key of the root letter (D dorian reads 1 2 b3 4 5 6 b7).
    pub fn spelled_intervals(&self) -> Result<Vec<Interval>, Error> {
        let notes = self.notes()?;
        let root = notes[0];
        let key = MajorKey::from_root(root)
            .map(Key::major)
            .ok_or_else(|| Error::UnknownKey(root.to_string()))?;
        notes
            .iter()
            .map(|note| key.interval_from_root(*note))
            .collect()
    }
}

impl Display for ModeDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.scale, self.mode_name)
    }
}

// -------------------------------------------------------------------------------------------------

fn builtin(name: &str, steps: &str) -> ScaleDefinition {
    RelativeSemitones::try_from(steps)
        .and_then(|steps| ScaleDefinition::new(steps, Some(name)))
        .expect("valid built-in scale definition")
}

lazy_static! {
    static ref MAJOR: ModalScaleDefinition =
        ModalScaleDefinition::create::<MajorScaleMode>(TonalFamily::Major, "2-2-1-2-2-2-1")
            .expect("valid built-in scale definition");
    static ref NATURAL_MINOR: ModalScaleDefinition = ModalScaleDefinition::create::<
        NaturalMinorScaleMode,
    >(TonalFamily::NaturalMinor, "2-1-2-2-1-2-2")
    .expect("valid built-in scale definition");
    static ref HARMONIC_MINOR: ModalScaleDefinition = ModalScaleDefinition::create::<
        HarmonicMinorScaleMode,
    >(TonalFamily::HarmonicMinor, "2-1-2-2-1-3-1")
    .expect("valid built-in scale definition");
    static ref MELODIC_MINOR: ModalScaleDefinition = ModalScaleDefinition::create::<
        MelodicMinorScaleMode,
    >(TonalFamily::MelodicMinor, "2-1-2-2-2-2-1")
    .expect("valid built-in scale definition");
    static ref AUGMENTED: ScaleDefinition = builtin("augmented", "3-1-3-1-3-1");
    static ref DIMINISHED_HALF_WHOLE: ScaleDefinition =
        builtin("diminished (half,whole)", "1-2-1-2-1-2-1-2");
    static ref DIMINISHED_WHOLE_HALF: ScaleDefinition =
        builtin("diminished (whole,half)", "2-1-2-1-2-1-2-1");
    static ref WHOLE_TONE: ScaleDefinition = builtin("whole tone", "2-2-2-2-2-2");
    static ref PENTATONIC_MAJOR: ScaleDefinition = builtin("pentatonic major", "2-2-3-2-3");
    static ref PENTATONIC_MINOR: ScaleDefinition = builtin("pentatonic minor", "3-2-2-3-2");

    /// Scale definitions by lowercase display name.
    static ref BY_NAME: HashMap<&'static str, &'static ScaleDefinition> = {
        let modal: [&'static ModalScaleDefinition; 4] =
            [&MAJOR, &NATURAL_MINOR, &HARMONIC_MINOR, &MELODIC_MINOR];
        let simple: [&'static ScaleDefinition; 6] = [
            &AUGMENTED,
            &DIMINISHED_HALF_WHOLE,
            &DIMINISHED_WHOLE_HALF,
            &WHOLE_TONE,
            &PENTATONIC_MAJOR,
            &PENTATONIC_MINOR,
        ];
        let mut registry: HashMap<&'static str, &'static ScaleDefinition> = HashMap::new();
        for scale in modal {
            registry.insert(scale.family().name(), &scale.scale);
        }
        for scale in simple {
            if let Some(name) = scale.name() {
                registry.insert(name, scale);
            }
        }
        log::debug!("registered {} scale definitions", registry.len());
        registry
    };
}

// --------------------------------------------------------------------------------------------------
