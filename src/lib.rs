//! A music theory domain model: semitone distances, accidentals, diatonic
//! and chromatic intervals, scales with modal derivations, notes and keys,
//! with parsing to and from conventional textual notations ("b3", "F#",
//! "2-2-1-2-2-2-1").
//!
//! Everything is an immutable value type; the name registries and
//! enharmonic tables are built once at first use and shared.

pub mod error;
pub use error::Error;

pub mod semitone;
pub use semitone::{AccidentalKind, Semitone};

pub mod accidental;
pub use accidental::Accidental;

pub mod diatonic;
pub use diatonic::DiatonicInterval;

pub mod interval;
pub use interval::{Consonance, Interval};

pub mod semitones;
pub use semitones::{AbsoluteSemitones, RelativeSemitones, Symmetry};

pub mod scale;
pub use scale::{
    HarmonicMinorScaleMode, MajorScaleMode, MelodicMinorScaleMode, ModalScaleDefinition,
    ModeDefinition, NaturalMinorScaleMode, ScaleDefinition, ScaleMode, TonalFamily,
};

pub mod note;
pub use note::{Note, NoteLetter};

pub mod key;
pub use key::{Key, KeyMode, MajorKey, MinorKey};

// -------------------------------------------------------------------------------------------------
