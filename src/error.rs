//! Errors raised when parsing or constructing theory values.

use thiserror::Error;

// -------------------------------------------------------------------------------------------------

/// Errors for all fallible parse and construction operations in this crate.
///
/// Parsing surfaces (`TryFrom<&str>` impls) fail with one of the `Invalid*`
/// variants. Constructors fail with the range/definition variants and never
/// hand out a partially built value. Registry lookups do not use this type:
/// they return `Option` and a miss is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid accidental '{0}'")]
    InvalidAccidental(String),

    #[error("invalid interval '{0}'")]
    InvalidInterval(String),

    #[error("invalid note '{0}'")]
    InvalidNote(String),

    #[error("invalid semitone list '{0}'")]
    InvalidSemitones(String),

    #[error("unknown scale '{0}'")]
    UnknownScale(String),

    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("invalid scale definition: steps sum to {sum} but must sum to 12")]
    InvalidScaleDefinition { sum: i32 },

    #[error("accidental distance {0} is out of the representable range [-3, 2]")]
    AccidentalOutOfRange(i32),

    #[error("diatonic degree {0} is out of the representable range [1, 14]")]
    DegreeOutOfRange(i32),

    #[error("key signature {0} is out of the representable range [-7, 7]")]
    KeySignatureOutOfRange(i32),
}
