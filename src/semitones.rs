//! Semitone step sequences, their absolute scale-degree form and symmetry.

use std::fmt::Display;
use std::ops::Index;

use crate::error::Error;
use crate::semitone::Semitone;

// -------------------------------------------------------------------------------------------------

/// An ordered sequence of step sizes between consecutive scale degrees.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct RelativeSemitones {
    steps: Vec<Semitone>,
}

impl RelativeSemitones {
    pub fn new<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = Semitone>,
    {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Step sizes between consecutive degrees.
    pub fn steps(&self) -> &[Semitone] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Semitone> + '_ {
        self.steps.iter().copied()
    }

    /// Sum of all steps.
    pub fn total(&self) -> Semitone {
        self.iter().fold(Semitone::UNISON, |sum, step| sum + step)
    }

    /// The absolute scale-degree positions, starting from a unison.
    ///
    /// The result has one more element than there are steps;
    /// `to_absolute().to_relative()` round-trips exactly.
    pub fn to_absolute(&self) -> AbsoluteSemitones {
        let mut position = Semitone::UNISON;
        let mut positions = Vec::with_capacity(self.len() + 1);
        for step in self.iter() {
            positions.push(position);
            position = position + step;
        }
        positions.push(position);
        AbsoluteSemitones::new(positions)
    }

    /// The sequence rotated left by `count` positions.
    ///
    /// Negative counts rotate right; any count is normalized modulo the
    /// sequence length.
    pub fn rotated(&self, count: isize) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        let len = self.len() as isize;
        let count = count.rem_euclid(len) as usize;
        let mut steps = Vec::with_capacity(self.len());
        steps.extend_from_slice(&self.steps[count..]);
        steps.extend_from_slice(&self.steps[..count]);
        Self { steps }
    }

    /// The block structure of the sequence.
    pub fn symmetry(&self) -> Symmetry {
        Symmetry::new(self)
    }
}

impl Index<usize> for RelativeSemitones {
    type Output = Semitone;
    fn index(&self, index: usize) -> &Semitone {
        &self.steps[index]
    }
}

impl TryFrom<&str> for RelativeSemitones {
    type Error = Error;

    /// Try converting a `-`-separated step string (e.g. `"2-2-1-2-2-2-1"`).
    fn try_from(s: &str) -> Result<Self, Error> {
        let steps = s
            .split('-')
            .filter(|part| !part.is_empty())
            .map(Semitone::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidSemitones(s.to_string()))?;
        if steps.is_empty() {
            return Err(Error::InvalidSemitones(s.to_string()));
        }
        Ok(Self { steps })
    }
}

impl Display for RelativeSemitones {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let steps = self
            .iter()
            .map(|step| step.to_string())
            .collect::<Vec<_>>()
            .join("-");
        write!(f, "{}", steps)
    }
}

// -------------------------------------------------------------------------------------------------

/// An ordered sequence of absolute semitone positions from a tonic.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct AbsoluteSemitones {
    positions: Vec<Semitone>,
}

impl AbsoluteSemitones {
    pub fn new<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Semitone>,
    {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    /// Absolute positions from the tonic.
    pub fn positions(&self) -> &[Semitone] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Semitone> + '_ {
        self.positions.iter().copied()
    }

    pub fn contains(&self, semitone: Semitone) -> bool {
        self.positions.contains(&semitone)
    }

    /// True if the positions contain a minor third.
    pub fn is_minor(&self) -> bool {
        self.contains(Semitone::new(3))
    }

    /// The pairwise differences of consecutive positions.
    pub fn to_relative(&self) -> RelativeSemitones {
        let steps = self
            .positions
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect::<Vec<_>>();
        RelativeSemitones::new(steps)
    }
}

impl Index<usize> for AbsoluteSemitones {
    type Output = Semitone;
    fn index(&self, index: usize) -> &Semitone {
        &self.positions[index]
    }
}

impl TryFrom<&str> for AbsoluteSemitones {
    type Error = Error;

    /// Try converting a position string with space, `,` or `;` separators
    /// (e.g. `"0 2 4 5 7 9 11 12"`).
    fn try_from(s: &str) -> Result<Self, Error> {
        let positions = s
            .split([' ', ',', ';'])
            .filter(|part| !part.is_empty())
            .map(Semitone::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidSemitones(s.to_string()))?;
        if positions.is_empty() {
            return Err(Error::InvalidSemitones(s.to_string()));
        }
        Ok(Self { positions })
    }
}

impl Display for AbsoluteSemitones {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let positions = self
            .iter()
            .map(|position| position.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", positions)
    }
}

// -------------------------------------------------------------------------------------------------

/// The block structure of a step sequence.
///
/// A sequence is symmetric when it is some number of repetitions of a
/// smaller block; the canonical block is the smallest one. Sequences of odd
/// length are never symmetric.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Symmetry {
    block: RelativeSemitones,
    block_count: usize,
}

impl Symmetry {
    pub fn new(steps: &RelativeSemitones) -> Self {
        let len = steps.len();
        if len % 2 != 0 {
            return Self::default();
        }
        // Smallest block size first: a whole-tone sequence reports blocks of
        // one step, not two or three.
        for block_size in 1..=len / 2 {
            if len % block_size != 0 {
                continue;
            }
            let repeats = (0..block_size).all(|offset| {
                let step = steps[offset];
                (1..len / block_size).all(|block| steps[offset + block * block_size] == step)
            });
            if repeats {
                return Self {
                    block: RelativeSemitones::new(steps.steps()[..block_size].iter().copied()),
                    block_count: len / block_size,
                };
            }
        }
        Self::default()
    }

    pub fn is_symmetric(&self) -> bool {
        self.block_count > 0
    }

    /// The minimal repeating block, empty when not symmetric.
    pub fn block(&self) -> &RelativeSemitones {
        &self.block
    }

    pub fn block_size(&self) -> usize {
        self.block.len()
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }
}

impl Display for Symmetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_symmetric() {
            write!(
                f,
                "Symmetric: {} blocks of {} elements",
                self.block_count,
                self.block_size()
            )
        } else {
            write!(f, "Non-symmetric")
        }
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn relative(s: &str) -> RelativeSemitones {
        RelativeSemitones::try_from(s).unwrap()
    }

    #[test]
    fn relative_to_absolute() {
        let major = relative("2-2-1-2-2-2-1");
        assert_eq!(
            major.to_absolute(),
            AbsoluteSemitones::try_from("0 2 4 5 7 9 11 12").unwrap()
        );
        assert_eq!(major.to_absolute().len(), major.len() + 1);
    }

    #[test]
    fn absolute_relative_round_trip() {
        for steps in ["2-2-1-2-2-2-1", "3-1-3-1-3-1", "1-2-1-2-1-2-1-2", "2-2-3-2-3"] {
            let steps = relative(steps);
            assert_eq!(steps.to_absolute().to_relative(), steps);
        }
    }

    #[test]
    fn rotation() {
        let major = relative("2-2-1-2-2-2-1");
        assert_eq!(major.rotated(0), major);
        assert_eq!(major.rotated(1), relative("2-1-2-2-2-1-2"));
        assert_eq!(major.rotated(-1), relative("1-2-2-1-2-2-2"));
        assert_eq!(major.rotated(7), major);
        assert_eq!(major.rotated(8), major.rotated(1));
    }

    #[test]
    fn symmetry_whole_tone() {
        let symmetry = relative("2-2-2-2-2-2").symmetry();
        assert!(symmetry.is_symmetric());
        assert_eq!(symmetry.block_size(), 1);
        assert_eq!(symmetry.block_count(), 6);
        assert_eq!(symmetry.block(), &relative("2"));
    }

    #[test]
    fn symmetry_diminished() {
        let symmetry = relative("1-2-1-2-1-2-1-2").symmetry();
        assert!(symmetry.is_symmetric());
        assert_eq!(symmetry.block_size(), 2);
        assert_eq!(symmetry.block_count(), 4);
        assert_eq!(symmetry.block(), &relative("1-2"));
    }

    #[test]
    fn symmetry_major_scale() {
        let symmetry = relative("2-2-1-2-2-2-1").symmetry();
        assert!(!symmetry.is_symmetric());
        assert_eq!(symmetry.block_count(), 0);
        assert!(symmetry.block().is_empty());
    }

    #[test]
    fn symmetry_augmented() {
        let symmetry = relative("3-1-3-1-3-1").symmetry();
        assert!(symmetry.is_symmetric());
        assert_eq!(symmetry.block_size(), 2);
        assert_eq!(symmetry.block_count(), 3);
    }

    #[test]
    fn string_round_trip() {
        assert_eq!(relative("2-2-1-2-2-2-1").to_string(), "2-2-1-2-2-2-1");
        assert_eq!(
            AbsoluteSemitones::try_from("0,3;7").unwrap().to_string(),
            "0, 3, 7"
        );
        assert!(RelativeSemitones::try_from("2-x-1").is_err());
        assert!(AbsoluteSemitones::try_from("").is_err());
    }
}
