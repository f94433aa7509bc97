use std::ops::RangeInclusive;

use rand::Rng;
use serde::Serialize;

use super::vocabulary::{LengthBounds, Vocabulary, check_random_request};
use super::writer::Target;
use crate::error::CorpusError;

/// Valid case identifiers.
pub const CASES: RangeInclusive<u8> = 1..=5;

/// One gibibyte.
pub const GIB: u64 = 1 << 30;

/// Output path used when the caller does not name one.
pub const DEFAULT_OUTPUT: &str = "input.txt";

/// How the vocabulary of a run is obtained.
///
/// # Variants
/// - `Numbered { count }`: the deterministic `word0..word{count-1}` list.
/// - `Random { count, bounds }`: `count` unique random lowercase tokens.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VocabularySpec {
	Numbered { count: usize },
	Random { count: usize, bounds: LengthBounds },
}

impl VocabularySpec {
	/// Requested number of unique tokens.
	pub fn count(&self) -> usize {
		match self {
			VocabularySpec::Numbered { count } | VocabularySpec::Random { count, .. } => *count,
		}
	}

	/// Builds the vocabulary described by this spec.
	pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vocabulary, CorpusError> {
		match *self {
			VocabularySpec::Numbered { count } => Vocabulary::numbered(count),
			VocabularySpec::Random { count, bounds } => Vocabulary::random(count, bounds, rng),
		}
	}

	/// Checks the spec can be built, without building it.
	fn validate(&self) -> Result<(), CorpusError> {
		match self {
			VocabularySpec::Numbered { count: 0 } => {
				Err(CorpusError::usage("vocabulary must contain at least one token"))
			}
			VocabularySpec::Numbered { .. } => Ok(()),
			VocabularySpec::Random { count, bounds } => check_random_request(*count, bounds),
		}
	}
}

/// A named, immutable benchmark configuration.
///
/// | Case | Target              | Vocabulary              |
/// |------|---------------------|-------------------------|
/// | 1    | 1,000,000 tokens    | `word0`..`word999`      |
/// | 2    | 1 GiB               | 100,000 random tokens   |
/// | 3    | 10 GiB              | 1,000,000 random tokens |
/// | 4    | 20 GiB              | 2,000,000 random tokens |
/// | 5    | 32 GiB              | 5,000,000 random tokens |
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preset {
	case: u8,
	target: Target,
	vocabulary: VocabularySpec,
}

impl Preset {
	/// Returns the preset for a case identifier.
	///
	/// # Errors
	/// Returns a usage error for anything outside `1..=5`.
	pub fn from_case(case: u8) -> Result<Self, CorpusError> {
		let random = |count| VocabularySpec::Random { count, bounds: LengthBounds::default() };
		let (target, vocabulary) = match case {
			1 => (Target::Tokens(1_000_000), VocabularySpec::Numbered { count: 1_000 }),
			2 => (Target::Bytes(GIB), random(100_000)),
			3 => (Target::Bytes(10 * GIB), random(1_000_000)),
			4 => (Target::Bytes(20 * GIB), random(2_000_000)),
			5 => (Target::Bytes(32 * GIB), random(5_000_000)),
			_ => {
				return Err(CorpusError::usage(format!(
					"case must be between {} and {}, got {case}",
					CASES.start(),
					CASES.end()
				)));
			}
		};
		Ok(Self { case, target, vocabulary })
	}

	/// All built-in presets, in case order.
	pub fn all() -> Vec<Self> {
		CASES.filter_map(|case| Self::from_case(case).ok()).collect()
	}

	/// Case identifier (1..=5).
	pub fn case(&self) -> u8 {
		self.case
	}

	/// Termination condition of the preset.
	pub fn target(&self) -> Target {
		self.target
	}

	/// Vocabulary of the preset.
	pub fn vocabulary(&self) -> VocabularySpec {
		self.vocabulary
	}
}

/// Fully resolved parameters of one generation run.
///
/// Built either from a `Preset` or from explicit values, then checked with
/// `validate` before any file is touched.
///
/// # Invariants
/// - `case` is `Some` only when built from a preset
/// - `seed == None` means a fresh seed is drawn at run time
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorpusConfig {
	case: Option<u8>,
	target: Target,
	vocabulary: VocabularySpec,
	seed: Option<u64>,
}

impl CorpusConfig {
	/// Configuration of a built-in preset, with no fixed seed.
	pub fn from_preset(preset: &Preset) -> Self {
		Self {
			case: Some(preset.case),
			target: preset.target,
			vocabulary: preset.vocabulary,
			seed: None,
		}
	}

	/// Configuration with an explicit target and `count` random tokens.
	pub fn custom(target: Target, count: usize, bounds: LengthBounds) -> Self {
		Self {
			case: None,
			target,
			vocabulary: VocabularySpec::Random { count, bounds },
			seed: None,
		}
	}

	/// Fixes the random seed, making the output reproducible.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Checks that the configuration can run.
	///
	/// # Errors
	/// Returns a usage error if the vocabulary cannot be built.
	pub fn validate(&self) -> Result<(), CorpusError> {
		self.vocabulary.validate()
	}

	/// Preset case, or `None` for explicit parameters.
	pub fn case(&self) -> Option<u8> {
		self.case
	}

	/// Termination condition of the run.
	pub fn target(&self) -> Target {
		self.target
	}

	/// Vocabulary the run samples from.
	pub fn vocabulary(&self) -> VocabularySpec {
		self.vocabulary
	}

	/// Fixed seed, if any.
	pub fn seed(&self) -> Option<u64> {
		self.seed
	}
}
