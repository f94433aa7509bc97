use std::collections::HashSet;

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::error::CorpusError;

/// Number of letters tokens are drawn from (`a..=z`).
const ALPHABET_SIZE: u128 = 26;

/// Longest token length accepted by `LengthBounds`.
pub const MAX_TOKEN_LEN: usize = 1 << 10;

/// Inclusive bounds on the length of randomly generated tokens.
///
/// # Invariants
/// - `1 <= min <= max`
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthBounds {
	min: usize,
	max: usize,
}

impl LengthBounds {
	/// Creates new bounds.
	///
	/// # Errors
	/// Returns a usage error if `min == 0`, `min > max` or `max > MAX_TOKEN_LEN`.
	pub fn new(min: usize, max: usize) -> Result<Self, CorpusError> {
		if min == 0 {
			return Err(CorpusError::usage("minimum token length must be at least 1"));
		}
		if min > max {
			return Err(CorpusError::usage(format!(
				"minimum token length ({min}) exceeds maximum ({max})"
			)));
		}
		if max > MAX_TOKEN_LEN {
			return Err(CorpusError::usage(format!(
				"maximum token length ({max}) exceeds {MAX_TOKEN_LEN}"
			)));
		}
		Ok(Self { min, max })
	}

	/// Shortest allowed token length.
	pub fn min(&self) -> usize {
		self.min
	}

	/// Longest allowed token length.
	pub fn max(&self) -> usize {
		self.max
	}

	/// Number of distinct lowercase strings whose length lies within the bounds.
	///
	/// Computes `sum(26^l)` for `l` in `[min, max]`, saturating at `u128::MAX`.
	/// Stops as soon as the sum saturates (lengths above 27 always do).
	pub fn space_size(&self) -> u128 {
		let mut total: u128 = 0;
		for len in self.min..=self.max {
			let exp = u32::try_from(len).unwrap_or(u32::MAX);
			total = total.saturating_add(ALPHABET_SIZE.saturating_pow(exp));
			if total == u128::MAX {
				break;
			}
		}
		total
	}
}

impl Default for LengthBounds {
	/// Tokens of 3 to 10 letters.
	fn default() -> Self {
		Self { min: 3, max: 10 }
	}
}

/// An immutable set of unique tokens used as the sampling pool of a corpus.
///
/// Tokens are kept sorted so that a seeded run is reproducible regardless of
/// the hashing used while de-duplicating.
///
/// # Invariants
/// - Never empty
/// - All tokens are distinct
/// - `longest` is the byte length of the longest token
#[derive(Clone, Debug)]
pub struct Vocabulary {
	tokens: Vec<String>,
	longest: usize,
}

impl Vocabulary {
	/// Builds `count` distinct random tokens.
	///
	/// Each candidate has a length drawn uniformly in `[bounds.min, bounds.max]`
	/// and letters drawn uniformly in `a..=z`. Candidates already present are
	/// discarded and sampling continues until exactly `count` tokens exist.
	/// There is no retry limit.
	///
	/// # Errors
	/// Returns a usage error if `count` is zero or larger than the number of
	/// distinct strings the bounds allow (sampling could never finish).
	pub fn random<R: Rng + ?Sized>(
		count: usize,
		bounds: LengthBounds,
		rng: &mut R,
	) -> Result<Self, CorpusError> {
		check_random_request(count, &bounds)?;

		let mut unique: HashSet<String> = HashSet::with_capacity(count);
		let mut rejected: u64 = 0;
		while unique.len() < count {
			if !unique.insert(random_token(&bounds, rng)) {
				rejected += 1;
			}
		}
		debug!("built {count} random tokens ({rejected} collisions discarded)");

		Ok(Self::from_unique(unique.into_iter().collect()))
	}

	/// Builds the deterministic vocabulary `word0, word1, .., word{count-1}`.
	///
	/// # Errors
	/// Returns a usage error if `count` is zero.
	pub fn numbered(count: usize) -> Result<Self, CorpusError> {
		if count == 0 {
			return Err(CorpusError::usage("vocabulary must contain at least one token"));
		}
		Ok(Self::from_unique((0..count).map(|i| format!("word{i}")).collect()))
	}

	/// Wraps an explicit list of tokens.
	///
	/// # Errors
	/// Returns a usage error if the list is empty, contains duplicates, or
	/// holds a token that is empty or contains whitespace (it would not read
	/// back as one token once separated by spaces).
	pub fn from_tokens(tokens: Vec<String>) -> Result<Self, CorpusError> {
		if tokens.is_empty() {
			return Err(CorpusError::usage("vocabulary must contain at least one token"));
		}
		if tokens.iter().any(String::is_empty) {
			return Err(CorpusError::usage("tokens must not be empty"));
		}
		if let Some(token) = tokens.iter().find(|t| t.chars().any(char::is_whitespace)) {
			return Err(CorpusError::usage(format!("token '{token}' contains whitespace")));
		}
		let vocabulary = Self::from_unique(tokens);
		if let Some(pair) = vocabulary.tokens.windows(2).find(|pair| pair[0] == pair[1]) {
			return Err(CorpusError::usage(format!("duplicate token '{}'", pair[0])));
		}
		Ok(vocabulary)
	}

	/// Sorts the tokens and records the longest length.
	///
	/// Callers guarantee uniqueness, except `from_tokens` which checks after.
	fn from_unique(mut tokens: Vec<String>) -> Self {
		tokens.sort_unstable();
		let longest = tokens.iter().map(String::len).max().unwrap_or(0);
		Self { tokens, longest }
	}

	/// Number of unique tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Returns `true` if there are no tokens (never the case for a built vocabulary).
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Byte length of the longest token.
	pub fn longest(&self) -> usize {
		self.longest
	}

	/// All tokens, sorted.
	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	/// Returns `true` if `token` belongs to the vocabulary.
	pub fn contains(&self, token: &str) -> bool {
		self.tokens
			.binary_search_by(|probe| probe.as_str().cmp(token))
			.is_ok()
	}

	/// Picks one token uniformly at random.
	pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
		// Non-empty by construction
		&self.tokens[rng.random_range(0..self.tokens.len())]
	}
}

/// Checks that `count` distinct tokens can be drawn within `bounds`.
///
/// # Errors
/// Returns a usage error if `count` is zero or exceeds `bounds.space_size()`.
pub(crate) fn check_random_request(count: usize, bounds: &LengthBounds) -> Result<(), CorpusError> {
	if count == 0 {
		return Err(CorpusError::usage("vocabulary must contain at least one token"));
	}
	let space = bounds.space_size();
	if count as u128 > space {
		return Err(CorpusError::usage(format!(
			"cannot build {count} unique tokens of length {}..={}: only {space} exist",
			bounds.min, bounds.max
		)));
	}
	Ok(())
}

/// Generates one random lowercase token within `bounds`.
fn random_token<R: Rng + ?Sized>(bounds: &LengthBounds, rng: &mut R) -> String {
	let len = rng.random_range(bounds.min..=bounds.max);
	(0..len)
		.map(|_| char::from(rng.random_range(b'a'..=b'z')))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn random_vocabulary_has_exact_cardinality() {
		let mut rng = StdRng::seed_from_u64(7);
		let vocabulary = Vocabulary::random(5_000, LengthBounds::default(), &mut rng).unwrap();

		assert_eq!(vocabulary.len(), 5_000);
		let unique: HashSet<&String> = vocabulary.tokens().iter().collect();
		assert_eq!(unique.len(), 5_000);
	}

	#[test]
	fn random_tokens_respect_bounds_and_alphabet() {
		let mut rng = StdRng::seed_from_u64(11);
		let bounds = LengthBounds::default();
		let vocabulary = Vocabulary::random(2_000, bounds, &mut rng).unwrap();

		for token in vocabulary.tokens() {
			assert!((3..=10).contains(&token.len()), "bad length: {token}");
			assert!(token.bytes().all(|b| b.is_ascii_lowercase()), "bad token: {token}");
		}
		assert!(vocabulary.longest() <= 10);
	}

	#[test]
	fn rejection_sampling_fills_a_dense_space() {
		// 26 + 676 = 702 candidates, ask for all but two
		let mut rng = StdRng::seed_from_u64(3);
		let bounds = LengthBounds::new(1, 2).unwrap();
		let vocabulary = Vocabulary::random(700, bounds, &mut rng).unwrap();
		assert_eq!(vocabulary.len(), 700);
	}

	#[test]
	fn impossible_vocabulary_is_rejected() {
		let mut rng = StdRng::seed_from_u64(3);
		let bounds = LengthBounds::new(1, 1).unwrap();
		let err = Vocabulary::random(27, bounds, &mut rng).unwrap_err();
		assert!(err.is_usage());
		assert!(Vocabulary::random(26, bounds, &mut rng).is_ok());
	}

	#[test]
	fn empty_vocabulary_is_rejected() {
		let mut rng = StdRng::seed_from_u64(3);
		assert!(Vocabulary::random(0, LengthBounds::default(), &mut rng).is_err());
		assert!(Vocabulary::numbered(0).is_err());
		assert!(Vocabulary::from_tokens(Vec::new()).is_err());
	}

	#[test]
	fn same_seed_same_vocabulary() {
		let a = Vocabulary::random(1_000, LengthBounds::default(), &mut StdRng::seed_from_u64(42)).unwrap();
		let b = Vocabulary::random(1_000, LengthBounds::default(), &mut StdRng::seed_from_u64(42)).unwrap();
		assert_eq!(a.tokens(), b.tokens());
	}

	#[test]
	fn numbered_vocabulary_is_word0_to_word999() {
		let vocabulary = Vocabulary::numbered(1_000).unwrap();
		assert_eq!(vocabulary.len(), 1_000);
		assert!(vocabulary.contains("word0"));
		assert!(vocabulary.contains("word999"));
		assert!(!vocabulary.contains("word1000"));
		assert_eq!(vocabulary.longest(), "word999".len());
	}

	#[test]
	fn from_tokens_rejects_duplicates() {
		let err = Vocabulary::from_tokens(vec!["abc".into(), "xyz".into(), "abc".into()]).unwrap_err();
		assert_eq!(err.to_string(), "usage error: duplicate token 'abc'");
	}

	#[test]
	fn bounds_validation() {
		assert!(LengthBounds::new(0, 4).is_err());
		assert!(LengthBounds::new(5, 4).is_err());
		let bounds = LengthBounds::new(4, 4).unwrap();
		assert_eq!(bounds.space_size(), 26u128.pow(4));
		assert_eq!(LengthBounds::new(1, 200).unwrap().space_size(), u128::MAX);
		assert!(LengthBounds::new(3, MAX_TOKEN_LEN).is_ok());
		assert!(LengthBounds::new(3, MAX_TOKEN_LEN + 1).unwrap_err().is_usage());
		assert!(LengthBounds::new(3, usize::MAX).is_err());
	}

	#[test]
	fn space_size_stops_once_saturated() {
		let bounds = LengthBounds { min: 3, max: usize::MAX };
		assert_eq!(bounds.space_size(), u128::MAX);
		let bounds = LengthBounds { min: usize::MAX - 1, max: usize::MAX };
		assert_eq!(bounds.space_size(), u128::MAX);
	}

	#[test]
	fn from_tokens_rejects_tokens_that_break_separation() {
		let err = Vocabulary::from_tokens(vec!["".into(), "abc".into()]).unwrap_err();
		assert!(err.is_usage());
		let err = Vocabulary::from_tokens(vec!["a b".into(), "abc".into()]).unwrap_err();
		assert_eq!(err.to_string(), "usage error: token 'a b' contains whitespace");
		assert!(Vocabulary::from_tokens(vec!["tab\there".into()]).is_err());
		assert!(Vocabulary::from_tokens(vec!["line\n".into()]).is_err());
		assert!(Vocabulary::from_tokens(vec!["abc".into(), "word7".into()]).is_ok());
	}

	#[test]
	fn choose_only_returns_members() {
		let mut rng = StdRng::seed_from_u64(5);
		let vocabulary = Vocabulary::from_tokens(vec!["alpha".into(), "beta".into()]).unwrap();
		for _ in 0..100 {
			assert!(vocabulary.contains(vocabulary.choose(&mut rng)));
		}
	}
}
