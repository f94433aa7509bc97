use std::io::{self, Write};

use rand::Rng;
use serde::Serialize;

use super::vocabulary::Vocabulary;

/// Byte written after every token.
pub const SEPARATOR: u8 = b' ';

/// Default number of tokens between two observer notifications.
pub const DEFAULT_REPORT_EVERY: u64 = 1 << 16;

/// Termination condition of a corpus write.
///
/// # Variants
/// - `Tokens(n)`: write exactly `n` tokens.
/// - `Bytes(n)`: write until at least `n` bytes were produced. The last
///   token may overshoot by up to `longest token + 1` bytes, which is kept.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Target {
	Tokens(u64),
	Bytes(u64),
}

impl Target {
	/// Amount in the unit of the target (tokens or bytes).
	pub fn amount(&self) -> u64 {
		match self {
			Target::Tokens(n) | Target::Bytes(n) => *n,
		}
	}

	/// Returns `true` once `progress` satisfies the target.
	fn reached(&self, progress: &Progress) -> bool {
		match self {
			Target::Tokens(n) => progress.tokens >= *n,
			Target::Bytes(n) => progress.bytes >= *n,
		}
	}
}

/// Cumulative counters of a write in progress.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
	/// Tokens written so far.
	pub tokens: u64,
	/// Bytes written so far, separators included.
	pub bytes: u64,
}

impl Progress {
	/// Counter matching the unit of `target`.
	pub fn position(&self, target: &Target) -> u64 {
		match target {
			Target::Tokens(_) => self.tokens,
			Target::Bytes(_) => self.bytes,
		}
	}
}

/// Writes uniformly sampled tokens, each followed by `SEPARATOR`, into a sink.
///
/// # Responsibilities
/// - Sample one token per iteration from a `Vocabulary`
/// - Stop on a token-count or byte-count `Target`
/// - Notify an optional observer with cumulative `Progress`
///
/// The writer does no buffering of its own; wrap files in a `BufWriter`.
pub struct CorpusWriter<'a, W: Write> {
	sink: W,
	report_every: u64,
	observer: Option<Box<dyn FnMut(Progress) + 'a>>,
}

impl<'a, W: Write> CorpusWriter<'a, W> {
	/// Creates a writer with no observer.
	pub fn new(sink: W) -> Self {
		Self {
			sink,
			report_every: DEFAULT_REPORT_EVERY,
			observer: None,
		}
	}

	/// Registers a callback receiving cumulative progress.
	///
	/// Called every `report_every` tokens, and once more when the target is
	/// reached unless that point already fell on an interval.
	pub fn with_observer(mut self, observer: impl FnMut(Progress) + 'a) -> Self {
		self.observer = Some(Box::new(observer));
		self
	}

	/// Sets the notification interval, in tokens (minimum 1).
	pub fn report_every(mut self, tokens: u64) -> Self {
		self.report_every = tokens.max(1);
		self
	}

	/// Samples tokens from `vocabulary` into the sink until `target` is reached.
	///
	/// # Returns
	/// The final cumulative `Progress`.
	///
	/// # Errors
	/// Any write error of the sink, returned as soon as it happens. Bytes
	/// already handed to the sink are left there.
	pub fn write<R: Rng + ?Sized>(
		&mut self,
		vocabulary: &Vocabulary,
		target: Target,
		rng: &mut R,
	) -> io::Result<Progress> {
		let mut progress = Progress::default();

		while !target.reached(&progress) {
			let token = vocabulary.choose(rng);
			self.sink.write_all(token.as_bytes())?;
			self.sink.write_all(&[SEPARATOR])?;

			progress.tokens += 1;
			progress.bytes += token.len() as u64 + 1;

			if progress.tokens % self.report_every == 0 {
				self.notify(progress);
			}
		}

		if progress.tokens == 0 || progress.tokens % self.report_every != 0 {
			self.notify(progress);
		}
		Ok(progress)
	}

	fn notify(&mut self, progress: Progress) {
		if let Some(observer) = self.observer.as_mut() {
			observer(progress);
		}
	}

	/// Flushes the sink and returns it.
	pub fn finish(mut self) -> io::Result<W> {
		self.sink.flush()?;
		Ok(self.sink)
	}
}
