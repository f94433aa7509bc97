use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::corpus::preset::CorpusConfig;
use crate::corpus::writer::{CorpusWriter, DEFAULT_REPORT_EVERY, Progress, Target};
use crate::error::CorpusError;
use crate::io;

/// Summary of a completed generation run.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
	/// Path of the written corpus.
	pub output: PathBuf,
	/// Preset case, if the run came from one.
	pub case: Option<u8>,
	pub target: Target,
	/// Size of the vocabulary sampled from.
	pub unique_tokens: usize,
	pub tokens_written: u64,
	pub bytes_written: u64,
	/// Seed that reproduces this exact output.
	pub seed: u64,
	pub elapsed_ms: u128,
}

/// High-level driver running one corpus generation.
///
/// # Responsibilities
/// - Validate the configuration before any file I/O
/// - Resolve the seed and own the run's random generator
/// - Build the vocabulary once, then stream the corpus into the output file
#[derive(Debug)]
pub struct Generator {
	config: CorpusConfig,
	seed: u64,
	report_every: u64,
}

impl Generator {
	/// Creates a generator for `config`.
	///
	/// If the configuration carries no seed, one is drawn from the thread-local
	/// generator and recorded so the run can be replayed.
	///
	/// # Errors
	/// Returns a usage error if the configuration cannot run.
	pub fn new(config: CorpusConfig) -> Result<Self, CorpusError> {
		config.validate()?;
		let seed = config.seed().unwrap_or_else(|| rand::rng().random());
		Ok(Self {
			config,
			seed,
			report_every: DEFAULT_REPORT_EVERY,
		})
	}

	/// Sets how many tokens are written between two progress notifications.
	pub fn report_every(mut self, tokens: u64) -> Self {
		self.report_every = tokens;
		self
	}

	/// Seed used by this run.
	pub fn seed(&self) -> u64 {
		self.seed
	}

	/// Configuration this generator runs.
	pub fn config(&self) -> &CorpusConfig {
		&self.config
	}

	/// Builds the vocabulary and writes the corpus to `output`.
	///
	/// # Parameters
	/// - `output`: file to create or truncate. Parent directories must exist.
	/// - `observer`: receives cumulative `Progress` while writing.
	///
	/// # Errors
	/// - A usage error if the vocabulary cannot be built (nothing is created).
	/// - An I/O error if the output cannot be created, written or flushed.
	///   Whatever was written before the failure stays on disk.
	pub fn generate<P: AsRef<Path>>(
		&self,
		output: P,
		observer: impl FnMut(Progress),
	) -> Result<GenerationReport, CorpusError> {
		let output = output.as_ref();
		let started = Instant::now();
		let mut rng = StdRng::seed_from_u64(self.seed);

		let vocabulary = self.config.vocabulary().build(&mut rng)?;
		debug!(
			"vocabulary of {} tokens ready in {:?} (seed {})",
			vocabulary.len(),
			started.elapsed(),
			self.seed
		);

		let sink = io::create_output(output)?;
		let mut writer = CorpusWriter::new(sink)
			.report_every(self.report_every)
			.with_observer(observer);
		let progress = writer.write(&vocabulary, self.config.target(), &mut rng)?;
		writer.finish()?;
		debug!(
			"wrote {} tokens, {} to {}",
			progress.tokens,
			io::format_mib(progress.bytes),
			output.display()
		);

		Ok(GenerationReport {
			output: output.to_path_buf(),
			case: self.config.case(),
			target: self.config.target(),
			unique_tokens: vocabulary.len(),
			tokens_written: progress.tokens,
			bytes_written: progress.bytes,
			seed: self.seed,
			elapsed_ms: started.elapsed().as_millis(),
		})
	}
}
