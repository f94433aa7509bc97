use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use corpus_gen_core::CorpusError;
use corpus_gen_core::corpus::generator::{GenerationReport, Generator};
use corpus_gen_core::corpus::preset::{CASES, CorpusConfig, DEFAULT_OUTPUT, Preset};
use corpus_gen_core::corpus::vocabulary::LengthBounds;
use corpus_gen_core::corpus::writer::Target;

/// Generate test input files for the word counter.
#[derive(Debug, Parser)]
#[command(name = "corpus-gen", version, about)]
struct Args {
    /// Preset: 1 = 1M tokens from word0..word999, 2 = ~1 GiB / 100K unique,
    /// 3 = ~10 GiB / 1M unique, 4 = ~20 GiB / 2M unique, 5 = ~32 GiB / 5M unique
    #[arg(
        long,
        value_parser = clap::value_parser!(u8).range(1..=5),
        required_unless_present_any = ["target_bytes", "target_tokens"],
        conflicts_with_all = ["target_bytes", "target_tokens"]
    )]
    case: Option<u8>,

    /// Output filename
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Seed for reproducible output (drawn at random when absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Custom run: write until at least this many bytes
    #[arg(long, conflicts_with = "target_tokens")]
    target_bytes: Option<u64>,

    /// Custom run: write exactly this many tokens
    #[arg(long)]
    target_tokens: Option<u64>,

    /// Custom run: number of unique tokens
    #[arg(long, default_value_t = 100_000, conflicts_with = "case")]
    unique: usize,

    /// Custom run: shortest token length
    #[arg(long, default_value_t = 3, conflicts_with = "case")]
    min_len: usize,

    /// Custom run: longest token length
    #[arg(long, default_value_t = 10, conflicts_with = "case")]
    max_len: usize,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Resolves the preset or the custom parameters into a run configuration.
    fn config(&self) -> Result<CorpusConfig, CorpusError> {
        let config = match (self.case, self.target_bytes, self.target_tokens) {
            (Some(case), _, _) => CorpusConfig::from_preset(&Preset::from_case(case)?),
            (None, Some(bytes), _) => CorpusConfig::custom(Target::Bytes(bytes), self.unique, self.bounds()?),
            (None, None, Some(tokens)) => CorpusConfig::custom(Target::Tokens(tokens), self.unique, self.bounds()?),
            (None, None, None) => {
                return Err(CorpusError::Usage(format!(
                    "a case between {} and {} or an explicit target is required",
                    CASES.start(),
                    CASES.end()
                )));
            }
        };

        Ok(match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        })
    }

    fn bounds(&self) -> Result<LengthBounds, CorpusError> {
        LengthBounds::new(self.min_len, self.max_len)
    }
}

/// Builds the progress bar for `target`, hidden when `hidden` is set.
fn progress_bar(target: Target, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }

    let template = match target {
        Target::Bytes(_) => {
            "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})"
        }
        Target::Tokens(_) => "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tokens ({eta})",
    };
    let bar = ProgressBar::new(target.amount());
    bar.set_style(ProgressStyle::with_template(template)?.progress_chars("=>-"));
    Ok(bar)
}

fn describe(report: &GenerationReport) -> String {
    format!(
        "Wrote {} tokens ({} bytes) from {} unique words to {} in {} ms (seed {})",
        report.tokens_written,
        report.bytes_written,
        report.unique_tokens,
        report.output.display(),
        report.elapsed_ms,
        report.seed
    )
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = args.config()?;
    let generator = Generator::new(config)?;
    let target = config.target();
    let unique = config.vocabulary().count();

    if let Some(case) = config.case() {
        info!("Case {case}");
    }
    match target {
        Target::Bytes(bytes) => info!(
            "Generating file {} with target size ~{} MiB and {} unique words...",
            args.output.display(),
            bytes >> 20,
            unique
        ),
        Target::Tokens(tokens) => info!(
            "Generating file {} with {} total words from {} unique words...",
            args.output.display(),
            tokens,
            unique
        ),
    }

    let bar = progress_bar(target, args.quiet || args.json)?;
    let report = generator
        .generate(&args.output, |progress| bar.set_position(progress.position(&target)))
        .with_context(|| format!("failed to generate {}", args.output.display()))?;
    bar.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!("{}", describe(&report));
    }

    Ok(())
}
