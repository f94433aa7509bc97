//! Top-level module for corpus generation.
//!
//! A run is composed of two sequential stages:
//! - Building a vocabulary of unique tokens (`Vocabulary`)
//! - Writing uniformly sampled tokens to an output (`CorpusWriter`)
//!
//! `Preset` and `CorpusConfig` describe what to build, and `generator`
//! drives a whole run against an output file.

/// Set of unique tokens and the builders producing it.
///
/// Supports random lowercase tokens of bounded length (rejection sampling)
/// and the deterministic `word0..wordN` vocabulary.
pub mod vocabulary;

/// Streaming writer sampling tokens until a byte or token target is reached.
///
/// Exposes cumulative progress to an optional observer.
pub mod writer;

/// The five built-in benchmark presets and the resolved run configuration.
pub mod preset;

/// High-level interface running one generation against an output path.
pub mod generator;
