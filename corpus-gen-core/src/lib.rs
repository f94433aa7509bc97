//! Synthetic corpus generation library.
//!
//! This crate builds benchmark fixtures for word-counting systems:
//! - Vocabularies of unique lowercase tokens (random or numbered)
//! - Uniform sampling of tokens into a space-separated output stream
//! - Built-in size presets and explicit run configurations
//! - Internal utilities for output file handling
//!
//! Only the high-level API is exposed publicly. Low-level helpers
//! are kept internal.

/// Vocabulary building, corpus writing, presets and the run driver.
pub mod corpus;

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// I/O utilities (output file creation).
///
/// Not exposed
pub(crate) mod io;

pub use error::CorpusError;
