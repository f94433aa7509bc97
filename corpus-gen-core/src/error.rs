use std::fmt;
use std::io;

/// Errors produced while configuring or running a corpus generation.
///
/// # Variants
/// - `Usage`: the request itself is invalid (unknown case, bad bounds,
///   impossible vocabulary). Always raised before the output file is touched.
/// - `Io`: the output could not be created, written or flushed.
#[derive(Debug)]
pub enum CorpusError {
	Usage(String),
	Io(io::Error),
}

impl CorpusError {
	/// Shorthand for building a `Usage` error from anything printable.
	pub(crate) fn usage(message: impl Into<String>) -> Self {
		CorpusError::Usage(message.into())
	}

	/// Returns `true` for request errors detected before any I/O.
	pub fn is_usage(&self) -> bool {
		matches!(self, CorpusError::Usage(_))
	}
}

impl fmt::Display for CorpusError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CorpusError::Usage(message) => write!(f, "usage error: {message}"),
			CorpusError::Io(err) => write!(f, "i/o error: {err}"),
		}
	}
}

impl std::error::Error for CorpusError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			CorpusError::Usage(_) => None,
			CorpusError::Io(err) => Some(err),
		}
	}
}

impl From<io::Error> for CorpusError {
	fn from(err: io::Error) -> Self {
		CorpusError::Io(err)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error;

	#[test]
	fn io_errors_keep_their_source() {
		let err = CorpusError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
		assert!(!err.is_usage());
		assert!(err.source().is_some());
		assert_eq!(err.to_string(), "i/o error: denied");
	}

	#[test]
	fn usage_errors_have_no_source() {
		let err = CorpusError::usage("case must be between 1 and 5, got 7");
		assert!(err.is_usage());
		assert!(err.source().is_none());
		assert!(err.to_string().starts_with("usage error:"));
	}
}
