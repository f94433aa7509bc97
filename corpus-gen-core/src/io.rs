use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// Capacity of the buffered writer wrapping the output file.
pub(crate) const OUTPUT_BUFFER_SIZE: usize = 1 << 20;

/// Creates (or truncates) the output file and wraps it in a `BufWriter`.
///
/// - Parent directories are not created
/// - Fails with the underlying `io::Error` if the path is not writable
pub(crate) fn create_output<P: AsRef<Path>>(path: P) -> io::Result<BufWriter<File>> {
	let file = File::create(path)?;
	Ok(BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, file))
}

/// Formats a byte count as whole mebibytes, for log lines.
///
/// Example:
/// `1 << 30` → `"1024 MiB"`
pub(crate) fn format_mib(bytes: u64) -> String {
	format!("{} MiB", bytes >> 20)
}
