use std::path::Path;
use std::{fs, io};

/// Encoding used for a persisted transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StorageFormat {
	/// JSON object `{"word1###word2": ["next", ...]}`.
	Json,
	/// Compact `postcard` encoding of the same mapping.
	Binary,
}

impl StorageFormat {
	/// Picks the format from the file extension.
	///
	/// - `db.bin` → `Binary`
	/// - anything else (`db.json`, `db`, ...) → `Json`
	pub(crate) fn from_path<P: AsRef<Path>>(path: P) -> Self {
		match path.as_ref().extension() {
			Some(extension) if extension == "bin" => Self::Binary,
			_ => Self::Json,
		}
	}
}

/// Reads a whole text file into memory.
pub(crate) fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}

/// Reads a whole file as raw bytes.
pub(crate) fn read_bytes<P: AsRef<Path>>(filename: P) -> io::Result<Vec<u8>> {
	fs::read(filename)
}

/// Creates or truncates `filename` and writes `bytes` to it.
pub(crate) fn write_bytes<P: AsRef<Path>>(filename: P, bytes: &[u8]) -> io::Result<()> {
	fs::write(filename, bytes)
}
