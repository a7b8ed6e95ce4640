use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the trigram store.
///
/// A missing successor for a word pair is not an error: lookups return
/// `None` and generation simply stops.
#[derive(Error, Debug)]
pub enum TrigramError {
	/// Persisted content exists but is not a valid transition table.
	#[error("invalid trigram database {}: {reason}", .path.display())]
	Storage { path: PathBuf, reason: String },

	/// A single seed word was given but no key starts with it.
	#[error("no word pair starts with {word:?}")]
	NoMatchingKey { word: String },

	/// The table could not be serialized.
	#[error("encoding error: {0}")]
	Encode(String),

	/// Propagated I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrigramError>;
