use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::generate_options::GenerateOptions;
use super::key::sanitize;
use super::table::TransitionTable;
use crate::error::{Result, TrigramError};
use crate::io::{self, StorageFormat};

/// A trigram database.
///
/// Feed it text, then let it generate new text by walking the observed
/// word-pair → next-word transitions. The more text it is fed, the more
/// varied the generated text.
///
/// # Responsibilities
/// - Load the transition table from `dbfile` at construction, if any
/// - Record trigrams from literal text or text files
/// - Generate text from a seed, picking successors uniformly at random
/// - Save the whole table back to disk
///
/// The random source `R` is owned by the store. Tests inject a seeded
/// one through [`TrigramStore::with_rng`] to get reproducible output.
///
/// Not synchronized: share it across threads behind your own lock.
#[derive(Debug)]
pub struct TrigramStore<R = StdRng> {
	/// Default location for `save` and `reload`.
	dbfile: Option<PathBuf>,
	table: TransitionTable,
	rng: R,
}

impl TrigramStore<StdRng> {
	/// Creates an empty store without a database file.
	pub fn new() -> Self {
		Self::with_rng(StdRng::from_rng(&mut rand::rng()))
	}

	/// Creates a store backed by `dbfile` and loads its content.
	///
	/// The format follows the extension: `.bin` files hold a `postcard`
	/// snapshot, anything else is read as JSON.
	///
	/// # Errors
	/// - `TrigramError::Io` if the file cannot be read (including when it does not exist)
	/// - `TrigramError::Storage` if the content is not a transition table
	pub fn open<P: AsRef<Path>>(dbfile: P) -> Result<Self> {
		Self::open_with_rng(dbfile, StdRng::from_rng(&mut rand::rng()))
	}
}

impl Default for TrigramStore<StdRng> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: Rng> TrigramStore<R> {
	/// Creates an empty store drawing its random choices from `rng`.
	pub fn with_rng(rng: R) -> Self {
		Self { dbfile: None, table: TransitionTable::new(), rng }
	}

	/// Same as [`TrigramStore::open`] with an explicit random source.
	///
	/// # Errors
	/// See [`TrigramStore::open`].
	pub fn open_with_rng<P: AsRef<Path>>(dbfile: P, rng: R) -> Result<Self> {
		let dbfile = dbfile.as_ref().to_path_buf();
		let table = load_table(&dbfile)?;
		Ok(Self { dbfile: Some(dbfile), table, rng })
	}

	/// Returns the default database file, if any.
	pub fn dbfile(&self) -> Option<&Path> {
		self.dbfile.as_deref()
	}

	/// Changes the default database file used by `save` and `reload`.
	///
	/// The in-memory table is left untouched.
	pub fn set_dbfile(&mut self, dbfile: Option<PathBuf>) {
		self.dbfile = dbfile;
	}

	/// Read-only view of the transition table.
	pub fn table(&self) -> &TransitionTable {
		&self.table
	}

	/// Number of distinct word pairs recorded.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Feeds literal text and/or the content of a text file.
	///
	/// The literal text goes first, the file second. Passing neither is a
	/// no-op.
	///
	/// ```no_run
	/// # use std::path::Path;
	/// # use trigrams_core::model::store::TrigramStore;
	/// let mut db = TrigramStore::new();
	/// db.feed(Some("This is my text"), None)?;
	/// db.feed(None, Some(Path::new("some/file.txt")))?;
	/// # Ok::<(), trigrams_core::error::TrigramError>(())
	/// ```
	///
	/// # Errors
	/// Returns `TrigramError::Io` if the file cannot be read. Text given
	/// alongside it has already been recorded by then.
	pub fn feed(&mut self, text: Option<&str>, source: Option<&Path>) -> Result<()> {
		if let Some(text) = text {
			self.feed_text(text);
		}
		if let Some(source) = source {
			self.feed_file(source)?;
		}
		Ok(())
	}

	/// Splits `text` on whitespace and records every run of three
	/// consecutive words.
	///
	/// Texts of fewer than three words record nothing.
	pub fn feed_text(&mut self, text: &str) {
		let words: Vec<&str> = text.split_whitespace().collect();
		for window in words.windows(3) {
			if let &[first, second, third] = window {
				self.table.insert([first, second, third]);
			}
		}
		debug!("fed {} words, table now holds {} pairs", words.len(), self.table.len());
	}

	/// Reads a whole text file and feeds its content.
	///
	/// # Errors
	/// Returns `TrigramError::Io` if the file cannot be read.
	pub fn feed_file<P: AsRef<Path>>(&mut self, source: P) -> Result<()> {
		let source = source.as_ref();
		debug!("feeding {}", source.display());
		let text = io::read_text(source)?;
		self.feed_text(&text);
		Ok(())
	}

	/// Records a single trigram.
	///
	/// See [`TransitionTable::insert`].
	pub fn insert(&mut self, trigram: [&str; 3]) {
		self.table.insert(trigram);
	}

	/// Returns a possible word following `first second`, chosen uniformly
	/// at random, or `None` if the pair was never seen.
	pub fn lookup(&mut self, first: &str, second: &str) -> Option<String> {
		self.table.pick_successor(first, second, &mut self.rng)
	}

	/// Generates text.
	///
	/// Seed words are sanitized, then:
	/// - two or more seed words: the walk starts from the last two
	/// - one seed word: a random pair starting with that word provides
	///   the second word
	/// - no seed word: a random pair provides the first two words
	///
	/// Words are then appended one at a time, each drawn among the
	/// successors of the last two words, until the pair has no successor
	/// or the text holds `max_words` words.
	///
	/// A seed already holding `max_words` words or more is returned as is.
	/// An empty table with fewer than two seed words yields `""`.
	///
	/// # Errors
	/// Returns `TrigramError::NoMatchingKey` when a single seed word starts
	/// no recorded pair.
	pub fn generate(&mut self, options: &GenerateOptions) -> Result<String> {
		let mut words: Vec<String> = options.seed_words.iter().map(|word| sanitize(word)).collect();

		if words.len() < 2 && self.table.is_empty() {
			return Ok(String::new());
		}
		if !words.is_empty() && words.len() >= options.max_words {
			return Ok(words.join(" "));
		}

		match words.as_slice() {
			[] => {
				let Some((first, second)) = self.table.random_pair(&mut self.rng) else {
					return Ok(String::new());
				};
				words.push(first);
				words.push(second);
			}
			[word] => {
				let Some((_, second)) = self.table.random_pair_starting_with(word, &mut self.rng) else {
					return Err(TrigramError::NoMatchingKey { word: word.clone() });
				};
				words.push(second);
			}
			_ => (),
		}
		trace!("opening pair {:?}", &words[words.len() - 2..]);

		while words.len() < options.max_words {
			let [.., first, second] = words.as_slice() else {
				break;
			};
			let Some(next_word) = self.table.pick_successor(first, second, &mut self.rng) else {
				trace!("no successor after {first:?} {second:?}");
				break;
			};
			words.push(next_word);
		}

		debug!("generated {} words", words.len());
		Ok(words.join(" "))
	}

	/// Folds another store's transitions into this one.
	///
	/// See [`TransitionTable::merge`].
	pub fn merge<O>(&mut self, other: &TrigramStore<O>) {
		self.table.merge(&other.table);
	}

	/// Serializes the table to the JSON text `save` writes to `.json` files.
	///
	/// # Errors
	/// Returns `TrigramError::Encode` if serialization fails.
	pub fn dump(&self) -> Result<String> {
		serde_json::to_string(&self.table).map_err(|e| TrigramError::Encode(e.to_string()))
	}

	/// Saves the table to the default database file.
	///
	/// Without a database file this does nothing.
	///
	/// # Errors
	/// See [`TrigramStore::save_to`].
	pub fn save(&self) -> Result<()> {
		match &self.dbfile {
			Some(dbfile) => self.save_to(dbfile),
			None => {
				debug!("no database file, nothing saved");
				Ok(())
			}
		}
	}

	/// Writes the whole table to `output`, replacing its content.
	///
	/// # Errors
	/// - `TrigramError::Encode` if serialization fails
	/// - `TrigramError::Io` if the file cannot be written
	pub fn save_to<P: AsRef<Path>>(&self, output: P) -> Result<()> {
		let output = output.as_ref();
		let bytes = match StorageFormat::from_path(output) {
			StorageFormat::Json => self.dump()?.into_bytes(),
			StorageFormat::Binary => {
				postcard::to_stdvec(&self.table).map_err(|e| TrigramError::Encode(e.to_string()))?
			}
		};
		io::write_bytes(output, &bytes)?;
		debug!("saved {} pairs to {}", self.table.len(), output.display());
		Ok(())
	}

	/// Replaces the in-memory table with the content of the database file.
	///
	/// Without a database file this does nothing.
	///
	/// # Errors
	/// Same as [`TrigramStore::open`]. The current table is kept on error.
	pub fn reload(&mut self) -> Result<()> {
		if let Some(dbfile) = &self.dbfile {
			self.table = load_table(dbfile)?;
		}
		Ok(())
	}
}

/// Reads and validates a persisted transition table.
fn load_table(path: &Path) -> Result<TransitionTable> {
	let storage_error = |reason: String| TrigramError::Storage { path: path.to_path_buf(), reason };

	let bytes = io::read_bytes(path)?;
	let entries: BTreeMap<String, Vec<String>> = match StorageFormat::from_path(path) {
		StorageFormat::Json => serde_json::from_slice(&bytes).map_err(|e| storage_error(e.to_string()))?,
		StorageFormat::Binary => postcard::from_bytes(&bytes).map_err(|e| storage_error(e.to_string()))?,
	};

	let table = TransitionTable::from_entries(entries).map_err(storage_error)?;
	debug!("loaded {} pairs from {}", table.len(), path.display());
	Ok(table)
}
