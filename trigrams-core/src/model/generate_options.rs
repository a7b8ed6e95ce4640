/// Default cap on the number of generated words.
pub const DEFAULT_MAX_WORDS: usize = 70;

/// Input parameters for [`TrigramStore::generate`](super::store::TrigramStore::generate).
///
/// # Fields
/// - `seed_words`: words the generated text starts with. Zero, one or
///   more words are accepted; see `generate` for how each case starts.
/// - `max_words`: stop once the text holds this many words. Seed words
///   count toward the cap, so a seed at least this long comes back as is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
	pub seed_words: Vec<String>,
	pub max_words: usize,
}

impl Default for GenerateOptions {
	fn default() -> Self {
		Self { seed_words: Vec::new(), max_words: DEFAULT_MAX_WORDS }
	}
}

impl GenerateOptions {
	/// No seed, [`DEFAULT_MAX_WORDS`] words at most.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the seed words.
	pub fn with_seed_words<I, S>(mut self, seed_words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.seed_words = seed_words.into_iter().map(Into::into).collect();
		self
	}

	/// Replaces the word cap.
	pub fn with_max_words(mut self, max_words: usize) -> Self {
		self.max_words = max_words;
		self
	}
}
