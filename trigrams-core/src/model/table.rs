use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::{IndexedRandom, IteratorRandom};
use serde::{Deserialize, Serialize};

use super::key::{SEPARATOR, make_key, sanitize, split_key};

/// Word-pair → successors mapping backing a [`TrigramStore`](super::store::TrigramStore).
///
/// Each key is the lowercase join of two sanitized words, each value the
/// list of words observed right after that pair.
///
/// # Invariants
/// - Every key splits into exactly two words
/// - Keys are lowercase, successors keep their original case
/// - A successor list never holds the same word twice and keeps
///   first-appearance order
///
/// Keys live in a sorted map so that a seeded random source always
/// walks the same way through the same table.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TransitionTable {
	transitions: BTreeMap<String, Vec<String>>,
}

impl TransitionTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table from raw persisted entries.
	///
	/// # Errors
	/// Describes the first entry breaking the table invariants: a key that
	/// does not split into two words or is not lowercase, or a successor
	/// list holding the same word twice.
	pub(crate) fn from_entries(transitions: BTreeMap<String, Vec<String>>) -> Result<Self, String> {
		for (key, successors) in &transitions {
			if split_key(key).is_none() {
				return Err(format!("malformed key {key:?}"));
			}
			if key.to_lowercase() != *key {
				return Err(format!("key {key:?} is not lowercase"));
			}
			if let Some(index) = (1..successors.len()).find(|&i| successors[..i].contains(&successors[i])) {
				return Err(format!("duplicate successor {:?} after {key:?}", successors[index]));
			}
		}
		Ok(Self { transitions })
	}

	/// Number of distinct word pairs.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Iterates over `(key, successors)` in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.transitions.iter().map(|(key, successors)| (key.as_str(), successors.as_slice()))
	}

	/// Records one trigram.
	///
	/// - The first two words form the key (sanitized, lowercased)
	/// - The third word is appended to the key's successors unless the
	///   exact same (sanitized) word is already there
	pub fn insert(&mut self, trigram: [&str; 3]) {
		let [first, second, third] = trigram;
		let key = make_key(first, second);
		let next_word = sanitize(third);

		let successors = self.transitions.entry(key).or_default();
		if !successors.contains(&next_word) {
			successors.push(next_word);
		}
	}

	/// Returns the successors recorded after `first second`, if any.
	pub fn successors(&self, first: &str, second: &str) -> Option<&[String]> {
		self.transitions.get(&make_key(first, second)).map(Vec::as_slice)
	}

	/// Picks a successor of `first second` uniformly at random.
	///
	/// Returns `None` when the pair was never observed.
	pub fn pick_successor<R: Rng + ?Sized>(&self, first: &str, second: &str, rng: &mut R) -> Option<String> {
		self.successors(first, second)?.choose(rng).cloned()
	}

	/// Picks any key uniformly at random and returns its two words.
	///
	/// Returns `None` if the table is empty.
	pub fn random_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(String, String)> {
		let key = self.transitions.keys().choose(rng)?;
		let (first, second) = split_key(key)?;
		Some((first.to_owned(), second.to_owned()))
	}

	/// Picks uniformly among the keys starting with `word` followed by the
	/// separator, and returns `word` with the rest of the key.
	///
	/// The word is sanitized and lowercased before matching. Matching on
	/// the prefix finds keys whose first word ends with `#`, which
	/// [`split_key`] may split elsewhere.
	/// Returns `None` if no key starts with it.
	pub fn random_pair_starting_with<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> Option<(String, String)> {
		let first = sanitize(word).to_lowercase();
		let prefix = format!("{first}{SEPARATOR}");
		self.transitions
			.keys()
			.filter_map(|key| key.strip_prefix(prefix.as_str()))
			.filter(|second| !second.contains(SEPARATOR))
			.choose(rng)
			.map(|second| (first.clone(), second.to_owned()))
	}

	/// Merges another table into this one.
	///
	/// Successors unknown to `self` are appended in `other`'s order;
	/// already known ones are left where they are.
	pub fn merge(&mut self, other: &Self) {
		for (key, successors) in &other.transitions {
			let existing = self.transitions.entry(key.clone()).or_default();
			for successor in successors {
				if !existing.contains(successor) {
					existing.push(successor.clone());
				}
			}
		}
	}
}
