//! Feeding and text generation behaviour of `TrigramStore`.

use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use trigrams_core::error::TrigramError;
use trigrams_core::model::generate_options::GenerateOptions;
use trigrams_core::model::store::TrigramStore;

fn seeded(seed: u64) -> TrigramStore {
	TrigramStore::with_rng(StdRng::seed_from_u64(seed))
}

fn as_json(store: &TrigramStore) -> Value {
	serde_json::from_str(&store.dump().unwrap()).unwrap()
}

fn options(seed_words: &[&str], max_words: usize) -> GenerateOptions {
	GenerateOptions::new()
		.with_seed_words(seed_words.iter().copied())
		.with_max_words(max_words)
}

// feed

#[test]
fn feed_nothing() {
	let mut store = seeded(0);
	store.feed(None, None).unwrap();
	assert!(store.is_empty());
}

#[test]
fn feed_text_with_less_than_three_words() {
	let mut store = seeded(0);
	store.feed(Some("Hello world!"), None).unwrap();
	store.feed_text("   ");
	store.feed_text("");
	assert!(store.is_empty());
}

#[test]
fn feed_text() {
	let mut store = seeded(0);
	store.feed(Some("Hello, my name is Foo."), None).unwrap();
	assert_eq!(
		as_json(&store),
		json!({
			"hello,###my": ["name"],
			"my###name": ["is"],
			"name###is": ["Foo."],
		})
	);
}

#[test]
fn feed_text_splits_on_any_whitespace_run() {
	let mut store = seeded(0);
	store.feed_text("  a\tb \n\n c  ");
	assert_eq!(as_json(&store), json!({"a###b": ["c"]}));
}

#[test]
fn feed_text_with_repetitions() {
	let mut store = seeded(0);
	store.feed_text("This is the man who is the dog");
	assert_eq!(
		as_json(&store),
		json!({
			"this###is": ["the"],
			"is###the": ["man", "dog"],
			"the###man": ["who"],
			"man###who": ["is"],
			"who###is": ["the"],
		})
	);
}

#[test]
fn feed_text_pairs_are_case_insensitive() {
	let mut store = seeded(0);
	store.feed_text("Foo bar, qux");
	store.feed_text("foo Bar, Qux");
	assert_eq!(as_json(&store), json!({"foo###bar,": ["qux", "Qux"]}));
}

#[test]
fn feed_from_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("source.txt");
	fs::write(&path, "a b c").unwrap();

	let mut store = seeded(0);
	store.feed(None, Some(path.as_path())).unwrap();
	assert_eq!(as_json(&store), json!({"a###b": ["c"]}));
}

#[test]
fn feed_from_text_then_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("source.txt");
	fs::write(&path, "a b c\n").unwrap();

	let mut store = seeded(0);
	store.feed(Some("a b d"), Some(path.as_path())).unwrap();
	assert_eq!(as_json(&store), json!({"a###b": ["d", "c"]}));
}

#[test]
fn feed_from_missing_file_fails() {
	let dir = tempfile::tempdir().unwrap();
	let mut store = seeded(0);
	let result = store.feed_file(dir.path().join("missing.txt"));
	assert!(matches!(result, Err(TrigramError::Io(_))));
	assert!(store.is_empty());
}

// generate

#[test]
fn generate_from_empty_db() {
	let mut store = seeded(0);
	assert_eq!(store.generate(&GenerateOptions::default()).unwrap(), "");
	assert_eq!(store.generate(&options(&["a"], 70)).unwrap(), "");
}

#[test]
fn generate_returns_a_seed_reaching_max_words() {
	let mut store = seeded(0);
	assert_eq!(store.generate(&options(&["foo", "bar", "qux"], 3)).unwrap(), "foo bar qux");
	assert_eq!(store.generate(&options(&["foo", "bar", "qux"], 1)).unwrap(), "foo bar qux");

	store.feed_text("foo bar qux baz");
	assert_eq!(store.generate(&options(&["foo", "bar", "qux"], 3)).unwrap(), "foo bar qux");
	assert_eq!(store.generate(&options(&["foo"], 1)).unwrap(), "foo");
}

#[test]
fn generate_sanitizes_seed_words() {
	let mut store = seeded(0);
	assert_eq!(store.generate(&options(&["fo###o", "###bar"], 2)).unwrap(), "foo bar");
}

#[test]
fn generate_from_one_word() {
	let mut store = seeded(0);
	store.feed_text("a b c");
	assert_eq!(store.generate(&options(&["a"], 3)).unwrap(), "a b c");
}

#[test]
fn generate_from_one_word_keeps_its_case() {
	let mut store = seeded(0);
	store.feed_text("a b c");
	assert_eq!(store.generate(&options(&["A"], 3)).unwrap(), "A b c");
}

#[test]
fn generate_from_one_word_ending_with_hashes() {
	let mut store = seeded(0);
	store.feed_text("a# b c");
	assert_eq!(store.generate(&options(&["a#"], 70)).unwrap(), "a# b c");
}

#[test]
fn generate_from_one_unknown_word_fails() {
	let mut store = seeded(0);
	store.feed_text("a b c");
	match store.generate(&options(&["b"], 70)) {
		Err(TrigramError::NoMatchingKey { word }) => assert_eq!(word, "b"),
		other => panic!("expected NoMatchingKey, got {other:?}"),
	}
}

#[test]
fn generate_from_no_word() {
	let mut store = seeded(0);
	store.feed_text("a b c");
	assert_eq!(store.generate(&options(&[], 3)).unwrap(), "a b c");
}

#[test]
fn generate_stops_without_more_words() {
	let mut store = seeded(0);
	store.feed_text("a b c");
	assert_eq!(store.generate(&options(&[], 1000)).unwrap(), "a b c");
	assert_eq!(store.generate(&options(&["a"], 1000)).unwrap(), "a b c");
}

#[test]
fn generate_from_two_words_continues_from_the_last_pair() {
	let mut store = seeded(0);
	store.feed_text("x y z");
	assert_eq!(store.generate(&options(&["hello", "X", "Y"], 70)).unwrap(), "hello X Y z");
	assert_eq!(store.generate(&options(&["y", "x"], 70)).unwrap(), "y x");
}

#[test]
fn generate_stops_at_max_words_on_a_cycle() {
	let mut store = seeded(0);
	store.feed_text("a b a b");
	let text = store.generate(&options(&["a", "b"], 10)).unwrap();
	assert_eq!(text, "a b a b a b a b a b");

	let text = store.generate(&GenerateOptions::default()).unwrap();
	assert_eq!(text.split(' ').count(), 70);
}

#[test]
fn generate_only_follows_observed_transitions() {
	let mut store = seeded(7);
	store.feed_text("the cat sat on the mat and the dog sat on the cat and the mat sat on the dog");
	let table = store.table().clone();

	for _ in 0..20 {
		let text = store.generate(&GenerateOptions::new().with_max_words(30)).unwrap();
		let words: Vec<&str> = text.split(' ').collect();
		assert!(words.len() >= 2 && words.len() <= 30);
		for window in words.windows(3) {
			let successors = table.successors(window[0], window[1]).unwrap();
			assert!(successors.iter().any(|s| s == window[2]));
		}
	}
}

#[test]
fn generate_is_reproducible_with_the_same_seed() {
	let text = "one two three one two four one three two one four three two";
	let mut first = seeded(1234);
	let mut second = seeded(1234);
	first.feed_text(text);
	second.feed_text(text);

	for _ in 0..5 {
		let request = GenerateOptions::new().with_max_words(40);
		assert_eq!(first.generate(&request).unwrap(), second.generate(&request).unwrap());
	}
}
