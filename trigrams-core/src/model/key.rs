/// Reserved substring joining the two words of a key.
///
/// Words never contain it once sanitized, so a key always splits back
/// into exactly two parts.
pub const SEPARATOR: &str = "###";

/// Removes every occurrence of [`SEPARATOR`] from a word.
///
/// Everything else (case, punctuation) is kept as is.
pub fn sanitize(word: &str) -> String {
	word.replace(SEPARATOR, "")
}

/// Builds the lowercase table key for a word pair.
///
/// Example: `("Foo", "bar,")` → `"foo###bar,"`
pub fn make_key(first: &str, second: &str) -> String {
	let mut key = sanitize(first);
	key.push_str(SEPARATOR);
	key.push_str(&sanitize(second));
	key.to_lowercase()
}

/// Splits a key back into its two words.
///
/// Words may end or start with `#`, so the separator is not always the
/// first `###` of the key: the first split leaving no separator in
/// either word wins. Returns `None` if there is no such split.
pub fn split_key(key: &str) -> Option<(&str, &str)> {
	key.char_indices()
		.filter(|(index, _)| key[*index..].starts_with(SEPARATOR))
		.map(|(index, _)| (&key[..index], &key[index + SEPARATOR.len()..]))
		.find(|(first, second)| !first.contains(SEPARATOR) && !second.contains(SEPARATOR))
}
