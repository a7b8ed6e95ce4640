//! Trigram-based random text generation.
//!
//! This crate provides a small Markov-chain text generator:
//! - Word-pair → next-word transition table built from fed text
//! - Uniformly random walk over the table to generate new text
//! - JSON (or compact binary) persistence of the table
//!
//! ```
//! use trigrams_core::model::generate_options::GenerateOptions;
//! use trigrams_core::model::store::TrigramStore;
//!
//! let mut db = TrigramStore::new();
//! db.feed_text("the cat sat on the mat");
//! let text = db.generate(&GenerateOptions::new().with_seed_words(["the", "cat"]))?;
//! assert_eq!(text, "the cat sat on the mat");
//! # Ok::<(), trigrams_core::error::TrigramError>(())
//! ```

/// Trigram store, transition table and generation options.
pub mod model;

/// Error type shared by all fallible operations.
pub mod error;

/// File helpers (whole-file reads and writes, storage format detection).
///
/// Not exposed
pub(crate) mod io;
