//! Top-level module for the trigram generator.
//!
//! - Key building and word sanitization (`key`)
//! - The word-pair → successors mapping (`TransitionTable`)
//! - Generation parameters (`GenerateOptions`)
//! - The high-level store tying them together (`TrigramStore`)

/// High-level trigram database.
///
/// Loads and saves the table, ingests text, and generates new text
/// from an injectable random source.
pub mod store;

/// Word-pair → successors mapping with uniform random selection.
pub mod table;

/// Separator handling: sanitization, key building and splitting.
pub mod key;

/// Generation parameters (seed words, word cap).
pub mod generate_options;
