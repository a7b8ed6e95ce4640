use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use trigrams_core::model::generate_options::{DEFAULT_MAX_WORDS, GenerateOptions};
use trigrams_core::model::store::TrigramStore;

/// Feed text to a trigram database and print generated text.
#[derive(Parser)]
#[command(name = "trigrams", version, about = "Simple trigrams-based text generation")]
struct Cli {
	/// Database file (`.json`, or `.bin` for the compact format)
	#[arg(long)]
	db: Option<PathBuf>,

	/// Text file to feed, may be repeated
	#[arg(short, long = "feed", value_name = "FILE")]
	feed: Vec<PathBuf>,

	/// Literal text to feed before the files
	#[arg(short, long)]
	text: Option<String>,

	/// Words the generated text starts with
	#[arg(short, long, default_value = "")]
	seed: String,

	/// Maximum number of words per generated text
	#[arg(short, long, default_value_t = DEFAULT_MAX_WORDS)]
	max_words: usize,

	/// Number of texts to generate
	#[arg(short, long, default_value_t = 1)]
	count: usize,

	/// Seed of the random generator, for reproducible output
	#[arg(long)]
	rng_seed: Option<u64>,

	/// Write the database back to `--db` once fed
	#[arg(long, requires = "db")]
	save: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let cli = Cli::parse();

	let rng = match cli.rng_seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_rng(&mut rand::rng()),
	};

	// A database file that does not exist yet is created on save
	let mut db = match &cli.db {
		Some(path) if path.exists() => TrigramStore::open_with_rng(path, rng)?,
		Some(path) => {
			info!("{} does not exist yet, starting empty", path.display());
			let mut db = TrigramStore::with_rng(rng);
			db.set_dbfile(Some(path.clone()));
			db
		}
		None => TrigramStore::with_rng(rng),
	};
	info!("database holds {} word pairs", db.len());

	if let Some(text) = &cli.text {
		db.feed_text(text);
	}
	for source in &cli.feed {
		db.feed_file(source)?;
	}
	info!("fed, database now holds {} word pairs", db.len());

	if cli.save {
		db.save()?;
		info!("database saved");
	}

	if db.is_empty() {
		warn!("empty database, feed it some text with --text or --feed");
	}

	let options = GenerateOptions::new()
		.with_seed_words(cli.seed.split_whitespace())
		.with_max_words(cli.max_words);

	for _ in 0..cli.count {
		println!("{}", db.generate(&options)?);
	}

	Ok(())
}
