//! # Seed Data Generator
//!
//! Populates a database with sample authors and books for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./library.db (or $LIBRARY_DB_PATH)
//! cargo run -p library-db --bin seed
//!
//! # Specify database path
//! cargo run -p library-db --bin seed -- --db ./data/library.db
//!
//! # Print the seeded rows as JSON
//! cargo run -p library-db --bin seed -- --json
//! ```

use library_core::{Author, Book};
use library_db::{Database, DbConfig};
use serde::Serialize;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// (first name, last name) pairs.
const AUTHORS: &[(&str, &str)] = &[
    ("Craig", "Walls"),
    ("Eric", "Evans"),
    ("Robert", "Martin"),
    ("Martin", "Fowler"),
    ("Joshua", "Bloch"),
    ("Kent", "Beck"),
    ("Frank", "Herbert"),
    ("Steve", "Klabnik"),
    ("Carol", "Nichols"),
];

/// (title, isbn) pairs.
const BOOKS: &[(&str, &str)] = &[
    ("Spring in Action, 5th Edition", "9781617294945"),
    ("Domain-Driven Design", "0321125215"),
    ("Clean Code", "9780132350884"),
    ("Refactoring", "9780201485677"),
    ("Effective Java", "9780134685991"),
    ("Test-Driven Development by Example", "0321146530"),
    ("Dune", "9780441013593"),
    ("The Rust Programming Language", "9781718500440"),
];

#[derive(Serialize)]
struct SeedSummary {
    database: String,
    authors: Vec<Author>,
    books: Vec<Book>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = DbConfig::from_env()?;
    let mut json = false;

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Library Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $LIBRARY_DB_PATH or ./library.db)");
                println!("      --json         Print the seeded rows as JSON");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let database = config.database_path.display().to_string();
    let db = Database::new(config.run_migrations(true)).await?;
    info!(path = %database, "Connected to database");

    let authors = db.authors();
    let books = db.books();

    let existing = authors.count().await? + books.count().await?;
    if existing > 0 {
        warn!(
            rows = existing,
            "Database already has data; skipping seed to avoid duplicates"
        );
        return Ok(());
    }

    let start = std::time::Instant::now();

    let mut summary = SeedSummary {
        database,
        authors: Vec::with_capacity(AUTHORS.len()),
        books: Vec::with_capacity(BOOKS.len()),
    };

    for (first_name, last_name) in AUTHORS {
        let saved = authors.save_new(&Author::new(*first_name, *last_name)).await?;
        summary.authors.push(saved);
    }

    for (title, isbn) in BOOKS {
        let saved = books.save_new(&Book::new(*title, *isbn)).await?;
        summary.books.push(saved);
    }

    info!(
        authors = summary.authors.len(),
        books = summary.books.len(),
        elapsed = ?start.elapsed(),
        "Seed complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, with library crates at DEBUG
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,library_db=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
