use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use salesboard_rs::{Transaction, TransactionBuilder, import_transactions, initialize_db};

/// A utility for creating a salesboard_rs database from a JSON dump of transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// File path to a JSON array of transactions.
    #[arg(long, short)]
    input: String,
}

/// One transaction as it appears in the JSON dump.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRecord {
    title: String,
    price: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    sold: bool,
    #[serde(with = "time::serde::rfc3339")]
    date_of_sale: OffsetDateTime,
}

impl From<TransactionRecord> for TransactionBuilder {
    fn from(record: TransactionRecord) -> Self {
        Transaction::build(&record.title, record.price, record.date_of_sale)
            .description(&record.description)
            .category(&record.category)
            .image_url(&record.image)
            .sold(record.sold)
    }
}

/// Create a database and fill it with the transactions from a JSON dump.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'sales.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'sales.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Reading transactions from {:#?}", args.input);
    let records: Vec<TransactionRecord> = serde_json::from_str(&fs::read_to_string(&args.input)?)?;
    let builders: Vec<TransactionBuilder> = records.into_iter().map(Into::into).collect();

    println!("Creating database at {output_path:#?}");
    let imported_count = create_database(output_path, builders)?;

    println!("Imported {imported_count} transactions.");

    Ok(())
}

/// Create a database at `output_path` holding the transactions in `builders`.
///
/// If anything fails the database file is removed again, so the same path
/// can be used once the input is fixed.
fn create_database(
    output_path: &Path,
    builders: Vec<TransactionBuilder>,
) -> Result<usize, Box<dyn Error>> {
    let result = populate_database(output_path, builders);

    if result.is_err() {
        if let Err(remove_error) = fs::remove_file(output_path) {
            eprintln!(
                "Could not remove the incomplete database at {output_path:#?}: {remove_error}"
            );
        }
    }

    result
}

fn populate_database(
    output_path: &Path,
    builders: Vec<TransactionBuilder>,
) -> Result<usize, Box<dyn Error>> {
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let imported = import_transactions(builders, &conn)?;

    Ok(imported.len())
}
