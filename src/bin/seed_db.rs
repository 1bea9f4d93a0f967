use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use sales_insights::{
    seed::{DEFAULT_SEED_URL, SeedSource, seed_if_empty},
    stores::sqlite::create_app_state,
};

/// A utility for creating and seeding the database for sales_insights ahead of
/// starting the server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short, env = "DB_PATH")]
    output_path: String,

    /// URL or file path of the JSON product data.
    #[arg(long, short, env = "SEED_SOURCE", default_value = DEFAULT_SEED_URL)]
    source: String,
}

/// Create the database and fill it with the product data.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'sales.db').");
            exit(1);
        }
    }

    println!("Opening database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    let state = create_app_state(conn)?;

    let source = SeedSource::parse(&args.source);
    let inserted = seed_if_empty(&state.transaction_store, &source).await?;

    if inserted == 0 {
        println!("Database already seeded, nothing to do.");
    } else {
        println!("Success! Inserted {inserted} transactions.");
    }

    Ok(())
}
