use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use expense_tracker::{
    AppConfig, AppConfigStore, Database, ExpenseStore, MasterDataStore, NewExpense,
    SQLiteAppConfigStore, SQLiteExpenseStore, SQLiteMasterDataStore, Title,
};

/// A utility for creating a test database for the expense tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const EXPENSE_TYPES: [&str; 4] = ["Food", "Rent", "Transport", "Entertainment"];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let database = Database::open(output_path);
    database.connect()?;

    println!("Creating expense types...");
    let master_data_store = SQLiteMasterDataStore::new(database.clone());
    let mut expense_type_ids = Vec::with_capacity(EXPENSE_TYPES.len());
    for title in EXPENSE_TYPES {
        let item = master_data_store.create(Title::new(title)?)?;
        expense_type_ids.push(item.id);
    }

    println!("Creating expenses for the last 30 days...");
    let expense_store = SQLiteExpenseStore::new(database.clone());
    let today = OffsetDateTime::now_utc();
    for day in 0..30_i64 {
        let expense_type_id = expense_type_ids[day as usize % expense_type_ids.len()];

        expense_store.create(NewExpense {
            expense_type: expense_type_id.to_string(),
            description: format!("Test expense #{}", day + 1),
            amount: 5.0 + (day as f64) * 2.5,
            date: today - Duration::days(day),
        })?;
    }

    println!("Setting spending limit...");
    SQLiteAppConfigStore::new(database).set(AppConfig::new(1000.0, 80.0))?;

    println!("Success!");

    Ok(())
}
