use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use expense_tracker::{AppConfig, AppConfigStore, Database, SQLiteAppConfigStore};

/// Set the monthly spending limit used by the dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DB_PATH", default_value = "expenses.db")]
    db_path: PathBuf,

    /// The monthly spending limit.
    #[arg(long)]
    limit: f64,

    /// The percentage of the limit at which the dashboard reports it as exceeded.
    #[arg(long, default_value_t = 100.0)]
    percentage: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if !(args.limit.is_finite() && args.limit > 0.0) {
        eprintln!("The limit must be a positive number, got {}.", args.limit);
        exit(1);
    }

    if !(args.percentage.is_finite() && args.percentage > 0.0) {
        eprintln!(
            "The percentage must be a positive number, got {}.",
            args.percentage
        );
        exit(1);
    }

    let database = Database::open(args.db_path.clone());
    let store = SQLiteAppConfigStore::new(database);
    let config = store.set(AppConfig::new(args.limit, args.percentage))?;

    println!(
        "Spending limit for {:#?} set to {:.2}, flagged above {}% ({:.2}).",
        args.db_path,
        args.limit,
        args.percentage,
        config.expense_threshold()?
    );

    Ok(())
}
