use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Month, OffsetDateTime};

use fintrack_rs::{
    persistence::SQLiteStore,
    transaction::{DATE_FORMAT, TransactionStore},
};

/// A utility for creating a test database for the web server of fintrack_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// The transactions added each month as (day, category, amount).
const MONTHLY_TRANSACTIONS: [(u8, &str, u32); 8] = [
    (1, "Salary", 85_000),
    (2, "Housing", 22_000),
    (5, "Debt", 8_500),
    (7, "Groceries", 6_200),
    (12, "Food", 2_400),
    (15, "Savings", 15_000),
    (20, "Shopping", 3_100),
    (26, "Health", 1_200),
];

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
    let connection = Connection::open(output_path)?;
    let mut store = TransactionStore::load(Box::new(SQLiteStore::new(connection)?));

    let today = OffsetDateTime::now_utc().date();
    println!("Adding a year of transactions...");

    for months_ago in (0..12).rev() {
        let (year, month) = months_before(today, months_ago);

        for (index, (day, category, amount)) in MONTHLY_TRANSACTIONS.iter().enumerate() {
            let date = Date::from_calendar_date(year, month, *day)?;
            if date > today {
                continue;
            }

            // Vary spending a little from month to month, salary stays fixed.
            let variation = if *category == "Salary" {
                0
            } else {
                (u32::from(month as u8) * 37 + index as u32 * 53) % 500
            };

            store.add_transaction(
                &date.format(DATE_FORMAT)?,
                category,
                &(amount + variation).to_string(),
            )?;
        }

        if months_ago == 6 {
            let date = Date::from_calendar_date(year, month, 18)?;
            store.add_transaction(&date.format(DATE_FORMAT)?, "Travel", "12500")?;
        }
    }

    println!(
        "Added {} transactions. Success!",
        store.list_transactions().len()
    );

    Ok(())
}

/// The year and month `count` months before `date`.
fn months_before(date: Date, count: u8) -> (i32, Month) {
    let mut year = date.year();
    let mut month = date.month();

    for _ in 0..count {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    (year, month)
}
