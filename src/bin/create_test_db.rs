use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, Month, macros::datetime};

use sales_report::{
    DEFAULT_SALE_YEAR, NewTransaction, count_transactions, initialize_db,
    replace_all_transactions,
};

const CATEGORIES: [&str; 4] = ["electronics", "jewelery", "men's clothing", "women's clothing"];

/// A utility for creating a test database for the REST API server of sales_report.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The number of transactions to create in each month.
    #[arg(long, default_value_t = 10)]
    per_month: u32,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let transactions = create_sample_transactions(args.per_month)?;
    replace_all_transactions(&transactions, &mut conn)?;

    println!("Created {} transactions.", count_transactions(&conn)?);
    println!("Success!");

    Ok(())
}

/// Spread `per_month` transactions over every month of the default sale year,
/// with prices covering every bar chart bucket.
fn create_sample_transactions(per_month: u32) -> Result<Vec<NewTransaction>, Box<dyn Error>> {
    let mut transactions = Vec::new();

    for month_number in 1..=12u8 {
        let month = Month::try_from(month_number)?;
        let first_of_month = datetime!(2021-01-01 9:00 UTC)
            .replace_year(DEFAULT_SALE_YEAR)?
            .replace_month(month)?;

        for i in 0..per_month {
            let price = f64::from((i * 97 + u32::from(month_number) * 13) % 1200) + 0.99;
            let category = CATEGORIES[i as usize % CATEGORIES.len()];

            transactions.push(
                NewTransaction::build(
                    &format!("Sample item {month_number}-{i}"),
                    price,
                    category,
                    i % 3 != 0,
                    first_of_month + Duration::days(i64::from(i % 28)),
                )
                .description(&format!("A sample {category} item for testing")),
            );
        }
    }

    Ok(transactions)
}
