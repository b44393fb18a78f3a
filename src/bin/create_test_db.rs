use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use pocketledger::{
    Month, NewBudget, NewTransaction, TransactionType, create_budget, create_transaction,
    initialize_db,
};

/// A utility for creating a test database for the pocketledger REST API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many months of sample transactions to create, ending with the current month.
    #[arg(long, short, default_value_t = 6)]
    months: u8,
}

/// Recurring sample expenses: description, category, amount and day of month.
const MONTHLY_EXPENSES: [(&str, &str, f64, u8); 6] = [
    ("Groceries", "Food", 142.35, 3),
    ("Takeaways", "Food", 38.5, 17),
    ("Power bill", "Utilities", 118.0, 12),
    ("Internet", "Utilities", 79.99, 20),
    ("Bus fares", "Travel", 45.0, 9),
    ("New shoes", "Shopping", 89.95, 24),
];

/// Sample budgets created for every month: category and limit.
const MONTHLY_BUDGETS: [(&str, f64); 4] = [
    ("Food", 200.0),
    ("Utilities", 180.0),
    ("Travel", 60.0),
    ("Shopping", 50.0),
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
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let mut first_of_month = OffsetDateTime::now_utc().date().replace_day(1)?;
    let mut months = Vec::with_capacity(usize::from(args.months));

    for _ in 0..args.months {
        months.push(first_of_month);
        first_of_month = (first_of_month - Duration::days(1)).replace_day(1)?;
    }

    for first_of_month in months.into_iter().rev() {
        let month = Month::of(first_of_month);
        println!("Creating transactions and budgets for {month}...");

        create_month(first_of_month, &conn)?;

        for (category, amount) in MONTHLY_BUDGETS {
            create_budget(NewBudget::new(category, amount, month)?, &conn)?;
        }
    }

    println!("Success!");

    Ok(())
}

fn create_month(first_of_month: Date, conn: &Connection) -> Result<(), Box<dyn Error>> {
    create_transaction(
        NewTransaction::new(
            3200.0,
            first_of_month,
            "Monthly salary",
            "Salary",
            TransactionType::Income,
        )?,
        conn,
    )?;

    // Vary the amounts a little so that the charts are not flat.
    let scale = 1.0 + f64::from(u8::from(first_of_month.month()) % 4) * 0.15;

    for (description, category, amount, day) in MONTHLY_EXPENSES {
        create_transaction(
            NewTransaction::new(
                (amount * scale * 100.0).round() / 100.0,
                first_of_month.replace_day(day)?,
                description,
                category,
                TransactionType::Expense,
            )?,
            conn,
        )?;
    }

    Ok(())
}
