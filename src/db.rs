//! Sets up the application's database schema.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, budget::create_budget_table, transaction::create_transaction_table};

/// Create the tables for the domain models if they do not exist yet.
///
/// All tables are created in one exclusive SQL transaction, so either every
/// table exists afterwards or none of the changes are kept.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the tables cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;
    create_budget_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
