//! Loads everything the dashboard views are computed from.

use rusqlite::Connection;

use crate::{
    Error,
    budget::{Budget, list_budgets},
    transaction::{Transaction, list_transactions},
};

/// All transactions and budgets, read under a single database lock.
///
/// Every view is derived from one snapshot, so the numbers on a page always
/// agree with each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinanceSnapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

impl FinanceSnapshot {
    /// Read both collections from `connection`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if either query fails.
    pub fn load(connection: &Connection) -> Result<Self, Error> {
        let transactions = list_transactions(connection)
            .inspect_err(|error| tracing::error!("could not load transactions: {error}"))?;
        let budgets = list_budgets(None, connection)
            .inspect_err(|error| tracing::error!("could not load budgets: {error}"))?;

        tracing::debug!(
            "Loaded snapshot with {} transactions and {} budgets",
            transactions.len(),
            budgets.len()
        );

        Ok(Self {
            transactions,
            budgets,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        budget::{NewBudget, create_budget},
        dashboard::snapshot::FinanceSnapshot,
        test_utils::get_test_connection,
        transaction::{NewTransaction, TransactionType, create_transaction},
    };

    #[test]
    fn load_reads_both_collections() {
        let connection = get_test_connection();
        let transaction = create_transaction(
            NewTransaction::new(
                12.5,
                date!(2025 - 07 - 03),
                "Coffee",
                "Food",
                TransactionType::Expense,
            )
            .unwrap(),
            &connection,
        )
        .unwrap();
        let budget = create_budget(
            NewBudget::new("Food", 100.0, "2025-07".parse().unwrap()).unwrap(),
            &connection,
        )
        .unwrap();

        let snapshot = FinanceSnapshot::load(&connection).unwrap();

        assert_eq!(snapshot.transactions, vec![transaction]);
        assert_eq!(snapshot.budgets, vec![budget]);
    }

    #[test]
    fn load_empty_database() {
        let connection = get_test_connection();

        let snapshot = FinanceSnapshot::load(&connection).unwrap();

        assert_eq!(snapshot, FinanceSnapshot::default());
    }
}
