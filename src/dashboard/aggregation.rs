//! Transaction aggregation for the dashboard and charts.
//!
//! Every function here is a pure computation over a slice of transactions, so
//! the same snapshot always produces the same numbers.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::{
    category::category_color,
    month::Month,
    transaction::{Transaction, TransactionType},
};

/// The total expenses of one category over a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryExpense {
    pub category: String,
    pub amount: f64,
    /// The number of expense transactions in the category.
    pub count: usize,
    pub color: &'static str,
}

/// The total expenses in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyExpense {
    pub month: Month,
    /// A short label for chart axes, e.g. "Jul 2025".
    pub label: String,
    pub total: f64,
}

fn in_period(transaction: &Transaction, month: Option<Month>) -> bool {
    month.is_none_or(|month| month.contains(transaction.date))
}

/// Sums the amounts of transactions of type `kind`.
///
/// If `month` is `None` all transactions are included, otherwise only those
/// dated in `month`.
pub fn total_by_type(
    transactions: &[Transaction],
    kind: TransactionType,
    month: Option<Month>,
) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind && in_period(transaction, month))
        .fold(0.0, |total, transaction| total + transaction.amount)
}

/// All time income minus all time expenses.
pub fn net_balance(transactions: &[Transaction]) -> f64 {
    total_by_type(transactions, TransactionType::Income, None)
        - total_by_type(transactions, TransactionType::Expense, None)
}

/// Income minus expenses for the transactions dated in `month`.
pub fn monthly_net(transactions: &[Transaction], month: Month) -> f64 {
    total_by_type(transactions, TransactionType::Income, Some(month))
        - total_by_type(transactions, TransactionType::Expense, Some(month))
}

/// Groups expenses by category.
///
/// Income is ignored. If `month` is `None` the breakdown covers all time.
///
/// # Returns
/// One entry per category, largest amount first. Equal amounts are ordered
/// by category name.
pub fn category_breakdown(
    transactions: &[Transaction],
    month: Option<Month>,
) -> Vec<CategoryExpense> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();

    for transaction in transactions.iter().filter(|transaction| {
        transaction.kind == TransactionType::Expense && in_period(transaction, month)
    }) {
        let (amount, count) = totals.entry(transaction.category.as_str()).or_default();
        *amount += transaction.amount;
        *count += 1;
    }

    let mut breakdown: Vec<CategoryExpense> = totals
        .into_iter()
        .map(|(category, (amount, count))| CategoryExpense {
            category: category.to_owned(),
            amount,
            count,
            color: category_color(category),
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    breakdown
}

/// The `n` categories with the largest expenses, largest first.
pub fn top_categories(
    transactions: &[Transaction],
    month: Option<Month>,
    n: usize,
) -> Vec<CategoryExpense> {
    let mut breakdown = category_breakdown(transactions, month);
    breakdown.truncate(n);
    breakdown
}

/// The amount spent in `category` during `month`.
pub fn spent_in_category(transactions: &[Transaction], category: &str, month: Month) -> f64 {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.kind == TransactionType::Expense
                && transaction.category == category
                && month.contains(transaction.date)
        })
        .fold(0.0, |total, transaction| total + transaction.amount)
}

/// Total expenses per month for the latest `window` months that have expenses.
///
/// # Returns
/// Months in chronological order. Months without any expenses are skipped.
pub fn monthly_expense_trend(transactions: &[Transaction], window: usize) -> Vec<MonthlyExpense> {
    let mut totals: BTreeMap<Month, f64> = BTreeMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Expense)
    {
        *totals.entry(Month::of(transaction.date)).or_insert(0.0) += transaction.amount;
    }

    let skip = totals.len().saturating_sub(window);

    totals
        .into_iter()
        .skip(skip)
        .map(|(month, total)| MonthlyExpense {
            month,
            label: month.label(),
            total,
        })
        .collect()
}

/// The `n` transactions with the latest dates, latest first.
///
/// Transactions on the same date keep their order in `transactions`.
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    sorted.into_iter().take(n).cloned().collect()
}
