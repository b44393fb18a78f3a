//! Field rules shared by transactions and budgets.

use crate::Error;

/// Check that `amount` is a finite number greater than zero.
///
/// # Errors
/// Returns [Error::InvalidAmount] otherwise.
pub fn positive_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(amount))
    }
}

/// Trim `text` and check that something is left.
///
/// # Errors
/// Returns `empty_error` if `text` is empty or only whitespace.
pub fn non_empty(text: &str, empty_error: Error) -> Result<String, Error> {
    let text = text.trim();

    if text.is_empty() {
        Err(empty_error)
    } else {
        Ok(text.to_owned())
    }
}
