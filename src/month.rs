//! A calendar month, the period used to scope budgets and monthly views.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, timezone::current_month};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month such as `2025-07`.
///
/// Months are written as `YYYY-MM` on the wire and in the database. A date
/// belongs to a month when both the year and the month match, so `2025-07-31`
/// is in `2025-07` but `2025-08-01` is not.
///
/// Months order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u8,
}

impl Month {
    /// Create a month from a four digit year and a month number in `1..=12`.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is out of range or the year
    /// cannot be written with four digits.
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(Error::InvalidMonth(format!("{year:04}-{month:02}")));
        }

        Ok(Self { year, month })
    }

    /// The month that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }

    /// Whether `date` falls in this month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && u8::from(date.month()) == self.month
    }

    /// A short human readable label, e.g. "Jul 2025".
    pub fn label(&self) -> String {
        let name = MONTH_ABBREVIATIONS[usize::from(self.month - 1)];
        format!("{name} {}", self.year)
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_owned());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;

        Month::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Month {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(value: Month) -> Self {
        value.to_string()
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl ToSql for Month {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Month {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// The optional `?month=YYYY-MM` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<Month>,
}

impl MonthQuery {
    /// The requested month, or the current month in `local_timezone` if none was given.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `local_timezone` is not a known timezone.
    pub fn month_or_current(&self, local_timezone: &str) -> Result<Month, Error> {
        match self.month {
            Some(month) => Ok(month),
            None => current_month(local_timezone),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        month::{Month, MonthQuery},
    };

    #[test]
    fn parses_year_and_month() {
        let month: Month = "2025-07".parse().unwrap();

        assert_eq!(month, Month::new(2025, 7).unwrap());
        assert_eq!(month.to_string(), "2025-07");
    }

    #[test]
    fn rejects_malformed_strings() {
        for input in ["", "2025", "2025-7", "25-07", "2025-13", "2025-00", "2025/07", "2025-07-01"]
        {
            assert_eq!(
                input.parse::<Month>(),
                Err(Error::InvalidMonth(input.to_owned())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn contains_only_dates_in_the_same_year_and_month() {
        let july = Month::new(2025, 7).unwrap();

        assert!(july.contains(date!(2025 - 07 - 01)));
        assert!(july.contains(date!(2025 - 07 - 31)));
        assert!(!july.contains(date!(2025 - 08 - 01)));
        assert!(!july.contains(date!(2024 - 07 - 15)));
    }

    #[test]
    fn orders_chronologically() {
        let dec_2024 = Month::new(2024, 12).unwrap();
        let jan_2025 = Month::new(2025, 1).unwrap();

        assert!(dec_2024 < jan_2025);
    }

    #[test]
    fn label_uses_short_month_name() {
        assert_eq!(Month::new(2025, 7).unwrap().label(), "Jul 2025");
    }

    #[test]
    fn serializes_as_string() {
        let month = Month::new(2025, 7).unwrap();

        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2025-07\"");
        assert_eq!(
            serde_json::from_str::<Month>("\"2025-07\"").unwrap(),
            month
        );
        assert!(serde_json::from_str::<Month>("\"July\"").is_err());
    }

    #[test]
    fn query_prefers_requested_month() {
        let query = MonthQuery {
            month: Some(Month::new(2025, 7).unwrap()),
        };

        assert_eq!(
            query.month_or_current("Not/A_Zone"),
            Ok(Month::new(2025, 7).unwrap())
        );
    }

    #[test]
    fn query_without_month_needs_valid_timezone() {
        assert!(MonthQuery::default().month_or_current("Etc/UTC").is_ok());
        assert_eq!(
            MonthQuery::default().month_or_current("Not/A_Zone"),
            Err(Error::InvalidTimezone("Not/A_Zone".to_owned()))
        );
    }
}
