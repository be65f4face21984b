//! Tenure calculations - whole years and months elapsed since hire date.

use chrono::{Datelike, NaiveDate};

/// Whole years elapsed from `hire_date` to `as_of` (floor).
///
/// A hire anniversary that has not yet passed in the `as_of` year does not
/// count. Never returns a negative value.
pub fn tenure_years(hire_date: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut years = as_of.year() - hire_date.year();
    if (as_of.month(), as_of.day()) < (hire_date.month(), hire_date.day()) {
        years -= 1;
    }
    years.max(0)
}

/// Whole months elapsed from `hire_date` to `as_of` (floor).
pub fn tenure_months(hire_date: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut months =
        (as_of.year() - hire_date.year()) * 12 + as_of.month() as i32 - hire_date.month() as i32;
    if as_of.day() < hire_date.day() {
        months -= 1;
    }
    months.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_tenure_years_floor() {
        // One day before the anniversary: still 4 years
        assert_eq!(tenure_years(d(2020, 6, 15), d(2025, 6, 14)), 4);
        // On the anniversary: 5 years
        assert_eq!(tenure_years(d(2020, 6, 15), d(2025, 6, 15)), 5);
        assert_eq!(tenure_years(d(2020, 6, 15), d(2025, 7, 1)), 5);
    }

    #[test]
    fn test_tenure_years_never_negative() {
        assert_eq!(tenure_years(d(2030, 1, 1), d(2025, 1, 1)), 0);
    }

    #[test]
    fn test_tenure_months() {
        assert_eq!(tenure_months(d(2024, 1, 15), d(2025, 7, 15)), 18);
        assert_eq!(tenure_months(d(2024, 1, 15), d(2025, 7, 14)), 17);
        assert_eq!(tenure_months(d(2025, 1, 1), d(2025, 1, 20)), 0);
    }
}
