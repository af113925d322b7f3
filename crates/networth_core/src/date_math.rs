//! Calendar-month arithmetic for monthly series.
//!
//! Snapshots and cash-flow records are keyed by `(year, month)`. Rather than
//! going through jiff `Span` for every comparison, months are mapped onto a
//! flat index (`year * 12 + month - 1`) so differences and range checks are
//! plain integer operations.

use jiff::civil::Date;

use crate::error::DataError;

/// Flat month index: consecutive calendar months differ by exactly 1.
#[inline]
pub fn month_index(year: i16, month: i8) -> i32 {
    i32::from(year) * 12 + i32::from(month) - 1
}

/// Month index of the month containing `date`.
#[inline]
pub fn date_month_index(date: Date) -> i32 {
    month_index(date.year(), date.month())
}

/// First day of the given month, validating the month number.
pub fn month_start(year: i16, month: i8) -> Result<Date, DataError> {
    if !(1..=12).contains(&month) {
        return Err(DataError::InvalidMonth { year, month });
    }
    Ok(Date::new(year, month, 1)?)
}
