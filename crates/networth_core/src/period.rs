//! Reporting periods and their date ranges.
//!
//! Mapping a period to a range is a pure function of "now": the start is
//! anchored to the first day of its month and the end is the literal date.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::{date_month_index, month_index};
use crate::error::DataError;
use crate::model::{Snapshot, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Period {
    YearToDate,
    /// Trailing 1/3/5-year (or any whole number of years) window ending now
    TrailingYears { years: u8 },
    Custom { start: Date, end: Date },
    AllTime,
}

impl Period {
    pub const ONE_YEAR: Period = Period::TrailingYears { years: 1 };
    pub const THREE_YEARS: Period = Period::TrailingYears { years: 3 };
    pub const FIVE_YEARS: Period = Period::TrailingYears { years: 5 };

    pub fn date_range(&self, now: Date) -> Result<DateRange, DataError> {
        match *self {
            Period::YearToDate => Ok(DateRange {
                start: Some(Date::new(now.year(), 1, 1)?),
                end: now,
            }),
            Period::TrailingYears { years } => {
                let start_year = i32::from(now.year()) - i32::from(years);
                let start_year = i16::try_from(start_year)
                    .map_err(|_| DataError::Date(format!("year {start_year} out of range")))?;
                Ok(DateRange {
                    start: Some(Date::new(start_year, now.month(), 1)?),
                    end: now,
                })
            }
            Period::Custom { start, end } => {
                if end < start {
                    return Err(DataError::InvalidRange { start, end });
                }
                Ok(DateRange {
                    start: Some(start.first_of_month()),
                    end,
                })
            }
            Period::AllTime => Ok(DateRange { start: None, end: now }),
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Period::YearToDate => "YTD".to_string(),
            Period::TrailingYears { years } => format!("{years}Y"),
            Period::Custom { start, end } => format!("{start} to {end}"),
            Period::AllTime => "All time".to_string(),
        }
    }
}

/// Inclusive date range; `start == None` means "from the beginning"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Date,
}

impl DateRange {
    #[must_use]
    pub fn all_until(end: Date) -> Self {
        Self { start: None, end }
    }

    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start.is_none_or(|start| date >= start) && date <= self.end
    }

    /// Whether the month `(year, month)` starts inside the range
    #[must_use]
    pub fn contains_month(&self, year: i16, month: i8) -> bool {
        let index = month_index(year, month);
        self.start
            .is_none_or(|start| index >= date_month_index(start))
            && index <= date_month_index(self.end)
    }

    /// Snapshots whose month falls in the range, order preserved
    #[must_use]
    pub fn filter_snapshots(&self, snapshots: &[Snapshot]) -> Vec<Snapshot> {
        snapshots
            .iter()
            .filter(|s| self.contains_month(s.year, s.month))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn filter_transactions(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.contains(t.date))
            .cloned()
            .collect()
    }
}
