//! Monthly cash-flow aggregation.
//!
//! Turns raw income/expense transactions into one [`CashFlowRecord`] per
//! calendar month, and offers a [`CashFlowSeries`] view for range queries.
//! The series is built once per request so per-window lookups never go back
//! to the store.

use std::collections::BTreeMap;

use crate::model::{CashFlowRecord, Transaction};

/// Group transactions into monthly cash-flow records, ascending by month.
///
/// Income with `category_id == dividend_category` is counted as dividend
/// income, not as an external contribution. Expense-type amounts are stored
/// negative by the expense store; their magnitude is summed into `expenses`.
#[must_use]
pub fn aggregate_cash_flows(
    transactions: &[Transaction],
    dividend_category: Option<&str>,
) -> Vec<CashFlowRecord> {
    let mut by_month: BTreeMap<(i16, i8), CashFlowRecord> = BTreeMap::new();

    for tx in transactions {
        let key = (tx.date.year(), tx.date.month());
        let record = by_month.entry(key).or_insert_with(|| CashFlowRecord {
            year: key.0,
            month: key.1,
            ..Default::default()
        });

        if tx.kind.is_income() {
            let is_dividend = dividend_category
                .is_some_and(|dividend| tx.category_id.as_deref() == Some(dividend));
            if is_dividend {
                record.dividend_income += tx.amount;
            } else {
                record.income += tx.amount;
            }
        } else {
            record.expenses += tx.amount.abs();
        }
    }

    let records: Vec<CashFlowRecord> = by_month
        .into_values()
        .map(|mut record| {
            record.net_cash_flow = record.income - record.expenses;
            record
        })
        .collect();

    tracing::debug!(
        transactions = transactions.len(),
        months = records.len(),
        "aggregated cash flows"
    );
    records
}

/// Read-only view over aggregated monthly cash flows with O(log n) range sums.
#[derive(Debug, Clone)]
pub struct CashFlowSeries {
    records: Vec<CashFlowRecord>,
    month_indices: Vec<i32>,
    /// `prefix_net[k]` = sum of `net_cash_flow` over the first `k` records
    prefix_net: Vec<f64>,
    prefix_dividends: Vec<f64>,
}

impl Default for CashFlowSeries {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CashFlowSeries {
    /// Build from records in any order; duplicate months are summed.
    #[must_use]
    pub fn new(records: Vec<CashFlowRecord>) -> Self {
        let mut merged: BTreeMap<i32, CashFlowRecord> = BTreeMap::new();
        for record in records {
            merged
                .entry(record.month_index())
                .and_modify(|existing| {
                    existing.income += record.income;
                    existing.expenses += record.expenses;
                    existing.dividend_income += record.dividend_income;
                    existing.net_cash_flow += record.net_cash_flow;
                })
                .or_insert(record);
        }

        let records: Vec<CashFlowRecord> = merged.into_values().collect();
        let month_indices = records.iter().map(CashFlowRecord::month_index).collect();

        let mut prefix_net = Vec::with_capacity(records.len() + 1);
        let mut prefix_dividends = Vec::with_capacity(records.len() + 1);
        prefix_net.push(0.0);
        prefix_dividends.push(0.0);
        let (mut net, mut dividends) = (0.0, 0.0);
        for record in &records {
            net += record.net_cash_flow;
            dividends += record.dividend_income;
            prefix_net.push(net);
            prefix_dividends.push(dividends);
        }

        Self {
            records,
            month_indices,
            prefix_net,
            prefix_dividends,
        }
    }

    /// Aggregate transactions and wrap the result in one step
    #[must_use]
    pub fn from_transactions(transactions: &[Transaction], dividend_category: Option<&str>) -> Self {
        Self::new(aggregate_cash_flows(transactions, dividend_category))
    }

    #[must_use]
    pub fn records(&self) -> &[CashFlowRecord] {
        &self.records
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position range of records with month index in `(after, through]`
    fn bounds(&self, after: i32, through: i32) -> (usize, usize) {
        if through <= after {
            return (0, 0);
        }
        let lo = self.month_indices.partition_point(|&m| m <= after);
        let hi = self.month_indices.partition_point(|&m| m <= through);
        (lo, hi.max(lo))
    }

    /// Records whose month index lies in `[first, last]`
    #[must_use]
    pub fn in_range(&self, first: i32, last: i32) -> &[CashFlowRecord] {
        let (lo, hi) = self.bounds(first - 1, last);
        &self.records[lo..hi]
    }

    /// Net external cash flow for months strictly after `after` up to and including `through`
    #[must_use]
    pub fn net_between(&self, after: i32, through: i32) -> f64 {
        let (lo, hi) = self.bounds(after, through);
        self.prefix_net[hi] - self.prefix_net[lo]
    }

    /// Dividend income for months strictly after `after` up to and including `through`
    #[must_use]
    pub fn dividends_between(&self, after: i32, through: i32) -> f64 {
        let (lo, hi) = self.bounds(after, through);
        self.prefix_dividends[hi] - self.prefix_dividends[lo]
    }
}
