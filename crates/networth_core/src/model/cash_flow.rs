use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::month_index;

/// Transaction type as recorded by the expense store.
///
/// Income amounts are stored positive; every other kind is stored negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    Bill,
    DebtPayment,
    Tax,
}

impl TransactionKind {
    #[inline]
    #[must_use]
    pub fn is_income(self) -> bool {
        matches!(self, TransactionKind::Income)
    }
}

/// Raw dated transaction from the expense store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl Transaction {
    #[must_use]
    pub fn new(kind: TransactionKind, amount: f64, date: Date) -> Self {
        Self {
            kind,
            amount,
            date,
            category_id: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

/// Net external cash flow for one calendar month.
///
/// `net_cash_flow = income - expenses`. Dividend income is a portfolio return,
/// not a contribution, so it is tracked separately and excluded from the net.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CashFlowRecord {
    pub year: i16,
    pub month: i8,
    pub income: f64,
    /// Absolute magnitude of all expense-type transactions
    pub expenses: f64,
    pub dividend_income: f64,
    pub net_cash_flow: f64,
}

impl CashFlowRecord {
    #[inline]
    #[must_use]
    pub fn month_index(&self) -> i32 {
        month_index(self.year, self.month)
    }
}
