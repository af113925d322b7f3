use std::fmt;

/// Errors raised when analysis parameters are out of range.
///
/// Metric computation itself never fails; these only guard the inputs that
/// shape a computation (window widths, trial counts, allocations, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter value is outside its allowed domain
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Asset allocation percentages do not add up to 100
    AllocationMismatch { equity_pct: f64, bond_pct: f64 },
    /// Distribution parameters rejected by the sampler
    InvalidDistribution {
        kind: &'static str,
        mean: f64,
        std_dev: f64,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid {name} ({value}): {reason}"),
            ConfigError::AllocationMismatch {
                equity_pct,
                bond_pct,
            } => write!(
                f,
                "allocation must sum to 100% (equity={equity_pct}, bond={bond_pct})"
            ),
            ConfigError::InvalidDistribution {
                kind,
                mean,
                std_dev,
                reason,
            } => write!(
                f,
                "invalid {kind} parameters (mean={mean}, std_dev={std_dev}): {reason}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors related to the snapshot/transaction data handed to the engine
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// Snapshot month outside 1..=12
    InvalidMonth { year: i16, month: i8 },
    /// Range end falls before its start
    InvalidRange {
        start: jiff::civil::Date,
        end: jiff::civil::Date,
    },
    /// Date arithmetic failed (out-of-range year, etc.)
    Date(String),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::InvalidMonth { year, month } => {
                write!(f, "invalid snapshot month {year}-{month}")
            }
            DataError::InvalidRange { start, end } => {
                write!(f, "date range ends ({end}) before it starts ({start})")
            }
            DataError::Date(msg) => write!(f, "date calculation error: {msg}"),
        }
    }
}

impl std::error::Error for DataError {}

impl From<jiff::Error> for DataError {
    fn from(err: jiff::Error) -> Self {
        DataError::Date(err.to_string())
    }
}

/// Errors surfaced by an external snapshot or transaction store
#[derive(Debug, Clone)]
pub enum StoreError {
    /// The store could not be reached or read
    Unavailable(String),
    /// The store returned data the engine cannot use
    Data(DataError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {msg}"),
            StoreError::Data(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Data(e) => Some(e),
            StoreError::Unavailable(_) => None,
        }
    }
}

impl From<DataError> for StoreError {
    fn from(err: DataError) -> Self {
        StoreError::Data(err)
    }
}

/// Top-level error for engine entry points
#[derive(Debug, Clone)]
pub enum AnalyticsError {
    Config(ConfigError),
    Data(DataError),
    Store(StoreError),
}

impl fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsError::Config(e) => write!(f, "configuration error: {e}"),
            AnalyticsError::Data(e) => write!(f, "{e}"),
            AnalyticsError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AnalyticsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyticsError::Config(e) => Some(e),
            AnalyticsError::Data(e) => Some(e),
            AnalyticsError::Store(e) => Some(e),
        }
    }
}

impl From<ConfigError> for AnalyticsError {
    fn from(err: ConfigError) -> Self {
        AnalyticsError::Config(err)
    }
}

impl From<DataError> for AnalyticsError {
    fn from(err: DataError) -> Self {
        AnalyticsError::Data(err)
    }
}

impl From<StoreError> for AnalyticsError {
    fn from(err: StoreError) -> Self {
        AnalyticsError::Store(err)
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
