use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("invalid time unit: {0}")]
    InvalidGranularity(String),
    #[error("invalid {field}: {value}")]
    UnparsableTimestamp { field: &'static str, value: String },
    #[error("invalid count unit: {0}")]
    InvalidCountUnit(String),
    #[error("requested range spans more than {limit} buckets")]
    RangeTooLarge { limit: usize },
    #[error("{0} not found")]
    NotFound(String),
    #[error("event log unavailable: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AnalyticsError {
    /// True when the caller sent a bad request rather than the system failing.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalyticsError::InvalidGranularity(_)
                | AnalyticsError::UnparsableTimestamp { .. }
                | AnalyticsError::InvalidCountUnit(_)
                | AnalyticsError::RangeTooLarge { .. }
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnalyticsError::InvalidGranularity(_) => "invalid_granularity",
            AnalyticsError::UnparsableTimestamp { .. } => "unparsable_timestamp",
            AnalyticsError::InvalidCountUnit(_) => "invalid_count_unit",
            AnalyticsError::RangeTooLarge { .. } => "range_too_large",
            AnalyticsError::NotFound(_) => "not_found",
            AnalyticsError::Store(_) => "store",
            AnalyticsError::Internal(_) => "internal",
        }
    }
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
