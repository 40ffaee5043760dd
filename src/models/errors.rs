use chrono::NaiveDate;
use thiserror::Error;

use crate::types::FieldError;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FilterError {
    #[error("Filter [{key}] is not recognized")]
    UnknownKey {
        key: String
    },
    #[error("Filter [{key}] has an invalid value: {source}")]
    InvalidValue {
        key: &'static str,
        source: FieldError
    },
    #[error("Filter date range is inverted: [{date_from}] is after [{date_to}]")]
    InvertedDateRange {
        date_from: NaiveDate,
        date_to: NaiveDate
    }
}

impl FilterError {
    pub fn invalid_value(key: &'static str, source: FieldError) -> Self {
        Self::InvalidValue { key, source }
    }
}
