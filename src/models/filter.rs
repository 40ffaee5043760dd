use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::errors::FilterError;
use crate::models::Transaction;
use crate::types::{parse_date, parse_integer, TransactionId};

/// The set of constraints an export is restricted to. All present constraints must hold.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TransactionFilter {
    pub transaction_id: Option<TransactionId>,
    /// Exact match.
    pub terminal_id: Option<String>,
    /// Exact match.
    pub status: Option<String>,
    /// Substring match.
    pub payment_narrative: Option<String>,
    /// Inclusive lower bound on the posting date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the posting date.
    pub date_to: Option<NaiveDate>
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transaction_id(mut self, transaction_id: TransactionId) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    pub fn with_terminal_id(mut self, terminal_id: &str) -> Self {
        self.terminal_id = Some(terminal_id.to_string());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_payment_narrative(mut self, payment_narrative: &str) -> Self {
        self.payment_narrative = Some(payment_narrative.to_string());
        self
    }

    /// Sets the posting date range, rejecting a range whose start is after its end.
    pub fn with_date_range(mut self, date_from: Option<NaiveDate>, date_to: Option<NaiveDate>) -> Result<Self, FilterError> {
        self.date_from = date_from;
        self.date_to = date_to;
        self.validate()?;

        Ok(self)
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(date_from), Some(date_to)) = (self.date_from, self.date_to) {
            if date_from > date_to {
                return Err(FilterError::InvertedDateRange { date_from, date_to })
            }
        }

        Ok(())
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if self.transaction_id.is_some_and(|id| id != transaction.transaction_id) {
            return false
        }

        if self.terminal_id.as_ref().is_some_and(|terminal_id| *terminal_id != transaction.terminal_id) {
            return false
        }

        if self.status.as_ref().is_some_and(|status| *status != transaction.status) {
            return false
        }

        if self.payment_narrative.as_ref().is_some_and(|narrative| !transaction.payment_narrative.contains(narrative.as_str())) {
            return false
        }

        if self.date_from.is_none() && self.date_to.is_none() {
            return true
        }

        //NOTE: A transaction without a posting date can never satisfy a date bound
        let Some(posted) = transaction.date_post.map(|timestamp| timestamp.date()) else {
            return false
        };

        self.date_from.is_none_or(|date_from| posted >= date_from) && self.date_to.is_none_or(|date_to| posted <= date_to)
    }
}

/// Raw, string-typed filter values as they arrive from a query string or the command line.
///
/// Empty values are treated as absent. Convert with `TransactionFilter::try_from`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub transaction_id: Option<String>,
    pub terminal_id: Option<String>,
    pub status: Option<String>,
    pub payment_narrative: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>
}

impl FilterParams {
    /// Sets one parameter by its query key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        let slot = match key {
            "transaction_id" => &mut self.transaction_id,
            "terminal_id" => &mut self.terminal_id,
            "status" => &mut self.status,
            "payment_narrative" => &mut self.payment_narrative,
            "date_from" => &mut self.date_from,
            "date_to" => &mut self.date_to,
            _ => return Err(FilterError::UnknownKey { key: key.to_string() })
        };

        *slot = Some(value.to_string());

        Ok(())
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl TryFrom<FilterParams> for TransactionFilter {
    type Error = FilterError;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        let transaction_id = present(params.transaction_id)
            .map(|value| parse_integer(&value))
            .transpose()
            .map_err(|source| FilterError::invalid_value("transaction_id", source))?;

        let date_from = present(params.date_from)
            .map(|value| parse_date(&value))
            .transpose()
            .map_err(|source| FilterError::invalid_value("date_from", source))?;

        let date_to = present(params.date_to)
            .map(|value| parse_date(&value))
            .transpose()
            .map_err(|source| FilterError::invalid_value("date_to", source))?;

        let mut filter = Self::new();

        if let Some(transaction_id) = transaction_id {
            filter = filter.with_transaction_id(transaction_id);
        }

        if let Some(terminal_id) = present(params.terminal_id) {
            filter = filter.with_terminal_id(&terminal_id);
        }

        if let Some(status) = present(params.status) {
            filter = filter.with_status(&status);
        }

        if let Some(payment_narrative) = present(params.payment_narrative) {
            filter = filter.with_payment_narrative(&payment_narrative);
        }

        filter.with_date_range(date_from, date_to)
    }
}
