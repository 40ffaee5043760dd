use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::types::errors::FieldError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A borrowed, typed view of one field of a record.
///
/// Used on the way out: `Display` renders the CSV cell, `Serialize` renders the JSON value.
/// Absent optional values render as an empty cell and as `null` respectively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Integer(Option<i64>),
    Amount(Option<Decimal>),
    Timestamp(Option<NaiveDateTime>),
    Text(&'a str)
}

impl Display for FieldValue<'_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(Some(value)) => write!(formatter, "{value}"),
            FieldValue::Amount(Some(value)) => write!(formatter, "{value}"),
            FieldValue::Timestamp(Some(value)) => write!(formatter, "{}", value.format(TIMESTAMP_FORMAT)),
            FieldValue::Text(value) => formatter.write_str(value),
            FieldValue::Integer(None) | FieldValue::Amount(None) | FieldValue::Timestamp(None) => Ok(())
        }
    }
}

impl Serialize for FieldValue<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Integer(Some(value)) => serializer.serialize_i64(*value),
            FieldValue::Text(value) => serializer.serialize_str(value),
            //NOTE: Amounts keep their exact scale as strings
            FieldValue::Amount(Some(_)) | FieldValue::Timestamp(Some(_)) => serializer.collect_str(self),
            FieldValue::Integer(None) | FieldValue::Amount(None) | FieldValue::Timestamp(None) => serializer.serialize_none()
        }
    }
}

pub fn parse_integer(value: &str) -> Result<i64, FieldError> {
    let value = value.trim();

    i64::from_str(value).map_err(|error| FieldError::InvalidInteger {
        value: value.to_string(),
        reason: error.to_string()
    })
}

/// Like [`parse_integer`] but an empty value means "absent".
pub fn parse_optional_integer(value: &str) -> Result<Option<i64>, FieldError> {
    if value.trim().is_empty() {
        return Ok(None)
    }

    parse_integer(value).map(Some)
}

pub fn parse_amount(value: &str) -> Result<Option<Decimal>, FieldError> {
    let value = value.trim();

    if value.is_empty() {
        return Ok(None)
    }

    Decimal::from_str(value)
        .map(Some)
        .map_err(|error| FieldError::InvalidAmount {
            value: value.to_string(),
            reason: error.to_string()
        })
}

pub fn parse_timestamp(value: &str) -> Result<Option<NaiveDateTime>, FieldError> {
    let value = value.trim();

    if value.is_empty() {
        return Ok(None)
    }

    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, ISO_TIMESTAMP_FORMAT))
        .map(Some)
        .map_err(|_| FieldError::InvalidTimestamp { value: value.to_string() })
}

pub fn parse_date(value: &str) -> Result<NaiveDate, FieldError> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| FieldError::InvalidDate { value: value.to_string() })
}
