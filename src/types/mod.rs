mod errors;
mod fields;

pub use errors::FieldError;
pub use fields::{parse_amount, parse_date, parse_integer, parse_optional_integer, parse_timestamp, FieldValue};

pub type TransactionId = i64;
