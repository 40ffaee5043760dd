mod errors;
mod layout;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::{FieldError, FieldValue};

pub use errors::ConversionError;
pub use layout::HeaderLayout;

pub type FieldParser<R> = fn(&mut R, &str) -> Result<(), FieldError>;
pub type FieldAccessor<R> = for<'a> fn(&'a R) -> FieldValue<'a>;

/// One column of a record type: its external name plus how to read it in and out.
pub struct Field<R: 'static> {
    /// Column name used in CSV headers and as the JSON key.
    pub name: &'static str,
    /// Whether the column must be present in an imported header.
    pub required: bool,
    pub parse: FieldParser<R>,
    pub value: FieldAccessor<R>
}

/// A record type whose columns are declared up front in a static, ordered table.
///
/// The order of `FIELDS` is the column order for both import and export.
pub trait Record: Default + Sized + 'static {
    const FIELDS: &'static [Field<Self>];
}

/// Column names of `R` in declaration order.
pub fn headers<R: Record>() -> Vec<&'static str> {
    R::FIELDS.iter().map(|field| field.name).collect()
}

/// Field values of a record in declaration order.
pub fn values<R: Record>(record: &R) -> impl Iterator<Item = FieldValue<'_>> {
    R::FIELDS.iter().map(move |field| (field.value)(record))
}

/// Serializes a record as a map keyed by its column names, in declaration order.
pub struct RecordView<'a, R: Record>(pub &'a R);

impl<R: Record> Serialize for RecordView<'_, R> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(R::FIELDS.len()))?;

        for field in R::FIELDS {
            map.serialize_entry(field.name, &(field.value)(self.0))?;
        }

        map.end()
    }
}
