use crate::mapping::errors::ConversionError;
use crate::mapping::{Field, Record};

const UTF8_BOM: char = '\u{feff}';

/// The mapping from the columns of an imported header to the fields of `R`.
///
/// Resolved once per stream and then applied to every row. Header problems (unknown or
/// missing columns) are not fatal here: they surface as a [`ConversionError`] for each row,
/// so the import still reports every row it was given.
pub struct HeaderLayout<R: Record> {
    header: Vec<String>,
    columns: Vec<Option<&'static Field<R>>>,
    missing: Vec<&'static str>
}

impl<R: Record> HeaderLayout<R> {
    pub fn resolve(header: &[String]) -> Self {
        let header: Vec<String> = header.iter()
            .map(|name| name.trim().trim_start_matches(UTF8_BOM).to_string())
            .collect();

        let columns = header.iter()
            .map(|name| R::FIELDS.iter().find(|field| field.name.eq_ignore_ascii_case(name)))
            .collect();

        let missing = R::FIELDS.iter()
            .filter(|field| field.required)
            .filter(|field| !header.iter().any(|name| field.name.eq_ignore_ascii_case(name)))
            .map(|field| field.name)
            .collect();

        Self {
            header,
            columns,
            missing
        }
    }

    pub fn unknown_columns(&self) -> impl Iterator<Item = &str> {
        self.header.iter()
            .zip(&self.columns)
            .filter(|(_, field)| field.is_none())
            .map(|(name, _)| name.as_str())
    }

    pub fn missing_columns(&self) -> &[&'static str] {
        &self.missing
    }

    /// Converts one raw row, parsing each value according to the column it sits under.
    ///
    /// Declared fields that the header does not mention keep their default value.
    pub fn convert(&self, fields: &[String]) -> Result<R, ConversionError> {
        if let Some(column) = self.unknown_columns().next() {
            return Err(ConversionError::UnknownColumn { column: column.to_string() })
        }

        if let Some(column) = self.missing.first() {
            return Err(ConversionError::MissingColumn { column: *column })
        }

        if fields.len() != self.columns.len() {
            return Err(ConversionError::FieldCount {
                expected: self.columns.len(),
                found: fields.len()
            })
        }

        let mut record = R::default();

        for (field, value) in self.columns.iter().flatten().zip(fields) {
            (field.parse)(&mut record, value).map_err(|source| ConversionError::Field {
                column: field.name,
                source
            })?;
        }

        Ok(record)
    }
}
