//! CSV reading operations.

use std::io::Cursor;

use anyhow::{Context, Result, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, CsvReader, DataType}};

use crate::data::{AttributeRecord, AttributeTable};

/// Reads CSV text into a DataFrame with every column kept as a string.
pub(crate) fn read_csv_string(csv: &str) -> Result<DataFrame> {
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0));

    CsvReader::new(Cursor::new(csv.as_bytes()))
        .with_options(options)
        .finish()
        .context("[io::csv::read] Failed to read CSV from string")
}

/// Parse CSV text into an attribute table keyed by `key_field`.
///
/// Every other column becomes an attribute; cells stay raw text and are parsed on use.
pub fn read_attribute_table(csv: &str, key_field: &str) -> Result<AttributeTable> {
    let df = read_csv_string(csv)?;
    attribute_table_from_frame(&df, key_field)
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column.str()
        .with_context(|| format!("[io::csv::read] column {name:?} is not a string column"))?
        .into_iter()
        .map(|cell| cell.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
        .collect();
    Ok(values)
}

fn attribute_table_from_frame(df: &DataFrame, key_field: &str) -> Result<AttributeTable> {
    let names = df.get_column_names().iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    ensure!(names.iter().any(|name| name == key_field),
        "[io::csv::read] CSV has no {key_field:?} column (found {names:?})");

    let keys = string_column(df, key_field)?;
    let attributes = names.into_iter()
        .filter(|name| name != key_field)
        .collect::<Vec<_>>();
    let columns = attributes.iter()
        .map(|name| string_column(df, name))
        .collect::<Result<Vec<_>>>()?;

    let records = keys.into_iter().enumerate()
        .map(|(row, key)| {
            let key = key.with_context(|| format!("[io::csv::read] row {} has an empty {key_field:?}", row + 1))?;
            let values = attributes.iter().zip(&columns)
                .filter_map(|(name, column)| column[row].as_ref().map(|cell| (name.as_str(), cell.as_str())));
            Ok(AttributeRecord::new(key, values))
        })
        .collect::<Result<Vec<_>>>()?;

    AttributeTable::new(attributes, records)
        .context("[io::csv::read] Failed to build attribute table")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_all_columns_as_raw_strings() {
        let csv = "adm1_code,name,rate\nUSA-3514,Minnesota,12.5\nUSA-3515,Wisconsin,n/a\nUSA-3516,Iowa,\n";
        let table = read_attribute_table(csv, "adm1_code").unwrap();

        assert_eq!(table.attributes(), &["name".to_string(), "rate".to_string()]);
        assert_eq!(table.len(), 3);
        let records = table.records();
        assert_eq!(records[0].key(), "USA-3514");
        assert_eq!(records[0].value("rate"), 12.5);
        assert_eq!(records[1].raw("rate"), Some("n/a"));
        assert!(records[1].value("rate").is_nan());
        assert_eq!(records[2].raw("rate"), None);
        assert!(records[2].value("rate").is_nan());
    }

    #[test]
    fn leading_zeros_survive() {
        let table = read_attribute_table("adm1_code,rate\n007,1\n", "adm1_code").unwrap();
        assert_eq!(table.records()[0].key(), "007");
    }

    #[test]
    fn missing_key_column_is_an_error() {
        assert!(read_attribute_table("code,rate\nA,1\n", "adm1_code").is_err());
    }

    #[test]
    fn duplicate_keys_are_an_error() {
        assert!(read_attribute_table("adm1_code,rate\nA,1\nA,2\n", "adm1_code").is_err());
    }
}
