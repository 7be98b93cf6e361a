use std::fmt;

use ahash::{AHashMap, AHashSet};
use anyhow::{bail, ensure, Result};

/// Parse a raw cell the way attribute values are read everywhere: trimmed, and anything
/// that is not a number becomes NaN.
pub fn parse_value(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// One row of tabular data: a state key plus raw attribute cells.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeRecord {
    key: String,
    values: AHashMap<String, String>,
}

impl AttributeRecord {
    pub fn new<K, V>(key: impl Into<String>, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    #[inline] pub fn key(&self) -> &str { &self.key }

    /// Raw cell text, if the column was present and non-empty.
    #[inline] pub fn raw(&self, name: &str) -> Option<&str> { self.values.get(name).map(String::as_str) }

    /// Parsed value of `name`; NaN when missing or non-numeric.
    pub fn value(&self, name: &str) -> f64 {
        self.raw(name).map(parse_value).unwrap_or(f64::NAN)
    }
}

/// The attribute selected to drive classification and both views for one render pass.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExpressedAttribute(String);

impl ExpressedAttribute {
    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

    #[inline] pub fn name(&self) -> &str { &self.0 }
}

impl fmt::Display for ExpressedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// All records of a dataset plus the ordered set of attribute names it carries.
#[derive(Clone, Debug, Default)]
pub struct AttributeTable {
    attributes: Vec<String>,
    records: Vec<AttributeRecord>,
}

impl AttributeTable {
    /// Build a table, rejecting duplicate keys so lookups stay unambiguous.
    pub fn new(attributes: Vec<String>, records: Vec<AttributeRecord>) -> Result<Self> {
        let mut seen = AHashSet::with_capacity(records.len());
        for record in &records {
            ensure!(seen.insert(record.key()), "[data::record] duplicate key {:?}", record.key());
        }
        Ok(Self { attributes, records })
    }

    #[inline] pub fn attributes(&self) -> &[String] { &self.attributes }

    #[inline] pub fn records(&self) -> &[AttributeRecord] { &self.records }

    #[inline] pub fn len(&self) -> usize { self.records.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Pick the expressed attribute: `name` if given (must be a known attribute),
    /// otherwise the first attribute column.
    pub fn select(&self, name: Option<&str>) -> Result<ExpressedAttribute> {
        match name {
            Some(name) if self.attributes.iter().any(|a| a == name) => Ok(ExpressedAttribute::new(name)),
            Some(name) => bail!("[data::record] unknown attribute {name:?}; expected one of {:?}", self.attributes),
            None => self.attributes.first()
                .map(ExpressedAttribute::new)
                .ok_or_else(|| anyhow::anyhow!("[data::record] table has no attribute columns")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, rate: &str) -> AttributeRecord {
        AttributeRecord::new(key, [("rate", rate)])
    }

    #[test]
    fn values_parse_on_use() {
        let r = AttributeRecord::new("US-A", [("rate", " 12.5 "), ("label", "n/a")]);
        assert_eq!(r.value("rate"), 12.5);
        assert!(r.value("label").is_nan());
        assert!(r.value("missing").is_nan());
        assert_eq!(r.raw("label"), Some("n/a"));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let result = AttributeTable::new(vec!["rate".into()], vec![record("A", "1"), record("A", "2")]);
        assert!(result.is_err());
    }

    #[test]
    fn select_defaults_to_first_attribute() {
        let table = AttributeTable::new(vec!["rate".into(), "count".into()], vec![record("A", "1")]).unwrap();
        assert_eq!(table.select(None).unwrap().name(), "rate");
        assert_eq!(table.select(Some("count")).unwrap().name(), "count");
        assert!(table.select(Some("bogus")).is_err());
    }
}
