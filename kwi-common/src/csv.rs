//! CSV serialization for flat records
//!
//! Header row is the first record's keys in insertion order. Every row,
//! header included, ends with CRLF. Text values get RFC 4180 style
//! escaping; numbers are written as-is.

use std::fmt;

/// A single CSV cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CsvValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl CsvValue {
    fn render(&self) -> String {
        match self {
            CsvValue::Null => String::new(),
            CsvValue::Text(text) => escape_text(text),
            CsvValue::Integer(n) => n.to_string(),
            CsvValue::Float(x) => x.to_string(),
        }
    }
}

impl From<&str> for CsvValue {
    fn from(value: &str) -> Self {
        CsvValue::Text(value.to_string())
    }
}

impl From<String> for CsvValue {
    fn from(value: String) -> Self {
        CsvValue::Text(value)
    }
}

impl From<i64> for CsvValue {
    fn from(value: i64) -> Self {
        CsvValue::Integer(value)
    }
}

impl From<u32> for CsvValue {
    fn from(value: u32) -> Self {
        CsvValue::Integer(i64::from(value))
    }
}

impl From<f64> for CsvValue {
    fn from(value: f64) -> Self {
        CsvValue::Float(value)
    }
}

impl<T: Into<CsvValue>> From<Option<T>> for CsvValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CsvValue::Null)
    }
}

impl fmt::Display for CsvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Ordered key/value record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvRecord {
    fields: Vec<(String, CsvValue)>,
}

impl CsvRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field append; a repeated key replaces the earlier value in place
    pub fn field(mut self, key: impl Into<String>, value: impl Into<CsvValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CsvValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CsvValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }
}

/// Serialize records to CSV text
///
/// Keys missing from a later record render as empty cells; keys that only
/// appear in later records are ignored. Empty input yields an empty string.
pub fn to_csv(records: &[CsvRecord]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let headers: Vec<&str> = first.keys().collect();
    let mut csv = headers.join(",");
    csv.push_str("\r\n");

    for record in records {
        let line = headers
            .iter()
            .map(|header| record.get(header).map(CsvValue::render).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push_str("\r\n");
    }

    csv
}

fn escape_text(value: &str) -> String {
    let escaped = value.replace('"', "\"\"");
    if escaped.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}
