//! Loosely-typed record representation for spreadsheet rows
//!
//! A record is an ordered field-name -> value mapping; ordering follows the
//! spreadsheet column order so delivered JSON bodies read like the sheet.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// A single cell value as read from a spreadsheet
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Non-empty text that does not parse as a number
    Text(String),
    /// Finite floating point number
    Number(f64),
    /// Empty cell (or a cell padded in from a short row)
    Empty,
}

impl FieldValue {
    /// Parse a spreadsheet cell into a value
    pub fn parse(cell: &str) -> FieldValue {
        let cell = cell.trim();

        if cell.is_empty() {
            return FieldValue::Empty;
        }

        // Non-finite parses ("inf", "NaN") stay textual, JSON has no encoding for them
        if let Ok(f) = cell.parse::<f64>() {
            if f.is_finite() {
                return FieldValue::Number(f);
            }
        }

        FieldValue::Text(cell.to_string())
    }

    /// Try to get as text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(f) => Some(*f),
            _ => None,
        }
    }

    /// Check if this value is an empty cell
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Empty => Ok(()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            // Empty cells are delivered as "" exactly as the sheet reader reports them
            FieldValue::Empty => serializer.serialize_str(""),
        }
    }
}

/// One spreadsheet row as ordered field -> value pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Set a field, replacing an existing one in place so ordering is stable
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate fields in insertion (column) order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<S: Into<String>> FromIterator<(S, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (S, FieldValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}
