// src/schema/types.rs

use std::fmt;

/// Declared type of a fixed-width column.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub enum DataType {
    Text,
    Integer,
    Boolean,
    /// Any tag other than the three above. Decodes exactly like `Text`.
    Unknown(String),
}

impl DataType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TEXT" => DataType::Text,
            "INTEGER" => DataType::Integer,
            "BOOLEAN" => DataType::Boolean,
            other => DataType::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Text => f.write_str("TEXT"),
            DataType::Integer => f.write_str("INTEGER"),
            DataType::Boolean => f.write_str("BOOLEAN"),
            DataType::Unknown(tag) => write!(f, "{tag}"),
        }
    }
}

/// Character width of a column, or the raw token when it could not be parsed.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub enum Width {
    Chars(usize),
    Invalid(String),
}

impl Width {
    pub fn chars(&self) -> Option<usize> {
        match self {
            Width::Chars(n) => Some(*n),
            Width::Invalid(_) => None,
        }
    }
}

/// A single column definition as parsed from a schema row.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct FieldSpec {
    pub name: String,
    pub width: Width,
    pub data_type: DataType,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, width: usize, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            width: Width::Chars(width),
            data_type,
        }
    }
}

/// Ordered column layout; position in the list defines the offset in a row.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sum of all valid widths: the length of a fully populated row.
    /// Saturates at `usize::MAX` instead of overflowing.
    pub fn total_width(&self) -> usize {
        self.fields
            .iter()
            .filter_map(|f| f.width.chars())
            .fold(0, usize::saturating_add)
    }

    pub fn has_invalid_widths(&self) -> bool {
        self.fields.iter().any(|f| f.width.chars().is_none())
    }
}
