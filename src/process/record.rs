// src/process/record.rs

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A successfully coerced field value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

/// Why a field has no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// INTEGER or BOOLEAN field whose text is not a base-10 integer.
    NotAnInteger,
    /// The field sits at or after a column whose width could not be parsed.
    UnknownOffset,
}

/// Outcome of coercing one field. `Invalid` serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coerced {
    Valid(Value),
    Invalid(InvalidReason),
}

impl Coerced {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Coerced::Valid(v) => Some(v),
            Coerced::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Coerced::Valid(_))
    }
}

impl Serialize for Coerced {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Coerced::Valid(v) => v.serialize(serializer),
            Coerced::Invalid(_) => serializer.serialize_none(),
        }
    }
}

/// One decoded row: field name → value, kept in schema order.
///
/// Names are unique. Inserting a name that is already present replaces the
/// earlier value where it stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    entries: Vec<(String, Coerced)>,
}

impl Record {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    pub fn insert(&mut self, name: &str, value: Coerced) {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Coerced> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Shorthand for the valid value of `name`, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Coerced::value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Coerced)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
