//! Parsed records and output field renaming

use crate::error::{Result, RipperError};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{HashMap, HashSet};

/// One parsed line or element: output field name to text value
///
/// Fields keep the order of the schema that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Value of a field by output name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(name, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Convert into an unordered map
    pub fn into_map(self) -> HashMap<String, String> {
        self.fields.into_iter().collect()
    }

    /// Convert the record into a typed object
    ///
    /// `position` is only used to tag the error when the record does not
    /// fit the target type.
    pub fn deserialize_into<T: DeserializeOwned>(&self, position: usize) -> Result<T> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
            .collect();

        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|source| RipperError::Conversion { position, source })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Caller-supplied table substituting output field names
///
/// Names without an entry pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldNameMap {
    renames: HashMap<String, String>,
}

impl FieldNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rename from `from` to `to`
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.insert(from, to);
        self
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.renames.insert(from.into(), to.into());
    }

    /// Parse a `from=to` pair as given on the command line
    pub fn parse_pair(pair: &str) -> Result<(String, String)> {
        match pair.split_once('=') {
            Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
                Ok((from.trim().to_string(), to.trim().to_string()))
            }
            _ => Err(RipperError::configuration(format!(
                "Invalid rename '{}': expected FROM=TO",
                pair
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    /// Output name for a field
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.renames.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Check that renaming `field_names` keeps every output name distinct
    pub fn check_one_to_one<'a>(
        &'a self,
        field_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<()> {
        let mut outputs = HashSet::new();
        for name in field_names {
            let output = self.resolve(name);
            if !outputs.insert(output) {
                return Err(RipperError::configuration(format!(
                    "Renames map more than one field to '{}'",
                    output
                )));
            }
        }
        Ok(())
    }

    /// Substitute keys 1:1, leaving values and order untouched
    ///
    /// Callers check the map with [`FieldNameMap::check_one_to_one`] first;
    /// a colliding map yields duplicate keys.
    pub fn apply(&self, record: Record) -> Record {
        if self.renames.is_empty() {
            return record;
        }

        record
            .into_iter()
            .map(|(name, value)| match self.renames.get(&name) {
                Some(renamed) => (renamed.clone(), value),
                None => (name, value),
            })
            .collect()
    }

    /// Merge another map into this one; entries in `other` win
    pub fn extend(&mut self, other: FieldNameMap) {
        self.renames.extend(other.renames);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldNameMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            renames: iter
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }
}
