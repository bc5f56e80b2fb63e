//! Bound path parameters.

use serde::ser::SerializeMap;
use serde::Serialize;

use crate::routing::converter::ParamValue;

/// Parameters extracted from a path, in pattern order.
///
/// Also used as the input to reversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    entries: Vec<(String, ParamValue)>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. A repeated name replaces the earlier value.
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Integer value of `name`, if present and bound by an `int` converter.
    pub fn get_int(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(ParamValue::as_int)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, name: &str, value: ParamValue) {
        self.entries.push((name.to_string(), value));
    }

    pub(crate) fn pop(&mut self) {
        self.entries.pop();
    }
}

impl Serialize for PathParams {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
