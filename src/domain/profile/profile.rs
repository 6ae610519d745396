//! The evolving set of known user attributes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::AttributeValue;

/// Attributes learned about the user so far.
///
/// # Invariants
///
/// - Once set, a value is only ever overwritten by a newer extracted value;
///   it is never cleared back to unknown within a session.
/// - Iteration order is the attribute name order (ordered map), so everything
///   derived from a profile is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeProfile {
    values: BTreeMap<String, AttributeValue>,
}

impl AttributeProfile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for an attribute, if known.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Checks whether an attribute is known.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Sets a single attribute value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Merges extracted deltas into the profile.
    ///
    /// Deltas carry only non-null values by the extractor contract, so every
    /// entry overwrites; nothing is ever removed.
    pub fn merge(&mut self, deltas: BTreeMap<String, AttributeValue>) {
        for (name, value) in deltas {
            self.values.insert(name, value);
        }
    }

    /// Iterates over known attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.values.iter()
    }

    /// Returns the known attribute names in order.
    pub fn known_attributes(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    /// Number of known attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is known yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_adds_and_overwrites() {
        let mut profile = AttributeProfile::new();
        profile.set("region", "Seoul");

        let mut deltas = BTreeMap::new();
        deltas.insert("region".to_string(), AttributeValue::from("Busan"));
        deltas.insert("age".to_string(), AttributeValue::Number(29.0));
        profile.merge(deltas);

        assert_eq!(profile.get("region").unwrap().as_text(), Some("Busan"));
        assert_eq!(profile.get("age").unwrap().as_number(), Some(29.0));
        assert_eq!(profile.len(), 2);
    }

    #[test]
    fn merge_never_removes_attributes() {
        let mut profile = AttributeProfile::new();
        profile.set("region", "Seoul");
        profile.set("age", 29.0);

        let before: Vec<String> = profile.known_attributes().cloned().collect();
        profile.merge(BTreeMap::new());
        let after: Vec<String> = profile.known_attributes().cloned().collect();

        assert_eq!(before, after);
    }

    #[test]
    fn iteration_is_name_ordered() {
        let mut profile = AttributeProfile::new();
        profile.set("region", "Seoul");
        profile.set("age", 29.0);
        profile.set("income_level", "general");

        let names: Vec<&String> = profile.known_attributes().collect();
        assert_eq!(names, ["age", "income_level", "region"]);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut profile = AttributeProfile::new();
        profile.set("age", 34.0);
        profile.set("region", "Seoul");

        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"age":34.0,"region":"Seoul"}"#);
    }
}
