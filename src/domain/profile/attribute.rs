//! Attribute definitions and values.
//!
//! An attribute is a named, typed dimension of the user profile (age,
//! region, ...). Each definition carries a sensitivity weight in [0,1]
//! (higher means more invasive to ask about) plus the finite option set and
//! phrasing template used when the engine decides to ask for it.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Sensitivity assumed for attributes without a registered definition.
pub const DEFAULT_SENSITIVITY: f64 = 0.5;

/// A typed attribute value extracted from user messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the flag value, if this is a flag.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Flag(b) => write!(f, "{}", b),
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Flag(b)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

/// Definition of a profile attribute the engine may ask about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Attribute name as it appears in profiles and candidate conditions.
    pub name: String,
    /// How invasive this attribute is to ask about, in [0,1].
    pub sensitivity: f64,
    /// Finite answer options for UI rendering; empty for free-text.
    pub options: Vec<String>,
    /// Question phrasing used when this attribute is selected.
    pub prompt: String,
    /// Whether asking requires an explicit consent step in the UI.
    pub requires_consent: bool,
}

impl AttributeDefinition {
    /// Creates a definition, validating name and sensitivity range.
    pub fn new(name: impl Into<String>, sensitivity: f64) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if !(0.0..=1.0).contains(&sensitivity) {
            return Err(ValidationError::out_of_range(
                "sensitivity",
                0.0,
                1.0,
                sensitivity,
            ));
        }
        Ok(Self {
            name,
            sensitivity,
            options: Vec::new(),
            prompt: String::new(),
            requires_consent: false,
        })
    }

    /// Sets the answer options.
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets the phrasing template.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Marks this attribute as requiring consent before asking.
    pub fn with_consent_required(mut self) -> Self {
        self.requires_consent = true;
        self
    }
}

static STANDARD_DEFINITIONS: Lazy<Vec<AttributeDefinition>> = Lazy::new(|| {
    vec![
        AttributeDefinition::new("age", 0.7)
            .unwrap()
            .with_prompt("Knowing your age helps narrow things down. How old are you?"),
        AttributeDefinition::new("region", 0.3)
            .unwrap()
            .with_options(&[
                "Seoul", "Gyeonggi", "Incheon", "Busan", "Daegu", "Gwangju", "Daejeon",
                "Ulsan", "Sejong", "Other",
            ])
            .with_prompt("Which region do you live in?"),
        AttributeDefinition::new("business_status", 0.2)
            .unwrap()
            .with_options(&["yes", "no", "preparing"])
            .with_prompt("Do you have a registered business?"),
        AttributeDefinition::new("income_level", 0.9)
            .unwrap()
            .with_options(&["basic-livelihood", "near-poverty", "general"])
            .with_prompt("Sharing your income bracket lets us find targeted support.")
            .with_consent_required(),
        AttributeDefinition::new("employment_status", 0.3)
            .unwrap()
            .with_options(&["employed", "job-seeking", "student", "other"])
            .with_prompt("What is your current employment status?"),
        AttributeDefinition::new("support_type", 0.2)
            .unwrap()
            .with_options(&["startup", "employment", "housing", "education", "welfare", "other"])
            .with_prompt("What kind of support are you looking for?"),
    ]
});

/// Lookup table of attribute definitions.
///
/// Attributes appearing in candidate conditions but not registered here are
/// still askable; they get [`DEFAULT_SENSITIVITY`], no options, and a generic
/// phrasing.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    definitions: BTreeMap<String, AttributeDefinition>,
}

impl AttributeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the registry with the standard support-program attributes.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in STANDARD_DEFINITIONS.iter() {
            registry.register(def.clone());
        }
        registry
    }

    /// Registers a definition, replacing any previous one with the same name.
    pub fn register(&mut self, definition: AttributeDefinition) {
        self.definitions.insert(definition.name.clone(), definition);
    }

    /// Looks up a definition by attribute name.
    pub fn get(&self, name: &str) -> Option<&AttributeDefinition> {
        self.definitions.get(name)
    }

    /// Returns the sensitivity weight for an attribute.
    pub fn sensitivity(&self, name: &str) -> f64 {
        self.definitions
            .get(name)
            .map(|d| d.sensitivity)
            .unwrap_or(DEFAULT_SENSITIVITY)
    }

    /// Returns the answer options for an attribute (empty for free-text).
    pub fn options(&self, name: &str) -> &[String] {
        self.definitions
            .get(name)
            .map(|d| d.options.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the question phrasing for an attribute.
    pub fn prompt_for(&self, name: &str) -> String {
        match self.definitions.get(name) {
            Some(def) if !def.prompt.is_empty() => def.prompt.clone(),
            _ => format!("Could you tell us about your {}?", name),
        }
    }

    /// Returns whether asking about an attribute requires consent.
    pub fn requires_consent(&self, name: &str) -> bool {
        self.definitions
            .get(name)
            .map(|d| d.requires_consent)
            .unwrap_or(false)
    }
}
