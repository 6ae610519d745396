//! Rule-based condition extraction.
//!
//! A deterministic, dependency-free extractor that scans user messages for
//! region names, ages, business status, employment status, and the kind of
//! support being asked for. Useful for demos and as a fallback when no NLU
//! backend is wired in; a production deployment would put an LLM-backed
//! implementation behind the same port.

use async_trait::async_trait;

use crate::domain::profile::{AttributeProfile, AttributeValue};
use crate::ports::{ConditionExtractor, ExtractedConditions, ExtractorError};

/// Confidence reported when at least one rule matched.
const RULE_MATCH_CONFIDENCE: f64 = 0.8;

const REGIONS: &[&str] = &[
    "Seoul", "Gyeonggi", "Incheon", "Busan", "Daegu", "Gwangju", "Daejeon", "Ulsan", "Sejong",
];

/// Support-type keywords, checked in order; the first hit wins.
const SUPPORT_KEYWORDS: &[(&str, &[&str])] = &[
    ("startup", &["startup", "founding", "entrepreneur"]),
    ("employment", &["job", "employment", "hiring", "career"]),
    ("housing", &["housing", "rent", "apartment", "lease"]),
    ("education", &["education", "training", "course", "tuition"]),
];

/// Deterministic keyword extractor for the condition-extraction port.
#[derive(Debug, Clone, Default)]
pub struct KeywordExtractor;

impl KeywordExtractor {
    /// Creates a new keyword extractor.
    pub fn new() -> Self {
        Self
    }

    fn tokens(message: &str) -> Vec<String> {
        message
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect()
    }

    fn extract_region(message: &str) -> Option<AttributeValue> {
        let lower = message.to_lowercase();
        REGIONS
            .iter()
            .find(|region| lower.contains(&region.to_lowercase()))
            .map(|region| AttributeValue::from(*region))
    }

    /// Picks up "29 years old", "age 34", "I'm 41" style mentions.
    fn extract_age(tokens: &[String]) -> Option<AttributeValue> {
        let mentions_age = tokens
            .iter()
            .any(|t| matches!(t.as_str(), "age" | "old" | "year" | "years" | "aged"));
        if !mentions_age {
            return None;
        }

        tokens
            .iter()
            .filter_map(|t| t.parse::<u32>().ok())
            .find(|n| (10..=120).contains(n))
            .map(|n| AttributeValue::Number(f64::from(n)))
    }

    fn extract_business_status(tokens: &[String]) -> Option<AttributeValue> {
        let mentions_business = tokens
            .iter()
            .any(|t| matches!(t.as_str(), "business" | "registered" | "company"));
        if !mentions_business {
            return None;
        }

        let negated = tokens
            .iter()
            .any(|t| matches!(t.as_str(), "no" | "not" | "don" | "haven" | "without"));
        let preparing = tokens.iter().any(|t| t == "preparing" || t == "planning");

        let status = if preparing {
            "preparing"
        } else if negated {
            "no"
        } else {
            "yes"
        };
        Some(AttributeValue::from(status))
    }

    fn extract_employment_status(tokens: &[String]) -> Option<AttributeValue> {
        // Token-level matching keeps "unemployed" from reading as "employed".
        if tokens.iter().any(|t| t == "student") {
            return Some(AttributeValue::from("student"));
        }
        if tokens
            .iter()
            .any(|t| matches!(t.as_str(), "unemployed" | "jobless"))
        {
            return Some(AttributeValue::from("job-seeking"));
        }
        if tokens
            .iter()
            .any(|t| matches!(t.as_str(), "employed" | "working"))
        {
            return Some(AttributeValue::from("employed"));
        }
        None
    }

    fn extract_support_type(tokens: &[String]) -> Option<AttributeValue> {
        for (support_type, keywords) in SUPPORT_KEYWORDS {
            if tokens.iter().any(|t| keywords.contains(&t.as_str())) {
                return Some(AttributeValue::from(*support_type));
            }
        }
        None
    }
}

#[async_trait]
impl ConditionExtractor for KeywordExtractor {
    async fn extract(
        &self,
        message: &str,
        _current_profile: &AttributeProfile,
    ) -> Result<ExtractedConditions, ExtractorError> {
        let tokens = Self::tokens(message);
        let mut extraction = ExtractedConditions::empty();

        if let Some(region) = Self::extract_region(message) {
            extraction = extraction.with_delta("region", region);
        }
        if let Some(age) = Self::extract_age(&tokens) {
            extraction = extraction.with_delta("age", age);
        }
        if let Some(status) = Self::extract_business_status(&tokens) {
            extraction = extraction.with_delta("business_status", status);
        }
        if let Some(status) = Self::extract_employment_status(&tokens) {
            extraction = extraction.with_delta("employment_status", status);
        }
        if let Some(support) = Self::extract_support_type(&tokens) {
            extraction = extraction.with_delta("support_type", support);
        }

        if !extraction.is_empty() {
            extraction.confidence = RULE_MATCH_CONFIDENCE;
        }
        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract(message: &str) -> ExtractedConditions {
        KeywordExtractor::new()
            .extract(message, &AttributeProfile::new())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn extracts_region_case_insensitively() {
        let result = extract("I live in seoul and need help").await;
        assert_eq!(
            result.deltas.get("region"),
            Some(&AttributeValue::from("Seoul"))
        );
    }

    #[tokio::test]
    async fn extracts_age_with_context_words() {
        let result = extract("I'm 29 years old").await;
        assert_eq!(
            result.deltas.get("age"),
            Some(&AttributeValue::Number(29.0))
        );
    }

    #[tokio::test]
    async fn ignores_bare_numbers_without_age_context() {
        let result = extract("I need about 500 in support").await;
        assert!(!result.deltas.contains_key("age"));
    }

    #[tokio::test]
    async fn extracts_negated_business_status() {
        let result = extract("I don't have a registered business yet").await;
        assert_eq!(
            result.deltas.get("business_status"),
            Some(&AttributeValue::from("no"))
        );
    }

    #[tokio::test]
    async fn unemployed_is_not_employed() {
        let result = extract("I'm currently unemployed").await;
        assert_eq!(
            result.deltas.get("employment_status"),
            Some(&AttributeValue::from("job-seeking"))
        );
    }

    #[tokio::test]
    async fn extracts_support_type_from_keywords() {
        let result = extract("looking for housing support, my rent is too high").await;
        assert_eq!(
            result.deltas.get("support_type"),
            Some(&AttributeValue::from("housing"))
        );
    }

    #[tokio::test]
    async fn multiple_attributes_from_one_message() {
        let result = extract("I'm a 34 years old startup founder in Busan").await;
        assert_eq!(result.deltas.len(), 3);
        assert_eq!(result.confidence, RULE_MATCH_CONFIDENCE);
    }

    #[tokio::test]
    async fn empty_extraction_for_unrelated_text() {
        let result = extract("hello there").await;
        assert!(result.is_empty());
        assert_eq!(result.confidence, 0.0);
    }
}
