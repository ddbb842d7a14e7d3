//! Data models and structures
//!
//! Defines the request bodies accepted by the two naming endpoints and the
//! result contracts the model is asked to produce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output language for explanations and UI copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Anything other than `zh` falls back to English.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("zh") => Locale::Zh,
            _ => Locale::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two naming requests is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingTask {
    Generate,
    Explain,
}

impl NamingTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingTask::Generate => "generate-names",
            NamingTask::Explain => "explain-name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameLength {
    Single,
    Double,
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub surname: Option<String>,
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_chars: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_length_preference: Option<NameLength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl GenerateRequest {
    pub fn locale(&self) -> Locale {
        Locale::from_param(self.locale.as_deref())
    }
}

/// Body of `POST /explain`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl ExplainRequest {
    pub fn locale(&self) -> Locale {
        Locale::from_param(self.locale.as_deref())
    }
}

/// Result contract for the explain endpoint. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameExplanation {
    pub name: Option<String>,
    pub pinyin: Option<String>,
    pub meaning: Option<String>,
    pub phonetics: Option<String>,
    pub structure: Option<String>,
    pub culture: Option<String>,
    pub wuxing: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameSuggestion {
    pub name: Option<String>,
    pub pinyin: Option<String>,
    pub meaning: Option<String>,
    pub rationale: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameAnalysis {
    pub phonetics: Option<String>,
    pub structure: Option<String>,
    pub culture: Option<String>,
    pub wuxing: Option<String>,
}

/// Result contract for the generate endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameSuggestionSet {
    #[serde(default)]
    pub suggestions: Vec<NameSuggestion>,
    pub analysis: Option<NameAnalysis>,
}

/// Lenient typed view over a decoded payload.
///
/// Payloads are relayed untouched; these views are only for consumers that
/// want to render individual fields. A payload of the wrong shape yields the
/// empty default instead of an error.
pub trait PayloadView: Sized + Default + serde::de::DeserializeOwned {
    fn from_payload(payload: &serde_json::Value) -> Self {
        serde_json::from_value(payload.clone()).unwrap_or_default()
    }
}

impl PayloadView for NameExplanation {}
impl PayloadView for NameSuggestionSet {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_locale_defaults_to_english() {
        assert_eq!(Locale::from_param(None), Locale::En);
        assert_eq!(Locale::from_param(Some("fr")), Locale::En);
        assert_eq!(Locale::from_param(Some("zh")), Locale::Zh);
    }

    #[test]
    fn test_generate_request_uses_camel_case() {
        let request: GenerateRequest = serde_json::from_value(json!({
            "surname": "李",
            "gender": "male",
            "birthDateTime": "2024-05-01 08:00",
            "expectations": ["平安顺遂"],
            "avoidChars": "明",
            "nameLengthPreference": "single",
            "locale": "zh"
        }))
        .unwrap();

        assert_eq!(request.birth_date_time.as_deref(), Some("2024-05-01 08:00"));
        assert_eq!(request.avoid_chars.as_deref(), Some("明"));
        assert_eq!(request.name_length_preference, Some(NameLength::Single));
        assert_eq!(request.locale(), Locale::Zh);
    }

    #[test]
    fn test_explanation_view_tolerates_partial_payload() {
        let view = NameExplanation::from_payload(&json!({
            "name": "李白",
            "pinyin": "Lǐ Bái",
            "extra": 1
        }));

        assert_eq!(
            view,
            NameExplanation {
                name: Some("李白".to_string()),
                pinyin: Some("Lǐ Bái".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_suggestion_view_of_wrong_shape_is_empty() {
        let view = NameSuggestionSet::from_payload(&json!({"suggestions": "nope"}));
        assert!(view.suggestions.is_empty());
        assert!(view.analysis.is_none());
    }
}
