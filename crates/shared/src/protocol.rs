use std::collections::BTreeMap;

use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::{DocumentType, SectionId};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest<'a> {
    pub requirement: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageElement {
    #[serde(default, deserialize_with = "null_as_default")]
    pub element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CoverageElement {
    pub fn named(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

/// Coverage result as returned by the service. Fields this client does not
/// interpret are kept in `extra` so they travel back on generate and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub present_elements: Vec<CoverageElement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_elements: Vec<CoverageElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable_recommendations: Option<Vec<Recommendation>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CoverageAnalysis {
    /// Extracts the coverage object from an analyze response body. Accepts the
    /// documented `{coverage_analysis: {...}}` shape, a doubly nested variant,
    /// and a bare coverage object.
    pub fn from_response(body: Value) -> Result<Self, serde_json::Error> {
        let mut coverage = match body {
            Value::Object(mut map) => match map.remove("coverage_analysis") {
                Some(inner) => inner,
                None => Value::Object(map),
            },
            other => other,
        };
        if let Value::Object(map) = &mut coverage {
            if let Some(Value::Object(inner)) = map.remove("coverage_analysis") {
                coverage = Value::Object(inner);
            }
        }
        serde_json::from_value(coverage)
    }

    /// True when the service sent an explicit, empty recommendation list.
    pub fn backend_listed_no_recommendations(&self) -> bool {
        matches!(&self.editable_recommendations, Some(list) if list.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub requirement: &'a str,
    pub answers: &'a BTreeMap<String, String>,
    pub coverage_analysis: Option<&'a CoverageAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionImage {
    pub name: String,
    /// `data:<mime>;base64,<payload>` URL.
    pub data: String,
    #[serde(default)]
    pub caption: String,
}

pub type SectionImages = BTreeMap<SectionId, Vec<SectionImage>>;

/// Export body. The document travels under a type-specific key
/// (`story_data`, `brd_data`, ...), so serialization is written by hand.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub document_type: DocumentType,
    pub document: &'a Value,
    pub coverage_data: Option<&'a CoverageAnalysis>,
    pub section_images: &'a SectionImages,
}

impl Serialize for ExportRequest<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(self.document_type.export_data_key(), self.document)?;
        map.serialize_entry("coverage_data", &self.coverage_data)?;
        map.serialize_entry("section_images", self.section_images)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub groq_configured: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn coverage_unwraps_nested_analysis_and_keeps_unknown_fields() {
        let body = json!({
            "coverage_analysis": {
                "coverage_analysis": {
                    "present_elements": [{"element": "Actor", "details": "Customer"}],
                    "missing_elements": null,
                    "coverage_score": 40
                }
            }
        });

        let coverage = CoverageAnalysis::from_response(body).expect("coverage");
        assert_eq!(coverage.present_elements.len(), 1);
        assert!(coverage.missing_elements.is_empty());
        assert_eq!(coverage.editable_recommendations, None);
        assert_eq!(coverage.extra.get("coverage_score"), Some(&json!(40)));
    }

    #[test]
    fn explicit_empty_recommendations_are_distinguished_from_absent() {
        let listed: CoverageAnalysis =
            serde_json::from_value(json!({"editable_recommendations": []})).expect("coverage");
        let absent: CoverageAnalysis = serde_json::from_value(json!({})).expect("coverage");
        assert!(listed.backend_listed_no_recommendations());
        assert!(!absent.backend_listed_no_recommendations());
    }

    #[test]
    fn export_request_uses_type_specific_document_key() {
        let document = json!({"project_name": "Atlas"});
        let images = SectionImages::new();
        let request = ExportRequest {
            document_type: DocumentType::Brd,
            document: &document,
            coverage_data: None,
            section_images: &images,
        };

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["brd_data"]["project_name"], "Atlas");
        assert_eq!(value["coverage_data"], Value::Null);
        assert_eq!(value["section_images"], json!({}));
        assert!(value.get("story_data").is_none());
    }
}
