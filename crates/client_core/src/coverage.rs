use shared::protocol::{CoverageAnalysis, Recommendation};

pub const DEFAULT_FIELD_TYPE: &str = "textarea";

/// Recommendations to present for a coverage result.
///
/// The service's own `editable_recommendations` win when non-empty. Otherwise
/// one recommendation is synthesized per missing element so the user can still
/// fill the gap before generation.
pub fn recommendations_for(coverage: &CoverageAnalysis) -> Vec<Recommendation> {
    let listed = coverage
        .editable_recommendations
        .as_deref()
        .unwrap_or_default();

    if !listed.is_empty() {
        return listed.iter().map(normalize).collect();
    }

    coverage
        .missing_elements
        .iter()
        .map(|missing| Recommendation {
            element: missing.element.clone(),
            question: Some(format!("Please provide details for {}", missing.element)),
            suggested_answer: Some(
                missing
                    .suggested_content
                    .clone()
                    .filter(|content| !content.trim().is_empty())
                    .unwrap_or_else(|| {
                        format!("Provide {} requirements", missing.element.to_lowercase())
                    }),
            ),
            field_type: Some(DEFAULT_FIELD_TYPE.to_string()),
        })
        .collect()
}

fn normalize(recommendation: &Recommendation) -> Recommendation {
    let question = recommendation
        .question
        .clone()
        .filter(|question| !question.trim().is_empty())
        .unwrap_or_else(|| format!("Please provide {} details", recommendation.element));

    Recommendation {
        element: recommendation.element.clone(),
        question: Some(question),
        suggested_answer: recommendation.suggested_answer.clone(),
        field_type: Some(
            recommendation
                .field_type
                .clone()
                .unwrap_or_else(|| DEFAULT_FIELD_TYPE.to_string()),
        ),
    }
}
