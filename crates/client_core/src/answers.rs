use std::collections::BTreeMap;

use serde::Serialize;
use shared::protocol::Recommendation;

use crate::coverage::DEFAULT_FIELD_TYPE;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerField {
    pub element: String,
    pub question: String,
    pub field_type: String,
    pub value: String,
}

/// Open answer fields, one per recommendation, pre-filled with the suggested
/// answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerForm {
    fields: Vec<AnswerField>,
}

impl AnswerForm {
    pub fn from_recommendations(recommendations: &[Recommendation]) -> Self {
        let fields = recommendations
            .iter()
            .map(|rec| AnswerField {
                element: rec.element.clone(),
                question: rec
                    .question
                    .clone()
                    .unwrap_or_else(|| format!("Please provide {} details", rec.element)),
                field_type: rec
                    .field_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FIELD_TYPE.to_string()),
                value: rec.suggested_answer.clone().unwrap_or_default(),
            })
            .collect();
        Self { fields }
    }

    pub fn fields(&self) -> &[AnswerField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sets every field generated for `element`. Returns false when the form
    /// has no such field.
    pub fn set(&mut self, element: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        let mut found = false;
        for field in self.fields.iter_mut().filter(|f| f.element == element) {
            field.value = value.clone();
            found = true;
        }
        found
    }

    pub fn set_at(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.fields.get_mut(index) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Current answers keyed by element, trimmed, blank fields skipped.
    pub fn collect(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|field| {
                let value = field.value.trim();
                (!value.is_empty()).then(|| (field.element.clone(), value.to_string()))
            })
            .collect()
    }
}

/// Left join: keys in `incoming` overwrite, everything else in `existing`
/// survives.
pub fn merge_answers(
    existing: &BTreeMap<String, String>,
    incoming: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = existing.clone();
    merged.extend(incoming);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(element: &str, suggested: Option<&str>) -> Recommendation {
        Recommendation {
            element: element.to_string(),
            question: None,
            suggested_answer: suggested.map(str::to_string),
            field_type: None,
        }
    }

    #[test]
    fn collect_skips_blank_fields_and_trims() {
        let mut form = AnswerForm::from_recommendations(&[
            rec("Actor", None),
            rec("Trigger", Some("  ")),
            rec("Risks", Some("Data loss")),
        ]);
        assert!(form.set("Actor", "  Customer \n"));

        let answers = form.collect();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get("Actor").map(String::as_str), Some("Customer"));
        assert_eq!(answers.get("Risks").map(String::as_str), Some("Data loss"));
        assert!(!answers.contains_key("Trigger"));
    }

    #[test]
    fn merge_keeps_earlier_keys_not_overwritten() {
        let first = AnswerForm::from_recommendations(&[
            rec("Actor", Some("Customer")),
            rec("Business Goal", Some("Fewer support calls")),
        ])
        .collect();
        let merged = merge_answers(&BTreeMap::new(), first);

        let mut second_form = AnswerForm::from_recommendations(&[
            rec("Actor", Some("Admin")),
            rec("Trigger", Some("Forgot password link")),
        ]);
        second_form.set_at(1, "Reset link clicked");
        let merged = merge_answers(&merged, second_form.collect());

        assert_eq!(merged.get("Actor").map(String::as_str), Some("Admin"));
        assert_eq!(
            merged.get("Business Goal").map(String::as_str),
            Some("Fewer support calls")
        );
        assert_eq!(
            merged.get("Trigger").map(String::as_str),
            Some("Reset link clicked")
        );

        let third = merge_answers(&merged, BTreeMap::new());
        assert_eq!(third, merged);
    }

    #[test]
    fn setting_unknown_element_reports_missing_field() {
        let mut form = AnswerForm::from_recommendations(&[rec("Actor", None)]);
        assert!(!form.set("Budget", "10k"));
        assert!(!form.set_at(4, "x"));
    }
}
