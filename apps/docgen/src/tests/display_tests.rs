use client_core::render_document;
use serde_json::json;
use shared::{
    domain::{DocumentType, SectionId},
    protocol::{CoverageElement, SectionImage},
};

use super::*;

#[test]
fn coverage_lists_present_and_missing_elements() {
    let mut missing = CoverageElement::named("Trigger");
    missing.suggested_content = Some("Nightly at 02:00".to_string());
    let coverage = CoverageAnalysis {
        present_elements: vec![CoverageElement::named("Actor")],
        missing_elements: vec![missing],
        ..CoverageAnalysis::default()
    };

    let text = format_coverage(&coverage, Some("Generate Enterprise Story"));

    assert!(text.contains("Present elements (1):\n  [x] Actor\n"));
    assert!(text.contains("  [ ] Trigger (suggested: Nightly at 02:00)"));
    assert!(text.contains("Generate Enterprise Story"));
}

#[test]
fn empty_form_has_no_questions() {
    assert_eq!(format_questions(&AnswerForm::default()), "No open questions.\n");
}

#[test]
fn document_text_includes_tables_and_images() {
    let rendered = render_document(
        DocumentType::Brd,
        &json!({
            "project_name": "Vendor Portal",
            "stakeholders": [{"name": "Ana", "role": "Sponsor"}]
        }),
    );
    let mut images = SectionImages::new();
    images.insert(
        SectionId::from("stakeholders"),
        vec![SectionImage {
            name: "org.png".to_string(),
            data: "data:image/png;base64,AA==".to_string(),
            caption: "Org chart".to_string(),
        }],
    );

    let text = format_document(&rendered, &images);

    assert!(text.starts_with("Step 4: Generated Business Requirements Document\n"));
    assert!(text.contains("== Project Name [project-name]\n    Vendor Portal\n"));
    assert!(text.contains("Name | Role | Department | Responsibilities"));
    assert!(text.contains("[image 1] org.png: Org chart"));
}

#[test]
fn empty_document_says_so() {
    let rendered = render_document(DocumentType::Frd, &json!({}));
    let text = format_document(&rendered, &SectionImages::new());
    assert!(text.contains("(the service returned no content)"));
}
