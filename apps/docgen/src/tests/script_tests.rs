use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use client_core::{AnalysisService, ServiceError};
use serde_json::{json, Value};
use shared::{
    domain::DocumentType,
    protocol::{CoverageAnalysis, CoverageElement, ExportRequest, GenerateRequest, HealthResponse},
};

use super::*;

#[derive(Default)]
struct RecordingService {
    generated_with: Mutex<Vec<Value>>,
    exported: Mutex<Vec<(ExportFormat, Value)>>,
}

#[async_trait]
impl AnalysisService for RecordingService {
    async fn analyze(
        &self,
        _document_type: DocumentType,
        _requirement: &str,
    ) -> Result<CoverageAnalysis, ServiceError> {
        Ok(CoverageAnalysis {
            missing_elements: vec![CoverageElement::named("Actor")],
            ..CoverageAnalysis::default()
        })
    }

    async fn generate(
        &self,
        _document_type: DocumentType,
        request: &GenerateRequest<'_>,
    ) -> Result<Value, ServiceError> {
        self.generated_with
            .lock()
            .expect("lock")
            .push(serde_json::to_value(request.answers)?);
        Ok(json!({"actor": "Customer", "risks": ["Churn"]}))
    }

    async fn export(
        &self,
        format: ExportFormat,
        request: &ExportRequest<'_>,
    ) -> Result<Vec<u8>, ServiceError> {
        self.exported
            .lock()
            .expect("lock")
            .push((format, serde_json::to_value(request)?));
        Ok(b"exported".to_vec())
    }

    async fn health(&self) -> Result<HealthResponse, ServiceError> {
        Err(ServiceError::Backend {
            status: 503,
            message: "not under test".to_string(),
        })
    }
}

#[tokio::test]
async fn scripted_run_answers_generates_and_exports() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = dir.path().join("persona.jpg");
    std::fs::write(&image, [0xff, 0xd8, 0xff]).expect("image");
    let service = Arc::new(RecordingService::default());
    let controller = WizardController::new(service.clone(), dir.path());

    let saved = run_scripted(
        &controller,
        &ScriptedRun {
            requirement: "Customers can reset a forgotten password".to_string(),
            answers: vec![("Actor".to_string(), "Customer".to_string())],
            images: vec![(SectionId::from("actor"), image)],
            exports: vec![ExportFormat::Word, ExportFormat::Pdf],
        },
    )
    .await
    .expect("run");

    assert_eq!(
        saved,
        vec![
            dir.path().join("enterprise_user_story.docx"),
            dir.path().join("enterprise_user_story.pdf"),
        ]
    );
    assert_eq!(
        service.generated_with.lock().expect("lock").as_slice(),
        [json!({"Actor": "Customer"})]
    );
    let exported = service.exported.lock().expect("lock");
    assert_eq!(exported.len(), 2);
    assert_eq!(exported[0].1["story_data"]["actor"], "Customer");
    assert_eq!(exported[0].1["section_images"]["actor"][0]["name"], "persona.jpg");
}

#[tokio::test]
async fn scripted_run_rejects_answers_for_unknown_elements() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = Arc::new(RecordingService::default());
    let controller = WizardController::new(service.clone(), dir.path());

    let err = run_scripted(
        &controller,
        &ScriptedRun {
            requirement: "Password reset".to_string(),
            answers: vec![("Budget".to_string(), "10k".to_string())],
            ..ScriptedRun::default()
        },
    )
    .await
    .expect_err("unknown element");

    assert!(err.to_string().contains("Budget"));
    assert!(service.generated_with.lock().expect("lock").is_empty());
}

#[test]
fn key_value_pairs_split_on_first_equals() {
    assert_eq!(
        parse_key_value("Business Goal = a=b").expect("pair"),
        ("Business Goal".to_string(), "a=b".to_string())
    );
    assert!(parse_key_value("no-separator").is_err());
    assert!(parse_key_value(" =value").is_err());
}
