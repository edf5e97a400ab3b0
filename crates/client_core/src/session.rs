use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use shared::{
    domain::{DocumentType, Step},
    protocol::{CoverageAnalysis, Recommendation},
};

use crate::{answers::AnswerForm, events::UiError, images::ImageAnnotator, render::RenderedDocument};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedDocument {
    pub document_type: DocumentType,
    pub body: Value,
}

/// Everything the wizard knows about the current session. Owned by the
/// controller; front ends read snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub step: Step,
    pub document_type: DocumentType,
    pub requirement: Option<String>,
    pub answers: BTreeMap<String, String>,
    pub coverage: Option<CoverageAnalysis>,
    pub recommendations: Vec<Recommendation>,
    pub answer_form: AnswerForm,
    pub generate_label: Option<String>,
    pub document: Option<GeneratedDocument>,
    pub rendered: Option<RenderedDocument>,
    pub section_images: ImageAnnotator,
    pub error: Option<UiError>,
    /// Bumped on every reset; responses started under an older epoch are
    /// dropped.
    pub epoch: u64,
}

impl SessionState {
    pub fn reset(&mut self) {
        let epoch = self.epoch.wrapping_add(1);
        *self = SessionState {
            epoch,
            ..SessionState::default()
        };
    }
}
