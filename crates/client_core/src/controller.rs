//! Wizard controller: owns the session, sequences the steps and guards the
//! network actions against re-entrant triggering.

use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use shared::{
    domain::{analyze_label_for_tag, DocumentType, ExportFormat, SectionId, Step},
    protocol::{
        CoverageAnalysis, ExportRequest, GenerateRequest, HealthResponse, Recommendation,
        SectionImage,
    },
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    answers::{merge_answers, AnswerForm},
    coverage::recommendations_for,
    error::WizardError,
    events::{ActionKind, UiError, UiErrorContext, WizardEvent},
    images::read_image,
    render::{render_document, RenderedDocument},
    service::{AnalysisService, ServiceError},
    session::{GeneratedDocument, SessionState},
};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub document_type: DocumentType,
    pub coverage: CoverageAnalysis,
    pub recommendations: Vec<Recommendation>,
    pub generate_label: String,
}

#[derive(Default)]
struct InFlight {
    analyze: AtomicBool,
    generate: AtomicBool,
    export: AtomicBool,
}

impl InFlight {
    fn flag(&self, action: ActionKind) -> &AtomicBool {
        match action {
            ActionKind::Analyze => &self.analyze,
            ActionKind::Generate => &self.generate,
            ActionKind::Export => &self.export,
        }
    }
}

/// Clears the in-flight flag and announces the trigger as enabled again when
/// dropped.
struct InFlightGuard<'a> {
    action: ActionKind,
    flag: &'a AtomicBool,
    events: &'a broadcast::Sender<WizardEvent>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        let _ = self.events.send(WizardEvent::ActionStateChanged {
            action: self.action,
            busy: false,
            message: None,
        });
    }
}

pub struct WizardController {
    service: Arc<dyn AnalysisService>,
    download_dir: PathBuf,
    inner: Mutex<SessionState>,
    in_flight: InFlight,
    events: broadcast::Sender<WizardEvent>,
}

impl WizardController {
    pub fn new(service: Arc<dyn AnalysisService>, download_dir: impl Into<PathBuf>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            service,
            download_dir: download_dir.into(),
            inner: Mutex::new(SessionState::default()),
            in_flight: InFlight::default(),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<WizardEvent> {
        self.events.subscribe()
    }

    pub fn is_busy(&self, action: ActionKind) -> bool {
        self.in_flight.flag(action).load(Ordering::Acquire)
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.lock().await.clone()
    }

    pub async fn current_step(&self) -> Step {
        self.inner.lock().await.step
    }

    pub async fn document_type(&self) -> DocumentType {
        self.inner.lock().await.document_type
    }

    fn emit(&self, event: WizardEvent) {
        let _ = self.events.send(event);
    }

    fn set_step(&self, state: &mut SessionState, step: Step) {
        if state.step != step {
            debug!(from = %state.step, to = %step, "step transition");
            state.step = step;
            self.emit(WizardEvent::StepChanged(step));
        }
    }

    /// Records the error overlay and hands the error back to the caller.
    async fn fail(&self, context: UiErrorContext, error: WizardError) -> WizardError {
        warn!(?context, %error, "wizard action failed");
        let ui_error = UiError::from_wizard_error(context, &error);
        self.inner.lock().await.error = Some(ui_error.clone());
        self.emit(WizardEvent::Error(ui_error));
        error
    }

    async fn begin(
        &self,
        action: ActionKind,
        message: String,
        context: UiErrorContext,
    ) -> Result<InFlightGuard<'_>, WizardError> {
        let flag = self.in_flight.flag(action);
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(self.fail(context, WizardError::Busy(action)).await);
        }
        self.emit(WizardEvent::ActionStateChanged {
            action,
            busy: true,
            message: Some(message),
        });
        Ok(InFlightGuard {
            action,
            flag,
            events: &self.events,
        })
    }

    pub async fn dismiss_error(&self) {
        if self.inner.lock().await.error.take().is_some() {
            self.emit(WizardEvent::ErrorDismissed);
        }
    }

    pub async fn select_document_type(&self, document_type: DocumentType) {
        let mut state = self.inner.lock().await;
        state.document_type = document_type;
        info!(%document_type, "document type selected");
        self.emit(WizardEvent::DocumentTypeChanged {
            document_type,
            analyze_label: document_type.analyze_label(),
            document_title: document_type.document_title(),
        });
    }

    /// Selects by wire tag. Unknown tags leave the current selection alone.
    pub async fn select_document_tag(&self, tag: &str) -> Result<DocumentType, WizardError> {
        match DocumentType::from_tag(tag) {
            Some(document_type) => {
                self.select_document_type(document_type).await;
                Ok(document_type)
            }
            None => {
                let tag = tag.trim().to_string();
                self.emit(WizardEvent::DocumentTypeRejected {
                    analyze_label: analyze_label_for_tag(&tag),
                    tag: tag.clone(),
                });
                Err(self
                    .fail(
                        UiErrorContext::SelectDocumentType,
                        WizardError::UnknownDocumentType(tag),
                    )
                    .await)
            }
        }
    }

    pub async fn analyze(&self, requirement: &str) -> Result<AnalysisOutcome, WizardError> {
        let requirement = requirement.trim();
        if requirement.is_empty() {
            return Err(self
                .fail(UiErrorContext::Analyze, WizardError::EmptyRequirement)
                .await);
        }

        let _guard = self
            .begin(
                ActionKind::Analyze,
                "Analyzing requirement...".to_string(),
                UiErrorContext::Analyze,
            )
            .await?;
        let (document_type, epoch) = {
            let state = self.inner.lock().await;
            (state.document_type, state.epoch)
        };

        info!(%document_type, endpoint = %document_type.analyze_path(), "analyzing requirement");
        let coverage = match self.service.analyze(document_type, requirement).await {
            Ok(coverage) => coverage,
            Err(err) => {
                return Err(self
                    .fail(
                        UiErrorContext::Analyze,
                        WizardError::service("Analysis failed", err),
                    )
                    .await)
            }
        };

        let recommendations = recommendations_for(&coverage);
        let generate_label =
            document_type.generate_button_label(coverage.backend_listed_no_recommendations());

        {
            let mut state = self.inner.lock().await;
            if state.epoch != epoch {
                warn!(%document_type, "discarding analysis that finished after a reset");
                return Err(WizardError::SessionReset);
            }
            state.requirement = Some(requirement.to_string());
            state.coverage = Some(coverage.clone());
            state.answer_form = AnswerForm::from_recommendations(&recommendations);
            state.recommendations = recommendations.clone();
            state.generate_label = Some(generate_label.clone());
            state.error = None;
            self.set_step(&mut state, Step::Coverage);
        }

        info!(
            %document_type,
            present = coverage.present_elements.len(),
            missing = coverage.missing_elements.len(),
            recommendations = recommendations.len(),
            "coverage analysis ready"
        );
        self.emit(WizardEvent::CoverageReady {
            document_type,
            recommendations: recommendations.len(),
            generate_label: generate_label.clone(),
        });

        Ok(AnalysisOutcome {
            document_type,
            coverage,
            recommendations,
            generate_label,
        })
    }

    pub async fn answer_form(&self) -> AnswerForm {
        self.inner.lock().await.answer_form.clone()
    }

    pub async fn set_answer(&self, element: &str, value: &str) -> Result<(), WizardError> {
        let updated = self.inner.lock().await.answer_form.set(element, value);
        if updated {
            Ok(())
        } else {
            Err(self
                .fail(
                    UiErrorContext::Answers,
                    WizardError::UnknownAnswerField(element.to_string()),
                )
                .await)
        }
    }

    /// Moves from the coverage review to the question step.
    pub async fn open_questions(&self) -> Result<Step, WizardError> {
        {
            let mut state = self.inner.lock().await;
            if state.coverage.is_some() {
                self.set_step(&mut state, Step::Qa);
                return Ok(Step::Qa);
            }
        }
        Err(self
            .fail(UiErrorContext::Navigation, WizardError::NotAnalyzed)
            .await)
    }

    pub async fn back(&self) -> Step {
        let mut state = self.inner.lock().await;
        let target = state.step.previous();
        self.set_step(&mut state, target);
        target
    }

    pub async fn generate(&self) -> Result<RenderedDocument, WizardError> {
        let (document_type, epoch, requirement, answers, coverage) = {
            let state = self.inner.lock().await;
            let requirement = state.requirement.clone();
            (
                state.document_type,
                state.epoch,
                requirement,
                merge_answers(&state.answers, state.answer_form.collect()),
                state.coverage.clone(),
            )
        };
        let Some(requirement) = requirement else {
            return Err(self
                .fail(UiErrorContext::Generate, WizardError::NotAnalyzed)
                .await);
        };

        let _guard = self
            .begin(
                ActionKind::Generate,
                document_type.loading_message().to_string(),
                UiErrorContext::Generate,
            )
            .await?;

        info!(
            %document_type,
            endpoint = %document_type.generate_path(),
            answers = answers.len(),
            "generating document"
        );
        let request = GenerateRequest {
            requirement: &requirement,
            answers: &answers,
            coverage_analysis: coverage.as_ref(),
        };
        let body = match self.service.generate(document_type, &request).await {
            Ok(body) => body,
            Err(err) => {
                return Err(self
                    .fail(
                        UiErrorContext::Generate,
                        WizardError::service(document_type.generation_error_prefix(), err),
                    )
                    .await)
            }
        };

        let rendered = render_document(document_type, &body);
        {
            let mut state = self.inner.lock().await;
            if state.epoch != epoch {
                warn!(%document_type, "discarding document that finished after a reset");
                return Err(WizardError::SessionReset);
            }
            state.answers = answers;
            state.document = Some(GeneratedDocument {
                document_type,
                body,
            });
            state.section_images.retain_rendered(&rendered);
            state.rendered = Some(rendered.clone());
            state.error = None;
            self.set_step(&mut state, Step::Story);
        }

        info!(%document_type, sections = rendered.sections.len(), "document rendered");
        self.emit(WizardEvent::DocumentRendered {
            document_type,
            sections: rendered.sections.len(),
        });
        Ok(rendered)
    }

    pub async fn rendered_html(&self) -> Option<String> {
        let state = self.inner.lock().await;
        state
            .rendered
            .as_ref()
            .map(|rendered| rendered.to_html(state.section_images.as_map()))
    }

    async fn ensure_section(&self, section: &SectionId) -> Result<(), WizardError> {
        let known = {
            let state = self.inner.lock().await;
            state
                .rendered
                .as_ref()
                .is_some_and(|rendered| rendered.contains_section(section))
        };
        if known {
            Ok(())
        } else {
            Err(self
                .fail(
                    UiErrorContext::Images,
                    WizardError::UnknownSection(section.clone()),
                )
                .await)
        }
    }

    pub async fn add_image(
        &self,
        section: &SectionId,
        path: &Path,
    ) -> Result<Vec<SectionImage>, WizardError> {
        self.ensure_section(section).await?;
        let epoch = self.inner.lock().await.epoch;

        let image = match read_image(path).await {
            Ok(image) => image,
            Err(err) => {
                return Err(self
                    .fail(
                        UiErrorContext::Images,
                        WizardError::io("Failed to process image", err),
                    )
                    .await)
            }
        };

        let images = {
            let mut state = self.inner.lock().await;
            let still_rendered = state
                .rendered
                .as_ref()
                .is_some_and(|rendered| rendered.contains_section(section));
            if state.epoch != epoch || !still_rendered {
                return Err(WizardError::SessionReset);
            }
            state.section_images.attach(section, image).to_vec()
        };

        debug!(%section, count = images.len(), "image attached");
        self.emit(WizardEvent::SectionImagesChanged {
            section_id: section.clone(),
            count: images.len(),
        });
        Ok(images)
    }

    pub async fn update_caption(
        &self,
        section: &SectionId,
        index: usize,
        caption: &str,
    ) -> Result<(), WizardError> {
        let result = self
            .inner
            .lock()
            .await
            .section_images
            .update_caption(section, index, caption);
        match result {
            Ok(()) => Ok(()),
            Err(err) => Err(self.fail(UiErrorContext::Images, err).await),
        }
    }

    pub async fn remove_image(
        &self,
        section: &SectionId,
        index: usize,
    ) -> Result<Vec<SectionImage>, WizardError> {
        let result = {
            let mut state = self.inner.lock().await;
            state
                .section_images
                .remove(section, index)
                .map(|_| state.section_images.section(section).to_vec())
        };
        match result {
            Ok(images) => {
                self.emit(WizardEvent::SectionImagesChanged {
                    section_id: section.clone(),
                    count: images.len(),
                });
                Ok(images)
            }
            Err(err) => Err(self.fail(UiErrorContext::Images, err).await),
        }
    }

    /// Exports the generated document and saves it into the download
    /// directory, returning the written path.
    pub async fn export(&self, format: ExportFormat) -> Result<PathBuf, WizardError> {
        let (document, coverage, images) = {
            let state = self.inner.lock().await;
            (
                state.document.clone(),
                state.coverage.clone(),
                state.section_images.as_map().clone(),
            )
        };
        let Some(document) = document else {
            return Err(self
                .fail(UiErrorContext::Export, WizardError::NoDocument)
                .await);
        };
        let document_type = document.document_type;
        if document_type.export_path(format).is_none() {
            return Err(self
                .fail(
                    UiErrorContext::Export,
                    WizardError::ExportUnsupported(document_type),
                )
                .await);
        }

        let _guard = self
            .begin(
                ActionKind::Export,
                format!("Exporting to {}...", format.as_str().to_uppercase()),
                UiErrorContext::Export,
            )
            .await?;

        let request = ExportRequest {
            document_type,
            document: &document.body,
            coverage_data: coverage.as_ref(),
            section_images: &images,
        };
        info!(%document_type, %format, images = images.len(), "exporting document");
        let bytes = match self.service.export(format, &request).await {
            Ok(bytes) => bytes,
            Err(err) => {
                return Err(self
                    .fail(UiErrorContext::Export, WizardError::service("Export failed", err))
                    .await)
            }
        };

        let path = self
            .download_dir
            .join(document_type.download_filename(format));
        if let Err(err) = save_download(&path, &bytes).await {
            return Err(self
                .fail(
                    UiErrorContext::Export,
                    WizardError::io(format!("Failed to save {}", path.display()), err),
                )
                .await);
        }

        info!(path = %path.display(), bytes = bytes.len(), "export saved");
        self.emit(WizardEvent::ExportSaved {
            format,
            path: path.clone(),
        });
        Ok(path)
    }

    pub async fn start_over(&self) {
        {
            let mut state = self.inner.lock().await;
            state.reset();
        }
        info!("session reset");
        self.emit(WizardEvent::SessionReset);
        self.emit(WizardEvent::StepChanged(Step::Requirement));
        self.emit(WizardEvent::DocumentTypeChanged {
            document_type: DocumentType::UserStory,
            analyze_label: DocumentType::UserStory.analyze_label(),
            document_title: DocumentType::UserStory.document_title(),
        });
    }

    pub async fn health(&self) -> Result<HealthResponse, ServiceError> {
        self.service.health().await
    }
}

async fn save_download(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
