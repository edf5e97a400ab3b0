//! Client-side orchestration for the requirements document wizard: a typed
//! client for the analysis service, the session/step controller, and the
//! section renderer for generated documents.

pub mod answers;
pub mod controller;
pub mod coverage;
pub mod error;
pub mod events;
pub mod images;
pub mod render;
pub mod service;
pub mod session;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

pub use answers::{merge_answers, AnswerField, AnswerForm};
pub use controller::{AnalysisOutcome, WizardController};
pub use coverage::recommendations_for;
pub use error::WizardError;
pub use events::{ActionKind, UiError, UiErrorContext, WizardEvent};
pub use images::ImageAnnotator;
pub use render::{render_document, Block, DocumentRenderer, RenderedDocument, RenderedSection};
pub use service::{AnalysisService, HttpAnalysisClient, ServiceError};
pub use session::{GeneratedDocument, SessionState};
