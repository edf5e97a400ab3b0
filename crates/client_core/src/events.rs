//! Controller events and error modeling for wizard front ends.

use std::path::PathBuf;

use serde::Serialize;
use shared::{
    domain::{DocumentType, ExportFormat, SectionId, Step},
    error::ErrorKind,
};

use crate::error::WizardError;

/// Network actions guarded against re-entrant triggering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Analyze,
    Generate,
    Export,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Analyze => "Analysis",
            ActionKind::Generate => "Generation",
            ActionKind::Export => "Export",
        }
    }
}

#[derive(Debug, Clone)]
pub enum WizardEvent {
    StepChanged(Step),
    DocumentTypeChanged {
        document_type: DocumentType,
        analyze_label: String,
        document_title: &'static str,
    },
    /// An unrecognized tag was offered. The selection is unchanged and the
    /// call-to-action falls back to the generic label.
    DocumentTypeRejected {
        tag: String,
        analyze_label: String,
    },
    ActionStateChanged {
        action: ActionKind,
        busy: bool,
        message: Option<String>,
    },
    CoverageReady {
        document_type: DocumentType,
        recommendations: usize,
        generate_label: String,
    },
    DocumentRendered {
        document_type: DocumentType,
        sections: usize,
    },
    SectionImagesChanged {
        section_id: SectionId,
        count: usize,
    },
    ExportSaved {
        format: ExportFormat,
        path: PathBuf,
    },
    Error(UiError),
    ErrorDismissed,
    SessionReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiErrorContext {
    SelectDocumentType,
    Analyze,
    Answers,
    Navigation,
    Generate,
    Images,
    Export,
}

/// Error overlay contents. One is recorded per failed action and stays until
/// dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiError {
    category: ErrorKind,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_wizard_error(context: UiErrorContext, error: &WizardError) -> Self {
        Self {
            category: error.kind(),
            context,
            message: error.to_string(),
        }
    }

    /// Transport and busy failures are worth retrying unchanged; validation
    /// failures need different input first.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category,
            ErrorKind::Transport | ErrorKind::Busy | ErrorKind::Backend
        )
    }

    pub fn category(&self) -> ErrorKind {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
