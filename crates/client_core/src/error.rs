use shared::{
    domain::{DocumentType, SectionId},
    error::ErrorKind,
};
use thiserror::Error;

use crate::{events::ActionKind, service::ServiceError};

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Please enter a requirement description.")]
    EmptyRequirement,
    #[error("Please analyze a requirement first.")]
    NotAnalyzed,
    #[error("No document to export")]
    NoDocument,
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),
    #[error("No answer field for element {0:?}")]
    UnknownAnswerField(String),
    #[error("Section {0} is not part of the current document")]
    UnknownSection(SectionId),
    #[error("Section {section} has no image at position {index}")]
    ImageNotFound { section: SectionId, index: usize },
    #[error("Export is not available for {} documents", .0.display_name())]
    ExportUnsupported(DocumentType),
    #[error("{} is already in progress", .0.label())]
    Busy(ActionKind),
    #[error("{context}: {source}")]
    Service {
        context: String,
        #[source]
        source: ServiceError,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("The session was reset before the response arrived")]
    SessionReset,
}

impl WizardError {
    pub fn service(context: impl Into<String>, source: ServiceError) -> Self {
        WizardError::Service {
            context: context.into(),
            source,
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        WizardError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WizardError::Busy(_) => ErrorKind::Busy,
            WizardError::Service { source, .. } if source.is_transport() => ErrorKind::Transport,
            WizardError::Service { .. } => ErrorKind::Backend,
            WizardError::Io { .. } => ErrorKind::LocalProcessing,
            _ => ErrorKind::Validation,
        }
    }
}
