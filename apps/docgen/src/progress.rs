//! Prints busy/loading state from the controller's event stream.

use client_core::WizardEvent;
use tokio::{
    sync::broadcast::{error::RecvError, Receiver},
    task::JoinHandle,
};
use tracing::debug;

pub fn spawn_progress_printer(mut events: Receiver<WizardEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(line) = describe_event(&event) {
                        eprintln!("{line}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "progress printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Errors are reported by whoever triggered the action, so they are not
/// echoed here.
pub fn describe_event(event: &WizardEvent) -> Option<String> {
    match event {
        WizardEvent::ActionStateChanged {
            busy: true,
            message: Some(message),
            ..
        } => Some(format!("... {message}")),
        WizardEvent::DocumentTypeChanged {
            document_type,
            analyze_label,
            ..
        } => Some(format!(
            "document type: {} ({analyze_label})",
            document_type.display_name()
        )),
        WizardEvent::DocumentTypeRejected { tag, analyze_label } => Some(format!(
            "unknown document type '{tag}', selection unchanged ({analyze_label})"
        )),
        WizardEvent::StepChanged(step) => Some(format!("-> {step}")),
        WizardEvent::CoverageReady {
            recommendations, ..
        } => Some(format!("coverage ready, {recommendations} open question(s)")),
        WizardEvent::DocumentRendered { sections, .. } => {
            Some(format!("document rendered with {sections} section(s)"))
        }
        WizardEvent::SessionReset => Some("session reset".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use client_core::ActionKind;
    use shared::domain::{DocumentType, Step};

    use super::*;

    #[test]
    fn announces_busy_but_not_idle() {
        let busy = WizardEvent::ActionStateChanged {
            action: ActionKind::Generate,
            busy: true,
            message: Some(DocumentType::Brd.loading_message().to_string()),
        };
        let idle = WizardEvent::ActionStateChanged {
            action: ActionKind::Generate,
            busy: false,
            message: None,
        };

        assert_eq!(
            describe_event(&busy).as_deref(),
            Some("... Generating comprehensive Business Requirements Document...")
        );
        assert_eq!(describe_event(&idle), None);
        assert_eq!(
            describe_event(&WizardEvent::StepChanged(Step::Qa)).as_deref(),
            Some("-> qa")
        );
        assert_eq!(describe_event(&WizardEvent::ErrorDismissed), None);
    }

    #[test]
    fn rejected_type_shows_the_generic_label() {
        let rejected = WizardEvent::DocumentTypeRejected {
            tag: "epic".to_string(),
            analyze_label: shared::domain::analyze_label_for_tag("epic"),
        };
        assert_eq!(
            describe_event(&rejected).as_deref(),
            Some("unknown document type 'epic', selection unchanged (Analyze Requirement)")
        );
    }
}
