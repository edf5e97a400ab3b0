//! Non-interactive pass through the wizard.

use std::path::PathBuf;

use anyhow::Context;
use client_core::WizardController;
use shared::domain::{ExportFormat, SectionId};
use tracing::info;

use crate::display::{format_coverage, format_document};

#[derive(Debug, Clone, Default)]
pub struct ScriptedRun {
    pub requirement: String,
    pub answers: Vec<(String, String)>,
    pub images: Vec<(SectionId, PathBuf)>,
    pub exports: Vec<ExportFormat>,
}

/// Analyze, answer, generate, attach images, export. Returns the exported
/// file paths.
pub async fn run_scripted(
    controller: &WizardController,
    run: &ScriptedRun,
) -> anyhow::Result<Vec<PathBuf>> {
    let outcome = controller.analyze(&run.requirement).await?;
    print!(
        "{}",
        format_coverage(&outcome.coverage, Some(&outcome.generate_label))
    );

    if !run.answers.is_empty() {
        controller.open_questions().await?;
    }
    for (element, value) in &run.answers {
        controller
            .set_answer(element, value)
            .await
            .with_context(|| format!("cannot answer '{element}'"))?;
    }

    controller.generate().await?;
    for (section, path) in &run.images {
        controller
            .add_image(section, path)
            .await
            .with_context(|| format!("cannot attach '{}'", path.display()))?;
    }

    let state = controller.snapshot().await;
    if let Some(rendered) = &state.rendered {
        print!(
            "{}",
            format_document(rendered, state.section_images.as_map())
        );
    }

    let mut saved = Vec::with_capacity(run.exports.len());
    for format in &run.exports {
        let path = controller.export(*format).await?;
        info!(path = %path.display(), %format, "export written");
        saved.push(path);
    }
    Ok(saved)
}

pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
