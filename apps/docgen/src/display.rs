//! Plain-text views of wizard state for the terminal.

use std::fmt::Write as _;

use client_core::{AnswerForm, Block, RenderedDocument, SessionState};
use shared::protocol::{CoverageAnalysis, HealthResponse, SectionImages};

pub fn format_coverage(coverage: &CoverageAnalysis, generate_label: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Present elements ({}):",
        coverage.present_elements.len()
    );
    for element in &coverage.present_elements {
        match element.details.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(details) => {
                let _ = writeln!(out, "  [x] {}: {details}", element.element);
            }
            None => {
                let _ = writeln!(out, "  [x] {}", element.element);
            }
        }
    }
    let _ = writeln!(
        out,
        "Missing elements ({}):",
        coverage.missing_elements.len()
    );
    for element in &coverage.missing_elements {
        match element
            .suggested_content
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            Some(suggestion) => {
                let _ = writeln!(out, "  [ ] {} (suggested: {suggestion})", element.element);
            }
            None => {
                let _ = writeln!(out, "  [ ] {}", element.element);
            }
        }
    }
    if let Some(label) = generate_label {
        let _ = writeln!(out, "Next: 'questions' to answer, or 'generate' to {label}");
    }
    out
}

pub fn format_questions(form: &AnswerForm) -> String {
    if form.is_empty() {
        return "No open questions.\n".to_string();
    }
    let mut out = String::new();
    for (position, field) in form.fields().iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", position + 1, field.element, field.question);
        if field.value.trim().is_empty() {
            let _ = writeln!(out, "   (no answer)");
        } else {
            let _ = writeln!(out, "   > {}", field.value);
        }
    }
    out
}

pub fn format_document(document: &RenderedDocument, images: &SectionImages) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", document.title);
    if document.sections.is_empty() {
        let _ = writeln!(out, "(the service returned no content)");
        return out;
    }

    for section in &document.sections {
        let _ = writeln!(out, "\n== {} [{}]", section.title, section.id);
        for block in &section.blocks {
            push_block(&mut out, block);
        }
        for (position, image) in images.get(&section.id).into_iter().flatten().enumerate() {
            if image.caption.is_empty() {
                let _ = writeln!(out, "  [image {}] {}", position + 1, image.name);
            } else {
                let _ = writeln!(
                    out,
                    "  [image {}] {}: {}",
                    position + 1,
                    image.name,
                    image.caption
                );
            }
        }
    }
    out
}

fn push_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { text } => {
            let _ = writeln!(out, "  {text}");
        }
        Block::Paragraph { text } => {
            let _ = writeln!(out, "    {text}");
        }
        Block::List { items } => {
            for item in items {
                let _ = writeln!(out, "    - {item}");
            }
        }
        Block::Table { columns, rows } => {
            let _ = writeln!(out, "    {}", columns.join(" | "));
            for row in rows {
                let _ = writeln!(out, "    {}", row.join(" | "));
            }
        }
    }
}

pub fn format_status(state: &SessionState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "step:          {}", state.step);
    let _ = writeln!(out, "document type: {}", state.document_type.display_name());
    if let Some(requirement) = &state.requirement {
        let _ = writeln!(out, "requirement:   {requirement}");
    }
    let _ = writeln!(out, "answers:       {}", state.answers.len());
    if let Some(rendered) = &state.rendered {
        let _ = writeln!(out, "sections:      {}", rendered.sections.len());
        let _ = writeln!(out, "images:        {}", state.section_images.total());
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "error:         {}", error.message());
    }
    out
}

pub fn format_health(health: &HealthResponse) -> String {
    format!(
        "status: {}\nmodel configured: {}",
        health.status,
        if health.groq_configured { "yes" } else { "no" }
    )
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
