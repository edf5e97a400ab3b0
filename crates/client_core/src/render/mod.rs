//! View tree for generated documents.
//!
//! Rendering is a pure function of the document JSON and is redone from
//! scratch on every call. Sections whose field is absent or empty are left
//! out; every emitted section carries the stable id images attach to.

mod html;
pub mod sections;

use serde::Serialize;
use serde_json::{Map, Value};
use shared::domain::{DocumentType, SectionId};
use tracing::debug;

pub use html::escape_html;
use sections::{sections_for, SectionKind, SectionSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Paragraph { text: String },
    List { items: Vec<String> },
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub id: SectionId,
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub document_type: DocumentType,
    pub title: String,
    pub sections: Vec<RenderedSection>,
}

impl RenderedDocument {
    pub fn section(&self, id: &SectionId) -> Option<&RenderedSection> {
        self.sections.iter().find(|section| &section.id == id)
    }

    pub fn contains_section(&self, id: &SectionId) -> bool {
        self.section(id).is_some()
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(|section| &section.id)
    }
}

pub trait DocumentRenderer {
    fn render(&self, document: &Value) -> RenderedDocument;
}

impl DocumentRenderer for DocumentType {
    fn render(&self, document: &Value) -> RenderedDocument {
        let sections = sections_for(*self)
            .iter()
            .filter_map(|spec| {
                let value = document.get(spec.field)?;
                let section = render_section(spec, value);
                if section.is_none() {
                    debug!(field = spec.field, "skipping empty section");
                }
                section
            })
            .collect();

        RenderedDocument {
            document_type: *self,
            title: self.document_title().to_string(),
            sections,
        }
    }
}

pub fn render_document(document_type: DocumentType, document: &Value) -> RenderedDocument {
    document_type.render(document)
}

fn render_section(spec: &SectionSpec, value: &Value) -> Option<RenderedSection> {
    let blocks = match (spec.kind, value) {
        (SectionKind::Table(columns), Value::Array(items)) if has_records(items) => {
            vec![table_block(columns.iter().map(|c| c.to_string()).collect(), items)]
        }
        (SectionKind::Auto, Value::Array(items)) if has_records(items) => {
            vec![table_block(auto_columns(items), items)]
        }
        _ => value_blocks(value),
    };

    if blocks.is_empty() {
        return None;
    }

    Some(RenderedSection {
        id: SectionId::new(spec.id),
        title: spec.title.to_string(),
        blocks,
    })
}

/// Layout by shape: text → paragraph, array → list, object → one heading per
/// key.
fn value_blocks(value: &Value) -> Vec<Block> {
    match value {
        Value::Array(items) => list_block(items).into_iter().collect(),
        Value::Object(map) => object_blocks(map),
        scalar => {
            let text = display_value(scalar);
            if text.trim().is_empty() {
                Vec::new()
            } else {
                vec![Block::Paragraph { text }]
            }
        }
    }
}

fn list_block(items: &[Value]) -> Option<Block> {
    let items: Vec<String> = items
        .iter()
        .map(display_value)
        .filter(|item| !item.trim().is_empty())
        .collect();
    (!items.is_empty()).then_some(Block::List { items })
}

fn object_blocks(map: &Map<String, Value>) -> Vec<Block> {
    let mut blocks = Vec::new();
    for (key, value) in map {
        let body = match value {
            Value::Array(items) => list_block(items),
            other => {
                let text = display_value(other);
                (!text.trim().is_empty()).then_some(Block::Paragraph { text })
            }
        };
        if let Some(body) = body {
            blocks.push(Block::Heading {
                text: humanize_key(key),
            });
            blocks.push(body);
        }
    }
    blocks
}

fn table_block(columns: Vec<String>, items: &[Value]) -> Block {
    let keys: Vec<String> = columns.iter().map(|column| column_key(column)).collect();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|record| {
            keys.iter()
                .map(|key| record.get(key).map(display_value).unwrap_or_default())
                .collect()
        })
        .collect();
    Block::Table { columns, rows }
}

fn has_records(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().any(Value::is_object)
}

fn auto_columns(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .find_map(Value::as_object)
        .map(|record| record.keys().map(|key| title_case_key(key)).collect())
        .unwrap_or_default()
}

/// `success_metrics` → `SUCCESS METRICS`.
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

/// `Acceptance Criteria` → `acceptance_criteria`.
pub fn column_key(column: &str) -> String {
    column.to_lowercase().replace(' ', "_")
}

fn title_case_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", title_case_key(key), display_value(value)))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod tests;
