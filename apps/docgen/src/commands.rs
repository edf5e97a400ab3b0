//! Line commands for the interactive wizard.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use shared::domain::{ExportFormat, SectionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    Help,
    Status,
    Health,
    SelectType { tag: String },
    Analyze { requirement: String },
    Coverage,
    Questions,
    Answer { target: AnswerTarget, value: String },
    Generate,
    Show,
    Html { path: PathBuf },
    AttachImage { section: SectionId, path: PathBuf },
    Caption { section: SectionId, index: usize, caption: String },
    RemoveImage { section: SectionId, index: usize },
    Export { format: ExportFormat },
    Back,
    StartOver,
    Dismiss,
    Quit,
}

/// Answers are addressed by 1-based position in the question list or by
/// element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerTarget {
    Position(usize),
    Element(String),
}

impl WizardCommand {
    pub fn name(&self) -> &'static str {
        match self {
            WizardCommand::Help => "help",
            WizardCommand::Status => "status",
            WizardCommand::Health => "health",
            WizardCommand::SelectType { .. } => "type",
            WizardCommand::Analyze { .. } => "analyze",
            WizardCommand::Coverage => "coverage",
            WizardCommand::Questions => "questions",
            WizardCommand::Answer { .. } => "answer",
            WizardCommand::Generate => "generate",
            WizardCommand::Show => "show",
            WizardCommand::Html { .. } => "html",
            WizardCommand::AttachImage { .. } => "image",
            WizardCommand::Caption { .. } => "caption",
            WizardCommand::RemoveImage { .. } => "remove-image",
            WizardCommand::Export { .. } => "export",
            WizardCommand::Back => "back",
            WizardCommand::StartOver => "restart",
            WizardCommand::Dismiss => "dismiss",
            WizardCommand::Quit => "quit",
        }
    }
}

pub const HELP: &str = "\
commands:
  type <user-story|brd|frd|srd|cr>     select the document type
  analyze <requirement>                analyze a requirement
  coverage                             show the last coverage analysis
  questions                            open the question step
  answer <n|element> = <value>         answer a question
  generate                             generate the document
  show                                 print the generated document
  html <path>                          write an HTML preview
  image <section> <path>               attach an image to a section
  caption <section> <n> <text>         set an image caption
  remove-image <section> <n>           remove an image
  export <word|pdf>                    export the document
  back | restart | dismiss | status | health | help | quit";

pub fn parse_command(line: &str) -> anyhow::Result<WizardCommand> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => bail!("empty command; type 'help' for a list"),
        "help" | "?" => WizardCommand::Help,
        "status" => WizardCommand::Status,
        "health" => WizardCommand::Health,
        "type" => WizardCommand::SelectType {
            tag: required(rest, "type <document type>")?.to_string(),
        },
        "analyze" => WizardCommand::Analyze {
            requirement: rest.to_string(),
        },
        "coverage" => WizardCommand::Coverage,
        "questions" | "qa" => WizardCommand::Questions,
        "answer" => {
            let (target, value) = rest
                .split_once('=')
                .ok_or_else(|| anyhow!("usage: answer <n|element> = <value>"))?;
            let target = required(target.trim(), "answer <n|element> = <value>")?;
            let target = match target.parse::<usize>() {
                Ok(0) => bail!("question numbers start at 1"),
                Ok(position) => AnswerTarget::Position(position),
                Err(_) => AnswerTarget::Element(target.to_string()),
            };
            WizardCommand::Answer {
                target,
                value: value.trim().to_string(),
            }
        }
        "generate" => WizardCommand::Generate,
        "show" => WizardCommand::Show,
        "html" => WizardCommand::Html {
            path: PathBuf::from(required(rest, "html <path>")?),
        },
        "image" => {
            let (section, path) = split_word(rest, "image <section> <path>")?;
            WizardCommand::AttachImage {
                section: SectionId::from(section),
                path: PathBuf::from(required(path, "image <section> <path>")?),
            }
        }
        "caption" => {
            let (section, rest) = split_word(rest, "caption <section> <n> <text>")?;
            let (index, caption) = match rest.split_once(char::is_whitespace) {
                Some((index, caption)) => (index, caption.trim()),
                None => (rest, ""),
            };
            WizardCommand::Caption {
                section: SectionId::from(section),
                index: parse_position(index)?,
                caption: caption.to_string(),
            }
        }
        "remove-image" => {
            let (section, index) = split_word(rest, "remove-image <section> <n>")?;
            WizardCommand::RemoveImage {
                section: SectionId::from(section),
                index: parse_position(index)?,
            }
        }
        "export" => WizardCommand::Export {
            format: required(rest, "export <word|pdf>")?
                .parse()
                .context("usage: export <word|pdf>")?,
        },
        "back" => WizardCommand::Back,
        "restart" | "start-over" => WizardCommand::StartOver,
        "dismiss" => WizardCommand::Dismiss,
        "quit" | "exit" => WizardCommand::Quit,
        other => bail!("unknown command '{other}'; type 'help' for a list"),
    };
    Ok(command)
}

fn required<'a>(value: &'a str, usage: &str) -> anyhow::Result<&'a str> {
    if value.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(value)
}

fn split_word<'a>(value: &'a str, usage: &str) -> anyhow::Result<(&'a str, &'a str)> {
    value
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .ok_or_else(|| anyhow!("usage: {usage}"))
}

/// 1-based image position to a 0-based index.
fn parse_position(value: &str) -> anyhow::Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(0) | Err(_) => bail!("expected an image number starting at 1, got '{value}'"),
        Ok(position) => Ok(position - 1),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
