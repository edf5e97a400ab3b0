use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownTag;

macro_rules! str_id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

str_id_newtype!(SectionId);

/// Call-to-action label used when a type tag is not recognized.
pub const DEFAULT_ANALYZE_LABEL: &str = "Analyze Requirement";
pub const DEFAULT_DOCUMENT_TITLE: &str = "Step 4: Generated Document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentType {
    #[default]
    #[serde(rename = "user-story")]
    UserStory,
    #[serde(rename = "brd")]
    Brd,
    #[serde(rename = "frd")]
    Frd,
    #[serde(rename = "srd")]
    Srd,
    #[serde(rename = "cr")]
    ChangeRequest,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::UserStory,
        DocumentType::Brd,
        DocumentType::Frd,
        DocumentType::Srd,
        DocumentType::ChangeRequest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::UserStory => "user-story",
            DocumentType::Brd => "brd",
            DocumentType::Frd => "frd",
            DocumentType::Srd => "srd",
            DocumentType::ChangeRequest => "cr",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DocumentType::UserStory => "User Story",
            DocumentType::Brd => "Business Requirements",
            DocumentType::Frd => "Functional Requirements",
            DocumentType::Srd => "System Architecture",
            DocumentType::ChangeRequest => "Change Request",
        }
    }

    pub fn analyze_label(self) -> String {
        format!("Analyze for {}", self.display_name())
    }

    pub fn document_title(self) -> &'static str {
        match self {
            DocumentType::UserStory => "Step 4: Generated Enterprise User Story",
            DocumentType::Brd => "Step 4: Generated Business Requirements Document",
            DocumentType::Frd => "Step 4: Generated Functional Requirements Document",
            DocumentType::Srd => "Step 4: Generated System Requirements Document",
            DocumentType::ChangeRequest => DEFAULT_DOCUMENT_TITLE,
        }
    }

    fn route_suffix(self) -> &'static str {
        match self {
            DocumentType::UserStory => "",
            DocumentType::Brd => "_brd",
            DocumentType::Frd => "_frd",
            DocumentType::Srd => "_srd",
            DocumentType::ChangeRequest => "_cr",
        }
    }

    pub fn analyze_path(self) -> String {
        format!("/analyze{}", self.route_suffix())
    }

    pub fn generate_path(self) -> String {
        format!("/generate{}", self.route_suffix())
    }

    /// Returns `None` for types the service cannot export.
    pub fn export_path(self, format: ExportFormat) -> Option<String> {
        match self {
            DocumentType::ChangeRequest => None,
            other => Some(format!(
                "/export{}/{}",
                other.route_suffix(),
                format.as_str()
            )),
        }
    }

    pub fn export_data_key(self) -> &'static str {
        match self {
            DocumentType::UserStory => "story_data",
            DocumentType::Brd => "brd_data",
            DocumentType::Frd => "frd_data",
            DocumentType::Srd => "srd_data",
            DocumentType::ChangeRequest => "cr_data",
        }
    }

    pub fn download_stem(self) -> &'static str {
        match self {
            DocumentType::UserStory => "enterprise_user_story",
            DocumentType::Brd => "business_requirements_document",
            DocumentType::Frd => "functional_requirements_document",
            DocumentType::Srd => "system_requirements_document",
            DocumentType::ChangeRequest => "change_request_document",
        }
    }

    pub fn download_filename(self, format: ExportFormat) -> String {
        format!("{}.{}", self.download_stem(), format.extension())
    }

    fn short_name(self) -> &'static str {
        match self {
            DocumentType::UserStory => "Story",
            DocumentType::Brd => "BRD",
            DocumentType::Frd => "FRD",
            DocumentType::Srd => "SRD",
            DocumentType::ChangeRequest => "CR",
        }
    }

    pub fn generation_error_prefix(self) -> String {
        format!("{} generation failed", self.short_name())
    }

    /// `backend_listed_none` is true when the service explicitly returned an
    /// empty recommendation list.
    pub fn generate_button_label(self, backend_listed_none: bool) -> String {
        match self {
            DocumentType::UserStory => "Generate Enterprise Story".to_string(),
            other if backend_listed_none => format!("Generate {}", other.short_name()),
            other => format!("Generate {} from Analysis", other.short_name()),
        }
    }

    pub fn loading_message(self) -> &'static str {
        match self {
            DocumentType::UserStory => "Generating enterprise-ready user story...",
            DocumentType::Brd => "Generating comprehensive Business Requirements Document...",
            DocumentType::Frd => "Generating comprehensive Functional Requirements Document...",
            DocumentType::Srd => "Generating comprehensive System Requirements Document...",
            DocumentType::ChangeRequest => "Generating change request document...",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownTag::new("document type", s))
    }
}

/// Label for an arbitrary tag; unrecognized tags get the generic label.
pub fn analyze_label_for_tag(tag: &str) -> String {
    DocumentType::from_tag(tag)
        .map(DocumentType::analyze_label)
        .unwrap_or_else(|| DEFAULT_ANALYZE_LABEL.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Word,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Word => "word",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Word => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" | "docx" => Ok(ExportFormat::Word),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(UnknownTag::new("export format", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Requirement,
    Coverage,
    Qa,
    Story,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Requirement => "requirement",
            Step::Coverage => "coverage",
            Step::Qa => "qa",
            Step::Story => "story",
        }
    }

    /// Target of the explicit "back" action for each step.
    pub fn previous(self) -> Step {
        match self {
            Step::Requirement | Step::Coverage => Step::Requirement,
            Step::Qa | Step::Story => Step::Coverage,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
