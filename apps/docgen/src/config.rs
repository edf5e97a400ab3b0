use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use shared::domain::DocumentType;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "docgen.toml";
const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub download_dir: PathBuf,
    pub document_type: DocumentType,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            download_dir: PathBuf::from("."),
            document_type: DocumentType::UserStory,
        }
    }
}

/// Defaults, then the config file (missing file is fine), then environment.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if config_path.is_some() => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

pub fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
    if let Some(v) = file_cfg.get("service_url") {
        settings.service_url = v.clone();
    }
    if let Some(v) = file_cfg.get("download_dir") {
        settings.download_dir = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("document_type") {
        settings.document_type = v.parse()?;
    }
    Ok(())
}

/// `APP__*` wins over `DOCGEN_*` when both are set.
pub fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    for key in ["DOCGEN_SERVICE_URL", "APP__SERVICE_URL"] {
        if let Some(v) = lookup(key) {
            settings.service_url = v;
        }
    }
    for key in ["DOCGEN_DOWNLOAD_DIR", "APP__DOWNLOAD_DIR"] {
        if let Some(v) = lookup(key) {
            settings.download_dir = PathBuf::from(v);
        }
    }
    for key in ["DOCGEN_DOCUMENT_TYPE", "APP__DOCUMENT_TYPE"] {
        if let Some(v) = lookup(key) {
            settings.document_type = v
                .parse()
                .with_context(|| format!("invalid value in {key}"))?;
        }
    }
    Ok(())
}

pub fn normalize_service_url(raw_service_url: &str) -> anyhow::Result<String> {
    let raw_service_url = raw_service_url.trim();

    let candidate = if raw_service_url.is_empty() {
        DEFAULT_SERVICE_URL.to_string()
    } else if raw_service_url.contains("://") {
        raw_service_url.to_string()
    } else {
        format!("http://{raw_service_url}")
    };

    let parsed = Url::parse(&candidate)
        .with_context(|| format!("invalid service url '{raw_service_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("service url '{raw_service_url}' must use http or https");
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

pub fn prepare_download_dir(download_dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(download_dir).with_context(|| {
        format!(
            "failed to create download directory '{}'",
            download_dir.display()
        )
    })?;
    Ok(download_dir.to_path_buf())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
