use std::collections::HashMap;

use super::*;

#[test]
fn normalizes_scheme_less_url_with_trailing_slash() {
    assert_eq!(
        normalize_service_url("  localhost:5000/ ").expect("url"),
        "http://localhost:5000"
    );
    assert_eq!(
        normalize_service_url("https://docs.example.com/api/").expect("url"),
        "https://docs.example.com/api"
    );
}

#[test]
fn blank_url_falls_back_to_default() {
    assert_eq!(
        normalize_service_url("   ").expect("url"),
        "http://127.0.0.1:5000"
    );
}

#[test]
fn rejects_unsupported_scheme() {
    assert!(normalize_service_url("ftp://files.example.com").is_err());
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
service_url = "http://analysis.internal:8080"
download_dir = "exports"
document_type = "brd"
"#,
    )
    .expect("config");

    assert_eq!(settings.service_url, "http://analysis.internal:8080");
    assert_eq!(settings.download_dir, PathBuf::from("exports"));
    assert_eq!(settings.document_type, DocumentType::Brd);
}

#[test]
fn unknown_document_type_in_file_is_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "document_type = \"epic\"").is_err());
    assert_eq!(settings.document_type, DocumentType::UserStory);
}

#[test]
fn app_prefixed_environment_wins() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("DOCGEN_SERVICE_URL", "http://docgen-env:5000"),
        ("APP__SERVICE_URL", "http://app-env:5000"),
        ("DOCGEN_DOCUMENT_TYPE", "srd"),
    ]);
    let mut settings = Settings::default();

    apply_env(&mut settings, |key| env.get(key).map(|v| v.to_string())).expect("env");

    assert_eq!(settings.service_url, "http://app-env:5000");
    assert_eq!(settings.document_type, DocumentType::Srd);
    assert_eq!(settings.download_dir, PathBuf::from("."));
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.toml");
    assert!(load_settings(Some(&missing)).is_err());
}

#[test]
fn creates_nested_download_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("out").join("docs");

    let prepared = prepare_download_dir(&target).expect("prepare");

    assert_eq!(prepared, target);
    assert!(target.is_dir());
}
