use super::*;
use serde_json::json;
use shared::domain::DocumentType;

use crate::render::render_document;

fn image(name: &str) -> SectionImage {
    SectionImage {
        name: name.to_string(),
        data: "data:image/png;base64,AA==".to_string(),
        caption: String::new(),
    }
}

#[tokio::test]
async fn read_image_produces_data_url() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("diagram.png");
    tokio::fs::write(&path, [0x89, b'P', b'N', b'G'])
        .await
        .expect("write");

    let image = read_image(&path).await.expect("read image");
    assert_eq!(image.name, "diagram.png");
    assert_eq!(image.data, "data:image/png;base64,iVBORw==");
    assert!(image.caption.is_empty());
}

#[tokio::test]
async fn read_image_rejects_non_images_and_missing_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let text = dir.path().join("notes.txt");
    tokio::fs::write(&text, "hello").await.expect("write");

    let err = read_image(&text).await.expect_err("text file");
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

    let err = read_image(&dir.path().join("missing.jpg"))
        .await
        .expect_err("missing file");
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn attach_caption_and_remove_keep_order() {
    let section = SectionId::from("actor");
    let mut annotator = ImageAnnotator::default();
    annotator.attach(&section, image("a.png"));
    annotator.attach(&section, image("b.png"));
    let list = annotator.attach(&section, image("c.png"));
    assert_eq!(list.len(), 3);

    annotator
        .update_caption(&section, 1, "Second")
        .expect("caption");
    let removed = annotator.remove(&section, 0).expect("remove");
    assert_eq!(removed.name, "a.png");

    let names: Vec<&str> = annotator
        .section(&section)
        .iter()
        .map(|image| image.name.as_str())
        .collect();
    assert_eq!(names, ["b.png", "c.png"]);
    assert_eq!(annotator.section(&section)[0].caption, "Second");
}

#[test]
fn out_of_range_positions_leave_state_untouched() {
    let section = SectionId::from("risks");
    let mut annotator = ImageAnnotator::default();
    annotator.attach(&section, image("a.png"));
    let before = annotator.clone();

    assert!(matches!(
        annotator.update_caption(&section, 3, "x"),
        Err(WizardError::ImageNotFound { index: 3, .. })
    ));
    assert!(annotator.remove(&section, 1).is_err());
    assert!(annotator.remove(&SectionId::from("actor"), 0).is_err());
    assert_eq!(annotator, before);
}

#[test]
fn removing_last_image_drops_section_key() {
    let section = SectionId::from("risks");
    let mut annotator = ImageAnnotator::default();
    annotator.attach(&section, image("a.png"));
    annotator.remove(&section, 0).expect("remove");
    assert!(annotator.as_map().is_empty());
}

#[test]
fn retain_rendered_prunes_sections_missing_from_new_document() {
    let mut annotator = ImageAnnotator::default();
    annotator.attach(&SectionId::from("actor"), image("a.png"));
    annotator.attach(&SectionId::from("risks"), image("b.png"));

    let rendered = render_document(DocumentType::UserStory, &json!({"actor": "Customer"}));
    annotator.retain_rendered(&rendered);

    assert_eq!(annotator.total(), 1);
    assert!(annotator.as_map().contains_key(&SectionId::from("actor")));
}
