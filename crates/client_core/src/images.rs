//! In-memory images attached to rendered document sections.

use std::{io, path::Path};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use shared::{
    domain::SectionId,
    protocol::{SectionImage, SectionImages},
};

use crate::{error::WizardError, render::RenderedDocument};

/// Reads an image file into a `data:` URL. This is the only suspension point
/// of attaching an image.
pub async fn read_image(path: &Path) -> io::Result<SectionImage> {
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");
    if !mime_type.starts_with("image/") {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not an image ({mime_type})", path.display()),
        ));
    }

    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(SectionImage {
        name,
        data: format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)),
        caption: String::new(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageAnnotator {
    images: SectionImages,
}

impl ImageAnnotator {
    pub fn as_map(&self) -> &SectionImages {
        &self.images
    }

    pub fn section(&self, section: &SectionId) -> &[SectionImage] {
        self.images
            .get(section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.images.values().map(Vec::len).sum()
    }

    pub fn attach(&mut self, section: &SectionId, image: SectionImage) -> &[SectionImage] {
        let list = self.images.entry(section.clone()).or_default();
        list.push(image);
        list
    }

    pub fn update_caption(
        &mut self,
        section: &SectionId,
        index: usize,
        caption: impl Into<String>,
    ) -> Result<(), WizardError> {
        let image = self
            .images
            .get_mut(section)
            .and_then(|list| list.get_mut(index))
            .ok_or_else(|| WizardError::ImageNotFound {
                section: section.clone(),
                index,
            })?;
        image.caption = caption.into();
        Ok(())
    }

    pub fn remove(&mut self, section: &SectionId, index: usize) -> Result<SectionImage, WizardError> {
        let not_found = || WizardError::ImageNotFound {
            section: section.clone(),
            index,
        };
        let list = self.images.get_mut(section).ok_or_else(not_found)?;
        if index >= list.len() {
            return Err(not_found());
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.images.remove(section);
        }
        Ok(removed)
    }

    /// Drops images whose section is not in `rendered`.
    pub fn retain_rendered(&mut self, rendered: &RenderedDocument) {
        self.images
            .retain(|section, _| rendered.contains_section(section));
    }
}

#[cfg(test)]
#[path = "tests/images_tests.rs"]
mod tests;
