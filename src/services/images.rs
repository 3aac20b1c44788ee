use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;

use crate::config::ImageConfig;
use crate::domain::product::{ImageSlot, ProductImage};
use crate::forms::products::SlotUpload;

/// Uploaded file after it has been copied into the image directory.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub slot: ImageSlot,
    pub filename: String,
}

impl StoredImage {
    pub fn new(slot: ImageSlot, filename: impl Into<String>) -> Self {
        Self {
            slot,
            filename: filename.into(),
        }
    }

    /// Image entry pointing at the public URL of the stored file.
    pub fn to_product_image(&self, config: &ImageConfig) -> ProductImage {
        ProductImage::new(self.slot, config.image_url(&self.filename))
    }
}

/// Copy every upload into `dir` under a unique file name.
pub fn store_uploads(dir: &Path, uploads: Vec<SlotUpload>) -> io::Result<Vec<StoredImage>> {
    if uploads.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(dir)?;
    let stamp = Local::now().timestamp_millis();

    let mut stored = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let filename = stored_filename(stamp, upload.slot, upload.file.file_name.as_deref());
        fs::copy(upload.file.file.path(), dir.join(&filename))?;
        log::debug!("Stored upload for slot {} as {filename}", upload.slot.get());
        stored.push(StoredImage::new(upload.slot, filename));
    }

    Ok(stored)
}

fn stored_filename(stamp: i64, slot: ImageSlot, original: Option<&str>) -> String {
    let original = original
        .map(sanitize_filename)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "image".to_string());
    format!("{stamp}_{}_{original}", slot.get())
}

/// Last path component with anything outside `[A-Za-z0-9._-]` replaced.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}
