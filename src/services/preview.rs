use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::models::FileRef;

/// Creates image previews as temporary files.
#[derive(Debug, Clone, Default)]
pub struct PreviewStore {
    dir: Option<PathBuf>,
}

/// A displayable copy of an image upload, addressed by a `file://` URL.
///
/// The backing file lives exactly as long as this value: dropping it (for
/// example by replacing the selected file) deletes the file.
#[derive(Debug)]
pub struct Preview {
    file: NamedTempFile,
    url: String,
}

impl PreviewStore {
    /// `dir` defaults to the system temp directory.
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn create(&self, file: &FileRef) -> AppResult<Preview> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("elicit-preview-").suffix(suffix_for(file.mime_type()));

        let mut temp_file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| AppError::internal(format!("Failed to create preview file: {}", e)))?;

        temp_file
            .write_all(file.content())
            .map_err(|e| AppError::internal(format!("Failed to write preview file: {}", e)))?;

        let url = Url::from_file_path(temp_file.path())
            .map_err(|_| {
                AppError::internal(format!(
                    "Preview path is not absolute: {}",
                    temp_file.path().display()
                ))
            })?
            .to_string();

        tracing::debug!(
            file_name = %file.name(),
            preview_url = %url,
            "Preview created"
        );

        Ok(Preview {
            file: temp_file,
            url,
        })
    }
}

impl Preview {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        tracing::debug!(preview_url = %self.url, "Preview released");
    }
}

fn suffix_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => ".png",
        "image/jpeg" | "image/jpg" => ".jpg",
        _ => "",
    }
}
