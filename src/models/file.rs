use bytes::Bytes;
use std::path::Path;

use crate::error::AppResult;

/// A user-supplied document: declared MIME type, display name and content.
///
/// Never mutated after construction; a new selection replaces it wholesale.
/// Cloning only bumps the reference count on the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    name: String,
    mime_type: String,
    content: Bytes,
}

impl FileRef {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// Reads a file from disk the way a browser file input would hand it
    /// over: the MIME type comes from the extension, never from the bytes.
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream");

        tracing::debug!(
            file_name = %name,
            mime_type = mime_type,
            file_size = content.len(),
            "Picked file from disk"
        );

        Ok(Self::new(name, mime_type, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
