//! File intake: validation, selection and the drop-zone drag lifecycle.

use tracing::{debug, info, warn};

use crate::controller::Controller;
use crate::error::{AppError, AppResult};
use crate::models::{DragEvent, FileRef};

/// Declared MIME types the client accepts. The label is trusted as-is.
pub const ALLOWED_MIME_TYPES: [&str; 4] =
    ["application/pdf", "image/png", "image/jpeg", "image/jpg"];

pub fn validate(candidate: Option<FileRef>) -> AppResult<FileRef> {
    let file = candidate.ok_or(AppError::NoFileSelected)?;

    if !ALLOWED_MIME_TYPES.contains(&file.mime_type()) {
        return Err(AppError::unsupported(file.mime_type()));
    }

    Ok(file)
}

impl Controller {
    /// Validates `candidate` and makes it the current file.
    ///
    /// A rejected candidate is reported and leaves the current file and
    /// preview untouched.
    pub fn select(&mut self, candidate: Option<FileRef>) -> AppResult<()> {
        let file = match validate(candidate) {
            Ok(file) => file,
            Err(e) => {
                self.surface(e.clone());
                return Err(e);
            }
        };

        // Release the old preview before creating the next one.
        self.upload.preview = None;

        if file.is_image() {
            match self.previews.create(&file) {
                Ok(preview) => self.upload.preview = Some(preview),
                Err(e) => warn!(
                    file_name = %file.name(),
                    error = %e,
                    "Preview unavailable, continuing without it"
                ),
            }
        }

        info!(
            file_name = %file.name(),
            mime_type = %file.mime_type(),
            file_size = file.size(),
            has_preview = self.upload.preview.is_some(),
            "File selected"
        );

        self.upload.file = Some(file);
        self.publish();
        Ok(())
    }

    pub fn drag_enter(&mut self) {
        self.apply_drag(DragEvent::Enter);
    }

    pub fn drag_over(&mut self) {
        self.apply_drag(DragEvent::Over);
    }

    pub fn drag_leave(&mut self) {
        self.apply_drag(DragEvent::Leave);
    }

    /// Ends the drag and selects whatever was dropped, if anything.
    pub fn drop_file(&mut self, dropped: Option<FileRef>) -> AppResult<()> {
        self.apply_drag(DragEvent::Drop);
        self.select(dropped)
    }

    pub(super) fn apply_drag(&mut self, event: DragEvent) {
        let next = self.upload.drag.on(event);
        if next != self.upload.drag {
            debug!(from = ?self.upload.drag, to = ?next, event = ?event, "Drag state changed");
            self.upload.drag = next;
            self.publish();
        }
    }
}
