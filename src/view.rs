//! Presentation projection: what the shell should render for a given state.

use serde::Serialize;

use crate::models::{PipelineState, PipelineStatus, UploadState};

pub const ANALYZE_LABEL: &str = "Analyze Content";
pub const BUSY_LABEL: &str = "Analyzing...";

pub const DROP_ZONE_CLASS: &str = "upload-box";
pub const DROP_ZONE_DRAGGING_CLASS: &str = "upload-box dragging";

/// Each optional panel is visible exactly when its field is `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub status: PipelineStatus,
    pub button_label: &'static str,
    pub button_disabled: bool,
    pub drop_zone_class: &'static str,
    pub file_name: Option<String>,
    pub preview_url: Option<String>,
    pub extracted_text: Option<String>,
    pub analysis: Option<String>,
    pub error_message: Option<String>,
}

pub fn project(upload: &UploadState, pipeline: &PipelineState) -> ViewModel {
    let busy = pipeline.is_busy();

    ViewModel {
        status: pipeline.status(),
        button_label: if busy { BUSY_LABEL } else { ANALYZE_LABEL },
        button_disabled: busy,
        drop_zone_class: if upload.is_dragging() {
            DROP_ZONE_DRAGGING_CLASS
        } else {
            DROP_ZONE_CLASS
        },
        file_name: upload.file().map(|f| f.name().to_string()),
        preview_url: upload.preview_url().map(str::to_string),
        extracted_text: non_empty(pipeline.extracted_text()),
        analysis: non_empty(pipeline.analysis()),
        error_message: pipeline.error_message().map(str::to_string),
    }
}

impl ViewModel {
    pub fn is_busy(&self) -> bool {
        self.button_disabled
    }

    pub fn shows_preview(&self) -> bool {
        self.preview_url.is_some()
    }

    pub fn shows_extracted_text(&self) -> bool {
        self.extracted_text.is_some()
    }

    pub fn shows_analysis(&self) -> bool {
        self.analysis.is_some()
    }

    /// The same view with the preview panel hidden, for output that outlives
    /// the preview file.
    pub fn without_preview(mut self) -> Self {
        self.preview_url = None;
        self
    }

    /// Plain-text rendering used by the terminal shell.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if let Some(name) = &self.file_name {
            out.push_str(&format!("File: {}\n", name));
        }
        if let Some(url) = &self.preview_url {
            out.push_str(&format!("Preview: {}\n", url));
        }
        if let Some(text) = &self.extracted_text {
            out.push_str("\nExtracted Text:\n");
            out.push_str(text.trim_end());
            out.push('\n');
        }
        if let Some(analysis) = &self.analysis {
            out.push_str("\nSummary:\n");
            out.push_str(analysis.trim_end());
            out.push('\n');
        }

        out
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        project(&UploadState::default(), &PipelineState::default())
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
