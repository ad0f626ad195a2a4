use serde::Serialize;

use crate::models::FileRef;
use crate::services::Preview;

/// Pointer-drag state of the drop zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop,
}

impl DragState {
    /// Drag transitions never look at the dragged item; only the controller's
    /// drop handling validates it.
    pub fn on(self, event: DragEvent) -> DragState {
        match (self, event) {
            (_, DragEvent::Enter) => DragState::Dragging,
            (state, DragEvent::Over) => state,
            (_, DragEvent::Leave) | (_, DragEvent::Drop) => DragState::Idle,
        }
    }
}

/// File intake state. The preview, when present, belongs to `file` and is
/// released as soon as the file is replaced.
#[derive(Debug, Default)]
pub struct UploadState {
    pub(crate) file: Option<FileRef>,
    pub(crate) preview: Option<Preview>,
    pub(crate) drag: DragState,
}

impl UploadState {
    pub fn file(&self) -> Option<&FileRef> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(Preview::url)
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    Idle,
    Extracting,
    Analyzing,
    Succeeded,
    Failed,
}

impl PipelineStatus {
    /// A remote call is outstanding.
    pub fn is_in_flight(self) -> bool {
        matches!(self, PipelineStatus::Extracting | PipelineStatus::Analyzing)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStatus::Succeeded | PipelineStatus::Failed)
    }
}

/// Progress and results of the extract → analyze pipeline.
///
/// Fields only change through the transition methods below, so extracted
/// text never appears before `Analyzing` and an analysis never appears
/// outside `Succeeded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    status: PipelineStatus,
    extracted_text: String,
    analysis: String,
    error_message: Option<String>,
}

impl PipelineState {
    pub fn status(&self) -> PipelineStatus {
        self.status
    }

    pub fn extracted_text(&self) -> &str {
        &self.extracted_text
    }

    pub fn analysis(&self) -> &str {
        &self.analysis
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_in_flight()
    }

    pub(crate) fn begin(&mut self) {
        self.status = PipelineStatus::Extracting;
        self.extracted_text.clear();
        self.analysis.clear();
        self.error_message = None;
    }

    pub(crate) fn record_extracted(&mut self, text: String) {
        self.extracted_text = text;
        self.status = PipelineStatus::Analyzing;
    }

    pub(crate) fn record_analysis(&mut self, analysis: String) {
        self.analysis = analysis;
        self.status = PipelineStatus::Succeeded;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.analysis.clear();
        self.error_message = Some(message);
        self.status = PipelineStatus::Failed;
    }
}
