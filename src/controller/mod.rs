//! Controller layer: owns upload and pipeline state, applies user events and
//! publishes the projected view after every transition.

pub mod intake;
pub mod pipeline;
pub mod session;

pub use intake::{validate, ALLOWED_MIME_TYPES};
pub use session::{spawn_session, SessionHandle, UiCommand};

use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::config::Config;
use crate::error::{AppError, AppResult, Alert};
use crate::models::{PipelineState, UploadState};
use crate::services::{AnalysisService, ExtractionService, PreviewStore, ServiceClient};
use crate::view::{project, ViewModel};

/// The single writer of [`UploadState`] and [`PipelineState`].
pub struct Controller {
    upload: UploadState,
    pipeline: PipelineState,
    extractor: Arc<dyn ExtractionService>,
    analyzer: Arc<dyn AnalysisService>,
    previews: PreviewStore,
    view_tx: watch::Sender<ViewModel>,
    alert_tx: mpsc::UnboundedSender<Alert>,
}

/// Receiving ends handed to the presentation shell.
pub struct ControllerChannels {
    pub view: watch::Receiver<ViewModel>,
    pub alerts: mpsc::UnboundedReceiver<Alert>,
}

impl Controller {
    pub fn new(
        extractor: Arc<dyn ExtractionService>,
        analyzer: Arc<dyn AnalysisService>,
        previews: PreviewStore,
    ) -> (Self, ControllerChannels) {
        let (view_tx, view_rx) = watch::channel(ViewModel::default());
        let (alert_tx, alert_rx) = mpsc::unbounded_channel();

        let controller = Self {
            upload: UploadState::default(),
            pipeline: PipelineState::default(),
            extractor,
            analyzer,
            previews,
            view_tx,
            alert_tx,
        };

        (
            controller,
            ControllerChannels {
                view: view_rx,
                alerts: alert_rx,
            },
        )
    }

    /// Wires the controller to the HTTP services named in `config`.
    pub fn from_config(config: &Config) -> AppResult<(Self, ControllerChannels)> {
        let client = Arc::new(ServiceClient::from_config(config)?);
        let previews = PreviewStore::new(config.preview_dir.clone());
        Ok(Self::new(client.clone(), client, previews))
    }

    pub fn upload(&self) -> &UploadState {
        &self.upload
    }

    pub fn pipeline(&self) -> &PipelineState {
        &self.pipeline
    }

    pub fn view(&self) -> ViewModel {
        project(&self.upload, &self.pipeline)
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.view_tx.subscribe()
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }

    fn surface(&self, error: AppError) {
        report(&self.alert_tx, error);
    }
}

fn report(alert_tx: &mpsc::UnboundedSender<Alert>, error: AppError) {
    tracing::warn!(
        error_code = error.error_code(),
        error = %error,
        "Reporting error to user"
    );
    // The shell may have gone away; the state itself stays consistent.
    let _ = alert_tx.send(Alert::new(error));
}
