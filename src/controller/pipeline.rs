//! The extract → analyze pipeline.

use std::time::Instant;
use tracing::{debug, error, info};

use crate::controller::Controller;
use crate::error::{AppError, AppResult};
use crate::models::FileRef;

impl Controller {
    /// Runs extraction then analysis on the selected file.
    ///
    /// Failures are surfaced to the user before being returned. Calling this
    /// while a run is in flight does nothing and returns
    /// [`AppError::PipelineBusy`].
    pub async fn run_pipeline(&mut self) -> AppResult<()> {
        if self.pipeline.is_busy() {
            debug!(status = ?self.pipeline.status(), "Pipeline already in flight, ignoring");
            return Err(AppError::PipelineBusy);
        }

        let Some(file) = self.upload.file.clone() else {
            let err = AppError::NoFileToAnalyze;
            self.surface(err.clone());
            return Err(err);
        };

        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

        info!(
            run_id = %run_id,
            file_name = %file.name(),
            file_size = file.size(),
            "Starting pipeline run"
        );

        self.pipeline.begin();
        self.publish();

        // Every exit goes through exactly one terminal transition: success
        // inside `execute`, failure below.
        let outcome = match self.execute(&run_id, &file).await {
            Ok(()) => {
                info!(
                    run_id = %run_id,
                    extracted_chars = self.pipeline.extracted_text().len(),
                    analysis_chars = self.pipeline.analysis().len(),
                    total_time_ms = start.elapsed().as_millis() as u64,
                    "Pipeline run succeeded"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    run_id = %run_id,
                    error_code = e.error_code(),
                    error = %e,
                    total_time_ms = start.elapsed().as_millis() as u64,
                    "Pipeline run failed"
                );
                self.pipeline.fail(e.user_message());
                self.publish();
                self.surface(e.clone());
                Err(e)
            }
        };

        debug_assert!(self.pipeline.status().is_terminal());
        outcome
    }

    async fn execute(&mut self, run_id: &str, file: &FileRef) -> AppResult<()> {
        let text = self.extractor.extract(file).await?;
        debug!(run_id = %run_id, text_length = text.len(), "Extraction completed");

        self.pipeline.record_extracted(text);
        self.publish();

        let analysis = self.analyzer.analyze(self.pipeline.extracted_text()).await?;
        debug!(run_id = %run_id, analysis_length = analysis.len(), "Analysis completed");

        self.pipeline.record_analysis(analysis);
        self.publish();
        Ok(())
    }
}
