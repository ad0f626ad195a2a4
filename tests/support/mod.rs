//! Scripted stand-ins for the remote services, shared by the test binaries.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{watch, Notify};

use elicit_analyzer::controller::{Controller, ControllerChannels};
use elicit_analyzer::error::{AppError, AppResult};
use elicit_analyzer::models::FileRef;
use elicit_analyzer::services::{AnalysisService, ExtractionService, PreviewStore, ServiceKind};
use elicit_analyzer::view::ViewModel;

/// Captures the published view each time a service is contacted.
#[derive(Default)]
pub struct Recorder {
    view: Mutex<Option<watch::Receiver<ViewModel>>>,
    seen: Mutex<Vec<(ServiceKind, ViewModel)>>,
}

impl Recorder {
    pub fn attach(&self, view: watch::Receiver<ViewModel>) {
        *self.view.lock().unwrap() = Some(view);
    }

    fn record(&self, service: ServiceKind) {
        if let Some(view) = self.view.lock().unwrap().as_ref() {
            let snapshot = view.borrow().clone();
            self.seen.lock().unwrap().push((service, snapshot));
        }
    }

    pub fn seen(&self) -> Vec<(ServiceKind, ViewModel)> {
        self.seen.lock().unwrap().clone()
    }
}

pub struct FakeExtractor {
    reply: AppResult<String>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    received: Mutex<Vec<FileRef>>,
    recorder: Arc<Recorder>,
}

pub struct FakeAnalyzer {
    reply: AppResult<String>,
    calls: AtomicUsize,
    received: Mutex<Vec<String>>,
    recorder: Arc<Recorder>,
}

impl FakeExtractor {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<FileRef> {
        self.received.lock().unwrap().clone()
    }
}

impl FakeAnalyzer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionService for FakeExtractor {
    async fn extract(&self, file: &FileRef) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(file.clone());
        self.recorder.record(ServiceKind::Extraction);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        tokio::task::yield_now().await;

        self.reply.clone()
    }
}

#[async_trait]
impl AnalysisService for FakeAnalyzer {
    async fn analyze(&self, text: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(text.to_string());
        self.recorder.record(ServiceKind::Analysis);

        tokio::task::yield_now().await;

        self.reply.clone()
    }
}

pub struct Harness {
    pub controller: Controller,
    pub channels: ControllerChannels,
    pub extractor: Arc<FakeExtractor>,
    pub analyzer: Arc<FakeAnalyzer>,
    pub recorder: Arc<Recorder>,
    pub preview_dir: tempfile::TempDir,
}

pub struct HarnessBuilder {
    extract_reply: AppResult<String>,
    analyze_reply: AppResult<String>,
    gate: Option<Arc<Notify>>,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            extract_reply: Ok("hello world".to_string()),
            analyze_reply: Ok("greeting".to_string()),
            gate: None,
        }
    }

    pub fn extract_reply(mut self, reply: AppResult<String>) -> Self {
        self.extract_reply = reply;
        self
    }

    pub fn analyze_reply(mut self, reply: AppResult<String>) -> Self {
        self.analyze_reply = reply;
        self
    }

    /// Extraction blocks until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn build(self) -> Harness {
        let recorder = Arc::new(Recorder::default());
        let extractor = Arc::new(FakeExtractor {
            reply: self.extract_reply,
            gate: self.gate,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
            recorder: recorder.clone(),
        });
        let analyzer = Arc::new(FakeAnalyzer {
            reply: self.analyze_reply,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
            recorder: recorder.clone(),
        });

        let preview_dir = tempfile::tempdir().unwrap();
        let (controller, channels) = Controller::new(
            extractor.clone(),
            analyzer.clone(),
            PreviewStore::new(Some(preview_dir.path().to_path_buf())),
        );
        recorder.attach(controller.subscribe());

        Harness {
            controller,
            channels,
            extractor,
            analyzer,
            recorder,
            preview_dir,
        }
    }
}

impl Harness {
    /// Alert messages raised so far, in order.
    pub fn drain_alerts(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(alert) = self.channels.alerts.try_recv() {
            messages.push(alert.message());
        }
        messages
    }
}

pub fn pdf() -> FileRef {
    FileRef::new("report.pdf", "application/pdf", b"%PDF-1.7 test".to_vec())
}

pub fn png(name: &str) -> FileRef {
    FileRef::new(name, "image/png", b"\x89PNG\r\n\x1a\nfake".to_vec())
}

pub fn jpeg() -> FileRef {
    FileRef::new("photo.jpg", "image/jpeg", b"\xff\xd8\xff\xe0fake".to_vec())
}

pub fn service_error(service: ServiceKind, message: &str) -> AppResult<String> {
    Err(AppError::service(service, message))
}

pub fn transport_error(service: ServiceKind) -> AppResult<String> {
    Err(AppError::transport(service, "connection refused"))
}
