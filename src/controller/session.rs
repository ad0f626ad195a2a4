//! Command queue between the presentation shell and the controller.

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::{report, validate, Controller};
use crate::error::{Alert, AppError, AppResult};
use crate::models::{DragEvent, FileRef};

/// User interactions forwarded by the shell.
#[derive(Debug, Clone)]
pub enum UiCommand {
    DragEnter,
    DragOver,
    DragLeave,
    Drop(Option<FileRef>),
    Pick(Option<FileRef>),
    Analyze,
}

impl UiCommand {
    fn name(&self) -> &'static str {
        match self {
            UiCommand::DragEnter => "drag_enter",
            UiCommand::DragOver => "drag_over",
            UiCommand::DragLeave => "drag_leave",
            UiCommand::Drop(_) => "drop",
            UiCommand::Pick(_) => "pick",
            UiCommand::Analyze => "analyze",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<UiCommand>,
}

impl SessionHandle {
    /// Queues a command without waiting for room in the queue.
    pub fn dispatch(&self, cmd: UiCommand) -> AppResult<()> {
        let cmd_name = cmd.name();
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => {
                debug!(command = cmd_name, "queued ui->controller command");
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(AppError::QueueFull),
            Err(TrySendError::Closed(_)) => Err(AppError::SessionClosed),
        }
    }
}

/// Moves `controller` onto its own task and returns a handle for feeding it
/// commands. The task ends once every handle is dropped and the queue is
/// drained, yielding the controller back.
pub fn spawn_session(controller: Controller, capacity: usize) -> (SessionHandle, JoinHandle<Controller>) {
    let (cmd_tx, cmd_rx) = mpsc::channel(capacity.max(1));
    let task = tokio::spawn(run_session(controller, cmd_rx));
    (SessionHandle { cmd_tx }, task)
}

async fn run_session(mut controller: Controller, mut cmd_rx: mpsc::Receiver<UiCommand>) -> Controller {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            UiCommand::Analyze => {
                let deferred = run_exclusive(&mut controller, &mut cmd_rx).await;
                deferred.replay(&mut controller);
            }
            other => apply(&mut controller, other),
        }
    }

    debug!("session command queue closed");
    controller
}

// The queue keeps draining while a run holds the controller, so whatever
// arrives is folded into `Deferred` and replayed once the run ends.
async fn run_exclusive(
    controller: &mut Controller,
    cmd_rx: &mut mpsc::Receiver<UiCommand>,
) -> Deferred {
    let alert_tx = controller.alert_tx.clone();
    let mut deferred = Deferred::default();
    let run = controller.run_pipeline();
    tokio::pin!(run);

    loop {
        tokio::select! {
            // Outcome was already surfaced to the user.
            _ = &mut run => break,
            Some(cmd) = cmd_rx.recv() => deferred.absorb(cmd, &alert_tx),
        }
    }

    deferred
}

/// Commands received mid-run, merged down to the last drag transition and
/// the last accepted file.
#[derive(Debug, Default)]
struct Deferred {
    drag: Option<DragEvent>,
    selection: Option<FileRef>,
}

impl Deferred {
    fn absorb(&mut self, cmd: UiCommand, alert_tx: &mpsc::UnboundedSender<Alert>) {
        match cmd {
            UiCommand::DragEnter => self.drag = Some(DragEvent::Enter),
            UiCommand::DragLeave => self.drag = Some(DragEvent::Leave),
            UiCommand::DragOver => {}
            UiCommand::Drop(file) => {
                self.drag = Some(DragEvent::Drop);
                self.stage(file, alert_tx);
            }
            UiCommand::Pick(file) => self.stage(file, alert_tx),
            UiCommand::Analyze => debug!("analyze ignored while pipeline in flight"),
        }
    }

    // Rejections are reported right away and never displace an accepted file.
    fn stage(&mut self, candidate: Option<FileRef>, alert_tx: &mpsc::UnboundedSender<Alert>) {
        match validate(candidate) {
            Ok(file) => {
                debug!(file_name = %file.name(), "deferring selection until pipeline completes");
                self.selection = Some(file);
            }
            Err(e) => report(alert_tx, e),
        }
    }

    fn replay(self, controller: &mut Controller) {
        if let Some(file) = self.selection {
            let _ = controller.select(Some(file));
        }
        if let Some(event) = self.drag {
            controller.apply_drag(event);
        }
    }
}

fn apply(controller: &mut Controller, cmd: UiCommand) {
    match cmd {
        UiCommand::DragEnter => controller.drag_enter(),
        UiCommand::DragOver => controller.drag_over(),
        UiCommand::DragLeave => controller.drag_leave(),
        // Rejections are surfaced by the controller itself.
        UiCommand::Drop(file) => {
            let _ = controller.drop_file(file);
        }
        UiCommand::Pick(file) => {
            let _ = controller.select(file);
        }
        // Routed through `run_exclusive`.
        UiCommand::Analyze => {}
    }
}
