//! In-process background task queue.
//!
//! Handlers submit [`BackgroundTask`]s and return immediately; a single
//! detached [`TaskWorker`] drains the queue. Delivery is at-most-once: a
//! failed task is logged and dropped, and tasks still queued at shutdown are
//! lost.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::repository::{Mailer, SocialPort, TaskSubmitter};
use crate::domain::types::BackgroundTask;
use crate::error::AccountsServiceError;

#[derive(Clone)]
pub struct TaskQueue {
    tx: mpsc::UnboundedSender<BackgroundTask>,
}

impl TaskQueue {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BackgroundTask>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TaskSubmitter for TaskQueue {
    fn submit(&self, task: BackgroundTask) {
        let kind = task.kind();
        if self.tx.send(task).is_err() {
            warn!(kind, "task queue closed; dropping task");
        } else {
            debug!(kind, "task queued");
        }
    }
}

pub struct TaskWorker<M, S> {
    pub rx: mpsc::UnboundedReceiver<BackgroundTask>,
    pub mailer: M,
    pub social: S,
}

impl<M, S> TaskWorker<M, S>
where
    M: Mailer,
    S: SocialPort,
{
    /// Run until every [`TaskQueue`] handle has been dropped.
    pub async fn run(mut self) {
        while let Some(task) = self.rx.recv().await {
            let kind = task.kind();
            if let Err(e) = self.execute(task).await {
                warn!(kind, error = ?e, "background task failed");
            }
        }
        debug!("task queue drained; worker exiting");
    }

    async fn execute(&self, task: BackgroundTask) -> Result<(), AccountsServiceError> {
        match task {
            BackgroundTask::SendMail(message) => self.mailer.send(&message).await,
            BackgroundTask::CreateProfile(seed) => self.social.create_profile(&seed).await,
        }
    }
}
