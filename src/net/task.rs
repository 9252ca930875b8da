use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::{UserRecord, UserSource};

/// Result of the one-shot fetch; the error side is the text shown to the user.
pub type FetchOutcome = std::result::Result<Vec<UserRecord>, String>;

/// Shown when the fetch task ends without reporting (panic or abort).
pub const TASK_LOST_MESSAGE: &str = "user fetch ended without a result";

/// The single in-flight fetch owned by a mounted view.
///
/// Dropping it aborts the task, so an outcome can never land after the view is gone.
pub struct FetchTask {
    rx: oneshot::Receiver<FetchOutcome>,
    join: JoinHandle<()>,
}

impl FetchTask {
    pub fn spawn(handle: &Handle, source: Arc<dyn UserSource>) -> Self {
        let (tx, rx) = oneshot::channel();
        let join = handle.spawn(async move {
            debug!("user fetch started");
            let outcome = source.fetch_users().await.map_err(|e| {
                error!(error = %e, "user fetch failed");
                e.to_string()
            });
            // Receiver gone means the view was torn down.
            let _ = tx.send(outcome);
        });
        Self { rx, join }
    }

    /// Take the outcome if it has arrived. Yields at most once.
    pub fn try_take(&mut self) -> Option<FetchOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(TASK_LOST_MESSAGE.to_string())),
        }
    }

    pub fn abort_handle(&self) -> tokio::task::AbortHandle {
        self.join.abort_handle()
    }
}

impl Drop for FetchTask {
    fn drop(&mut self) {
        self.join.abort();
    }
}
