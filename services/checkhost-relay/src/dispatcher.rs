//! Dispatcher: runs check-then-notify for an alert on a detached task

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;

use crate::alert::AlertPayload;
use crate::checkhost::CheckHostClient;
use crate::config::Config;
use crate::notifier::Notifier;

/// Spawns one task per qualifying alert. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: Arc<Config>,
    checkhost: Arc<CheckHostClient>,
    notifier: Arc<dyn Notifier>,
    tracker: TaskTracker,
}

impl Dispatcher {
    pub fn new(
        config: Arc<Config>,
        checkhost: CheckHostClient,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            checkhost: Arc::new(checkhost),
            notifier,
            tracker: TaskTracker::new(),
        }
    }

    /// Process `alert` on its own task and return immediately.
    ///
    /// The task always runs to completion; nothing aborts it.
    pub fn dispatch(&self, alert: AlertPayload) -> JoinHandle<()> {
        let dispatcher = self.clone();
        self.tracker.spawn(async move {
            dispatcher.process_alert(alert).await;
        })
    }

    /// Number of dispatches still running
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every dispatch spawned so far has finished
    pub async fn wait_for_in_flight(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Check the alert's host and notify with the link, or with the error
    /// when the check could not be created.
    pub async fn process_alert(&self, alert: AlertPayload) {
        let target_host = alert.name;

        let message = match self
            .checkhost
            .check(&target_host, self.config.proxy_url.as_deref())
            .await
        {
            Ok(link) => link,
            Err(e) => {
                tracing::error!("Error creating check-host check for '{}': {}", target_host, e);
                format!("Failed to create check-host report: {}", e)
            }
        };

        if let Err(e) = self.notifier.notify(&message).await {
            tracing::error!("Error sending notification for '{}': {}", target_host, e);
        }
    }
}
