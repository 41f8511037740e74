//! Periodic driver for [`RefreshJob`]
//!
//! Each tick spawns the run on its own task, so a slow upstream never delays
//! the timer. Overlap is handled by the job's in-flight flag, not here.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::job::RefreshJob;

pub struct RefreshScheduler {
    job: RefreshJob,
    interval: Duration,
}

/// Running scheduler; dropping it leaves the task running, call [`stop`](Self::stop)
pub struct RefreshHandle {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    pub fn new(job: RefreshJob, interval: Duration) -> Self {
        Self { job, interval }
    }

    /// Start ticking; the first run fires immediately
    pub fn start(self) -> RefreshHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            info!(
                interval_secs = self.interval.as_secs(),
                "Reference refresh scheduler started"
            );

            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let job = self.job.clone();
                        tokio::spawn(async move {
                            job.run_once().await;
                        });
                    }
                }
            }

            info!("Reference refresh scheduler stopped");
        });

        RefreshHandle { token, handle }
    }
}

impl RefreshHandle {
    /// Stop scheduling new runs and wait for the timer task to exit
    ///
    /// A run already in flight is abandoned with the runtime.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Reference refresh scheduler task did not exit cleanly");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
