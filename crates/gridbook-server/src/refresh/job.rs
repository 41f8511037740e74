//! One reference refresh run
//!
//! A run fetches every category and only then writes, so a failure part way
//! through leaves the previously stored document untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use super::client::AttributeClient;
use super::store::ReferenceInfoStore;
use super::RefreshError;

/// How a single run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All categories fetched and the document replaced
    Refreshed,
    /// Another run was still in flight; nothing was done
    Skipped,
    /// A fetch or the write failed; the stored document is unchanged
    Failed,
}

/// Refresh job shared between the scheduler and its spawned runs
#[derive(Clone)]
pub struct RefreshJob {
    client: AttributeClient,
    store: Arc<dyn ReferenceInfoStore>,
    running: Arc<AtomicBool>,
}

/// Clears the in-flight flag when a run ends, however it ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RefreshJob {
    pub fn new(client: AttributeClient, store: Arc<dyn ReferenceInfoStore>) -> Self {
        Self {
            client,
            store,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run once unless a run is already in flight
    pub async fn run_once(&self) -> RunOutcome {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Reference refresh still in flight, skipping this tick");
            return RunOutcome::Skipped;
        }
        let _in_flight = InFlight(&self.running);

        let started = Instant::now();
        match self.refresh().await {
            Ok(()) => {
                info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Reference info refreshed"
                );
                RunOutcome::Refreshed
            },
            Err(e) => {
                error!(error = %e, "Reference refresh failed, keeping previous document");
                RunOutcome::Failed
            },
        }
    }

    async fn refresh(&self) -> Result<(), RefreshError> {
        let document = self.client.fetch_all().await?;
        self.store.replace(&document).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::categories::CATEGORIES;
    use crate::refresh::store::MemoryReferenceInfoStore;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn job_for(server: &MockServer, store: &MemoryReferenceInfoStore) -> RefreshJob {
        let client = AttributeClient::new(server.uri(), 5).unwrap();
        RefreshJob::new(client, Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn test_successful_run_replaces_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/vehicle-attributes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["x"])))
            .expect(7)
            .mount(&server)
            .await;

        let store = MemoryReferenceInfoStore::seeded(json!({ "stale": true }));
        let outcome = job_for(&server, &store).run_once().await;

        assert_eq!(outcome, RunOutcome::Refreshed);
        let info = store.latest().await.unwrap().unwrap().info;
        let object = info.as_object().unwrap();
        assert_eq!(object.len(), 7);
        assert!(!object.contains_key("stale"));
        for category in CATEGORIES.iter() {
            assert_eq!(object[category.key], json!(["x"]));
        }
    }

    #[tokio::test]
    async fn test_one_failing_category_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("attribute", "engines.engine_type"))
            .respond_with(ResponseTemplate::new(500))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["ok"])))
            .mount(&server)
            .await;

        let store = MemoryReferenceInfoStore::seeded(json!({}));
        let outcome = job_for(&server, &store).run_once().await;

        assert_eq!(outcome, RunOutcome::Failed);
        assert_eq!(store.latest().await.unwrap().unwrap().info, json!({}));
    }

    #[tokio::test]
    async fn test_overlapping_runs_skip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let store = MemoryReferenceInfoStore::new();
        let job = job_for(&server, &store);

        let (first, second) = tokio::join!(job.run_once(), job.run_once());
        let mut outcomes = vec![first, second];
        outcomes.sort_by_key(|o| *o == RunOutcome::Skipped);

        assert_eq!(outcomes, vec![RunOutcome::Refreshed, RunOutcome::Skipped]);

        // the flag is released once the run completes
        assert_eq!(job.run_once().await, RunOutcome::Refreshed);
    }

    #[tokio::test]
    async fn test_flag_released_after_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let store = MemoryReferenceInfoStore::new();
        let job = job_for(&server, &store);

        assert_eq!(job.run_once().await, RunOutcome::Failed);
        assert_eq!(job.run_once().await, RunOutcome::Failed);
        assert!(store.latest().await.unwrap().is_none());
    }
}
