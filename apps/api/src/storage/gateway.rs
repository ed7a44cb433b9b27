//! Persistence Gateway: two-tier write: remote insert first, local fallback
//! log on any remote failure.
//!
//! Delivery is at-least-once to *some* store, never exactly-once across both:
//! a record that reached the remote table after a client-side timeout may
//! also appear in the fallback log.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::models::application::{ApplicationRecord, StorageOutcome};
use crate::storage::fallback::{FallbackError, FallbackLog};
use crate::storage::remote::{CandidateRow, RemoteStore, StoredCandidate};

pub struct PersistenceGateway {
    remote: Arc<dyn RemoteStore>,
    fallback: Arc<FallbackLog>,
}

impl PersistenceGateway {
    pub fn new(remote: Arc<dyn RemoteStore>, fallback: FallbackLog) -> Self {
        Self {
            remote,
            fallback: Arc::new(fallback),
        }
    }

    /// Persists `record`. Never returns an error: failures are reported in
    /// the outcome.
    pub async fn save(&self, record: &ApplicationRecord) -> StorageOutcome {
        let row = CandidateRow::from(record);
        let remote_error = match self.remote.insert(&row).await {
            Ok(()) => {
                info!("Application {} saved to remote datastore", record.id);
                return StorageOutcome::Remote;
            }
            Err(e) => e.to_string(),
        };

        warn!(
            "Remote save failed for application {}: {remote_error}; writing to {}",
            record.id,
            self.fallback.path().display()
        );

        let log = Arc::clone(&self.fallback);
        let snapshot = record.clone();
        let log_error = remote_error.clone();
        let appended =
            tokio::task::spawn_blocking(move || log.append(&snapshot, &log_error)).await;

        match appended {
            Ok(Ok(count)) => {
                info!(
                    "Application {} written to fallback log ({count} entries)",
                    record.id
                );
                StorageOutcome::LocalFallback {
                    error: remote_error,
                }
            }
            Ok(Err(e)) => {
                error!("Fallback write failed for application {}: {e}", record.id);
                StorageOutcome::NotPersisted {
                    error: format!("{remote_error}; {e}"),
                }
            }
            Err(e) => {
                error!("Fallback write task failed for application {}: {e}", record.id);
                StorageOutcome::NotPersisted {
                    error: format!("{remote_error}; fallback write task failed: {e}"),
                }
            }
        }
    }

    /// All remote records, newest first. Read failures are logged and
    /// reported as an empty list.
    pub async fn list(&self) -> Vec<StoredCandidate> {
        match self.remote.fetch_all().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Listing remote candidates failed: {e}");
                Vec::new()
            }
        }
    }

    /// Entries currently held in the local fallback log.
    pub async fn list_fallback(&self) -> Result<Vec<Value>, FallbackError> {
        let log = Arc::clone(&self.fallback);
        tokio::task::spawn_blocking(move || log.entries())
            .await
            .map_err(|e| FallbackError::Io(std::io::Error::other(e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_record, FailingStore, MemoryStore};

    #[tokio::test]
    async fn test_remote_success_skips_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::default());
        let gateway = PersistenceGateway::new(
            store.clone(),
            FallbackLog::new(dir.path().join("candidates.json")),
        );

        let outcome = gateway.save(&sample_record(1)).await;

        assert_eq!(outcome, StorageOutcome::Remote);
        assert_eq!(store.rows().len(), 1);
        assert!(!dir.path().join("candidates.json").exists());
        assert_eq!(gateway.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_appends_one_fallback_entry() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = PersistenceGateway::new(
            Arc::new(FailingStore),
            FallbackLog::new(dir.path().join("candidates.json")),
        );
        let record = sample_record(1);

        let before = gateway.list_fallback().await.unwrap().len();
        let outcome = gateway.save(&record).await;
        let entries = gateway.list_fallback().await.unwrap();

        match &outcome {
            StorageOutcome::LocalFallback { error } => assert!(!error.is_empty()),
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(entries.len(), before + 1);
        let entry = entries.last().unwrap();
        assert_eq!(entry["id"], record.id.to_string());
        assert_eq!(entry["name"], "Ada Lovelace");
        assert!(!entry["storage_error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_double_failure_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the log file should be makes every read fail.
        let gateway = PersistenceGateway::new(
            Arc::new(FailingStore),
            FallbackLog::new(dir.path()),
        );

        let outcome = gateway.save(&sample_record(1)).await;

        assert!(!outcome.is_persisted());
        assert!(outcome.error().unwrap().contains("database unavailable"));
    }

    #[tokio::test]
    async fn test_list_swallows_remote_errors() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = PersistenceGateway::new(
            Arc::new(FailingStore),
            FallbackLog::new(dir.path().join("candidates.json")),
        );
        assert!(gateway.list().await.is_empty());
    }
}
