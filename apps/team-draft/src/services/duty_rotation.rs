//! Read-modify-write around a [`DutyStore`].

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::DutyRecord;
use crate::errors::domain::DomainError;
use crate::store::{DutyStore, StoreError};

pub struct DutyRotation<S> {
    store: S,
    /// Held for the whole load, update and save cycle so two completions
    /// never both read the same record.
    write_lock: Mutex<()>,
}

impl<S: DutyStore> DutyRotation<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current record, or an empty one when the store cannot be read.
    pub async fn load_or_empty(&self) -> DutyRecord {
        match self.store.load().await {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "Duty store unreadable, starting from empty history");
                DutyRecord::default()
            }
        }
    }

    /// Register a completed duty and persist it. Returns whether the count
    /// moved; reporting the previous assignee again only moves the marker.
    ///
    /// A store that cannot be read is an error here, so the saved history is
    /// never replaced by a partial record. Only content that is not a duty
    /// record at all is overwritten.
    pub async fn record_completion(&self, identifier: &str) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut record = match self.store.load().await {
            Ok(record) => record,
            Err(StoreError::Json(err)) => {
                warn!(error = %err, "Duty store content is corrupt, replacing it");
                DutyRecord::default()
            }
            Err(err) => return Err(err.into()),
        };
        let incremented = record.record_completion(identifier);
        self.store.save(&record).await?;

        info!(
            assignee = %identifier,
            incremented,
            count = record.count_for(identifier),
            "Duty completion recorded"
        );
        Ok(incremented)
    }

    pub async fn snapshot(&self) -> DutyRecord {
        self.load_or_empty().await
    }

    /// Non-zero counts, least frequent first.
    pub async fn history(&self) -> Vec<(String, u32)> {
        self.load_or_empty().await.history()
    }
}
