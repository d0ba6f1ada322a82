//! Duty record kept as a single JSON document on disk.
//!
//! Current shape: `{"counts": {"amrit": 2}, "last_assignee": "amrit"}`.
//! Older files kept everything in one flat map with the last assignee under
//! the reserved `"__last__"` key; those are still read and are rewritten in
//! the current shape on the next save.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{DutyStore, StoreError};
use crate::domain::{duty_key, DutyRecord};

const LEGACY_LAST_KEY: &str = "__last__";
const COUNTS_KEY: &str = "counts";

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Current(DutyRecord),
    Legacy(BTreeMap<String, JsonValue>),
}

impl TryFrom<StoredRecord> for DutyRecord {
    type Error = StoreError;

    fn try_from(stored: StoredRecord) -> Result<Self, StoreError> {
        match stored {
            StoredRecord::Current(record) => Ok(record),
            // A current-shape document that failed to decode (e.g. a count
            // past u32::MAX) must not be mistaken for a legacy map.
            StoredRecord::Legacy(map)
                if map.get(COUNTS_KEY).is_some_and(JsonValue::is_object) =>
            {
                Err(StoreError::Json(serde::de::Error::custom(
                    "duty record has a `counts` map that does not decode",
                )))
            }
            StoredRecord::Legacy(map) => {
                let mut record = DutyRecord::default();
                for (key, value) in map {
                    if key == LEGACY_LAST_KEY {
                        record.last_assignee = value.as_str().map(duty_key);
                        continue;
                    }
                    match value.as_u64() {
                        Some(count) => {
                            let count = u32::try_from(count).unwrap_or(u32::MAX);
                            let slot = record.counts.entry(duty_key(&key)).or_insert(0);
                            *slot = slot.saturating_add(count);
                        }
                        None => debug!(key = %key, "Skipping non-numeric legacy duty entry"),
                    }
                }
                Ok(record)
            }
        }
    }
}

/// Parse stored bytes. Blank content is an empty record.
pub(crate) fn decode_record(bytes: &[u8]) -> Result<DutyRecord, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(DutyRecord::default());
    }
    let stored: StoredRecord = serde_json::from_slice(bytes)?;
    stored.try_into()
}

#[derive(Debug, Clone)]
pub struct JsonFileDutyStore {
    path: PathBuf,
}

impl JsonFileDutyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hidden, uniquely named sibling of the target file.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("duty.json");
        let temp_name = format!(".{file_name}.{}.tmp", Uuid::new_v4());
        match self.path.parent() {
            Some(parent) => parent.join(temp_name),
            None => PathBuf::from(temp_name),
        }
    }
}

#[async_trait]
impl DutyStore for JsonFileDutyStore {
    async fn load(&self) -> Result<DutyRecord, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => decode_record(&bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Duty store file absent; starting empty");
                Ok(DutyRecord::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, record: &DutyRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(record)?;

        // Readers never see a half-written file.
        let tmp = self.temp_path();
        if let Err(err) = write_synced(&tmp, &body).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        if let Err(err) = tokio::fs::rename(&tmp, &self.path).await {
            warn!(temp = %tmp.display(), error = %err, "Duty store rename failed");
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }

        info!(
            path = %self.path.display(),
            entries = record.counts.len(),
            "Duty store saved"
        );
        Ok(())
    }
}

async fn write_synced(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(body).await?;
    file.sync_all().await
}
