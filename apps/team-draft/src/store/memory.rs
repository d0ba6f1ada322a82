use async_trait::async_trait;
use parking_lot::Mutex;

use super::{DutyStore, StoreError};
use crate::domain::DutyRecord;

/// In-process store, used when no file path is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryDutyStore {
    record: Mutex<DutyRecord>,
}

impl MemoryDutyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: DutyRecord) -> Self {
        Self {
            record: Mutex::new(record),
        }
    }

    pub fn snapshot(&self) -> DutyRecord {
        self.record.lock().clone()
    }
}

#[async_trait]
impl DutyStore for MemoryDutyStore {
    async fn load(&self) -> Result<DutyRecord, StoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, record: &DutyRecord) -> Result<(), StoreError> {
        *self.record.lock() = record.clone();
        Ok(())
    }
}
