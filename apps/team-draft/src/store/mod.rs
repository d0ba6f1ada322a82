//! Persistence seam for the duty record.
//!
//! Stores read and write the whole record; the read-modify-write cycle is
//! serialized one level up by [`DutyRotation`](crate::services::DutyRotation).

mod json_file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use json_file::JsonFileDutyStore;
pub use memory::MemoryDutyStore;

use crate::domain::DutyRecord;
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duty store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("duty store content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::infra(InfraErrorKind::DutyStore, err.to_string())
    }
}

#[async_trait]
pub trait DutyStore: Send + Sync {
    /// Full record. A missing store yields an empty record.
    async fn load(&self) -> Result<DutyRecord, StoreError>;

    /// Replace the stored record.
    async fn save(&self, record: &DutyRecord) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: DutyStore + ?Sized> DutyStore for Box<T> {
    async fn load(&self) -> Result<DutyRecord, StoreError> {
        (**self).load().await
    }

    async fn save(&self, record: &DutyRecord) -> Result<(), StoreError> {
        (**self).save(record).await
    }
}
