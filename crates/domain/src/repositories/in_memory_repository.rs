use crate::errors::DomainError;
use crate::repositories::record_repository::{next_id, remove_record, replace_record};
use crate::repositories::{Record, RecordRepository};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Record store kept entirely in memory. Used for tests and ephemeral setups.
pub struct InMemoryRepository<T> {
    records: Mutex<Vec<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordRepository<T> for InMemoryRepository<T> {
    async fn find_all(&self) -> Vec<T> {
        self.records.lock().await.clone()
    }

    async fn add(&self, mut record: T) -> Result<T, DomainError> {
        let mut records = self.records.lock().await;
        record.set_id(next_id(&records));
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: &T) -> Result<(), DomainError> {
        let mut records = self.records.lock().await;
        replace_record(&mut records, record);
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut records = self.records.lock().await;
        remove_record(&mut records, id);
        Ok(())
    }
}
