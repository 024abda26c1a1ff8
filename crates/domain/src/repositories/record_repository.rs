use crate::entities::{Department, Employee};
use crate::errors::DomainError;
use async_trait::async_trait;

/// Anything the record store can persist: an entity carrying an integer id.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

impl Record for Employee {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl Record for Department {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

/// Repository trait - one collection of records behind a single lock.
///
/// Every method is atomic with respect to the other methods of the same
/// store. Reads degrade to an empty collection; writes report
/// `DomainError::PersistenceError`.
#[async_trait]
pub trait RecordRepository<T: Record>: Send + Sync {
    /// Loads the whole collection. Never fails; an unreadable source yields `[]`.
    async fn find_all(&self) -> Vec<T>;

    async fn find_by_id(&self, id: i32) -> Option<T> {
        self.find_all().await.into_iter().find(|r| r.id() == id)
    }

    /// Assigns `max(id) + 1` (or 1), appends and persists. Returns the stored record.
    async fn add(&self, record: T) -> Result<T, DomainError>;

    /// Replaces the record with the same id in place. Absent ids are a no-op.
    async fn update(&self, record: &T) -> Result<(), DomainError>;

    /// Removes the record with the given id. Absent ids are a no-op.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

pub type EmployeeRepository = dyn RecordRepository<Employee>;
pub type DepartmentRepository = dyn RecordRepository<Department>;

/// Identifier for the next record appended to `records`.
pub fn next_id<T: Record>(records: &[T]) -> i32 {
    records.iter().map(Record::id).max().map_or(1, |max| max + 1)
}

/// In-place replace shared by store implementations. Returns whether a record matched.
pub fn replace_record<T: Record>(records: &mut [T], record: &T) -> bool {
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => {
            *slot = record.clone();
            true
        }
        None => false,
    }
}

/// Removes the record with `id`. Returns whether a record matched.
pub fn remove_record<T: Record>(records: &mut Vec<T>, id: i32) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}
