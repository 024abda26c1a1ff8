pub mod in_memory_repository;
pub mod record_repository;

pub use in_memory_repository::InMemoryRepository;
pub use record_repository::{
    next_id, remove_record, replace_record, DepartmentRepository, EmployeeRepository, Record,
    RecordRepository,
};
