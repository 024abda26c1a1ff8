pub mod dashboard_service;
pub mod department_service;
pub mod employee_service;

pub use dashboard_service::DashboardService;
pub use department_service::DepartmentService;
pub use employee_service::EmployeeService;

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Source of "today" for hire-date rules and recent-hire windows.
pub type Clock = fn() -> NaiveDate;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Lock held across a service's validate-then-write sequence.
///
/// Sharing one gate between the employee and department services makes
/// reference checks and the write that depends on them a single step.
pub type WriteGate = Arc<Mutex<()>>;

pub fn new_write_gate() -> WriteGate {
    Arc::new(Mutex::new(()))
}
