use serde::Serialize;

use super::{Department, Employee};
use crate::queries::SortKey;

/// Employee together with the department it points at, resolved per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeDetails {
    pub employee: Employee,
    pub department: Option<Department>,
}

/// One page of the sorted employee listing plus the numbers needed to render pagers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeePage {
    pub employees: Vec<Employee>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub sort_key: SortKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentHeadcount {
    pub department_id: i32,
    pub department_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentHire {
    pub employee: Employee,
    pub department_name: String, // "Unknown" when the department is gone
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    /// Size of the filtered search result, not of the whole collection.
    pub total_employees: usize,
    pub employees_by_department: Vec<DepartmentHeadcount>,
    pub recent_hires: Vec<RecentHire>,
    pub departments: Vec<Department>,
}
