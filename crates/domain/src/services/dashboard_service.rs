use crate::entities::{DashboardData, Department, DepartmentHeadcount, Employee, RecentHire};
use crate::queries::{self, DEFAULT_RECENT_HIRE_DAYS};
use crate::repositories::{DepartmentRepository, EmployeeRepository};
use crate::services::{local_today, Clock};
use std::sync::Arc;

/// Read-only summaries over both stores. Every call works on fresh snapshots.
pub struct DashboardService {
    employee_repository: Arc<EmployeeRepository>,
    department_repository: Arc<DepartmentRepository>,
    clock: Clock,
}

impl DashboardService {
    pub fn new(
        employee_repository: Arc<EmployeeRepository>,
        department_repository: Arc<DepartmentRepository>,
    ) -> Self {
        Self {
            employee_repository,
            department_repository,
            clock: local_today,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn get_total_employee_count(&self) -> usize {
        self.employee_repository.find_all().await.len()
    }

    pub async fn search_employees(&self, name: &str, department_id: Option<i32>) -> Vec<Employee> {
        queries::search_employees(self.employee_repository.find_all().await, name, department_id)
    }

    pub async fn get_employees_by_department(&self) -> Vec<DepartmentHeadcount> {
        let employees = self.employee_repository.find_all().await;
        let departments = self.department_repository.find_all().await;
        queries::headcount_by_department(&employees, &departments)
    }

    pub async fn get_recent_hires(&self, days: i64) -> Vec<RecentHire> {
        let employees = self.employee_repository.find_all().await;
        let departments = self.department_repository.find_all().await;
        let hires = queries::recent_hires(employees, days, (self.clock)());
        queries::with_department_names(hires, &departments)
    }

    pub async fn get_all_departments(&self) -> Vec<Department> {
        self.department_repository.find_all().await
    }

    pub async fn get_dashboard_data(&self, name: &str, department_id: Option<i32>) -> DashboardData {
        let filtered = self.search_employees(name, department_id).await;
        DashboardData {
            total_employees: filtered.len(),
            employees_by_department: self.get_employees_by_department().await,
            recent_hires: self.get_recent_hires(DEFAULT_RECENT_HIRE_DAYS).await,
            departments: self.get_all_departments().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryRepository;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    fn employee(id: i32, first: &str, days_ago: i64, department_id: i32) -> Employee {
        Employee::new(
            first,
            "Doe",
            format!("{}@corp.test", first.to_lowercase()),
            today() - Duration::days(days_ago),
            Decimal::new(3000, 0),
            department_id,
        )
        .with_id(id)
    }

    fn service() -> DashboardService {
        let departments = Arc::new(InMemoryRepository::with_records(vec![
            Department::with_id(1, "Engineering"),
            Department::with_id(2, "Marketing"),
        ]));
        let employees = Arc::new(InMemoryRepository::with_records(vec![
            employee(1, "Ann", 400, 1),
            employee(2, "Ben", 31, 1),
            employee(3, "Cat", 30, 2),
            employee(4, "Dan", 1, 3),
        ]));
        DashboardService::new(employees, departments).with_clock(today)
    }

    #[tokio::test]
    async fn counts_per_department() {
        let counts = service().get_employees_by_department().await;
        assert_eq!(
            counts,
            vec![
                DepartmentHeadcount {
                    department_id: 1,
                    department_name: "Engineering".to_string(),
                    count: 2
                },
                DepartmentHeadcount {
                    department_id: 2,
                    department_name: "Marketing".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn recent_hires_are_named_and_newest_first() {
        let hires = service().get_recent_hires(30).await;
        let summary: Vec<(&str, &str)> = hires
            .iter()
            .map(|h| (h.employee.first_name.as_str(), h.department_name.as_str()))
            .collect();
        assert_eq!(summary, vec![("Dan", "Unknown"), ("Cat", "Marketing")]);
    }

    #[tokio::test]
    async fn dashboard_total_counts_the_filtered_set() {
        let service = service();
        let data = service.get_dashboard_data("", Some(1)).await;
        assert_eq!(data.total_employees, 2);
        assert_eq!(data.departments.len(), 2);
        assert_eq!(data.recent_hires.len(), 2);
        assert_eq!(data.employees_by_department.len(), 2);
        assert_eq!(service.get_total_employee_count().await, 4);
    }

    #[tokio::test]
    async fn search_by_name_and_department() {
        let service = service();
        assert_eq!(service.search_employees("an", None).await.len(), 2);
        assert_eq!(service.search_employees("an", Some(3)).await.len(), 1);
        assert_eq!(service.search_employees("doe", Some(2)).await.len(), 1);
    }
}
