use crate::entities::{Employee, EmployeeDetails, EmployeePage};
use crate::errors::DomainError;
use crate::queries::{self, SortKey};
use crate::repositories::{DepartmentRepository, EmployeeRepository};
use crate::services::{local_today, new_write_gate, Clock, WriteGate};
use std::sync::Arc;
use tracing::{info, warn};

/// Employee rules plus the listing queries the employee pages need.
pub struct EmployeeService {
    employee_repository: Arc<EmployeeRepository>,
    department_repository: Arc<DepartmentRepository>,
    write_gate: WriteGate,
    clock: Clock,
}

impl EmployeeService {
    pub fn new(
        employee_repository: Arc<EmployeeRepository>,
        department_repository: Arc<DepartmentRepository>,
    ) -> Self {
        Self {
            employee_repository,
            department_repository,
            write_gate: new_write_gate(),
            clock: local_today,
        }
    }

    pub fn with_write_gate(mut self, write_gate: WriteGate) -> Self {
        self.write_gate = write_gate;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn get_all(&self) -> Vec<Employee> {
        self.employee_repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> Option<Employee> {
        self.employee_repository.find_by_id(id).await
    }

    /// Looks up an employee and resolves its department for display.
    pub async fn get_with_department(&self, id: i32) -> Option<EmployeeDetails> {
        let employee = self.employee_repository.find_by_id(id).await?;
        let department = self
            .department_repository
            .find_by_id(employee.department_id)
            .await;
        Some(EmployeeDetails {
            employee,
            department,
        })
    }

    pub async fn get_all_with_paging(
        &self,
        page_number: usize,
        sort_key: SortKey,
        page_size: usize,
    ) -> Vec<Employee> {
        queries::sort_and_page(self.get_all().await, page_number, sort_key, page_size)
    }

    /// Page slice and pager totals taken from the same snapshot.
    pub async fn get_page(
        &self,
        page_number: usize,
        sort_key: SortKey,
        page_size: usize,
    ) -> EmployeePage {
        let all = self.get_all().await;
        let total_count = all.len();
        EmployeePage {
            employees: queries::sort_and_page(all, page_number, sort_key, page_size),
            page_number,
            page_size,
            total_count,
            total_pages: queries::total_pages(total_count, page_size),
            sort_key,
        }
    }

    pub async fn get_total_count(&self) -> usize {
        self.get_all().await.len()
    }

    pub async fn search_by_name(&self, query: &str) -> Vec<Employee> {
        queries::search_by_name(self.get_all().await, query)
    }

    pub async fn get_by_department(&self, department_id: i32) -> Vec<Employee> {
        queries::filter_by_department(self.get_all().await, department_id)
    }

    pub async fn get_recent_hires(&self, days: i64) -> Vec<Employee> {
        queries::recent_hires(self.get_all().await, days, (self.clock)())
    }

    /// Validates, checks the department reference and stores the employee.
    pub async fn create(&self, employee: Employee) -> Result<Employee, DomainError> {
        employee.validate((self.clock)())?;

        let _gate = self.write_gate.lock().await;
        self.ensure_department_exists(employee.department_id).await?;

        let saved = self.employee_repository.add(employee).await?;
        info!(id = saved.id, department_id = saved.department_id, "employee created");
        Ok(saved)
    }

    pub async fn update(&self, employee: Employee) -> Result<Employee, DomainError> {
        employee.validate((self.clock)())?;

        let _gate = self.write_gate.lock().await;
        if self.employee_repository.find_by_id(employee.id).await.is_none() {
            return Err(not_found(employee.id));
        }
        self.ensure_department_exists(employee.department_id).await?;

        self.employee_repository.update(&employee).await?;
        info!(id = employee.id, "employee updated");
        Ok(employee)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let _gate = self.write_gate.lock().await;
        if self.employee_repository.find_by_id(id).await.is_none() {
            return Err(not_found(id));
        }

        self.employee_repository.delete(id).await?;
        info!(id, "employee deleted");
        Ok(())
    }

    async fn ensure_department_exists(&self, department_id: i32) -> Result<(), DomainError> {
        if self
            .department_repository
            .find_by_id(department_id)
            .await
            .is_none()
        {
            warn!(department_id, "employee references unknown department");
            return Err(DomainError::validation("Department does not exist."));
        }
        Ok(())
    }
}

fn not_found(id: i32) -> DomainError {
    DomainError::NotFound(format!("Employee {} not found.", id))
}
