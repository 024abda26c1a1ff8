use crate::entities::Department;
use crate::errors::DomainError;
use crate::repositories::{DepartmentRepository, EmployeeRepository};
use crate::services::{new_write_gate, WriteGate};
use std::sync::Arc;
use tracing::{info, warn};

/// Department rules: field validation, unique names, delete-only-if-empty.
pub struct DepartmentService {
    department_repository: Arc<DepartmentRepository>,
    employee_repository: Arc<EmployeeRepository>,
    write_gate: WriteGate,
}

impl DepartmentService {
    pub fn new(
        department_repository: Arc<DepartmentRepository>,
        employee_repository: Arc<EmployeeRepository>,
    ) -> Self {
        Self {
            department_repository,
            employee_repository,
            write_gate: new_write_gate(),
        }
    }

    pub fn with_write_gate(mut self, write_gate: WriteGate) -> Self {
        self.write_gate = write_gate;
        self
    }

    pub async fn get_all(&self) -> Vec<Department> {
        self.department_repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> Option<Department> {
        self.department_repository.find_by_id(id).await
    }

    /// Validates and stores a new department, returning it with its assigned id.
    pub async fn create(&self, department: Department) -> Result<Department, DomainError> {
        department.validate()?;

        let _gate = self.write_gate.lock().await;
        self.ensure_unique_name(&department).await?;

        let saved = self.department_repository.add(department).await?;
        info!(id = saved.id, name = %saved.name, "department created");
        Ok(saved)
    }

    pub async fn update(&self, department: Department) -> Result<Department, DomainError> {
        department.validate()?;

        let _gate = self.write_gate.lock().await;
        if self.department_repository.find_by_id(department.id).await.is_none() {
            return Err(not_found(department.id));
        }
        self.ensure_unique_name(&department).await?;

        self.department_repository.update(&department).await?;
        info!(id = department.id, name = %department.name, "department updated");
        Ok(department)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let _gate = self.write_gate.lock().await;
        if self.department_repository.find_by_id(id).await.is_none() {
            return Err(not_found(id));
        }

        if self.has_employees(id).await {
            warn!(id, "refusing to delete department with employees");
            return Err(DomainError::Conflict(
                "Cannot delete department with existing employees. Please reassign or remove employees first."
                    .to_string(),
            ));
        }

        self.department_repository.delete(id).await?;
        info!(id, "department deleted");
        Ok(())
    }

    pub async fn can_delete(&self, id: i32) -> bool {
        !self.has_employees(id).await
    }

    pub async fn get_employee_count(&self, id: i32) -> usize {
        self.employee_repository
            .find_all()
            .await
            .iter()
            .filter(|e| e.department_id == id)
            .count()
    }

    async fn has_employees(&self, id: i32) -> bool {
        self.employee_repository
            .find_all()
            .await
            .iter()
            .any(|e| e.department_id == id)
    }

    // The department's own current name never counts as a duplicate.
    async fn ensure_unique_name(&self, department: &Department) -> Result<(), DomainError> {
        let duplicate = self
            .department_repository
            .find_all()
            .await
            .iter()
            .any(|d| d.id != department.id && d.has_name(&department.name));

        if duplicate {
            warn!(name = %department.name, "duplicate department name");
            return Err(DomainError::Conflict(
                "Department name already exists.".to_string(),
            ));
        }
        Ok(())
    }
}

fn not_found(id: i32) -> DomainError {
    DomainError::NotFound(format!("Department {} not found.", id))
}
