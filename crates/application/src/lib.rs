use config::Config;
use domain::*;
use infrastructure::*;
use std::sync::Arc;
use tracing::info;

/// Staff records application - wires stores and services together
pub struct StaffApp {
    pub employee_service: EmployeeService,
    pub department_service: DepartmentService,
    pub dashboard_service: DashboardService,
}

impl StaffApp {
    /// File-backed application rooted at the configured data directory.
    pub async fn open(config: &Config) -> Result<Self, DomainError> {
        let directory = DataDirectory::open(&config.data_dir).await.map_err(|e| {
            DomainError::PersistenceError(format!(
                "Failed to create data directory {}: {}",
                config.data_dir.display(),
                e
            ))
        })?;

        // One store instance per file, shared by every service touching it.
        let employee_repository: Arc<EmployeeRepository> = Arc::new(
            JsonFileRepository::<Employee>::open(&directory, &config.employees_file).await?,
        );
        let department_repository: Arc<DepartmentRepository> = Arc::new(
            JsonFileRepository::<Department>::open(&directory, &config.departments_file).await?,
        );

        info!(data_dir = %directory.root().display(), "data directory ready");
        Ok(Self::from_repositories(employee_repository, department_repository))
    }

    /// Application with both collections held in memory.
    pub fn in_memory() -> Self {
        Self::from_repositories(
            Arc::new(InMemoryRepository::<Employee>::new()),
            Arc::new(InMemoryRepository::<Department>::new()),
        )
    }

    pub fn from_repositories(
        employee_repository: Arc<EmployeeRepository>,
        department_repository: Arc<DepartmentRepository>,
    ) -> Self {
        let write_gate = new_write_gate();

        let employee_service =
            EmployeeService::new(employee_repository.clone(), department_repository.clone())
                .with_write_gate(write_gate.clone());

        let department_service =
            DepartmentService::new(department_repository.clone(), employee_repository.clone())
                .with_write_gate(write_gate);

        let dashboard_service = DashboardService::new(employee_repository, department_repository);

        Self {
            employee_service,
            department_service,
            dashboard_service,
        }
    }
}
