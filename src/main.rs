use application::StaffApp;
use config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_path = std::env::args().nth(1);
    let config = Config::from_env(env_path.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        data_dir = %config.data_dir.display(),
        page_size = config.page_size,
        "starting staff records"
    );

    let app = StaffApp::open(&config).await?;

    let departments = app.dashboard_service.get_employees_by_department().await;
    let total = app.dashboard_service.get_total_employee_count().await;
    info!(employees = total, departments = departments.len(), "records loaded");

    for headcount in &departments {
        info!(
            department = %headcount.department_name,
            employees = headcount.count,
            "department headcount"
        );
    }

    let recent = app
        .dashboard_service
        .get_recent_hires(config.recent_hire_days)
        .await;
    for hire in &recent {
        info!(
            employee = %hire.employee.full_name(),
            department = %hire.department_name,
            hired = %hire.employee.hire_date,
            "recent hire"
        );
    }

    let first_page = app
        .employee_service
        .get_page(1, domain::SortKey::default(), config.page_size)
        .await;
    info!(
        shown = first_page.employees.len(),
        total_pages = first_page.total_pages,
        "first listing page ready"
    );

    Ok(())
}
