//! Read-only views computed from in-memory snapshots.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::entities::{Department, DepartmentHeadcount, Employee, RecentHire};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_RECENT_HIRE_DAYS: i64 = 30;
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Column the employee listing is ordered by (always ascending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    FirstName,
    LastName,
    Email,
    HireDate,
    Salary,
}

impl SortKey {
    /// Lenient parse; anything unrecognised sorts by first name.
    pub fn parse(value: &str) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "lastname" => SortKey::LastName,
            "email" => SortKey::Email,
            "hiredate" => SortKey::HireDate,
            "salary" => SortKey::Salary,
            _ => SortKey::FirstName,
        }
    }

    fn compare(self, a: &Employee, b: &Employee) -> Ordering {
        match self {
            SortKey::FirstName => compare_text(&a.first_name, &b.first_name),
            SortKey::LastName => compare_text(&a.last_name, &b.last_name),
            SortKey::Email => compare_text(&a.email, &b.email),
            SortKey::HireDate => a.hire_date.cmp(&b.hire_date),
            SortKey::Salary => a.salary.cmp(&b.salary),
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::parse(s))
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Blank queries match everything.
pub fn search_by_name(employees: Vec<Employee>, query: &str) -> Vec<Employee> {
    if query.trim().is_empty() {
        return employees;
    }
    employees
        .into_iter()
        .filter(|e| e.name_contains(query))
        .collect()
}

pub fn search_employees(
    employees: Vec<Employee>,
    name: &str,
    department_id: Option<i32>,
) -> Vec<Employee> {
    let matched = search_by_name(employees, name);
    match department_id {
        Some(id) => filter_by_department(matched, id),
        None => matched,
    }
}

pub fn filter_by_department(employees: Vec<Employee>, department_id: i32) -> Vec<Employee> {
    employees
        .into_iter()
        .filter(|e| e.department_id == department_id)
        .collect()
}

/// Stable ascending sort, then a 1-based page slice. Pages past the end are empty.
pub fn sort_and_page(
    mut employees: Vec<Employee>,
    page_number: usize,
    sort_key: SortKey,
    page_size: usize,
) -> Vec<Employee> {
    employees.sort_by(|a, b| sort_key.compare(a, b));
    let skip = page_number.saturating_sub(1).saturating_mul(page_size);
    employees.into_iter().skip(skip).take(page_size).collect()
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Employees hired on or after `today - days`, newest first.
pub fn recent_hires(employees: Vec<Employee>, days: i64, today: NaiveDate) -> Vec<Employee> {
    let cutoff = hire_cutoff(today, days);
    let mut recent: Vec<Employee> = employees
        .into_iter()
        .filter(|e| e.hire_date >= cutoff)
        .collect();
    recent.sort_by(|a, b| b.hire_date.cmp(&a.hire_date));
    recent
}

/// First day inside the window. Windows reaching past the calendar saturate.
pub fn hire_cutoff(today: NaiveDate, days: i64) -> NaiveDate {
    let saturated = if days < 0 { NaiveDate::MAX } else { NaiveDate::MIN };
    Duration::try_days(days)
        .and_then(|window| today.checked_sub_signed(window))
        .unwrap_or(saturated)
}

/// Attaches department names to hires; dangling references read "Unknown".
pub fn with_department_names(hires: Vec<Employee>, departments: &[Department]) -> Vec<RecentHire> {
    hires
        .into_iter()
        .map(|employee| {
            let department_name = departments
                .iter()
                .find(|d| d.id == employee.department_id)
                .map_or_else(|| UNKNOWN_DEPARTMENT.to_string(), |d| d.name.clone());
            RecentHire {
                employee,
                department_name,
            }
        })
        .collect()
}

/// Headcount for every department, in department-list order. Empty departments report 0.
pub fn headcount_by_department(
    employees: &[Employee],
    departments: &[Department],
) -> Vec<DepartmentHeadcount> {
    departments
        .iter()
        .map(|d| DepartmentHeadcount {
            department_id: d.id,
            department_name: d.name.clone(),
            count: employees.iter().filter(|e| e.department_id == d.id).count(),
        })
        .collect()
}
