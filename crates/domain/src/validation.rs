//! Field rules for employees and departments.
//!
//! Each rule is a standalone check returning the first violation as a
//! `DomainError::ValidationError`.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use crate::errors::DomainError;

pub const MAX_PERSON_NAME_LEN: usize = 50;
pub const MIN_DEPARTMENT_NAME_LEN: usize = 2;
pub const MAX_DEPARTMENT_NAME_LEN: usize = 100;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

fn validate_person_name(value: &str, label: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} is required.", label)));
    }
    if value.chars().count() > MAX_PERSON_NAME_LEN {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters.",
            label, MAX_PERSON_NAME_LEN
        )));
    }
    Ok(())
}

pub fn validate_first_name(value: &str) -> Result<(), DomainError> {
    validate_person_name(value, "First Name")
}

pub fn validate_last_name(value: &str) -> Result<(), DomainError> {
    validate_person_name(value, "Last Name")
}

pub fn validate_email(value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation("Email is required."));
    }
    if !is_valid_email(value) {
        return Err(DomainError::validation("Invalid email format."));
    }
    Ok(())
}

/// Address syntax check; surrounding whitespace or display names are rejected.
pub fn is_valid_email(value: &str) -> bool {
    value.trim() == value && EMAIL_PATTERN.is_match(value)
}

pub fn validate_hire_date(hire_date: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
    if hire_date > today {
        return Err(DomainError::validation("Hire date cannot be in the future."));
    }
    Ok(())
}

pub fn validate_salary(salary: Decimal) -> Result<(), DomainError> {
    if salary <= Decimal::ZERO {
        return Err(DomainError::validation("Salary must be greater than 0."));
    }
    Ok(())
}

pub fn validate_department_id(department_id: i32) -> Result<(), DomainError> {
    if department_id <= 0 {
        return Err(DomainError::validation("Department must be selected."));
    }
    Ok(())
}

pub fn validate_department_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Department name is required."));
    }
    let len = name.chars().count();
    if len > MAX_DEPARTMENT_NAME_LEN {
        return Err(DomainError::validation(format!(
            "Department name cannot exceed {} characters.",
            MAX_DEPARTMENT_NAME_LEN
        )));
    }
    if len < MIN_DEPARTMENT_NAME_LEN {
        return Err(DomainError::validation(format!(
            "Department name must be at least {} characters long.",
            MIN_DEPARTMENT_NAME_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn person_names_must_be_present_and_short() {
        assert!(validate_first_name("Grace").is_ok());
        assert!(validate_first_name("   ").unwrap_err().is_validation());
        assert!(validate_last_name("").is_err());
        assert!(validate_last_name(&"x".repeat(50)).is_ok());
        assert!(validate_last_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn email_syntax() {
        for ok in ["a@b", "first.last@example.co.uk", "x+tag@mail-server.io"] {
            assert!(is_valid_email(ok), "{ok} should be valid");
        }
        for bad in ["", "plain", "@example.com", "a@", "a b@c.com", " a@b.com", "a@-b.com", "a@@b.com"] {
            assert!(!is_valid_email(bad), "{bad:?} should be invalid");
        }
        assert_eq!(
            validate_email(" ").unwrap_err(),
            DomainError::validation("Email is required.")
        );
        assert_eq!(
            validate_email("nope").unwrap_err(),
            DomainError::validation("Invalid email format.")
        );
    }

    #[test]
    fn hire_date_may_be_today_but_not_tomorrow() {
        let today = day(2024, 6, 15);
        assert!(validate_hire_date(today, today).is_ok());
        assert!(validate_hire_date(day(2020, 1, 1), today).is_ok());
        assert!(validate_hire_date(day(2024, 6, 16), today).is_err());
    }

    #[test]
    fn salary_must_be_positive() {
        assert!(validate_salary(Decimal::new(1, 2)).is_ok());
        assert!(validate_salary(Decimal::ZERO).is_err());
        assert!(validate_salary(Decimal::new(-100, 0)).is_err());
    }

    #[test]
    fn department_id_must_be_positive() {
        assert!(validate_department_id(1).is_ok());
        assert!(validate_department_id(0).is_err());
        assert!(validate_department_id(-4).is_err());
    }

    #[test]
    fn department_name_bounds() {
        assert!(validate_department_name("HR").is_ok());
        assert!(validate_department_name("X").is_err());
        assert!(validate_department_name("  ").is_err());
        assert!(validate_department_name(&"d".repeat(100)).is_ok());
        assert!(validate_department_name(&"d".repeat(101)).is_err());
    }
}
