use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Core Employee entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    #[serde(default)]
    pub id: i32, // 0 until the store assigns one
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(with = "hire_date_format")]
    pub hire_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    pub department_id: i32,
}

impl Employee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        hire_date: NaiveDate,
        salary: Decimal,
        department_id: i32,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            hire_date,
            salary,
            department_id,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Runs every field rule, stopping at the first violation.
    pub fn validate(&self, today: NaiveDate) -> Result<(), crate::DomainError> {
        use crate::validation::*;

        validate_first_name(&self.first_name)?;
        validate_last_name(&self.last_name)?;
        validate_email(&self.email)?;
        validate_hire_date(self.hire_date, today)?;
        validate_salary(self.salary)?;
        validate_department_id(self.department_id)
    }

    /// Case-insensitive substring match on first or last name.
    pub fn name_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
    }
}

/// Hire dates are written with a midnight time part; reads accept a plain date too.
mod hire_date_format {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}T00:00:00", date.format("%Y-%m-%d")))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            return Ok(date);
        }
        // Fractional seconds and offsets are dropped; only the calendar date matters.
        let trimmed = raw.get(..19).unwrap_or(&raw);
        NaiveDateTime::parse_from_str(trimmed, DATE_TIME)
            .map(|dt| dt.date())
            .map_err(|e| de::Error::custom(format!("invalid hire date '{}': {}", raw, e)))
    }
}
