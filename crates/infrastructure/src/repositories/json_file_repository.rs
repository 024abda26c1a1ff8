use crate::storage::DataDirectory;
use async_trait::async_trait;
use domain::{next_id, remove_record, replace_record, DomainError, Record, RecordRepository};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Record store backed by one pretty-printed JSON array file.
///
/// Every operation loads the whole file and mutations rewrite it in full.
/// The mutex serialises those cycles for this file only; share one instance
/// per file so every reader and writer goes through the same lock.
pub struct JsonFileRepository<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonFileRepository<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// Opens `file_name` inside the data directory, seeding it when missing.
    pub async fn open(directory: &DataDirectory, file_name: &str) -> Result<Self, DomainError> {
        let path = directory.table(file_name).await.map_err(|e| {
            DomainError::PersistenceError(format!("Failed to initialise {}: {}", file_name, e))
        })?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Caller must hold `lock`. A missing file is an empty table; any other
    // read or parse failure is an error. Mutations load through here.
    async fn try_load(&self) -> Result<Vec<T>, DomainError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.load_error(e)),
        };

        serde_json::from_str::<Option<Vec<T>>>(&json)
            .map(Option::unwrap_or_default)
            .map_err(|e| self.load_error(e))
    }

    // Caller must hold `lock`. Listing path: failures degrade to an empty table.
    async fn load(&self) -> Vec<T> {
        match self.try_load().await {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot load data file, treating as empty");
                Vec::new()
            }
        }
    }

    // Caller must hold `lock`. Writes a sibling file, then renames it over the target.
    async fn persist(&self, records: &[T]) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(records).map_err(|e| self.save_error(e))?;

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        tokio::fs::write(&staging, json)
            .await
            .map_err(|e| self.save_error(e))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| self.save_error(e))?;

        debug!(path = %self.path.display(), count = records.len(), "data file written");
        Ok(())
    }

    fn load_error(&self, error: impl std::fmt::Display) -> DomainError {
        DomainError::PersistenceError(format!(
            "Failed to load {}: {}",
            self.path.display(),
            error
        ))
    }

    fn save_error(&self, error: impl std::fmt::Display) -> DomainError {
        DomainError::PersistenceError(format!(
            "Failed to save {}: {}",
            self.path.display(),
            error
        ))
    }
}

#[async_trait]
impl<T> RecordRepository<T> for JsonFileRepository<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    async fn find_all(&self) -> Vec<T> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn add(&self, mut record: T) -> Result<T, DomainError> {
        let _guard = self.lock.lock().await;
        let mut records = self.try_load().await?;
        record.set_id(next_id(&records));
        records.push(record.clone());
        self.persist(&records).await?;
        Ok(record)
    }

    async fn update(&self, record: &T) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut records = self.try_load().await?;
        if replace_record(&mut records, record) {
            self.persist(&records).await?;
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut records = self.try_load().await?;
        if remove_record(&mut records, id) {
            self.persist(&records).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::{Department, Employee};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn departments(tmp: &TempDir) -> JsonFileRepository<Department> {
        let dir = DataDirectory::open(tmp.path()).await.unwrap();
        JsonFileRepository::open(&dir, "departments.json").await.unwrap()
    }

    fn employee(n: u32) -> Employee {
        Employee::new(
            format!("First{}", n),
            format!("Last{}", n),
            format!("person{}@example.com", n),
            NaiveDate::from_ymd_opt(2020, 1, n.clamp(1, 28)).unwrap(),
            Decimal::new(100_000 + n as i64, 2),
            (n % 3 + 1) as i32,
        )
    }

    #[tokio::test]
    async fn first_record_gets_id_one() {
        let tmp = TempDir::new().unwrap();
        let repo = departments(&tmp).await;
        let added = repo.add(Department::new("Research")).await.unwrap();
        assert_eq!(added.id, 1);
    }

    #[tokio::test]
    async fn next_id_follows_existing_maximum() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("departments.json"),
            r#"[{ "Id": 5, "Name": "Legacy", "Employees": [] }]"#,
        )
        .unwrap();

        let repo = departments(&tmp).await;
        let added = repo.add(Department::new("Fresh")).await.unwrap();
        assert_eq!(added.id, 6);
        assert_eq!(repo.find_all().await.len(), 2);
    }

    #[tokio::test]
    async fn reload_reproduces_every_record() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("employees.json");
        std::fs::write(&path, "[]").unwrap();

        let written = {
            let repo = JsonFileRepository::<Employee>::new(&path);
            let mut written = Vec::new();
            for n in 1..=12 {
                written.push(repo.add(employee(n)).await.unwrap());
            }
            written
        };

        let reopened = JsonFileRepository::<Employee>::new(&path);
        assert_eq!(reopened.find_all().await, written);
    }

    #[tokio::test]
    async fn update_keeps_position_and_ignores_unknown_ids() {
        let tmp = TempDir::new().unwrap();
        let repo = departments(&tmp).await;
        for name in ["A1", "B2", "C3"] {
            repo.add(Department::new(name)).await.unwrap();
        }

        repo.update(&Department::with_id(2, "Bee")).await.unwrap();
        repo.update(&Department::with_id(40, "Nope")).await.unwrap();

        let names: Vec<String> = repo.find_all().await.into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["A1", "Bee", "C3"]);
    }

    #[tokio::test]
    async fn delete_removes_only_the_match() {
        let tmp = TempDir::new().unwrap();
        let repo = departments(&tmp).await;
        repo.add(Department::new("Keep")).await.unwrap();
        repo.add(Department::new("Drop")).await.unwrap();

        repo.delete(2).await.unwrap();
        repo.delete(99).await.unwrap();
        assert_eq!(repo.find_all().await, vec![Department::with_id(1, "Keep")]);
        assert_eq!(repo.find_by_id(2).await, None);
    }

    #[tokio::test]
    async fn unreadable_or_malformed_files_read_as_empty() {
        let tmp = TempDir::new().unwrap();
        let missing = JsonFileRepository::<Department>::new(tmp.path().join("absent.json"));
        assert!(missing.find_all().await.is_empty());

        let garbage = tmp.path().join("garbage.json");
        std::fs::write(&garbage, "{ not json").unwrap();
        let repo = JsonFileRepository::<Department>::new(&garbage);
        assert!(repo.find_all().await.is_empty());

        let null = tmp.path().join("null.json");
        std::fs::write(&null, "null").unwrap();
        let repo = JsonFileRepository::<Department>::new(&null);
        assert!(repo.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn writes_refuse_to_replace_a_file_they_cannot_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("departments.json");
        let original = r#"[{"Id":1,"Name":"Ops"},{"Id":2,"Name":"Sales"},{"Id":3,"Name":"HR"},{"Id":4}]"#;
        std::fs::write(&path, original).unwrap();
        let repo = JsonFileRepository::<Department>::new(&path);

        let err = repo.add(Department::new("Legal")).await.unwrap_err();
        assert!(err.is_persistence());
        let err = repo.update(&Department::with_id(1, "Operations")).await.unwrap_err();
        assert!(err.is_persistence());
        let err = repo.delete(2).await.unwrap_err();
        assert!(err.is_persistence());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
        assert!(repo.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn add_to_a_missing_file_starts_a_new_table() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonFileRepository::<Department>::new(tmp.path().join("fresh.json"));
        assert_eq!(repo.add(Department::new("First")).await.unwrap().id, 1);
        assert_eq!(repo.find_all().await, vec![Department::with_id(1, "First")]);
    }

    #[tokio::test]
    async fn write_failures_surface_as_persistence_errors() {
        let tmp = TempDir::new().unwrap();
        let repo =
            JsonFileRepository::<Department>::new(tmp.path().join("no_such_dir").join("d.json"));

        let err = repo.add(Department::new("Lost")).await.unwrap_err();
        assert!(err.is_persistence());
    }

    #[tokio::test]
    async fn file_is_indented_json_in_legacy_layout() {
        let tmp = TempDir::new().unwrap();
        let repo = departments(&tmp).await;
        repo.add(Department::new("Design")).await.unwrap();

        let text = std::fs::read_to_string(repo.path()).unwrap();
        assert!(text.contains("\n  {"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, serde_json::json!([{ "Id": 1, "Name": "Design" }]));
    }

    #[tokio::test]
    async fn concurrent_adds_get_distinct_ids() {
        let tmp = TempDir::new().unwrap();
        let repo = Arc::new(departments(&tmp).await);

        let mut handles = Vec::new();
        for n in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.add(Department::new(format!("Team {}", n))).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<i32>>());
        assert_eq!(repo.find_all().await.len(), 16);
    }
}
