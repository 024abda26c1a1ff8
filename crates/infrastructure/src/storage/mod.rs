use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory holding the JSON table files.
///
/// Opening it creates the directory and seeds every requested file with an
/// empty array when missing; existing files are left untouched.
#[derive(Debug, Clone)]
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub async fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `file_name` inside the directory, seeded with `[]` if absent.
    pub async fn table(&self, file_name: &str) -> io::Result<PathBuf> {
        let path = self.root.join(file_name);
        if !tokio::fs::try_exists(&path).await? {
            info!(path = %path.display(), "seeding empty data file");
            tokio::fs::write(&path, "[]").await?;
        }
        Ok(path)
    }
}
