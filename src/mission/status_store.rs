use super::{MissionRecord, MissionRepository};
use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Durable status log of all missions.
///
/// New missions are appended; tracker updates replace the whole file through
/// a temporary file and an atomic rename, so readers never observe a
/// half-written log.
#[derive(Debug, Clone)]
pub struct StatusStore {
    path: PathBuf,
}

#[derive(Debug)]
pub enum StoreError {
    Read(io::Error),
    Append(io::Error),
    Rewrite(io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read(e) => write!(f, "cannot read status log: {e}"),
            StoreError::Append(e) => write!(f, "cannot append to status log: {e}"),
            StoreError::Rewrite(e) => write!(f, "cannot rewrite status log: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl StatusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    /// Reads every line of the log. A missing log is an empty history.
    pub fn load(&self) -> Result<Vec<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Read(e)),
        }
    }

    /// Appends a single freshly dispatched record and syncs it to disk.
    pub fn append(&self, record: &MissionRecord) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(StoreError::Append)?;
        file.write_all(format!("{}\n", record.render_line()).as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(StoreError::Append)
    }

    /// Replaces the log with the full content of `repo`.
    pub fn rewrite(&self, repo: &MissionRepository) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(StoreError::Rewrite)?;
        tmp.write_all(repo.render().as_bytes()).map_err(StoreError::Rewrite)?;
        tmp.as_file().sync_all().map_err(StoreError::Rewrite)?;
        tmp.persist(&self.path).map_err(|e| StoreError::Rewrite(e.error))?;
        Ok(())
    }
}
