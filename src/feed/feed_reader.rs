use std::{fs, io, path::PathBuf};

/// Reads the append-only arrival feed. There is no offset tracking, every
/// call returns the whole file.
#[derive(Debug, Clone)]
pub struct FeedReader {
    path: PathBuf,
}

impl FeedReader {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn read_all(&self) -> io::Result<Vec<String>> {
        Ok(fs::read_to_string(&self.path)?.lines().map(str::to_string).collect())
    }

    pub fn path(&self) -> &std::path::Path { &self.path }
}
