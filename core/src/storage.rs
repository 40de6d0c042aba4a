use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Backing store holding the whole leaderboard text.
///
/// Access is strictly load-modify-store from one thread, so implementations
/// only need to read or overwrite the full contents.
pub trait ScoreStorage {
    /// Current contents, `None` when nothing was ever written.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replaces the contents entirely.
    fn write(&mut self, contents: &str) -> io::Result<()>;
}

/// Plain text file, created on first write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStorage for FileStorage {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No leaderboard at {} yet", self.path.display());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ScoreStorage for MemoryStorage {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }
}
