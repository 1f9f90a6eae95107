use super::ChallengeStore;
use crate::error::FileError;
use crate::helpers::write_file_atomic;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;

/// The default location of the Steam Guard code file, relative to the working directory.
pub const DEFAULT_STEAM_GUARD_FILE_PATH: &str = "steam_guard_code.txt";

/// A [`ChallengeStore`] backed by a text file. Write the Steam Guard code into the file while
/// the session is waiting for it.
#[derive(Debug, Clone)]
pub struct FileChallengeStore {
    filepath: PathBuf,
}

impl Default for FileChallengeStore {
    fn default() -> Self {
        Self::new(DEFAULT_STEAM_GUARD_FILE_PATH)
    }
}

impl FileChallengeStore {
    /// Creates a store for the file at `filepath`.
    pub fn new<T>(filepath: T) -> Self
    where
        T: Into<PathBuf>,
    {
        Self {
            filepath: filepath.into(),
        }
    }
    
    /// The path of the file.
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }
}

#[async_trait]
impl ChallengeStore for FileChallengeStore {
    async fn ensure_exists(&self, seed: &str) -> Result<(), FileError> {
        if async_fs::metadata(&self.filepath).await.is_ok() {
            return Ok(());
        }
        
        write_file_atomic(&self.filepath, seed.as_bytes()).await?;
        log::info!("Created file {}. Please enter the Steam Guard code.", self.filepath.display());
        Ok(())
    }
    
    async fn read_once(&self) -> Result<String, FileError> {
        match async_fs::read_to_string(&self.filepath).await {
            Ok(contents) => Ok(contents.trim().to_string()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(error) => Err(error.into()),
        }
    }
    
    async fn clear(&self) -> Result<(), FileError> {
        match async_fs::remove_file(&self.filepath).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
