//! Storage for a pending Steam Guard code. The store is polled, not pushed: a person (or another
//! process) writes the code out-of-band and the session picks it up on its next read.

mod file;
mod memory;

pub use file::{FileChallengeStore, DEFAULT_STEAM_GUARD_FILE_PATH};
pub use memory::MemoryChallengeStore;

use crate::error::FileError;
use std::time::Duration;
use async_trait::async_trait;

/// Where a pending Steam Guard code is kept.
#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// Creates the backing artifact containing `seed` if it does not exist. Does nothing if it
    /// already exists.
    async fn ensure_exists(&self, seed: &str) -> Result<(), FileError>;
    
    /// Reads the stored code, trimmed. Returns an empty string if nothing is stored.
    async fn read_once(&self) -> Result<String, FileError>;
    
    /// Removes the backing artifact. Succeeds if it is already absent.
    async fn clear(&self) -> Result<(), FileError>;
    
    /// Reads the store every `interval` until a non-empty code is found. There is no timeout;
    /// wrap the call in [`tokio::time::timeout`] if you need one.
    async fn poll_until_present(&self, interval: Duration) -> String {
        loop {
            tokio::time::sleep(interval).await;
            
            match self.read_once().await {
                Ok(code) if !code.is_empty() => return code,
                Ok(_) => log::info!("Waiting for Steam Guard code..."),
                Err(error) => log::warn!("Error reading Steam Guard code: {error}"),
            }
        }
    }
}
