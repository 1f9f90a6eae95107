use super::ChallengeStore;
use crate::error::FileError;
use std::sync::Mutex;
use async_trait::async_trait;

/// A [`ChallengeStore`] held in memory. Useful when the code comes from somewhere other than a
/// file, such as an interactive prompt or an environment variable; call
/// [`MemoryChallengeStore::set`] when the code is known.
#[derive(Debug, Default)]
pub struct MemoryChallengeStore {
    code: Mutex<Option<String>>,
}

impl MemoryChallengeStore {
    /// Creates a store already containing `code`.
    pub fn new(code: &str) -> Self {
        Self {
            code: Mutex::new(Some(code.to_string())),
        }
    }
    
    /// Stores a code, replacing any existing one.
    pub fn set(&self, code: &str) {
        *self.lock() = Some(code.to_string());
    }
    
    /// Whether anything is stored, including an empty code.
    pub fn exists(&self) -> bool {
        self.lock().is_some()
    }
    
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // The value is always left consistent so a poisoned lock is still usable.
        self.code.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ChallengeStore for MemoryChallengeStore {
    async fn ensure_exists(&self, seed: &str) -> Result<(), FileError> {
        let mut code = self.lock();
        
        if code.is_none() {
            *code = Some(seed.to_string());
        }
        
        Ok(())
    }
    
    async fn read_once(&self) -> Result<String, FileError> {
        let code = self.lock()
            .as_deref()
            .map(|code| code.trim().to_string())
            .unwrap_or_default();
        
        Ok(code)
    }
    
    async fn clear(&self) -> Result<(), FileError> {
        *self.lock() = None;
        Ok(())
    }
}
